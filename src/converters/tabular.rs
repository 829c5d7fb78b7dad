//! CSV spreadsheet converter.
//!
//! One row per problem: number, text, and the attached image paths
//! joined by `;`.

use super::ProblemConverter;
use crate::error::{Error, Result};
use crate::problems::Problem;

/// A spreadsheet row for one problem.
#[derive(Debug, serde::Serialize)]
struct ProblemRecord<'a> {
    number: usize,
    text: &'a str,
    images: String,
}

/// Renders problems as CSV rows with a header line.
#[derive(Debug, Clone, Default)]
pub struct CsvConverter;

impl CsvConverter {
    /// Create a converter.
    pub fn new() -> Self {
        Self
    }
}

impl ProblemConverter for CsvConverter {
    fn convert(&self, problems: &[Problem]) -> Result<String> {
        let mut writer = csv::Writer::from_writer(Vec::new());
        for problem in problems {
            writer
                .serialize(ProblemRecord {
                    number: problem.number,
                    text: &problem.text,
                    images: problem.images.join(";"),
                })
                .map_err(|e| Error::Export(e.to_string()))?;
        }
        let bytes = writer
            .into_inner()
            .map_err(|e| Error::Export(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| Error::Export(e.to_string()))
    }
}
