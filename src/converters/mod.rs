//! Output converters for segmented problems.
//!
//! Converters are trait-based so output formats stay pluggable: the
//! same `Problem` slice renders to a LaTeX document or to CSV rows
//! without the extraction stages knowing about either.

pub mod latex;
pub mod tabular;

pub use latex::LatexConverter;
pub use tabular::CsvConverter;

use crate::error::Result;
use crate::problems::Problem;

/// Convert segmented problems to an output document.
pub trait ProblemConverter {
    /// Render `problems` to the converter's output format.
    fn convert(&self, problems: &[Problem]) -> Result<String>;
}
