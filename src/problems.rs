//! Problem-text segmentation and collection.
//!
//! Contest papers number their problems 1..=N, one or more lines each.
//! A line opening with a problem-number prefix starts a new problem;
//! following lines append to the problem currently open. Embedded images
//! encountered while a problem is open attach to that problem.

use crate::document::DocumentSource;
use crate::error::Result;
use std::fs;
use std::path::PathBuf;

/// A segmented contest problem.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct Problem {
    /// Sequential problem number, starting at 1
    pub number: usize,
    /// Concatenated problem text
    pub text: String,
    /// Paths of images attached to this problem, in encounter order
    pub images: Vec<String>,
}

/// Configuration for problem extraction.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ProblemConfig {
    /// Upper bound on problems; later segments are discarded
    pub max_problems: usize,
    /// Zero-based first page carrying problem content; earlier pages
    /// (the instruction sheet) are skipped
    pub first_content_page: usize,
    /// Directory embedded images are written to
    pub image_dir: PathBuf,
}

impl Default for ProblemConfig {
    fn default() -> Self {
        Self {
            max_problems: 25,
            first_content_page: 1,
            image_dir: PathBuf::from("problem_images"),
        }
    }
}

/// Splits page text into numbered problems.
#[derive(Debug, Clone)]
pub struct ProblemSplitter {
    max_problems: usize,
}

impl ProblemSplitter {
    /// Create a splitter capped at `max_problems`.
    pub fn new(max_problems: usize) -> Self {
        Self { max_problems }
    }

    /// Segment one page of text, appending to `problems`.
    ///
    /// Problems are numbered by encounter order, not by the digits on
    /// the line; contest sources occasionally misprint their numbering
    /// and the sequential count is authoritative.
    pub fn split_page(&self, text: &str, problems: &mut Vec<Problem>) {
        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            if self.opens_problem(line) {
                problems.push(Problem {
                    number: problems.len() + 1,
                    text: line.to_string(),
                    images: Vec::new(),
                });
            } else if let Some(current) = problems.last_mut() {
                current.text.push(' ');
                current.text.push_str(line);
            }
        }
    }

    /// A line opens a problem when it starts with an integer in
    /// `1..=max_problems`.
    fn opens_problem(&self, line: &str) -> bool {
        let digits: String = line.chars().take_while(char::is_ascii_digit).collect();
        match digits.parse::<usize>() {
            Ok(n) => n >= 1 && n <= self.max_problems,
            Err(_) => false,
        }
    }
}

/// Walks a document's content pages, segmenting problems and saving
/// embedded images alongside them.
pub struct ProblemExtractor {
    config: ProblemConfig,
}

impl ProblemExtractor {
    /// Create an extractor with the given configuration.
    pub fn new(config: ProblemConfig) -> Self {
        Self { config }
    }

    /// Extract at most `max_problems` problems from `source`.
    ///
    /// Embedded images are written under the configured image directory
    /// as `q<problem>p<page>i<k>.png` and attached to the problem open
    /// at the time of encounter.
    pub fn run(&self, source: &dyn DocumentSource) -> Result<Vec<Problem>> {
        let splitter = ProblemSplitter::new(self.config.max_problems);
        let page_count = source.page_count()?;
        let mut problems = Vec::new();

        for page_index in self.config.first_content_page..page_count {
            let text = source.page_text(page_index)?;
            splitter.split_page(&text, &mut problems);

            let images = source.embedded_images(page_index)?;
            if images.is_empty() {
                continue;
            }
            fs::create_dir_all(&self.config.image_dir)?;
            for image in &images {
                let problem_number = problems.len();
                let filename = format!(
                    "q{}p{}i{}.png",
                    problem_number,
                    page_index + 1,
                    image.index + 1
                );
                let path = self.config.image_dir.join(&filename);
                image.save_png(&path)?;
                if let Some(current) = problems.last_mut() {
                    current.images.push(path.display().to_string());
                }
            }
            log::info!(
                "page {}: {} embedded images saved",
                page_index + 1,
                images.len()
            );
        }

        problems.truncate(self.config.max_problems);
        Ok(problems)
    }
}
