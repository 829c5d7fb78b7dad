// Allow some clippy lints that are too pedantic for this project
#![allow(clippy::needless_range_loop)]
#![allow(clippy::match_like_matches_macro)]
// Allow unused for tests
#![cfg_attr(test, allow(dead_code))]

//! # Contest Extract
//!
//! Extraction toolkit for math-contest papers: renders PDF pages to
//! rasters, detects and merges diagram regions, crops them to image
//! files, and segments the problem text for LaTeX or spreadsheet
//! export.
//!
//! ## Diagram extraction
//!
//! The core pipeline rasterizes each page at a configured resolution,
//! finds candidate regions with interchangeable threshold- and
//! edge-based strategies, consolidates overlapping and nested
//! candidates to a fixed point, and writes padded crops with
//! deterministic `page<N>_diagram<K>.png` names.
//!
//! ```ignore
//! use contest_extract::{DiagramPipeline, PdfiumSource};
//!
//! # fn main() -> contest_extract::Result<()> {
//! let source = PdfiumSource::open("2025Contest.pdf")?;
//! let report = DiagramPipeline::new().run(&source)?;
//! for page in &report.pages {
//!     println!("page {}: {} diagrams", page.page_index + 1, page.diagrams.len());
//! }
//! println!("total: {}", report.total_diagrams());
//! # Ok(())
//! # }
//! ```
//!
//! ## Problem extraction
//!
//! ```ignore
//! use contest_extract::converters::{LatexConverter, ProblemConverter};
//! use contest_extract::problems::{ProblemConfig, ProblemExtractor};
//! use contest_extract::PdfiumSource;
//!
//! # fn main() -> contest_extract::Result<()> {
//! let source = PdfiumSource::open("2025Contest.pdf")?;
//! let problems = ProblemExtractor::new(ProblemConfig::default()).run(&source)?;
//! let latex = LatexConverter::new().convert(&problems)?;
//! std::fs::write("problems.tex", latex)?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]

// Error handling
pub mod error;

// Geometry and rasters
pub mod geometry;
pub mod raster;

// Document access
pub mod document;

// Region detection and consolidation
pub mod detect;
pub mod merge;

// Cropping and artifact export
pub mod export;

// Pipeline orchestration and configuration
pub mod pipeline;

// Problem segmentation and output conversion
pub mod converters;
pub mod problems;

// Re-exports
pub use document::{DocumentSource, EmbeddedImage, PdfiumSource};
pub use error::{Error, Result};
pub use export::{ExtractedDiagramRef, PaddingMode};
pub use geometry::Rect;
pub use pipeline::{DiagramPipeline, ExtractConfig, ExtractReport, PageReport};
pub use raster::PageRaster;

// Version info
/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
