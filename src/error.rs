//! Error types for the extraction library.
//!
//! This module defines all error types that can occur while reading contest
//! documents and extracting diagrams and problems from them.

/// Result type alias for extraction operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during extraction.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Document could not be opened or is unreadable
    #[error("Failed to open document: {0}")]
    Document(String),

    /// A page could not be rendered to a raster
    #[error("Failed to render page {page}: {reason}")]
    Render {
        /// Zero-based page index
        page: usize,
        /// Reason for the render failure
        reason: String,
    },

    /// Page index outside the document
    #[error("Page index {index} out of bounds (document has {count} pages)")]
    PageOutOfBounds {
        /// Requested zero-based page index
        index: usize,
        /// Number of pages in the document
        count: usize,
    },

    /// Image decoding or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// A crop region does not lie within its source raster
    #[error("Region ({x}, {y}) {width}x{height} exceeds raster bounds {raster_width}x{raster_height}")]
    RegionOutOfBounds {
        /// Region x origin
        x: u32,
        /// Region y origin
        y: u32,
        /// Region width
        width: u32,
        /// Region height
        height: u32,
        /// Raster width
        raster_width: u32,
        /// Raster height
        raster_height: u32,
    },

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Output conversion or export error
    #[error("Export error: {0}")]
    Export(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
