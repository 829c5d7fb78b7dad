//! Cropping and export of merged regions to image files.
//!
//! Each final region is padded as a function of its own size, clamped to
//! the raster, cropped, and written as a PNG named deterministically
//! from the page number and a per-page sequence index. Regions are
//! sorted by `(y, x)` before indices are assigned so re-running the
//! pipeline on unchanged input produces an identical filename sequence.

use crate::document::EmbeddedImage;
use crate::error::{Error, Result};
use crate::geometry::Rect;
use crate::raster::PageRaster;
use std::fs;
use std::path::PathBuf;

/// How much padding a region receives before cropping.
///
/// The source heuristics disagreed on padding semantics - a fixed pixel
/// amount, a ratio of the region's largest dimension, or ratio plus a
/// floor - so all three are valid modes.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub enum PaddingMode {
    /// A fixed number of pixels on every side
    Fixed {
        /// Padding in pixels
        px: u32,
    },
    /// A fraction of the region's largest dimension
    Ratio {
        /// Padding as a fraction of `max(width, height)`
        ratio: f32,
    },
    /// A fraction of the largest dimension, but never less than a floor
    RatioWithMin {
        /// Padding as a fraction of `max(width, height)`
        ratio: f32,
        /// Minimum padding in pixels
        min_px: u32,
    },
}

impl Default for PaddingMode {
    fn default() -> Self {
        Self::RatioWithMin {
            ratio: 0.05,
            min_px: 8,
        }
    }
}

impl PaddingMode {
    /// Compute the padding in pixels for a region.
    pub fn padding_for(&self, region: &Rect) -> u32 {
        let largest = region.width.max(region.height);
        match *self {
            Self::Fixed { px } => px,
            Self::Ratio { ratio } => (ratio * largest as f32).round() as u32,
            Self::RatioWithMin { ratio, min_px } => {
                ((ratio * largest as f32).round() as u32).max(min_px)
            },
        }
    }
}

/// Export configuration.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExportConfig {
    /// Directory artifacts are written to; created if absent
    pub output_dir: PathBuf,
    /// Padding applied to each region before cropping
    pub padding: PaddingMode,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("extracted_diagrams"),
            padding: PaddingMode::default(),
        }
    }
}

/// Reference to an exported diagram file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractedDiagramRef {
    /// Filename of the written image, e.g. `page2_diagram1.png`
    pub filename: String,
    /// One-based page number the diagram came from
    pub page_number: usize,
    /// The padded, clamped region that was cropped
    pub region: Rect,
}

/// Crops padded regions out of page rasters and writes them to disk.
pub struct DiagramExporter {
    config: ExportConfig,
}

impl DiagramExporter {
    /// Create an exporter with the given configuration.
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Pad a region according to the configured mode and clamp it to the
    /// raster bounds.
    pub fn padded_region(&self, region: &Rect, raster: &PageRaster) -> Rect {
        region
            .expand(self.config.padding.padding_for(region))
            .clamp_to(raster.width(), raster.height())
    }

    /// Export every region of one page.
    ///
    /// `page_number` is one-based and becomes part of each filename.
    /// Write failures propagate; the caller decides whether to abort the
    /// run or skip the artifact.
    pub fn export_page(
        &self,
        raster: &PageRaster,
        regions: &[Rect],
        page_number: usize,
    ) -> Result<Vec<ExtractedDiagramRef>> {
        fs::create_dir_all(&self.config.output_dir)?;

        let mut ordered = regions.to_vec();
        ordered.sort_by_key(|r| (r.y, r.x));

        let mut refs = Vec::with_capacity(ordered.len());
        for (sequence, region) in ordered.iter().enumerate() {
            let padded = self.padded_region(region, raster);
            if padded.is_empty() {
                log::warn!(
                    "page {page_number}: region {region:?} clamped to nothing, skipping"
                );
                continue;
            }
            let crop = raster.crop(&padded)?;

            let filename = format!("page{}_diagram{}.png", page_number, sequence + 1);
            let path = self.config.output_dir.join(&filename);
            crop.save(&path).map_err(|e| Error::Image(e.to_string()))?;

            refs.push(ExtractedDiagramRef {
                filename,
                page_number,
                region: padded,
            });
        }
        Ok(refs)
    }

    /// Write a page's embedded images as `page<N>_img<K>.png` files.
    ///
    /// Returns the written filenames in embedding order.
    pub fn export_embedded(
        &self,
        images: &[EmbeddedImage],
        page_number: usize,
    ) -> Result<Vec<String>> {
        fs::create_dir_all(&self.config.output_dir)?;

        let mut filenames = Vec::with_capacity(images.len());
        for image in images {
            let filename = format!("page{}_img{}.png", page_number, image.index + 1);
            image.save_png(self.config.output_dir.join(&filename))?;
            filenames.push(filename);
        }
        Ok(filenames)
    }
}
