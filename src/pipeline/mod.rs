//! The diagram extraction pipeline.
//!
//! One orchestration replaces the family of tuned script reruns:
//!
//! ```text
//! Document page
//!     |
//! [Rasterizer]      render at configured DPI, normalize to RGB
//!     |
//! [RegionDetector]  threshold + edge strategies, size filter,
//!     |             exclusion zones, relaxation fallback
//! [merge_regions]   containment elimination, union to fixed point
//!     |
//! [DiagramExporter] pad, clamp, crop, write page<N>_diagram<K>.png
//! ```
//!
//! Pages are processed one at a time, synchronously; no state is shared
//! across page iterations beyond the collected report.

pub mod config;

pub use config::{ExtractConfig, RenderConfig};

use crate::detect::RegionDetector;
use crate::document::DocumentSource;
use crate::error::Result;
use crate::export::{DiagramExporter, ExtractedDiagramRef};
use crate::merge::merge_regions;

/// Extraction results for one page.
#[derive(Debug, Clone)]
pub struct PageReport {
    /// Zero-based page index
    pub page_index: usize,
    /// Candidate count after detection, before merging
    pub candidates: usize,
    /// Diagrams written for this page, in naming order
    pub diagrams: Vec<ExtractedDiagramRef>,
}

/// Extraction results for a whole document.
#[derive(Debug, Clone, Default)]
pub struct ExtractReport {
    /// Per-page results, in page order
    pub pages: Vec<PageReport>,
}

impl ExtractReport {
    /// Total number of diagrams written across all pages.
    pub fn total_diagrams(&self) -> usize {
        self.pages.iter().map(|p| p.diagrams.len()).sum()
    }
}

/// Orchestrates rasterization, detection, merging and export.
pub struct DiagramPipeline {
    config: ExtractConfig,
    detector: RegionDetector,
    exporter: DiagramExporter,
}

impl Default for DiagramPipeline {
    fn default() -> Self {
        Self::new()
    }
}

impl DiagramPipeline {
    /// Create a pipeline with default configuration.
    pub fn new() -> Self {
        Self::with_config(ExtractConfig::default())
    }

    /// Create a pipeline with custom configuration.
    pub fn with_config(config: ExtractConfig) -> Self {
        let detector = RegionDetector::new(config.detector.clone());
        let exporter = DiagramExporter::new(config.export.clone());
        Self {
            config,
            detector,
            exporter,
        }
    }

    /// Run the pipeline over every page of `source`.
    ///
    /// Returns per-page diagram counts alongside the written artifact
    /// references. A page with no detectable diagrams contributes an
    /// empty entry; that is a valid result, not an error.
    pub fn run(&self, source: &dyn DocumentSource) -> Result<ExtractReport> {
        let page_count = source.page_count()?;
        log::info!("processing {page_count} pages");

        let mut report = ExtractReport::default();
        for page_index in 0..page_count {
            let page = self.process_page(source, page_index)?;
            log::info!(
                "page {}: {} candidates, {} diagrams",
                page_index + 1,
                page.candidates,
                page.diagrams.len()
            );
            report.pages.push(page);
        }

        log::info!("extracted {} diagrams", report.total_diagrams());
        Ok(report)
    }

    /// Run detection, merging and export for a single page.
    pub fn process_page(
        &self,
        source: &dyn DocumentSource,
        page_index: usize,
    ) -> Result<PageReport> {
        let raster = source.render_page(page_index, self.config.render.dpi)?;
        let gray = raster.to_gray();

        let candidates = self.detector.detect(page_index, &gray);
        let merged = merge_regions(&candidates, &self.config.merge);
        log::debug!(
            "page {}: {} candidates merged into {} regions",
            page_index + 1,
            candidates.len(),
            merged.len()
        );

        let diagrams = self.exporter.export_page(&raster, &merged, page_index + 1)?;

        Ok(PageReport {
            page_index,
            candidates: candidates.len(),
            diagrams,
        })
    }
}
