//! Candidate-region detection on page rasters.
//!
//! Contest diagrams come in two textures: filled shapes that survive a
//! plain brightness binarization, and faint outline drawings that only
//! show up as intensity gradients. The detector therefore supports two
//! interchangeable strategies behind [`DetectionStrategy`] - threshold
//! and edge based - usable independently or combined, with their
//! candidate sets concatenated before merging.

pub mod edge;
pub mod threshold;

pub use edge::{EdgeConfig, EdgeStrategy};
pub use threshold::{ThresholdConfig, ThresholdStrategy};

use crate::geometry::Rect;
use image::GrayImage;
use imageproc::contours::find_contours;

/// A pluggable candidate-region detection strategy.
///
/// Strategies consume a single-channel intensity view of a page raster
/// and produce raw bounding boxes of connected foreground components,
/// before any size filtering or exclusion.
pub trait DetectionStrategy {
    /// Short name used in log output.
    fn name(&self) -> &'static str;

    /// Produce raw candidate rectangles for the given intensity image.
    fn detect(&self, gray: &GrayImage) -> Vec<Rect>;
}

/// A per-page rule excluding known non-content regions.
///
/// The contest papers carry an instructional header on a known page: a
/// wide, short band at the top. A candidate is excluded when the zone
/// applies to the current page and the candidate starts within the top
/// fraction of the page, spans nearly the full page width, and is short
/// relative to the page height.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ExclusionZone {
    /// Zero-based page this zone applies to; `None` applies everywhere
    pub page: Option<usize>,
    /// Candidate top edge must lie above this fraction of page height
    pub top_fraction: f32,
    /// Candidate width must be at least this fraction of page width
    pub min_width_fraction: f32,
    /// Candidate height must be at most this fraction of page height
    pub max_height_fraction: f32,
}

impl ExclusionZone {
    /// Check whether `candidate` is excluded on the given page.
    pub fn excludes(
        &self,
        page_index: usize,
        candidate: &Rect,
        page_width: u32,
        page_height: u32,
    ) -> bool {
        if let Some(page) = self.page {
            if page != page_index {
                return false;
            }
        }
        let top_limit = self.top_fraction * page_height as f32;
        let min_width = self.min_width_fraction * page_width as f32;
        let max_height = self.max_height_fraction * page_height as f32;
        (candidate.top() as f32) < top_limit
            && candidate.width as f32 >= min_width
            && candidate.height as f32 <= max_height
    }
}

/// Configuration for candidate detection.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct DetectorConfig {
    /// Minimum candidate width in pixels
    pub min_width: u32,
    /// Minimum candidate height in pixels
    pub min_height: u32,
    /// Relaxed minimum width, used when the primary filter finds nothing
    pub relaxed_min_width: u32,
    /// Relaxed minimum height, used when the primary filter finds nothing
    pub relaxed_min_height: u32,
    /// Run the brightness-threshold strategy
    pub use_threshold: bool,
    /// Run the edge-detection strategy
    pub use_edges: bool,
    /// Threshold strategy parameters
    pub threshold: ThresholdConfig,
    /// Edge strategy parameters
    pub edge: EdgeConfig,
    /// Per-page non-content exclusion rules
    pub exclusion_zones: Vec<ExclusionZone>,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            min_width: 100,
            min_height: 100,
            relaxed_min_width: 50,
            relaxed_min_height: 50,
            use_threshold: true,
            use_edges: true,
            threshold: ThresholdConfig::default(),
            edge: EdgeConfig::default(),
            // The first page of a contest paper is the instruction sheet;
            // its near-full-width header band is not a diagram.
            exclusion_zones: vec![ExclusionZone {
                page: Some(0),
                top_fraction: 0.25,
                min_width_fraction: 0.85,
                max_height_fraction: 0.2,
            }],
        }
    }
}

/// Detects candidate diagram regions on a page raster.
pub struct RegionDetector {
    config: DetectorConfig,
    strategies: Vec<Box<dyn DetectionStrategy>>,
}

impl RegionDetector {
    /// Create a detector, instantiating the strategies the configuration
    /// enables.
    pub fn new(config: DetectorConfig) -> Self {
        let mut strategies: Vec<Box<dyn DetectionStrategy>> = Vec::new();
        if config.use_threshold {
            strategies.push(Box::new(ThresholdStrategy::new(config.threshold.clone())));
        }
        if config.use_edges {
            strategies.push(Box::new(EdgeStrategy::new(config.edge.clone())));
        }
        Self { config, strategies }
    }

    /// Produce the candidate set for one page.
    ///
    /// Runs every enabled strategy, filters by the primary minimum size
    /// and the exclusion zones, and falls back to the relaxed minimum
    /// size when the primary filter leaves nothing. An empty result
    /// after relaxation is a valid empty candidate set, not an error.
    pub fn detect(&self, page_index: usize, gray: &GrayImage) -> Vec<Rect> {
        let (page_width, page_height) = gray.dimensions();

        let mut raw = Vec::new();
        for strategy in &self.strategies {
            let found = strategy.detect(gray);
            log::debug!(
                "page {}: strategy {} found {} raw candidates",
                page_index + 1,
                strategy.name(),
                found.len()
            );
            raw.extend(found);
        }

        let primary = self.filter(
            page_index,
            &raw,
            self.config.min_width,
            self.config.min_height,
            page_width,
            page_height,
        );
        if !primary.is_empty() {
            return primary;
        }

        log::debug!(
            "page {}: no candidates at {}x{} minimum, retrying relaxed",
            page_index + 1,
            self.config.min_width,
            self.config.min_height
        );
        self.filter(
            page_index,
            &raw,
            self.config.relaxed_min_width,
            self.config.relaxed_min_height,
            page_width,
            page_height,
        )
    }

    fn filter(
        &self,
        page_index: usize,
        raw: &[Rect],
        min_width: u32,
        min_height: u32,
        page_width: u32,
        page_height: u32,
    ) -> Vec<Rect> {
        raw.iter()
            .copied()
            .filter(|r| r.width >= min_width && r.height >= min_height)
            .filter(|r| {
                !self
                    .config
                    .exclusion_zones
                    .iter()
                    .any(|zone| zone.excludes(page_index, r, page_width, page_height))
            })
            .collect()
    }
}

/// Bounding boxes of the outer connected components of a binary mask.
///
/// Foreground is any non-zero pixel. Nested contours are ignored; only
/// outermost components produce a box, matching external-contour
/// retrieval.
pub(crate) fn component_bounding_boxes(mask: &GrayImage) -> Vec<Rect> {
    find_contours::<i32>(mask)
        .iter()
        .filter(|contour| contour.parent.is_none())
        .filter_map(|contour| {
            let mut min_x = i32::MAX;
            let mut min_y = i32::MAX;
            let mut max_x = i32::MIN;
            let mut max_y = i32::MIN;
            for point in &contour.points {
                min_x = min_x.min(point.x);
                min_y = min_y.min(point.y);
                max_x = max_x.max(point.x);
                max_y = max_y.max(point.y);
            }
            if min_x > max_x {
                return None;
            }
            Some(Rect::new(
                min_x as u32,
                min_y as u32,
                (max_x - min_x + 1) as u32,
                (max_y - min_y + 1) as u32,
            ))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    /// Paint a filled foreground rectangle into a mask.
    fn fill_rect(mask: &mut GrayImage, rect: Rect, value: u8) {
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                mask.put_pixel(x, y, Luma([value]));
            }
        }
    }

    #[test]
    fn test_component_bounding_boxes_single() {
        let mut mask = GrayImage::new(200, 200);
        fill_rect(&mut mask, Rect::new(40, 50, 60, 30), 255);

        let boxes = component_bounding_boxes(&mask);
        assert_eq!(boxes, vec![Rect::new(40, 50, 60, 30)]);
    }

    #[test]
    fn test_component_bounding_boxes_ignores_holes() {
        let mut mask = GrayImage::new(200, 200);
        fill_rect(&mut mask, Rect::new(20, 20, 100, 100), 255);
        // Punch a hole; the inner contour must not produce a box.
        fill_rect(&mut mask, Rect::new(50, 50, 30, 30), 0);

        let boxes = component_bounding_boxes(&mask);
        assert_eq!(boxes, vec![Rect::new(20, 20, 100, 100)]);
    }

    #[test]
    fn test_component_bounding_boxes_multiple() {
        let mut mask = GrayImage::new(300, 300);
        fill_rect(&mut mask, Rect::new(10, 10, 40, 40), 255);
        fill_rect(&mut mask, Rect::new(200, 200, 50, 60), 255);

        let mut boxes = component_bounding_boxes(&mask);
        boxes.sort_by_key(|r| (r.y, r.x));
        assert_eq!(
            boxes,
            vec![Rect::new(10, 10, 40, 40), Rect::new(200, 200, 50, 60)]
        );
    }

    #[test]
    fn test_exclusion_zone_matches_header_band() {
        let zone = ExclusionZone {
            page: Some(0),
            top_fraction: 0.25,
            min_width_fraction: 0.85,
            max_height_fraction: 0.2,
        };
        let header = Rect::new(20, 10, 900, 80);
        let diagram = Rect::new(300, 400, 200, 200);

        assert!(zone.excludes(0, &header, 1000, 1200));
        assert!(!zone.excludes(0, &diagram, 1000, 1200));
        // Same geometry on another page is kept.
        assert!(!zone.excludes(3, &header, 1000, 1200));
    }

    #[test]
    fn test_exclusion_zone_any_page() {
        let zone = ExclusionZone {
            page: None,
            top_fraction: 0.1,
            min_width_fraction: 0.9,
            max_height_fraction: 0.1,
        };
        let band = Rect::new(0, 0, 1000, 50);
        assert!(zone.excludes(0, &band, 1000, 1000));
        assert!(zone.excludes(7, &band, 1000, 1000));
    }

    #[test]
    fn test_detector_relaxation() {
        let config = DetectorConfig {
            use_edges: false,
            exclusion_zones: Vec::new(),
            ..DetectorConfig::default()
        };
        let detector = RegionDetector::new(config);

        // A 60x60 blob: below the 100 px primary minimum, above the
        // 50 px relaxed minimum.
        let mut gray = GrayImage::from_pixel(400, 400, Luma([255]));
        fill_dark(&mut gray, Rect::new(100, 100, 60, 60));

        let candidates = detector.detect(1, &gray);
        assert_eq!(candidates.len(), 1);
        assert_eq!(candidates[0], Rect::new(100, 100, 60, 60));
    }

    #[test]
    fn test_detector_empty_after_relaxation_is_ok() {
        let config = DetectorConfig {
            use_edges: false,
            exclusion_zones: Vec::new(),
            ..DetectorConfig::default()
        };
        let detector = RegionDetector::new(config);

        let gray = GrayImage::from_pixel(400, 400, Luma([255]));
        assert!(detector.detect(0, &gray).is_empty());
    }

    /// Paint a dark region onto a light intensity image.
    fn fill_dark(gray: &mut GrayImage, rect: Rect) {
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                gray.put_pixel(x, y, Luma([0]));
            }
        }
    }
}
