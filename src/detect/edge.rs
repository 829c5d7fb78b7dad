//! Edge-based detection strategy.
//!
//! Faint outline drawings barely move a brightness histogram but still
//! produce strong intensity gradients. This strategy runs Canny edge
//! detection, dilates the edge mask to bridge small gaps in the
//! outline, and boxes the resulting connected components.

use super::{component_bounding_boxes, DetectionStrategy};
use crate::geometry::Rect;
use image::GrayImage;
use imageproc::distance_transform::Norm;
use imageproc::edges::canny;
use imageproc::morphology::dilate;

/// Parameters for the edge strategy.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct EdgeConfig {
    /// Canny low hysteresis threshold
    pub low_threshold: f32,
    /// Canny high hysteresis threshold
    pub high_threshold: f32,
    /// Dilation radius in pixels applied to the edge mask
    pub dilate_px: u8,
}

impl Default for EdgeConfig {
    fn default() -> Self {
        Self {
            low_threshold: 50.0,
            high_threshold: 150.0,
            dilate_px: 2,
        }
    }
}

/// Detects outline drawings from gradient edges.
pub struct EdgeStrategy {
    config: EdgeConfig,
}

impl EdgeStrategy {
    /// Create the strategy with the given parameters.
    pub fn new(config: EdgeConfig) -> Self {
        Self { config }
    }
}

impl DetectionStrategy for EdgeStrategy {
    fn name(&self) -> &'static str {
        "edge"
    }

    fn detect(&self, gray: &GrayImage) -> Vec<Rect> {
        let edges = canny(gray, self.config.low_threshold, self.config.high_threshold);
        let mask = if self.config.dilate_px > 0 {
            dilate(&edges, Norm::LInf, self.config.dilate_px)
        } else {
            edges
        };
        component_bounding_boxes(&mask)
    }
}
