//! Brightness-threshold detection strategy.
//!
//! Binarizes the inverted intensity image - dark foreground on a light
//! page - and takes the bounding box of each connected foreground
//! component. Works well for filled diagram shapes; faint outlines are
//! the edge strategy's job.

use super::{component_bounding_boxes, DetectionStrategy};
use crate::geometry::Rect;
use image::{GrayImage, Luma};

/// Parameters for the threshold strategy.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct ThresholdConfig {
    /// Brightness cutoff: pixels strictly darker become foreground
    pub cutoff: u8,
    /// Use a locally-adaptive cutoff with this block radius instead of
    /// the fixed one
    pub adaptive_block_radius: Option<u32>,
}

impl Default for ThresholdConfig {
    fn default() -> Self {
        Self {
            cutoff: 200,
            adaptive_block_radius: None,
        }
    }
}

/// Detects filled shapes by inverted binarization.
pub struct ThresholdStrategy {
    config: ThresholdConfig,
}

impl ThresholdStrategy {
    /// Create the strategy with the given parameters.
    pub fn new(config: ThresholdConfig) -> Self {
        Self { config }
    }
}

impl DetectionStrategy for ThresholdStrategy {
    fn name(&self) -> &'static str {
        "threshold"
    }

    fn detect(&self, gray: &GrayImage) -> Vec<Rect> {
        let mask = match self.config.adaptive_block_radius {
            Some(block_radius) => {
                // Adaptive thresholding marks pixels brighter than their
                // local mean; invert so dark strokes become foreground.
                let mut mask = imageproc::contrast::adaptive_threshold(gray, block_radius);
                image::imageops::invert(&mut mask);
                mask
            },
            None => binarize_inverted(gray, self.config.cutoff),
        };
        component_bounding_boxes(&mask)
    }
}

/// Inverted binary threshold: pixels strictly below `cutoff` become
/// foreground (255), all others background (0).
fn binarize_inverted(gray: &GrayImage, cutoff: u8) -> GrayImage {
    let (width, height) = gray.dimensions();
    let mut mask = GrayImage::new(width, height);
    for (x, y, pixel) in gray.enumerate_pixels() {
        let value = if pixel.0[0] < cutoff { 255 } else { 0 };
        mask.put_pixel(x, y, Luma([value]));
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;

    fn light_page(width: u32, height: u32) -> GrayImage {
        GrayImage::from_pixel(width, height, Luma([255]))
    }

    fn paint(gray: &mut GrayImage, rect: Rect, value: u8) {
        for y in rect.top()..rect.bottom() {
            for x in rect.left()..rect.right() {
                gray.put_pixel(x, y, Luma([value]));
            }
        }
    }

    #[test]
    fn test_binarize_inverted() {
        let mut gray = light_page(10, 10);
        paint(&mut gray, Rect::new(2, 2, 3, 3), 50);

        let mask = binarize_inverted(&gray, 200);
        assert_eq!(mask.get_pixel(3, 3).0[0], 255);
        assert_eq!(mask.get_pixel(0, 0).0[0], 0);
    }

    #[test]
    fn test_detect_filled_shape() {
        let mut gray = light_page(400, 400);
        paint(&mut gray, Rect::new(60, 80, 120, 100), 0);

        let strategy = ThresholdStrategy::new(ThresholdConfig::default());
        let boxes = strategy.detect(&gray);
        assert_eq!(boxes, vec![Rect::new(60, 80, 120, 100)]);
    }

    #[test]
    fn test_detect_ignores_near_white_noise() {
        let mut gray = light_page(200, 200);
        // Brighter than the cutoff: not foreground.
        paint(&mut gray, Rect::new(20, 20, 50, 50), 230);

        let strategy = ThresholdStrategy::new(ThresholdConfig::default());
        assert!(strategy.detect(&gray).is_empty());
    }

    #[test]
    fn test_detect_multiple_shapes() {
        let mut gray = light_page(500, 500);
        paint(&mut gray, Rect::new(30, 30, 80, 80), 10);
        paint(&mut gray, Rect::new(300, 350, 100, 60), 10);

        let strategy = ThresholdStrategy::new(ThresholdConfig::default());
        let mut boxes = strategy.detect(&gray);
        boxes.sort_by_key(|r| (r.y, r.x));
        assert_eq!(
            boxes,
            vec![Rect::new(30, 30, 80, 80), Rect::new(300, 350, 100, 60)]
        );
    }
}
