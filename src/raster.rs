//! Page rasters - fixed-size RGB pixel grids produced by rendering a page.
//!
//! A [`PageRaster`] is created fresh for each page, consumed by the
//! detection and export stages, and discarded; no raster survives across
//! page iterations.

use crate::error::{Error, Result};
use crate::geometry::Rect;
use image::{DynamicImage, GrayImage, RgbImage};
use std::path::Path;

/// An RGB raster of a single rendered page.
///
/// Channel count is normalized to 3-channel RGB on construction
/// regardless of the source color space: alpha channels are dropped
/// against the existing background and single-channel sources are
/// expanded.
#[derive(Debug, Clone)]
pub struct PageRaster {
    pixels: RgbImage,
}

impl PageRaster {
    /// Wrap an already-RGB image buffer.
    pub fn new(pixels: RgbImage) -> Self {
        Self { pixels }
    }

    /// Build a raster from any decoded image, normalizing to RGB.
    pub fn from_dynamic(image: DynamicImage) -> Self {
        Self {
            pixels: image.into_rgb8(),
        }
    }

    /// Raster width in pixels.
    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    /// Raster height in pixels.
    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Borrow the underlying RGB pixel buffer.
    pub fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }

    /// Produce a single-channel intensity view for detection.
    pub fn to_gray(&self) -> GrayImage {
        image::imageops::grayscale(&self.pixels)
    }

    /// Extract the sub-raster covered by `region`.
    ///
    /// The region must lie fully within the raster; callers are expected
    /// to clamp with [`Rect::clamp_to`] first.
    pub fn crop(&self, region: &Rect) -> Result<RgbImage> {
        if region.is_empty()
            || region.right() > self.width()
            || region.bottom() > self.height()
        {
            return Err(Error::RegionOutOfBounds {
                x: region.x,
                y: region.y,
                width: region.width,
                height: region.height,
                raster_width: self.width(),
                raster_height: self.height(),
            });
        }
        let view = image::imageops::crop_imm(
            &self.pixels,
            region.x,
            region.y,
            region.width,
            region.height,
        );
        Ok(view.to_image())
    }

    /// Write the full raster as a PNG file.
    pub fn save_png(&self, path: impl AsRef<Path>) -> Result<()> {
        self.pixels
            .save(path.as_ref())
            .map_err(|e| Error::Image(e.to_string()))
    }
}
