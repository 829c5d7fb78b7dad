//! Unified configuration for the extraction pipeline.
//!
//! The tuning history of this extractor lived in per-script constants -
//! one rerun per tweak. This module consolidates every tunable into one
//! serializable structure: render resolution, detection thresholds and
//! minimum sizes, merge ratios, padding, exclusion zones, and output
//! locations.

use crate::detect::DetectorConfig;
use crate::error::{Error, Result};
use crate::export::ExportConfig;
use crate::merge::MergeConfig;
use crate::problems::ProblemConfig;
use std::fs;
use std::path::Path;

/// Configuration for a full extraction run.
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
pub struct ExtractConfig {
    /// Page rendering resolution
    pub render: RenderConfig,
    /// Candidate detection parameters
    pub detector: DetectorConfig,
    /// Candidate consolidation parameters
    pub merge: MergeConfig,
    /// Cropping and output parameters
    pub export: ExportConfig,
    /// Problem segmentation parameters
    pub problems: ProblemConfig,
}

/// Page rendering parameters.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RenderConfig {
    /// Dots per inch; page pixels scale as `native_size * dpi / 72`
    pub dpi: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { dpi: 300.0 }
    }
}

impl ExtractConfig {
    /// Load a configuration from a JSON file.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use contest_extract::pipeline::ExtractConfig;
    ///
    /// let config = ExtractConfig::from_json_file("extract.json")?;
    /// # Ok::<(), contest_extract::Error>(())
    /// ```
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let data = fs::read_to_string(path.as_ref())?;
        let config: Self =
            serde_json::from_str(&data).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Check cross-field invariants the type system cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.render.dpi <= 0.0 {
            return Err(Error::Config(format!(
                "render dpi must be positive, got {}",
                self.render.dpi
            )));
        }
        if !(0.0..=1.0).contains(&self.merge.containment_ratio) {
            return Err(Error::Config(format!(
                "containment ratio must be in [0, 1], got {}",
                self.merge.containment_ratio
            )));
        }
        if !(0.0..=1.0).contains(&self.merge.iou_threshold) {
            return Err(Error::Config(format!(
                "iou threshold must be in [0, 1], got {}",
                self.merge.iou_threshold
            )));
        }
        if self.detector.relaxed_min_width > self.detector.min_width
            || self.detector.relaxed_min_height > self.detector.min_height
        {
            return Err(Error::Config(
                "relaxed minimum size must not exceed the primary minimum".to_string(),
            ));
        }
        Ok(())
    }
}
