//! Editor configuration.
//!
//! Every section has a default, so a TOML file only needs the keys it
//! overrides:
//!
//! ```toml
//! quality = 0.9
//! folder = "logos"
//!
//! [output]
//! width = 400
//! height = 400
//!
//! [frame]
//! width = 320.0
//! height = 320.0
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{
    ASPECT_TOLERANCE, DEFAULT_FRAME_HEIGHT, DEFAULT_FRAME_WIDTH, DEFAULT_MAX_SCALE,
    DEFAULT_OUTPUT_HEIGHT, DEFAULT_OUTPUT_WIDTH, DEFAULT_QUALITY, DEFAULT_RESIZE_MAX_WIDTH,
    DEFAULT_WHEEL_STEP,
};
use crate::error::{CropError, Result};
use crate::upload::UploadFolder;
use crate::viewport::FrameSize;

/// Fixed export raster size. One per deployment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct OutputSpec {
    pub width: u32,
    pub height: u32,
}

impl OutputSpec {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn aspect(&self) -> f64 {
        self.width as f64 / self.height as f64
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for OutputSpec {
    fn default() -> Self {
        Self {
            width: DEFAULT_OUTPUT_WIDTH,
            height: DEFAULT_OUTPUT_HEIGHT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct EditorConfig {
    /// On-screen crop frame, measured in device-independent pixels.
    #[serde(default)]
    pub frame: FrameSize,
    #[serde(default)]
    pub output: OutputSpec,
    /// Encode quality in (0.0, 1.0].
    #[serde(default = "default_quality")]
    pub quality: f32,
    #[serde(default = "default_max_scale")]
    pub max_scale: f64,
    /// Scale delta per wheel notch.
    #[serde(default = "default_wheel_step")]
    pub wheel_step: f64,
    /// Width limit for the standalone resize helper.
    #[serde(default = "default_resize_max_width")]
    pub resize_max_width: u32,
    #[serde(default)]
    pub folder: UploadFolder,
}

fn default_quality() -> f32 {
    DEFAULT_QUALITY
}

fn default_max_scale() -> f64 {
    DEFAULT_MAX_SCALE
}

fn default_wheel_step() -> f64 {
    DEFAULT_WHEEL_STEP
}

fn default_resize_max_width() -> u32 {
    DEFAULT_RESIZE_MAX_WIDTH
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            frame: FrameSize::new(DEFAULT_FRAME_WIDTH, DEFAULT_FRAME_HEIGHT),
            output: OutputSpec::default(),
            quality: DEFAULT_QUALITY,
            max_scale: DEFAULT_MAX_SCALE,
            wheel_step: DEFAULT_WHEEL_STEP,
            resize_max_width: DEFAULT_RESIZE_MAX_WIDTH,
            folder: UploadFolder::default(),
        }
    }
}

impl EditorConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EditorConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| CropError::Config(e.to_string()))
    }

    pub fn validate(&self) -> Result<()> {
        if self.output.width == 0 || self.output.height == 0 {
            return Err(CropError::Config(format!(
                "output size must be non-zero, got {}x{}",
                self.output.width, self.output.height
            )));
        }
        if !self.frame.is_valid() {
            return Err(CropError::Config(format!(
                "frame size must be positive, got {}x{}",
                self.frame.width, self.frame.height
            )));
        }
        if (self.frame.aspect() - self.output.aspect()).abs() > ASPECT_TOLERANCE {
            return Err(CropError::Config(format!(
                "frame aspect {:.4} does not match output aspect {:.4}",
                self.frame.aspect(),
                self.output.aspect()
            )));
        }
        if !(self.quality > 0.0 && self.quality <= 1.0) {
            return Err(CropError::Config(format!(
                "quality must be in (0, 1], got {}",
                self.quality
            )));
        }
        if !(self.max_scale.is_finite() && self.max_scale > 0.0) {
            return Err(CropError::Config(format!(
                "max_scale must be a positive finite number, got {}",
                self.max_scale
            )));
        }
        if !(self.wheel_step.is_finite() && self.wheel_step > 0.0) {
            return Err(CropError::Config(format!(
                "wheel_step must be a positive finite number, got {}",
                self.wheel_step
            )));
        }
        if self.resize_max_width == 0 {
            return Err(CropError::Config("resize_max_width must be non-zero".into()));
        }
        Ok(())
    }
}
