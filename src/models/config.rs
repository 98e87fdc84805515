use block_quant::BlockCompressor;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::codec::{ImageFormat, SaveOptions};
use crate::error::ConfigError;

/// Application configuration loaded from a YAML file
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(deny_unknown_fields)]
pub struct AppConfig {
    /// Nominal block size (grid stride) in pixels
    #[serde(default = "default_block_size")]
    pub block_size: usize,

    /// Quality scalar in [0.0, 1.0]
    #[serde(default = "default_quality")]
    pub quality: f64,

    /// Analyse blocks on the rayon thread pool
    #[serde(default = "default_true")]
    pub parallel: bool,

    /// Re-compress the written PNG with oxipng
    #[serde(default)]
    pub optimize_png: bool,

    /// Appended to the input file stem when no output path is given
    #[serde(default = "default_output_suffix")]
    pub output_suffix: String,

    /// Format for generated output paths; unset keeps the input's format
    #[serde(default)]
    pub output_format: Option<ImageFormat>,

    /// JPEG encoder quality, 1-100
    #[serde(default = "default_jpeg_quality")]
    pub jpeg_quality: u8,
}

fn default_block_size() -> usize {
    BlockCompressor::DEFAULT_BLOCK_SIZE
}

fn default_quality() -> f64 {
    0.5
}

fn default_true() -> bool {
    true
}

fn default_output_suffix() -> String {
    "_compressed".to_string()
}

fn default_jpeg_quality() -> u8 {
    90
}

impl AppConfig {
    /// Load configuration from `path`, or return defaults when no path is
    /// given. Unreadable or unparseable files are errors.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let Some(path) = path else {
            tracing::debug!("No config file given, using defaults");
            return Ok(Self::default());
        };

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            block_size = config.block_size,
            quality = config.quality,
            "Loaded configuration"
        );
        Ok(config)
    }

    /// Parse configuration from YAML text. An empty document yields defaults.
    pub fn from_yaml_str(content: &str) -> Result<Self, ConfigError> {
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        let config: Self = serde_yaml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings the YAML types cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.jpeg_quality) {
            return Err(ConfigError::Invalid(format!(
                "jpeg_quality {} is outside 1..=100",
                self.jpeg_quality
            )));
        }
        Ok(())
    }

    /// Encoder settings for writing the output file.
    pub fn save_options(&self) -> SaveOptions {
        SaveOptions {
            optimize_png: self.optimize_png,
            jpeg_quality: self.jpeg_quality,
        }
    }

    /// Build a compressor from these settings.
    pub fn compressor(&self) -> BlockCompressor {
        BlockCompressor::new()
            .block_size(self.block_size)
            .quality(self.quality)
            .parallel(self.parallel)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            block_size: default_block_size(),
            quality: default_quality(),
            parallel: true,
            optimize_png: false,
            output_suffix: default_output_suffix(),
            output_format: None,
            jpeg_quality: default_jpeg_quality(),
        }
    }
}
