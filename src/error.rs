use block_quant::CompressError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures of the image file layer, kept apart from core validation errors.
#[derive(Debug, Error)]
pub enum ImageIoError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Image decode error: {0}")]
    Decode(String),

    #[error("Image encode error: {0}")]
    Encode(String),

    #[error("Unsupported image format: {0}")]
    UnsupportedFormat(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("Invalid config: {0}")]
    Invalid(String),
}

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Image error: {0}")]
    Image(#[from] ImageIoError),

    #[error("Compression error: {0}")]
    Compress(#[from] CompressError),

    #[error("Output {} is the input file", .0.display())]
    OutputIsInput(PathBuf),
}
