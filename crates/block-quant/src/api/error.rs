//! Unified error type for the block-quant public API.
//!
//! Validation happens before any pixel is touched; once inputs pass, a run
//! cannot fail.

use crate::raster::DimensionError;
use std::fmt;

/// Unified error type for the block-quant public API.
///
/// # Example
///
/// ```
/// use block_quant::{BlockCompressor, CompressError, Raster};
///
/// let raster = Raster::new(4, 4);
/// let err = BlockCompressor::new().quality(2.0).compress(&raster).unwrap_err();
/// assert_eq!(err, CompressError::QualityOutOfRange(2.0));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum CompressError {
    /// Block size of zero, or a pixel buffer that does not match its dimensions
    InvalidDimension(DimensionError),
    /// Quality outside `[0.0, 1.0]` (or NaN)
    QualityOutOfRange(f64),
}

impl fmt::Display for CompressError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressError::InvalidDimension(err) => write!(f, "invalid dimension: {}", err),
            CompressError::QualityOutOfRange(value) => {
                write!(f, "quality {} is outside [0.0, 1.0]", value)
            }
        }
    }
}

impl std::error::Error for CompressError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompressError::InvalidDimension(err) => Some(err),
            CompressError::QualityOutOfRange(_) => None,
        }
    }
}

impl From<DimensionError> for CompressError {
    fn from(err: DimensionError) -> Self {
        CompressError::InvalidDimension(err)
    }
}
