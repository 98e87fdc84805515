//! Error type for raster and grid geometry.

use std::fmt;

/// Error type for invalid raster or block geometry.
///
/// Returned when a pixel buffer does not match its declared dimensions or
/// when a block grid is requested with a zero stride.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DimensionError {
    /// Block size must be at least one pixel
    ZeroBlockSize,
    /// Pixel buffer length does not match width x height
    BufferLength {
        /// Number of elements implied by the dimensions
        expected: usize,
        /// Number of elements actually supplied
        actual: usize,
    },
    /// Width x height overflows the address space
    TooLarge {
        /// Requested width in pixels
        width: usize,
        /// Requested height in pixels
        height: usize,
    },
}

impl fmt::Display for DimensionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DimensionError::ZeroBlockSize => {
                write!(f, "block size must be at least 1")
            }
            DimensionError::BufferLength { expected, actual } => {
                write!(
                    f,
                    "buffer length mismatch: expected {} elements, got {}",
                    expected, actual
                )
            }
            DimensionError::TooLarge { width, height } => {
                write!(f, "raster dimensions {}x{} are too large", width, height)
            }
        }
    }
}

impl std::error::Error for DimensionError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        assert_eq!(
            DimensionError::ZeroBlockSize.to_string(),
            "block size must be at least 1"
        );
        assert_eq!(
            DimensionError::BufferLength {
                expected: 12,
                actual: 9
            }
            .to_string(),
            "buffer length mismatch: expected 12 elements, got 9"
        );
    }
}
