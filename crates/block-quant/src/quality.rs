//! The run-wide quality scalar.

use crate::api::CompressError;

/// Quality in `[0.0, 1.0]`, immutable for one compression run.
///
/// Quality drives two decisions: the similarity threshold used by the
/// adaptive sizer (`50 x quality`) and the blend weight used by the
/// quantizer. `0.0` flattens every block to its mean color, `1.0` keeps the
/// original pixels.
///
/// # Example
///
/// ```
/// use block_quant::Quality;
///
/// assert!(Quality::new(0.75).is_ok());
/// assert!(Quality::new(1.5).is_err());
/// assert_eq!(Quality::saturating(1.5).value(), 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct Quality(f64);

impl Quality {
    /// Fully flattened blocks.
    pub const MIN: Quality = Quality(0.0);
    /// Original pixels preserved.
    pub const MAX: Quality = Quality(1.0);
    /// Recommended default.
    pub const DEFAULT: Quality = Quality(0.5);

    /// Validate a quality value.
    ///
    /// Returns [`CompressError::QualityOutOfRange`] for values outside
    /// `[0.0, 1.0]` and for NaN.
    pub fn new(value: f64) -> Result<Self, CompressError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(CompressError::QualityOutOfRange(value))
        }
    }

    /// Clamp any value into `[0.0, 1.0]`. NaN maps to [`Quality::DEFAULT`].
    pub fn saturating(value: f64) -> Self {
        if value.is_nan() {
            Self::DEFAULT
        } else {
            Self(value.clamp(0.0, 1.0))
        }
    }

    /// The raw scalar.
    #[inline]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl TryFrom<f64> for Quality {
    type Error = CompressError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}
