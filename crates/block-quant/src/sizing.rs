//! Adaptive block sizing.
//!
//! A block whose average difference is strictly below `50 x quality` is
//! considered similar enough to be quantized at double its nominal edge,
//! capped at [`MAX_BLOCK_SIZE`]. The decision is made once per grid origin
//! and never recurses.

use crate::block::BlockView;
use crate::quality::Quality;
use crate::similarity::average_difference;

/// Scale applied to quality to obtain the similarity threshold.
pub const SIMILARITY_SCALE: f64 = 50.0;

/// Upper bound on a grown block's edge length.
pub const MAX_BLOCK_SIZE: usize = 32;

/// The score below which a block grows.
#[inline]
pub fn similarity_threshold(quality: Quality) -> f64 {
    SIMILARITY_SCALE * quality.value()
}

/// Effective edge length for a block with the given similarity `score`.
///
/// Growth doubles `nominal` and caps it at [`MAX_BLOCK_SIZE`], but never
/// returns less than `nominal`: a nominal size above 32 stays as it is, so
/// grid cells are always fully covered.
///
/// # Example
///
/// ```
/// use block_quant::{adaptive_size, Quality};
///
/// let q = Quality::new(0.5).unwrap();
/// assert_eq!(adaptive_size(24.0, 8, q), 16);
/// assert_eq!(adaptive_size(25.0, 8, q), 8);
/// assert_eq!(adaptive_size(0.0, 16, q), 32);
/// assert_eq!(adaptive_size(0.0, 20, q), 32);
/// assert_eq!(adaptive_size(0.0, 40, q), 40);
/// ```
pub fn adaptive_size(score: f64, nominal: usize, quality: Quality) -> usize {
    if score < similarity_threshold(quality) {
        nominal.saturating_mul(2).min(MAX_BLOCK_SIZE).max(nominal)
    } else {
        nominal
    }
}

/// The outcome of sizing one grid origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SizeDecision {
    /// Average difference of the nominal block
    pub score: f64,
    /// Grid stride
    pub nominal: usize,
    /// Edge length used for quantization
    pub effective: usize,
}

impl SizeDecision {
    /// Returns `true` when the block was enlarged.
    #[inline]
    pub fn grew(&self) -> bool {
        self.effective > self.nominal
    }
}

/// Score the nominal block and choose its effective size.
pub fn decide(block: &BlockView<'_>, nominal: usize, quality: Quality) -> SizeDecision {
    let score = average_difference(block);
    SizeDecision {
        score,
        nominal,
        effective: adaptive_size(score, nominal, quality),
    }
}
