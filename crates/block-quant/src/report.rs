//! Per-run statistics.

use crate::quality::Quality;
use crate::sizing::SizeDecision;

/// Summary of one compression run.
///
/// Produced by [`BlockCompressor::compress_with_report`](crate::BlockCompressor::compress_with_report).
#[derive(Debug, Clone, PartialEq)]
pub struct CompressionReport {
    /// Raster width in pixels.
    pub width: usize,
    /// Raster height in pixels.
    pub height: usize,
    /// Grid stride.
    pub block_size: usize,
    /// Quality used for the run.
    pub quality: Quality,
    /// Number of grid origins processed.
    pub origins: usize,
    /// Number of origins whose block the adaptive sizer enlarged.
    pub grown: usize,
    score_sum: f64,
}

impl CompressionReport {
    pub(crate) fn new(width: usize, height: usize, block_size: usize, quality: Quality) -> Self {
        Self {
            width,
            height,
            block_size,
            quality,
            origins: 0,
            grown: 0,
            score_sum: 0.0,
        }
    }

    pub(crate) fn record(&mut self, decision: &SizeDecision) {
        self.origins += 1;
        if decision.grew() {
            self.grown += 1;
        }
        self.score_sum += decision.score;
    }

    /// Mean similarity score over all origins, `0.0` when there were none.
    pub fn mean_similarity(&self) -> f64 {
        if self.origins == 0 {
            0.0
        } else {
            self.score_sum / self.origins as f64
        }
    }

    /// Fraction of origins that grew, in `[0.0, 1.0]`.
    pub fn grown_ratio(&self) -> f64 {
        if self.origins == 0 {
            0.0
        } else {
            self.grown as f64 / self.origins as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_report() {
        let report = CompressionReport::new(0, 0, 8, Quality::DEFAULT);
        assert_eq!(report.origins, 0);
        assert_eq!(report.mean_similarity(), 0.0);
        assert_eq!(report.grown_ratio(), 0.0);
    }

    #[test]
    fn test_record_accumulates() {
        let mut report = CompressionReport::new(16, 8, 8, Quality::DEFAULT);
        report.record(&SizeDecision {
            score: 10.0,
            nominal: 8,
            effective: 16,
        });
        report.record(&SizeDecision {
            score: 40.0,
            nominal: 8,
            effective: 8,
        });
        assert_eq!(report.origins, 2);
        assert_eq!(report.grown, 1);
        assert_eq!(report.mean_similarity(), 25.0);
        assert_eq!(report.grown_ratio(), 0.5);
    }
}
