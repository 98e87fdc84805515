//! BlockCompressor builder -- the primary entry point for the crate.
//!
//! [`BlockCompressor`] wraps the per-block pipeline (scan, analyse, size,
//! quantize, composite) behind a fluent builder with the recommended
//! defaults.

use rayon::prelude::*;

use super::error::CompressError;
use crate::block::BlockGrid;
use crate::composite::composite;
use crate::quality::Quality;
use crate::quantize::{quantize_block, QuantizedBlock};
use crate::raster::Raster;
use crate::report::CompressionReport;
use crate::sizing::{self, SizeDecision};

/// High-level builder for block-adaptive compression.
///
/// # Design
///
/// - Configuration methods consume and return `self` (standard builder pattern)
/// - Settings are validated when [`compress()`](Self::compress) runs, so an
///   invalid quality or block size is reported as a [`CompressError`] rather
///   than a panic
/// - `compress()` takes `&self`, so one compressor can be reused across images
///
/// # Overlapping blocks
///
/// A grown block is re-extracted from its own origin on the nominal grid, so
/// it can cover cells that later origins also cover. Blocks are composited in
/// row-major scan order and the last writer wins. Because every origin writes
/// at least its own cell and no later origin covers an earlier cell, each
/// pixel ends up owned by its own grid cell; growth only widens the region
/// that cell's mean is taken over.
///
/// # Memory
///
/// Blocks are quantized and composited one grid row at a time. Besides the
/// output raster, a run holds the quantized blocks of a single grid row,
/// each up to four times its cell's area when it grew.
///
/// # Example
///
/// ```
/// use block_quant::{BlockCompressor, Raster, Rgb};
///
/// let input = Raster::from_pixels(vec![Rgb::new(128, 128, 128); 16], 4, 4).unwrap();
/// let output = BlockCompressor::new()
///     .block_size(2)
///     .quality(0.5)
///     .compress(&input)
///     .unwrap();
///
/// assert_eq!(output, input);
/// ```
#[derive(Debug, Clone)]
pub struct BlockCompressor {
    block_size: usize,
    quality: f64,
    parallel: bool,
}

impl BlockCompressor {
    /// Recommended initial block size.
    pub const DEFAULT_BLOCK_SIZE: usize = 8;

    /// Create a compressor with block size 8, quality 0.5 and parallel
    /// analysis enabled.
    pub fn new() -> Self {
        Self {
            block_size: Self::DEFAULT_BLOCK_SIZE,
            quality: Quality::DEFAULT.value(),
            parallel: true,
        }
    }

    /// Set the nominal block size (grid stride).
    #[inline]
    pub fn block_size(mut self, size: usize) -> Self {
        self.block_size = size;
        self
    }

    /// Set the quality scalar.
    #[inline]
    pub fn quality(mut self, quality: f64) -> Self {
        self.quality = quality;
        self
    }

    /// Enable or disable analysing blocks on the rayon thread pool.
    ///
    /// Output is identical either way.
    #[inline]
    pub fn parallel(mut self, enabled: bool) -> Self {
        self.parallel = enabled;
        self
    }

    /// Check the configured block size and quality without compressing.
    pub fn validate(&self) -> Result<(), CompressError> {
        Quality::new(self.quality)?;
        BlockGrid::new(0, 0, self.block_size)?;
        Ok(())
    }

    /// Compress `input` into a new raster of identical dimensions.
    pub fn compress(&self, input: &Raster) -> Result<Raster, CompressError> {
        self.compress_with_report(input).map(|(output, _)| output)
    }

    /// Compress `input` and return run statistics alongside the output.
    ///
    /// # Example
    ///
    /// ```
    /// use block_quant::{BlockCompressor, Raster};
    ///
    /// let input = Raster::new(20, 10);
    /// let (output, report) = BlockCompressor::new().compress_with_report(&input).unwrap();
    ///
    /// assert_eq!((output.width(), output.height()), (20, 10));
    /// assert_eq!(report.origins, 6);
    /// assert_eq!(report.grown, 6);
    /// ```
    pub fn compress_with_report(
        &self,
        input: &Raster,
    ) -> Result<(Raster, CompressionReport), CompressError> {
        let quality = Quality::new(self.quality)?;
        let grid = BlockGrid::new(input.width(), input.height(), self.block_size)?;

        let mut output = Raster::new(input.width(), input.height());
        let mut report =
            CompressionReport::new(input.width(), input.height(), self.block_size, quality);

        // Analysis and quantization are pure per origin; only compositing
        // needs scan order. One grid row is buffered at a time.
        for row in 0..grid.rows() {
            let indices = row * grid.columns()..(row + 1) * grid.columns();
            let processed: Vec<(SizeDecision, QuantizedBlock)> = if self.parallel {
                indices
                    .into_par_iter()
                    .map(|index| process_origin(input, grid.origin(index), self.block_size, quality))
                    .collect()
            } else {
                indices
                    .map(|index| process_origin(input, grid.origin(index), self.block_size, quality))
                    .collect()
            };

            for (decision, block) in &processed {
                composite(&mut output, block);
                report.record(decision);
            }
        }

        Ok((output, report))
    }
}

impl Default for BlockCompressor {
    fn default() -> Self {
        Self::new()
    }
}

/// Analyse, size and quantize the block at one grid origin.
fn process_origin(
    input: &Raster,
    (x, y): (usize, usize),
    nominal: usize,
    quality: Quality,
) -> (SizeDecision, QuantizedBlock) {
    let decision = sizing::decide(&input.block(x, y, nominal), nominal, quality);
    let adjusted = input.block(x, y, decision.effective);
    (decision, quantize_block(&adjusted, quality))
}
