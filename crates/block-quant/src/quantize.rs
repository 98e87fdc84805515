//! Quantization: blend each pixel of a block toward the block's mean color.

use crate::block::{BlockRect, BlockView};
use crate::quality::Quality;
use crate::raster::Rgb;

/// The blended pixels for one block, positioned at the block's origin.
///
/// The extent always equals the clipped extent of the source block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuantizedBlock {
    rect: BlockRect,
    pixels: Vec<Rgb>,
}

impl QuantizedBlock {
    /// The block's origin and extent.
    #[inline]
    pub fn rect(&self) -> BlockRect {
        self.rect
    }

    /// Left column of the block's origin.
    #[inline]
    pub fn x(&self) -> usize {
        self.rect.x
    }

    /// Top row of the block's origin.
    #[inline]
    pub fn y(&self) -> usize {
        self.rect.y
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> usize {
        self.rect.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> usize {
        self.rect.height
    }

    /// Blended pixels in row-major order.
    #[inline]
    pub fn pixels(&self) -> &[Rgb] {
        &self.pixels
    }

    /// Iterate rows top to bottom.
    pub fn rows(&self) -> impl Iterator<Item = &[Rgb]> {
        // chunks_exact panics on a zero chunk size
        self.pixels.chunks_exact(self.rect.width.max(1))
    }
}

/// Arithmetic mean of each channel over the block, unrounded.
///
/// Returns `[0.0; 3]` for an empty block.
pub fn block_mean(block: &BlockView<'_>) -> [f64; 3] {
    let count = block.pixel_count();
    if count == 0 {
        return [0.0; 3];
    }
    let mut sums = [0u64; 3];
    for pixel in block.pixels() {
        sums[0] += u64::from(pixel.r);
        sums[1] += u64::from(pixel.g);
        sums[2] += u64::from(pixel.b);
    }
    let n = count as f64;
    [sums[0] as f64 / n, sums[1] as f64 / n, sums[2] as f64 / n]
}

/// Blend one channel: `(1 - quality) * mean + quality * original`, truncated
/// toward zero and saturated into `0..=255`.
#[inline]
pub fn blend_channel(mean: f64, original: u8, quality: Quality) -> u8 {
    let q = quality.value();
    let blended = (1.0 - q) * mean + q * f64::from(original);
    blended.trunc().clamp(0.0, 255.0) as u8
}

/// Replace a block's pixels with a quality-weighted blend toward its mean.
///
/// Quality `0.0` yields the truncated mean at every pixel; quality `1.0`
/// yields the original pixels exactly.
///
/// # Example
///
/// ```
/// use block_quant::{quantize_block, Quality, Raster, Rgb};
///
/// let raster = Raster::from_pixels(
///     vec![Rgb::new(0, 0, 0), Rgb::new(100, 50, 10)],
///     2,
///     1,
/// ).unwrap();
/// let flat = quantize_block(&raster.block(0, 0, 2), Quality::MIN);
/// assert_eq!(flat.pixels(), &[Rgb::new(50, 25, 5), Rgb::new(50, 25, 5)]);
/// ```
pub fn quantize_block(block: &BlockView<'_>, quality: Quality) -> QuantizedBlock {
    let mean = block_mean(block);
    let pixels = block
        .pixels()
        .map(|p| {
            Rgb::new(
                blend_channel(mean[0], p.r, quality),
                blend_channel(mean[1], p.g, quality),
                blend_channel(mean[2], p.b, quality),
            )
        })
        .collect();
    QuantizedBlock {
        rect: block.rect(),
        pixels,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Raster;

    fn corners() -> Raster {
        Raster::from_pixels(
            vec![
                Rgb::new(10, 200, 0),
                Rgb::new(20, 100, 255),
                Rgb::new(30, 50, 1),
                Rgb::new(41, 0, 3),
            ],
            2,
            2,
        )
        .unwrap()
    }

    #[test]
    fn test_block_mean() {
        let raster = corners();
        let mean = block_mean(&raster.block(0, 0, 2));
        assert_eq!(mean, [25.25, 87.5, 64.75]);
    }

    #[test]
    fn test_quality_zero_flattens_to_truncated_mean() {
        let raster = corners();
        let out = quantize_block(&raster.block(0, 0, 2), Quality::MIN);
        assert!(out.pixels().iter().all(|&p| p == Rgb::new(25, 87, 64)));
    }

    #[test]
    fn test_quality_one_is_identity() {
        let raster = corners();
        let out = quantize_block(&raster.block(0, 0, 2), Quality::MAX);
        assert_eq!(out.pixels(), raster.pixels());
    }

    #[test]
    fn test_blend_truncates() {
        // 0.5 * 25.25 + 0.5 * 10 = 17.625
        assert_eq!(blend_channel(25.25, 10, Quality::DEFAULT), 17);
        // 0.5 * 87.5 + 0.5 * 200 = 143.75
        assert_eq!(blend_channel(87.5, 200, Quality::DEFAULT), 143);
    }

    #[test]
    fn test_blend_extremes_stay_in_range() {
        assert_eq!(blend_channel(255.0, 255, Quality::DEFAULT), 255);
        assert_eq!(blend_channel(0.0, 0, Quality::DEFAULT), 0);
    }

    #[test]
    fn test_extent_matches_clipped_block() {
        let raster = Raster::new(5, 3);
        let out = quantize_block(&raster.block(4, 2, 8), Quality::DEFAULT);
        assert_eq!((out.x(), out.y(), out.width(), out.height()), (4, 2, 1, 1));
        assert_eq!(out.pixels().len(), 1);
    }

    #[test]
    fn test_rows_split_by_width() {
        let raster = corners();
        let out = quantize_block(&raster.block(0, 0, 2), Quality::MAX);
        let rows: Vec<&[Rgb]> = out.rows().collect();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1], raster.row(1));
    }
}
