//! Similarity analysis: average color variation between adjacent pixels.

use crate::block::BlockView;
use crate::raster::Rgb;

/// Sum of absolute per-channel differences, in `0..=765`.
///
/// # Example
///
/// ```
/// use block_quant::{color_distance, Rgb};
///
/// assert_eq!(color_distance(Rgb::BLACK, Rgb::WHITE), 765);
/// assert_eq!(color_distance(Rgb::new(10, 20, 30), Rgb::new(12, 18, 30)), 4);
/// ```
#[inline]
pub fn color_distance(a: Rgb, b: Rgb) -> u32 {
    a.r.abs_diff(b.r) as u32 + a.g.abs_diff(b.g) as u32 + a.b.abs_diff(b.b) as u32
}

/// Average color difference per pixel over a block.
///
/// For every pixel that has both a right neighbor and a neighbor below, the
/// distances to those two neighbors are accumulated. The sum is divided by
/// the block's full pixel count. Pixels in the last row or last column
/// contribute no pairs, so a block one pixel wide or tall scores `0.0`.
///
/// An empty block also scores `0.0`.
pub fn average_difference(block: &BlockView<'_>) -> f64 {
    let pixel_count = block.pixel_count();
    if pixel_count == 0 {
        return 0.0;
    }

    let mut rows = block.rows();
    let Some(mut above) = rows.next() else {
        return 0.0;
    };

    let mut sum: u64 = 0;
    for below in rows {
        for (pair, &down) in above.windows(2).zip(below) {
            let here = pair[0];
            sum += u64::from(color_distance(here, pair[1]) + color_distance(here, down));
        }
        above = below;
    }

    sum as f64 / pixel_count as f64
}
