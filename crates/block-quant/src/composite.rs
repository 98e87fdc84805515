//! Output compositing: write quantized blocks into the output raster.

use crate::quantize::QuantizedBlock;
use crate::raster::Raster;

/// Copy `block` into `output` at the block's origin.
///
/// The write is clipped to the output's bounds, so a block that reaches
/// past the right or bottom edge only writes the part that fits. Whatever
/// was previously at the covered coordinates is overwritten.
pub fn composite(output: &mut Raster, block: &QuantizedBlock) {
    let x = block.x();
    if x >= output.width() {
        return;
    }
    let x_end = (x + block.width()).min(output.width());
    let visible = x_end - x;

    for (dy, src) in block.rows().enumerate().take(block.height()) {
        let y = block.y() + dy;
        if y >= output.height() {
            break;
        }
        output.row_mut(y)[x..x_end].copy_from_slice(&src[..visible]);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quality::Quality;
    use crate::quantize::quantize_block;
    use crate::raster::Rgb;

    #[test]
    fn test_writes_at_origin() {
        let source = Raster::from_pixels(vec![Rgb::WHITE; 16], 4, 4).unwrap();
        let block = quantize_block(&source.block(2, 0, 2), Quality::MAX);

        let mut output = Raster::new(4, 4);
        composite(&mut output, &block);

        assert_eq!(output.get(2, 0), Some(Rgb::WHITE));
        assert_eq!(output.get(3, 1), Some(Rgb::WHITE));
        assert_eq!(output.get(1, 0), Some(Rgb::BLACK));
        assert_eq!(output.get(2, 2), Some(Rgb::BLACK));
    }

    #[test]
    fn test_clips_to_smaller_output() {
        let source = Raster::from_pixels(vec![Rgb::WHITE; 36], 6, 6).unwrap();
        let block = quantize_block(&source.block(2, 2, 4), Quality::MAX);

        let mut output = Raster::new(3, 3);
        composite(&mut output, &block);

        assert_eq!(output.get(2, 2), Some(Rgb::WHITE));
        assert_eq!(output.get(1, 1), Some(Rgb::BLACK));
    }

    #[test]
    fn test_origin_outside_output_is_ignored() {
        let source = Raster::from_pixels(vec![Rgb::WHITE; 16], 4, 4).unwrap();
        let block = quantize_block(&source.block(2, 2, 2), Quality::MAX);

        let mut output = Raster::new(2, 2);
        composite(&mut output, &block);

        assert!(output.pixels().iter().all(|&p| p == Rgb::BLACK));
    }

    #[test]
    fn test_later_write_wins() {
        let white = Raster::from_pixels(vec![Rgb::WHITE; 4], 2, 2).unwrap();
        let grey = Raster::from_pixels(vec![Rgb::new(7, 7, 7); 4], 2, 2).unwrap();

        let mut output = Raster::new(2, 2);
        composite(&mut output, &quantize_block(&white.block(0, 0, 2), Quality::MAX));
        composite(&mut output, &quantize_block(&grey.block(1, 0, 2), Quality::MAX));

        assert_eq!(output.get(0, 0), Some(Rgb::WHITE));
        assert_eq!(output.get(1, 0), Some(Rgb::new(7, 7, 7)));
        assert_eq!(output.get(1, 1), Some(Rgb::new(7, 7, 7)));
    }
}
