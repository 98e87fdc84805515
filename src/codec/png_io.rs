use std::fs::File;
use std::io::{BufReader, Cursor, Read};
use std::path::Path;

use block_quant::Raster;

use crate::error::ImageIoError;

pub(crate) const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Load a PNG file as an RGB raster.
///
/// Grayscale is expanded to RGB and alpha is discarded without compositing.
pub fn load_png(path: &Path) -> Result<Raster, ImageIoError> {
    let file = File::open(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ImageIoError::FileNotFound(path.to_path_buf()),
        _ => ImageIoError::Io(e),
    })?;
    decode_from(BufReader::new(file))
}

/// Decode in-memory PNG bytes as an RGB raster.
pub fn decode_png(bytes: &[u8]) -> Result<Raster, ImageIoError> {
    decode_from(Cursor::new(bytes))
}

fn decode_from<R: Read>(reader: R) -> Result<Raster, ImageIoError> {
    let mut decoder = png::Decoder::new(reader);
    // Palette and low bit depths become 8-bit samples, 16-bit is truncated.
    decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
    let mut reader = decoder
        .read_info()
        .map_err(|e| ImageIoError::Decode(e.to_string()))?;

    let mut buf = vec![0; reader.output_buffer_size()];
    let info = reader
        .next_frame(&mut buf)
        .map_err(|e| ImageIoError::Decode(e.to_string()))?;
    let samples = &buf[..info.buffer_size()];

    let rgb: Vec<u8> = match info.color_type {
        png::ColorType::Rgb => samples.to_vec(),
        png::ColorType::Rgba => samples
            .chunks_exact(4)
            .flat_map(|p| [p[0], p[1], p[2]])
            .collect(),
        png::ColorType::Grayscale => samples.iter().flat_map(|&v| [v, v, v]).collect(),
        png::ColorType::GrayscaleAlpha => samples
            .chunks_exact(2)
            .flat_map(|p| [p[0], p[0], p[0]])
            .collect(),
        png::ColorType::Indexed => {
            return Err(ImageIoError::Decode(
                "indexed color was not expanded".to_string(),
            ))
        }
    };

    Raster::from_rgb_bytes(&rgb, info.width as usize, info.height as usize)
        .map_err(|e| ImageIoError::Decode(e.to_string()))
}

/// Encode a raster as an 8-bit RGB PNG.
pub fn encode_png(raster: &Raster) -> Result<Vec<u8>, ImageIoError> {
    if raster.is_empty() {
        return Err(ImageIoError::Encode(format!(
            "cannot encode an empty {}x{} image",
            raster.width(),
            raster.height()
        )));
    }
    let width = u32::try_from(raster.width())
        .map_err(|_| ImageIoError::Encode("width exceeds PNG limits".to_string()))?;
    let height = u32::try_from(raster.height())
        .map_err(|_| ImageIoError::Encode("height exceeds PNG limits".to_string()))?;

    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder
            .write_header()
            .map_err(|e| ImageIoError::Encode(e.to_string()))?;
        writer
            .write_image_data(&raster.to_rgb_bytes())
            .map_err(|e| ImageIoError::Encode(e.to_string()))?;
        writer
            .finish()
            .map_err(|e| ImageIoError::Encode(e.to_string()))?;
    }
    Ok(buf.into_inner())
}

/// Re-compress PNG bytes with oxipng, returning the input unchanged if
/// optimization fails.
pub fn optimize_png(png_bytes: Vec<u8>) -> Vec<u8> {
    match oxipng::optimize_from_memory(
        &png_bytes,
        &oxipng::Options {
            strip: oxipng::StripChunks::Safe,
            optimize_alpha: false,
            ..Default::default()
        },
    ) {
        Ok(optimized) => optimized,
        Err(e) => {
            tracing::warn!(%e, "PNG optimization failed, keeping unoptimized output");
            png_bytes
        }
    }
}

/// Encode `raster` and write it to `path`. Returns the number of bytes
/// written.
pub fn save_png(path: &Path, raster: &Raster, optimize: bool) -> Result<usize, ImageIoError> {
    let mut png_bytes = encode_png(raster)?;
    if optimize {
        png_bytes = optimize_png(png_bytes);
    }
    std::fs::write(path, &png_bytes)?;
    Ok(png_bytes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use block_quant::Rgb;

    fn encode_raw(width: u32, height: u32, color: png::ColorType, data: &[u8]) -> Vec<u8> {
        let mut buf = Cursor::new(Vec::new());
        {
            let mut encoder = png::Encoder::new(&mut buf, width, height);
            encoder.set_color(color);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(data).unwrap();
        }
        buf.into_inner()
    }

    #[test]
    fn test_encode_decode_preserves_pixels() {
        let bytes: Vec<u8> = (0..36).map(|i| (i * 7) as u8).collect();
        let raster = Raster::from_rgb_bytes(&bytes, 4, 3).unwrap();

        let decoded = decode_png(&encode_png(&raster).unwrap()).unwrap();
        assert_eq!(decoded, raster);
    }

    #[test]
    fn test_encode_starts_with_png_signature() {
        let png = encode_png(&Raster::new(2, 2)).unwrap();
        assert_eq!(&png[..8], &PNG_SIGNATURE);
    }

    #[test]
    fn test_encode_empty_raster_fails() {
        let err = encode_png(&Raster::new(0, 4)).unwrap_err();
        assert!(matches!(err, ImageIoError::Encode(_)));
    }

    #[test]
    fn test_decode_grayscale_expands_to_rgb() {
        let png = encode_raw(2, 1, png::ColorType::Grayscale, &[10, 200]);
        let raster = decode_png(&png).unwrap();
        assert_eq!(raster.get(0, 0), Some(Rgb::new(10, 10, 10)));
        assert_eq!(raster.get(1, 0), Some(Rgb::new(200, 200, 200)));
    }

    #[test]
    fn test_decode_rgba_drops_alpha() {
        let png = encode_raw(1, 1, png::ColorType::Rgba, &[1, 2, 3, 0]);
        let raster = decode_png(&png).unwrap();
        assert_eq!(raster.get(0, 0), Some(Rgb::new(1, 2, 3)));
    }

    #[test]
    fn test_decode_grayscale_alpha() {
        let png = encode_raw(1, 1, png::ColorType::GrayscaleAlpha, &[77, 128]);
        let raster = decode_png(&png).unwrap();
        assert_eq!(raster.get(0, 0), Some(Rgb::new(77, 77, 77)));
    }

    #[test]
    fn test_decode_garbage_fails() {
        let err = decode_png(b"definitely not a png").unwrap_err();
        assert!(matches!(err, ImageIoError::Decode(_)));
    }

    #[test]
    fn test_optimize_keeps_pixels() {
        let raster = Raster::from_pixels(vec![Rgb::new(40, 80, 120); 64], 8, 8).unwrap();
        let png = encode_png(&raster).unwrap();
        let optimized = optimize_png(png);
        assert_eq!(decode_png(&optimized).unwrap(), raster);
    }
}
