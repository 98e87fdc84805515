use std::path::Path;

use block_quant::Raster;
use image::codecs::jpeg::JpegEncoder;
use serde::{Deserialize, Serialize};

use super::png_io::{decode_png, save_png, PNG_SIGNATURE};
use crate::error::ImageIoError;

/// Formats the compressor can write, chosen by file extension
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    Png,
    #[serde(alias = "jpg")]
    Jpeg,
}

impl ImageFormat {
    /// Match a file extension, ignoring case.
    pub fn from_extension(extension: &str) -> Option<Self> {
        match extension.to_ascii_lowercase().as_str() {
            "png" => Some(Self::Png),
            "jpg" | "jpeg" => Some(Self::Jpeg),
            _ => None,
        }
    }

    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(Self::from_extension)
    }

    /// Extension used for generated file names.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
        }
    }
}

/// Encoder settings for [`save_image`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveOptions {
    /// Re-compress PNG output with oxipng
    pub optimize_png: bool,
    /// JPEG quality, 1-100
    pub jpeg_quality: u8,
}

impl Default for SaveOptions {
    fn default() -> Self {
        Self {
            optimize_png: false,
            jpeg_quality: 90,
        }
    }
}

/// Load any supported image file as an RGB raster.
///
/// PNG goes through the `png` decoder; JPEG, BMP, GIF, TIFF and WebP are
/// decoded by `image`. Alpha is discarded and grayscale is expanded.
pub fn load_image(path: &Path) -> Result<Raster, ImageIoError> {
    let bytes = std::fs::read(path).map_err(|e| match e.kind() {
        std::io::ErrorKind::NotFound => ImageIoError::FileNotFound(path.to_path_buf()),
        _ => ImageIoError::Io(e),
    })?;
    decode_image(&bytes)
}

/// Decode in-memory image bytes of any supported format.
pub fn decode_image(bytes: &[u8]) -> Result<Raster, ImageIoError> {
    if bytes.starts_with(&PNG_SIGNATURE) {
        return decode_png(bytes);
    }

    let image =
        image::load_from_memory(bytes).map_err(|e| ImageIoError::Decode(e.to_string()))?;
    let rgb = image.to_rgb8();
    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    Raster::from_rgb_bytes(rgb.as_raw(), width, height)
        .map_err(|e| ImageIoError::Decode(e.to_string()))
}

/// Encode a raster as baseline JPEG.
pub fn encode_jpeg(raster: &Raster, quality: u8) -> Result<Vec<u8>, ImageIoError> {
    if raster.is_empty() {
        return Err(ImageIoError::Encode(format!(
            "cannot encode an empty {}x{} image",
            raster.width(),
            raster.height()
        )));
    }
    let width = u32::try_from(raster.width())
        .map_err(|_| ImageIoError::Encode("width exceeds JPEG limits".to_string()))?;
    let height = u32::try_from(raster.height())
        .map_err(|_| ImageIoError::Encode("height exceeds JPEG limits".to_string()))?;

    let mut buf = Vec::new();
    let mut encoder = JpegEncoder::new_with_quality(&mut buf, quality.clamp(1, 100));
    encoder
        .encode(
            &raster.to_rgb_bytes(),
            width,
            height,
            image::ExtendedColorType::Rgb8,
        )
        .map_err(|e| ImageIoError::Encode(e.to_string()))?;
    Ok(buf)
}

/// Encode `raster` in the format named by `path`'s extension and write it.
/// Returns the number of bytes written.
pub fn save_image(path: &Path, raster: &Raster, options: SaveOptions) -> Result<usize, ImageIoError> {
    match output_format(path)? {
        ImageFormat::Png => save_png(path, raster, options.optimize_png),
        ImageFormat::Jpeg => {
            let jpeg_bytes = encode_jpeg(raster, options.jpeg_quality)?;
            std::fs::write(path, &jpeg_bytes)?;
            Ok(jpeg_bytes.len())
        }
    }
}

/// The format `path` will be written in, or `UnsupportedFormat`.
pub fn output_format(path: &Path) -> Result<ImageFormat, ImageIoError> {
    ImageFormat::from_path(path)
        .ok_or_else(|| ImageIoError::UnsupportedFormat(path.display().to_string()))
}
