//! Test fixtures: synthetic images written to temporary directories.

use std::io::Cursor;
use std::path::{Path, PathBuf};

use block_quant::{Raster, Rgb};

/// Horizontal red ramp, vertical green ramp, constant blue.
pub fn gradient(width: usize, height: usize) -> Raster {
    let pixels = (0..width * height)
        .map(|i| {
            let (x, y) = (i % width, i / width);
            Rgb::new(
                (x * 255 / width.max(1)) as u8,
                (y * 255 / height.max(1)) as u8,
                96,
            )
        })
        .collect();
    Raster::from_pixels(pixels, width, height).unwrap()
}

/// Deterministic pseudo-random image.
pub fn noisy(width: usize, height: usize) -> Raster {
    let mut state: u32 = 0x1234_5678;
    let pixels = (0..width * height)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 17;
            state ^= state << 5;
            let [r, g, b, _] = state.to_le_bytes();
            Rgb::new(r, g, b)
        })
        .collect();
    Raster::from_pixels(pixels, width, height).unwrap()
}

/// A single color everywhere.
pub fn solid(width: usize, height: usize, color: Rgb) -> Raster {
    Raster::from_pixels(vec![color; width * height], width, height).unwrap()
}

/// Encode `raster` as RGB PNG into `dir/name`.
pub fn write_png(dir: &Path, name: &str, raster: &Raster) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, blockpress::codec::encode_png(raster).unwrap()).unwrap();
    path
}

/// Encode `raster` as JPEG (quality 95) into `dir/name`.
pub fn write_jpeg(dir: &Path, name: &str, raster: &Raster) -> PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, blockpress::codec::encode_jpeg(raster, 95).unwrap()).unwrap();
    path
}

/// Write raw 8-bit samples with an arbitrary PNG color type into `dir/name`.
pub fn write_raw_png(
    dir: &Path,
    name: &str,
    width: u32,
    height: u32,
    color: png::ColorType,
    samples: &[u8],
) -> PathBuf {
    let mut buf = Cursor::new(Vec::new());
    {
        let mut encoder = png::Encoder::new(&mut buf, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer.write_image_data(samples).unwrap();
    }
    let path = dir.join(name);
    std::fs::write(&path, buf.into_inner()).unwrap();
    path
}

/// Write a YAML config file into `dir/blockpress.yaml`.
pub fn write_config(dir: &Path, yaml: &str) -> PathBuf {
    let path = dir.join("blockpress.yaml");
    std::fs::write(&path, yaml).unwrap();
    path
}
