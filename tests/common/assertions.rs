//! Assertion helpers for tests.

use std::path::Path;

use block_quant::{Raster, Rgb};
use pretty_assertions::assert_eq;

const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A];

/// Assert the file exists and starts with the PNG signature, then decode it
pub fn assert_png_file(path: &Path) -> Raster {
    let bytes = std::fs::read(path)
        .unwrap_or_else(|e| panic!("Expected PNG at {}: {e}", path.display()));
    assert!(
        bytes.starts_with(&PNG_SIGNATURE),
        "Expected PNG signature, got {:?}",
        &bytes[..8.min(bytes.len())]
    );
    blockpress::codec::decode_png(&bytes).unwrap()
}

/// Assert two rasters have the same width and height
pub fn assert_same_dimensions(actual: &Raster, expected: &Raster) {
    assert_eq!(
        (actual.width(), actual.height()),
        (expected.width(), expected.height()),
        "Dimensions differ"
    );
}

/// Assert every channel of `actual` is within `tolerance` of `expected`
pub fn assert_close(actual: Rgb, expected: Rgb, tolerance: u8) {
    let within = actual.r.abs_diff(expected.r) <= tolerance
        && actual.g.abs_diff(expected.g) <= tolerance
        && actual.b.abs_diff(expected.b) <= tolerance;
    assert!(
        within,
        "Expected {:?} within {} of {:?}",
        actual, tolerance, expected
    );
}
