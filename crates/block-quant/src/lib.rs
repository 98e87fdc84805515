#![allow(clippy::module_inception)]

//! block-quant: block-adaptive lossy compression of RGB rasters
//!
//! The image is cut into a grid of square blocks. Each block is scored for
//! how much neighboring pixels differ; similar blocks are re-sampled at
//! double size, and every block's pixels are blended toward the block's
//! mean color by a single quality scalar.
//!
//! # Quick Start
//!
//! The [`BlockCompressor`] builder is the primary entry point:
//!
//! ```
//! use block_quant::{BlockCompressor, Raster, Rgb};
//!
//! let pixels = vec![Rgb::new(200, 10, 10), Rgb::new(10, 10, 200)]
//!     .into_iter()
//!     .cycle()
//!     .take(64)
//!     .collect();
//! let input = Raster::from_pixels(pixels, 8, 8).unwrap();
//!
//! let output = BlockCompressor::new()
//!     .block_size(4)
//!     .quality(0.25)
//!     .compress(&input)
//!     .unwrap();
//!
//! assert_eq!(output.width(), 8);
//! assert_eq!(output.height(), 8);
//! ```
//!
//! # Pipeline
//!
//! ```text
//! BlockGrid            origins on a fixed stride, row-major
//!     |
//!     v
//! average_difference   mean |right| + |below| channel distance per pixel
//!     |
//!     v
//! adaptive_size        double the edge (max 32) if score < 50 * quality
//!     |
//!     v
//! quantize_block       (1 - q) * mean + q * pixel, truncated
//!     |
//!     v
//! composite            clipped write at the origin, scan order
//! ```
//!
//! Blocks are independent until compositing, so analysis and quantization
//! run on the rayon pool by default. Compositing stays in scan order, which
//! makes the output identical to a sequential run.
//!
//! # Quality
//!
//! Quality is one scalar in `[0.0, 1.0]`. Higher quality keeps more of the
//! original pixel in the blend *and* raises the similarity threshold, so
//! blocks grow more readily. Out-of-range values are rejected with
//! [`CompressError::QualityOutOfRange`]; use [`Quality::saturating`] to clamp
//! instead.

pub mod api;
pub mod block;
pub mod composite;
pub mod quality;
pub mod quantize;
pub mod raster;
pub mod report;
pub mod similarity;
pub mod sizing;


pub use api::{BlockCompressor, CompressError};
pub use block::{BlockGrid, BlockRect, BlockView};
pub use composite::composite;
pub use quality::Quality;
pub use quantize::{block_mean, quantize_block, QuantizedBlock};
pub use raster::{DimensionError, Raster, Rgb};
pub use report::CompressionReport;
pub use similarity::{average_difference, color_distance};
pub use sizing::{adaptive_size, SizeDecision, MAX_BLOCK_SIZE, SIMILARITY_SCALE};
