//! Raster storage for 8-bit RGB images.
//!
//! This module provides the [`Rgb`] pixel type, the owned [`Raster`] grid
//! and [`DimensionError`] for buffers that do not match their declared
//! dimensions.

mod error;
mod raster;
mod rgb;

pub use error::DimensionError;
pub use raster::Raster;
pub use rgb::Rgb;
