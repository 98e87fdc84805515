//! Public API for the block-quant crate.
//!
//! This module provides the high-level API: [`BlockCompressor`] builder and
//! [`CompressError`] unified error type.

mod builder;
mod error;

pub use builder::BlockCompressor;
pub use error::CompressError;
