//! Blockpress - adaptive block-based lossy image compressor
//!
//! File-level collaborators around the `block-quant` core: PNG codec,
//! YAML configuration and the load → compress → save pipeline.
//! This library exposes modules for integration testing.

pub mod codec;
pub mod error;
pub mod models;
pub mod services;
