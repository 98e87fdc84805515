use std::path::{Path, PathBuf};
use std::time::Instant;

use block_quant::{BlockCompressor, CompressionReport, Raster};
use serde::Serialize;

use crate::codec::{self, ImageFormat};
use crate::error::PipelineError;
use crate::models::AppConfig;

/// Summary of one file compressed by the pipeline
#[derive(Debug, Clone, Serialize)]
pub struct PipelineOutcome {
    pub input: PathBuf,
    pub output: PathBuf,
    pub width: usize,
    pub height: usize,
    pub format: ImageFormat,
    pub block_size: usize,
    pub quality: f64,
    /// Grid origins processed
    pub origins: usize,
    /// Origins whose block was enlarged
    pub grown: usize,
    pub mean_similarity: f64,
    /// Size of the written file
    pub output_bytes: usize,
    pub elapsed_ms: u64,
}

/// Pipeline that orchestrates load → compress → save
pub struct CompressionPipeline {
    config: AppConfig,
    compressor: BlockCompressor,
}

impl CompressionPipeline {
    pub fn new(config: AppConfig) -> Self {
        let compressor = config.compressor();
        Self { config, compressor }
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    /// Compress an in-memory raster with the configured settings.
    pub fn compress_raster(
        &self,
        raster: &Raster,
    ) -> Result<(Raster, CompressionReport), PipelineError> {
        Ok(self.compressor.compress_with_report(raster)?)
    }

    /// Compress the image at `input` and write the result to `output` in the
    /// format named by its extension.
    ///
    /// Settings, the output format and the input/output distinction are
    /// checked before the input is read. An existing output file is
    /// replaced unless it is the input itself.
    pub fn run(&self, input: &Path, output: &Path) -> Result<PipelineOutcome, PipelineError> {
        let started = Instant::now();

        self.compressor.validate()?;
        let format = codec::output_format(output)?;
        ensure_distinct(input, output)?;

        let raster = codec::load_image(input)?;
        tracing::info!(
            path = %input.display(),
            width = raster.width(),
            height = raster.height(),
            "Loaded image"
        );

        let (compressed, report) = self.compress_raster(&raster)?;
        tracing::debug!(
            origins = report.origins,
            grown = report.grown,
            mean_similarity = report.mean_similarity(),
            "Compressed image"
        );

        let output_bytes = codec::save_image(output, &compressed, self.config.save_options())?;
        let elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::info!(
            path = %output.display(),
            ?format,
            bytes = output_bytes,
            elapsed_ms,
            "Wrote compressed image"
        );

        Ok(PipelineOutcome {
            input: input.to_path_buf(),
            output: output.to_path_buf(),
            width: report.width,
            height: report.height,
            format,
            block_size: report.block_size,
            quality: report.quality.value(),
            origins: report.origins,
            grown: report.grown,
            mean_similarity: report.mean_similarity(),
            output_bytes,
            elapsed_ms,
        })
    }
}

/// Fails when `output` resolves to the same file as `input`.
fn ensure_distinct(input: &Path, output: &Path) -> Result<(), PipelineError> {
    // A missing output cannot be the input
    if let (Ok(input), Ok(resolved)) = (input.canonicalize(), output.canonicalize()) {
        if input == resolved {
            return Err(PipelineError::OutputIsInput(output.to_path_buf()));
        }
    }
    Ok(())
}

/// Output path next to `input`: `<stem><suffix>.<ext>`.
///
/// The extension is `format`'s, or the input's own when `format` is unset
/// or matches it. Inputs in formats that cannot be written get `.png`.
pub fn default_output_path(input: &Path, suffix: &str, format: Option<ImageFormat>) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());

    let input_format = ImageFormat::from_path(input);
    let target = format.or(input_format).unwrap_or(ImageFormat::Png);
    let extension = match input.extension() {
        Some(ext) if input_format == Some(target) => ext.to_string_lossy().into_owned(),
        _ => target.extension().to_string(),
    };
    input.with_file_name(format!("{stem}{suffix}.{extension}"))
}
