mod compression_pipeline;

pub use compression_pipeline::{default_output_path, CompressionPipeline, PipelineOutcome};
