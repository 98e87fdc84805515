use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use block_quant::{Quality, MAX_BLOCK_SIZE, SIMILARITY_SCALE};
use blockpress::codec::ImageFormat;
use blockpress::models::AppConfig;
use blockpress::services::{default_output_path, CompressionPipeline};

#[derive(Parser)]
#[command(name = "blockpress")]
#[command(about = "Adaptive block-based lossy image compressor")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Compress an image (PNG, JPEG, BMP, GIF, TIFF or WebP in; PNG or JPEG out)
    Compress(CompressArgs),
}

#[derive(Args)]
struct CompressArgs {
    /// Input image
    input: PathBuf,

    /// Output file path; its extension (.png, .jpg, .jpeg) picks the format
    /// (default: <input stem><suffix>.<ext> next to the input)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Format for the default output path: png or jpeg
    #[arg(short, long, value_parser = parse_format)]
    format: Option<ImageFormat>,

    /// JPEG encoder quality (1-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=100))]
    jpeg_quality: Option<u8>,

    /// Nominal block size in pixels
    #[arg(short, long)]
    block_size: Option<usize>,

    /// Quality in [0.0, 1.0]; higher keeps more detail
    #[arg(short, long)]
    quality: Option<f64>,

    /// YAML config file (overrides BLOCKPRESS_CONFIG)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Analyse blocks on a single thread
    #[arg(long)]
    sequential: bool,

    /// Re-compress the output with oxipng
    #[arg(long)]
    optimize: bool,

    /// Clamp an out-of-range quality instead of rejecting it
    #[arg(long)]
    clamp_quality: bool,

    /// Print the run summary as JSON on stdout
    #[arg(long)]
    json: bool,
}

fn parse_format(value: &str) -> Result<ImageFormat, String> {
    ImageFormat::from_extension(value).ok_or_else(|| format!("unknown format '{value}'"))
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Compress(args)) => run_compress_command(args),
        None => {
            run_status_command();
            Ok(())
        }
    }
}

/// Compress one image file
fn run_compress_command(args: CompressArgs) -> anyhow::Result<()> {
    // Logs go to stderr, stdout carries the summary
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "blockpress=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let config_path = args
        .config
        .or_else(|| std::env::var("BLOCKPRESS_CONFIG").ok().map(PathBuf::from));
    let mut config = AppConfig::load(config_path.as_deref())?;

    if let Some(block_size) = args.block_size {
        config.block_size = block_size;
    }
    if let Some(quality) = args.quality {
        config.quality = quality;
    }
    if args.clamp_quality {
        let clamped = Quality::saturating(config.quality).value();
        if clamped != config.quality {
            tracing::warn!(requested = config.quality, clamped, "Quality clamped");
        }
        config.quality = clamped;
    }
    if args.sequential {
        config.parallel = false;
    }
    if args.optimize {
        config.optimize_png = true;
    }
    if let Some(format) = args.format {
        config.output_format = Some(format);
    }
    if let Some(jpeg_quality) = args.jpeg_quality {
        config.jpeg_quality = jpeg_quality;
    }

    let output = args.output.unwrap_or_else(|| {
        default_output_path(&args.input, &config.output_suffix, config.output_format)
    });

    let pipeline = CompressionPipeline::new(config);
    let outcome = pipeline.run(&args.input, &output)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!(
            "Compressed {} -> {} ({}x{}, {} blocks, {} grown, {} bytes)",
            outcome.input.display(),
            outcome.output.display(),
            outcome.width,
            outcome.height,
            outcome.origins,
            outcome.grown,
            outcome.output_bytes
        );
    }

    Ok(())
}

/// Display version, environment and effective defaults
fn run_status_command() {
    const VERSION: &str = env!("CARGO_PKG_VERSION");

    let config_file = std::env::var("BLOCKPRESS_CONFIG").ok();
    let rust_log = std::env::var("RUST_LOG").ok();

    println!("Blockpress v{VERSION}");
    println!("Adaptive block-based lossy image compressor\n");

    println!("Environment Variables:");
    println!(
        "  BLOCKPRESS_CONFIG = {}",
        config_file.as_deref().unwrap_or("(not set)")
    );
    println!(
        "  RUST_LOG          = {}",
        rust_log.as_deref().unwrap_or("blockpress=info (default)")
    );

    println!("\nSettings:");
    match AppConfig::load(config_file.as_deref().map(std::path::Path::new)) {
        Ok(config) => {
            let source = config_file.as_deref().unwrap_or("defaults");
            println!("  Source:        {source}");
            println!("  Block size:    {}", config.block_size);
            println!("  Quality:       {}", config.quality);
            println!(
                "  Threads:       {}",
                if config.parallel { "parallel" } else { "sequential" }
            );
            println!("  Optimize PNG:  {}", config.optimize_png);
            println!("  Output suffix: {}", config.output_suffix);
            println!(
                "  Output format: {}",
                config
                    .output_format
                    .map_or("same as input", |format| format.extension())
            );
            println!("  JPEG quality:  {}", config.jpeg_quality);
        }
        Err(e) => println!("  Config error:  {e}"),
    }

    println!("\nLimits:");
    println!("  Max grown block size: {MAX_BLOCK_SIZE}");
    println!("  Similarity threshold: {SIMILARITY_SCALE} x quality");

    println!("\nRun 'blockpress compress --help' to compress an image.");
}
