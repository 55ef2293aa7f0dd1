//! Command-line wrapper around the phone masking library.

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::path::PathBuf;
use tracing::info;

use phonemask::{process_file, MaskMode, MaskingEngine, MaskingPolicy};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(
    name = "phonemask",
    author,
    version,
    about = "Masks or replaces phone numbers in text and data files"
)]
struct Args {
    /// Path to the input file to process.
    input_file: PathBuf,

    /// Path to the output file. Overwrites the input file when omitted.
    #[arg(short, long = "output_file", env = "PHONEMASK_OUTPUT")]
    output_file: Option<PathBuf>,

    /// Character used for masking phone number digits. Defaults to '*'.
    #[arg(short, long = "mask_char", env = "PHONEMASK_MASK_CHAR")]
    mask_char: Option<char>,

    /// Replace phone numbers with fake phone numbers instead of masking.
    #[arg(short, long, env = "PHONEMASK_REPLACE")]
    replace: bool,

    /// Keep the original area code when replacing phone numbers.
    #[arg(short, long = "keep_area_code", env = "PHONEMASK_KEEP_AREA_CODE")]
    keep_area_code: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long = "log_level", env = "PHONEMASK_LOG_LEVEL", default_value = "info")]
    log_level: String,

    /// Path to a JSON policy file. Explicit flags take precedence.
    #[arg(short, long, env = "PHONEMASK_CONFIG")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize tracing; RUST_LOG wins over --log_level when set.
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&args.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let mut policy = match args.config {
        Some(ref path) => MaskingPolicy::from_json_file(path)
            .with_context(|| format!("Failed to load policy file: {}", path.display()))?,
        None => MaskingPolicy::default(),
    };
    if let Some(mask_char) = args.mask_char {
        policy.mask_char = mask_char;
    }
    if args.replace {
        policy.mode = MaskMode::Replace;
    }
    if args.keep_area_code {
        policy.keep_area_code = true;
    }

    let engine = MaskingEngine::new(policy).context("Failed to build masking engine")?;
    let mut rng = StdRng::from_rng(&mut rand::rng());

    let report = process_file(
        &args.input_file,
        args.output_file.as_deref(),
        &engine,
        &mut rng,
    )
    .with_context(|| format!("Failed to process {}", args.input_file.display()))?;

    info!(
        input = %args.input_file.display(),
        output = %report.output_path.display(),
        format = %report.format,
        matches = report.matches,
        "Processed file"
    );

    Ok(())
}
