//! leethint - Screen-reading coding hint assistant
//!
//! Captures the two halves of the screen (problem statement on the left,
//! code editor on the right), OCRs them, and heuristically segments the
//! text into a title, description, and code. Optionally asks a hint
//! endpoint for a mentoring nudge built from that triple.

mod capture;
mod config;
mod error;
mod hint;
mod parse;
mod pipeline;
mod vision;
mod worker;

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Result};
use clap::Parser;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use crate::config::AppConfig;
use crate::hint::HintClient;
use crate::pipeline::{Extraction, ExtractionPipeline};
use crate::worker::ExtractionWorker;

/// leethint - OCR-based problem and code extraction with optional hints
#[derive(Parser, Debug)]
#[command(name = "leethint")]
#[command(about = "Extracts the on-screen coding problem and code via OCR, optionally requesting a hint")]
struct Args {
    /// Request a hint from the configured endpoint after extraction
    #[arg(long)]
    hint: bool,

    /// Validate the API key against the hint endpoint and exit
    #[arg(long)]
    validate_key: bool,

    /// Re-run extraction every N seconds until interrupted
    #[arg(long, value_name = "SECS")]
    watch: Option<u64>,

    /// Save the captured region images for troubleshooting
    #[arg(long)]
    save_debug: bool,

    /// Path to an alternate config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();

    let mut config = load_or_create_config(args.config.as_deref());
    if args.save_debug {
        config.capture.save_debug_images = true;
    }

    if args.validate_key {
        return validate_key(&config);
    }

    let pipeline = ExtractionPipeline::new(&config);

    if let Some(secs) = args.watch {
        return run_watch(pipeline, secs);
    }

    let extraction = pipeline.extract_all();
    print_extraction(&extraction);

    if args.hint {
        let client = hint_client(&config)?;
        info!("requesting hint for {:?}", extraction.problem.title);
        match client.generate_hint(&extraction.problem, &extraction.code) {
            Ok(hint) => println!("\n--- Hint ---\n{hint}"),
            Err(e) => println!("\nError generating hint: {e}"),
        }
    }

    Ok(())
}

/// Load configuration from an explicit path, the config dir, or defaults
fn load_or_create_config(path: Option<&Path>) -> AppConfig {
    if let Some(path) = path {
        match config::load_config(path) {
            Ok(config) => {
                info!("Loaded configuration from {:?}", path);
                return config;
            }
            Err(e) => warn!("Failed to load {:?}: {e}; falling back to defaults", path),
        }
    } else if let Ok(config_dir) = config::get_config_dir() {
        let config_path = config_dir.join("config.toml");
        if config_path.exists() {
            if let Ok(config) = config::load_config(&config_path) {
                info!("Loaded configuration from {:?}", config_path);
                return config;
            }
        }
    }
    info!("Using default configuration");
    AppConfig::default()
}

fn hint_client(config: &AppConfig) -> Result<HintClient> {
    let api_key = std::env::var("ANTHROPIC_API_KEY")
        .map_err(|_| anyhow!("ANTHROPIC_API_KEY is not set"))?;
    HintClient::new(api_key, config.hint.clone())
}

fn validate_key(config: &AppConfig) -> Result<()> {
    let client = hint_client(config)?;
    if client.validate_api_key()? {
        info!("API key validated successfully");
        Ok(())
    } else {
        Err(anyhow!("API key rejected by the hint endpoint"))
    }
}

/// Periodic extraction through the background worker
fn run_watch(pipeline: ExtractionPipeline, secs: u64) -> Result<()> {
    let interval = Duration::from_secs(secs.max(1));
    info!("Watching the screen every {}s (Ctrl+C to stop)", interval.as_secs());

    let worker = ExtractionWorker::spawn(move || pipeline.extract_all());

    loop {
        if !worker.trigger() {
            info!("extraction still in flight; skipping this tick");
        }
        std::thread::sleep(interval);
        if let Some(extraction) = worker.latest() {
            print_extraction(&extraction);
        }
    }
}

fn print_extraction(extraction: &Extraction) {
    println!("=== {} ===", extraction.problem.title);
    println!("{}", extraction.problem.description);
    println!("\n--- Code ---\n{}", extraction.code);
}
