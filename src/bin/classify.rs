//! # Classify Binary Entry Point
//!
//! Sends one image to the hosted classification model and prints the ranked
//! predictions.
//!
//! ## Usage
//!
//! ```bash
//! export HF_API_KEY=hf_...
//! cargo run --bin classify -- data/000000039769.jpeg
//! ```
//!
//! With a configuration file and raw JSON output:
//! ```bash
//! cargo run --bin classify -- --config config/classify.toml --json
//! ```
//!
//! A service-side error payload (e.g. model still loading) is printed as-is
//! and the process still exits with status 0. Local failures (missing file,
//! connection errors, undecodable body) exit non-zero.

use clap::Parser;
use log::info;
use std::io::BufRead;
use std::path::PathBuf;

use image_classify::client::InferenceClient;
use image_classify::common::config::{ClassifierConfig, ClassifierSettings, Overrides};
use image_classify::common::logging::init_logger;

/// Command-line arguments for the classify binary
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Image to classify (defaults to the configured image)
    image: Option<PathBuf>,

    /// Path to a configuration file (TOML format)
    ///
    /// Example: config/classify.toml
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Inference endpoint URL
    #[arg(long)]
    endpoint: Option<String>,

    /// API token (overrides HF_API_KEY)
    #[arg(long)]
    token: Option<String>,

    /// Abort the request after this many seconds
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Print the decoded payload as JSON instead of a table
    #[arg(long)]
    json: bool,

    /// Wait for Enter before exiting
    #[arg(long)]
    pause: bool,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    init_logger();

    let args = Args::parse();

    let settings = match &args.config {
        Some(path) => ClassifierConfig::from_file(path)?.classifier,
        None => ClassifierSettings::default(),
    };

    let config = settings
        .apply_env(|key| std::env::var(key).ok())
        .apply_overrides(Overrides {
            endpoint: args.endpoint,
            token: args.token,
            image: args.image,
            timeout_secs: args.timeout_secs,
            pause_on_exit: args.pause,
        })
        .resolve()?;

    info!("🔍 Classifying {}", config.image.display());

    let client = InferenceClient::with_timeout(&config.endpoint, config.token, config.timeout)?;
    let response = client.classify(&config.image).await?;

    if args.json {
        println!("{}", response.to_json_pretty()?);
    } else {
        println!("{}", response);
    }

    if config.pause_on_exit {
        wait_for_enter()?;
    }

    Ok(())
}

fn wait_for_enter() -> std::io::Result<()> {
    eprintln!("Press Enter to continue...");
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(())
}
