//! Main application entry point (CLI binary).
//!
//! This is a thin wrapper around the `seo_analyzer` library that handles:
//! - Command-line argument parsing
//! - Environment variable loading (.env file)
//! - Logger initialization
//! - One-shot analysis or the HTTP server
//!
//! All core functionality is implemented in the library crate.

use std::process;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use seo_analyzer::initialization::init_logger_with;
use seo_analyzer::server::start_server;
use seo_analyzer::{Config, SeoEngine};

#[tokio::main]
async fn main() -> Result<()> {
    // A missing .env is fine
    let _ = dotenvy::dotenv();

    let config = Config::parse();

    init_logger_with(config.log_level.clone().into(), config.log_format.clone())
        .context("Failed to initialize logger")?;

    let engine = SeoEngine::new(&config).context("Failed to initialize analysis engine")?;

    match config.url.as_deref() {
        Some(url) => {
            let report = match engine.analyze_url(url).await {
                Ok(report) => report,
                Err(e) => {
                    eprintln!("seo_analyzer error: {}", e);
                    process::exit(1);
                }
            };
            let json = if config.pretty {
                serde_json::to_string_pretty(&report)
            } else {
                serde_json::to_string(&report)
            }
            .context("Failed to serialize report")?;
            println!("{}", json);
            Ok(())
        }
        None => start_server(&config.bind, config.port, Arc::new(engine)).await,
    }
}
