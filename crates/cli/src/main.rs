//! promptloom CLI — the main entry point.
//!
//! Reads a prompt template, expands every file and web reference it
//! contains, records the assembled prompt next to the input, submits it
//! to Anthropic's Messages API, and records the answer.

use clap::Parser;
use promptloom::{driver, Cli};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    // Initialize tracing
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .with_target(false)
        .init();

    driver::run(cli).await
}
