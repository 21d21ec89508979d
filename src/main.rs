//! DataCamp Fetcher CLI application
//!
//! Command-line interface for downloading DataCamp course and track
//! materials picked from an interactive listing.

use std::process;

use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

use datacamp_fetcher::cli::{Cli, handle_session};
use datacamp_fetcher::config::AppConfig;
use datacamp_fetcher::errors::Result;

#[tokio::main]
async fn main() {
    let result = run().await;

    if let Err(e) = result {
        tracing::debug!("Exiting after {} error: {:?}", e.category(), e);
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Main application logic
async fn run() -> Result<()> {
    // Load environment variables from .env file if it exists
    dotenv::dotenv().ok();

    let cli = Cli::parse_args();
    let config = AppConfig::load(cli.global.config.clone()).await?;

    init_logging(&cli, &config);

    info!("DataCamp Fetcher v{} starting", env!("CARGO_PKG_VERSION"));

    handle_session(cli.session, &config).await
}

/// Initialize logging from the verbosity flags, falling back to the config level
fn init_logging(cli: &Cli, config: &AppConfig) {
    let default_level = config
        .logging
        .level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::WARN);
    let log_level = cli.log_level_or(default_level);

    let mut filter = EnvFilter::from_default_env();
    if let Ok(directive) = format!("datacamp_fetcher={}", log_level).parse() {
        filter = filter.add_directive(directive);
    }

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_level(cli.global.very_verbose)
        .init();

    if cli.global.very_verbose {
        info!("Very verbose logging enabled");
    } else if cli.global.verbose {
        info!("Verbose logging enabled");
    }
}
