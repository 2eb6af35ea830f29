//! pulid - generate prefixed, sortable IDs from the command line.
//!
//! Prints one ID per line to stdout; logs and errors go to stderr.

use std::io;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod cli;
mod config;
mod error;

use cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = config::Config::from_env();

    // Initialize tracing (prefer RUST_LOG, fallback to PULID_LOG_LEVEL)
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level)))
        .with(
            tracing_subscriber::fmt::layer()
                .compact()
                .with_writer(io::stderr),
        )
        .init();

    if let Err(e) = cli.run(io::stdout().lock()) {
        error::print_error(&e);
        std::process::exit(1);
    }

    Ok(())
}
