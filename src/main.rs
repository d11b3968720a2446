//! music-batch - batch utilities for a music library.
//!
//! Flattens nested `Artist/Album/Song` trees into a single folder, and
//! downloads a list of songs then converts them with external tools.

pub mod cli;
pub mod config;
pub mod error;
pub mod flatten;
pub mod manifest;
pub mod pipeline;
pub mod scanner;
pub mod search;
#[cfg(test)]
pub mod test_utils;
pub mod tools;

use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

fn main() -> anyhow::Result<()> {
    let args = cli::Cli::parse();

    // Logs go to stderr so progress output on stdout stays clean
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(true).with_writer(std::io::stderr))
        .with(log_filter(std::env::var(EnvFilter::DEFAULT_ENV).ok().as_deref()))
        .init();

    cli::run_command(&args)
}

const DEFAULT_LOG_FILTER: &str = "warn";

/// `RUST_LOG` directives when set and valid, `warn` otherwise.
fn log_filter(directives: Option<&str>) -> EnvFilter {
    directives
        .and_then(|d| EnvFilter::try_new(d).ok())
        .unwrap_or_else(|| EnvFilter::new(DEFAULT_LOG_FILTER))
}
