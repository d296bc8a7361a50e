//! Rasters CLI - Command-line interface
//!
//! Exposes the CRS-aware geometry operations on WKT input.

mod cli;
mod commands;
mod config_loader;
mod output;
mod output_types;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, reload, EnvFilter};

/// Log filter used until the configuration has been loaded
const BOOTSTRAP_FILTER: &str = "info";

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse();

    // Initialize tracing before anything can log
    let explicit_filter = EnvFilter::try_from_default_env().ok();
    let has_explicit_filter = explicit_filter.is_some();
    let (filter, filter_handle) =
        reload::Layer::new(explicit_filter.unwrap_or_else(|| EnvFilter::new(BOOTSTRAP_FILTER)));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = config_loader::load_config(cli.config.as_deref(), cli.config_overrides()?)?;

    // RUST_LOG wins over the configured filter
    if !has_explicit_filter {
        match EnvFilter::try_new(&config.log_filter.value) {
            Ok(configured) => filter_handle.reload(configured).context("Failed to apply log filter")?,
            Err(e) => tracing::warn!(
                "Invalid log filter '{}': {}; keeping '{}'",
                config.log_filter.value,
                e,
                BOOTSTRAP_FILTER
            ),
        }
    }

    commands::execute(cli, &config)
}
