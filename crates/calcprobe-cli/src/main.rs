//! Calcprobe CLI application
//!
//! Drives the `bc` calculator as a subprocess: evaluate single expressions,
//! run the built-in case catalog, or list it.
//!
//! # Installation
//!
//! ```bash
//! cargo install --path crates/calcprobe-cli
//! ```
//!
//! Logs go to stderr. Set `RUST_LOG` or `CALCPROBE_LOG_LEVEL` to adjust
//! verbosity.

mod args;
mod commands;
mod console;
mod router;

use std::process::ExitCode;

use anyhow::Context;
use calcprobe_core::{Config, init_logging};
use clap::Parser;

pub use args::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref()).context("Failed to load configuration")?;
    router::apply_overrides(&cli, &mut config);
    config
        .evaluator
        .validate()
        .context("Invalid calculator configuration")?;

    init_logging(&config.logging);
    tracing::debug!(?config, "Configuration loaded");

    router::route(cli, config).await
}
