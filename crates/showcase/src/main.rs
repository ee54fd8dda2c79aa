#![forbid(unsafe_code)]

//! # Showcase
//!
//! Headless host for the feature showcase screen.
//!
//! ## Usage
//!
//! ```bash
//! cargo run -p showcase
//! cargo run -p showcase -- --platform android render 2
//! ```

use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;

use showcase::cli::{Cli, Command};
use showcase::config::ShowcaseConfig;
use showcase::{host, logging};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose).context("failed to install logger")?;

    let config = ShowcaseConfig::from_cli(&cli)?;
    tracing::debug!(config = %config.to_diagnostic_string(), "configuration resolved");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command() {
        Command::Tour => host::run_tour(&config, &mut out)?,
        Command::Render { index } => host::render_tab(&config, usize::from(index), &mut out)?,
    }
    out.flush()?;

    Ok(())
}
