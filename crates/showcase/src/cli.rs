//! Command-line interface for the headless `showcase` host.
//!
//! # Examples
//!
//! ```bash
//! # Walk through every tab, the busy guard and the effects
//! showcase
//!
//! # Print the Platform panel for an Android device as JSON
//! showcase --platform android render 2
//!
//! # Load timings from a file and log at debug level
//! showcase --config showcase.toml -vv tour
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::capabilities::PlatformFamily;

/// Headless host for the feature showcase screen.
///
/// Mounts the showcase controller on a deterministic frame scheduler and
/// prints panel descriptors and view transforms as JSON lines.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "showcase",
    author,
    version,
    about = "Headless host for the feature showcase screen"
)]
pub struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, short = 'c', env = "SHOWCASE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Platform family to emulate
    #[arg(long, value_enum, env = "SHOWCASE_PLATFORM")]
    pub platform: Option<PlatformFamily>,

    /// Frames per second of the animation scheduler
    #[arg(long)]
    pub fps: Option<u32>,

    /// Viewport width the header slides in from
    #[arg(long)]
    pub viewport_width: Option<f64>,

    /// Enable verbose logging (repeat for more)
    #[arg(long, short = 'v', action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Optional subcommand
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// What the host should do.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Walk through the whole screen (default)
    Tour,
    /// Print the descriptor of one tab
    Render {
        /// Tab index (0 Features, 1 Animations, 2 Platform, 3 Interactions)
        #[arg(value_parser = clap::value_parser!(u8).range(0..4))]
        index: u8,
    },
}

impl Cli {
    /// Subcommand to run, defaulting to the tour.
    #[must_use]
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Tour)
    }
}
