//! Operator log channel.
//!
//! The controller reports through `tracing`; this module installs the
//! subscriber the headless host uses. `RUST_LOG` takes precedence over the
//! verbosity count.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

/// Map a `-v` count onto a level filter.
#[must_use]
pub const fn level_for(verbosity: u8) -> LevelFilter {
    match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

/// Install a stderr `fmt` subscriber for the process.
///
/// # Errors
///
/// Fails when a global subscriber is already installed.
pub fn init(verbosity: u8) -> Result<(), tracing_subscriber::util::TryInitError> {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let filter = EnvFilter::builder()
        .with_default_directive(level_for(verbosity).into())
        .from_env_lossy();

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .try_init()
}
