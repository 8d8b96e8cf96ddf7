//! Logging initialisation using the `tracing` ecosystem.
//!
//! ```text
//! RUST_LOG set?  --yes-->  EnvFilter::from_default_env
//!      |no
//!      v
//! EnvFilter::try_new(config.log_level)
//!      |
//!      v
//! registry + fmt layer (stderr, no ANSI when piped)
//! ```
//!
//! Logs go to stderr so command output on stdout stays machine-readable.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Parses a filter directive such as `warn` or `courier_application=debug,info`.
///
/// # Errors
///
/// Returns an error if `directives` is not a valid `EnvFilter` specification.
pub fn filter_for(directives: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(directives).with_context(|| format!("invalid log filter `{directives}`"))
}

/// Installs the global subscriber. `RUST_LOG` overrides `default_directives`.
///
/// # Errors
///
/// Returns an error if the filter is invalid or a subscriber is already installed.
pub fn init_logging(default_directives: &str) -> Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => filter_for(default_directives)?,
    };

    let layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_ansi(io::stderr().is_terminal());

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()
        .context("failed to install log subscriber")
}
