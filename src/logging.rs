//! Logging setup for the command-line tool
//!
//! Installs a compact `tracing` subscriber writing to stderr. The filter comes
//! from `RUST_LOG` unless verbosity flags were given on the command line.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::{SubscriberInitExt, TryInitError};
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVE: &str = "warn";

/// Errors raised while installing the global subscriber
#[derive(Debug, thiserror::Error)]
pub enum LoggingError {
    #[error("Invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("Tracing subscriber error: {0}")]
    Subscriber(#[from] TryInitError),
}

/// Filter directive for a `-v` count
pub fn directive_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => DEFAULT_DIRECTIVE,
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Build the filter: explicit verbosity first, then `RUST_LOG`, then the default
pub fn build_env_filter(verbosity: u8) -> Result<EnvFilter, ParseError> {
    if verbosity > 0 {
        return EnvFilter::try_new(directive_for(verbosity));
    }
    EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new(DEFAULT_DIRECTIVE))
}

/// Install the global subscriber. Fails if one is already installed.
pub fn init(verbosity: u8) -> Result<(), LoggingError> {
    let filter = build_env_filter(verbosity)?;
    let layer = tracing_subscriber::fmt::layer()
        .compact()
        .with_target(false)
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(layer)
        .try_init()?;
    Ok(())
}
