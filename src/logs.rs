//! Logging setup for the CLI.

use std::env::var;
use std::io::{Error, Result};

use tracing::info;
use tracing_subscriber::fmt::format::FmtSpan;

/// Initialise logging from `RUST_LOG`, if it is set.
///
/// Returns whether logging was initialised.
pub fn from_env() -> Result<bool> {
    if var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .try_init()
            .map_err(Error::other)?;
        Ok(true)
    } else {
        Ok(false)
    }
}

/// Initialise logging from the `-v` count.
pub fn from_verbosity(verbosity: u8) {
    if verbosity == 0 {
        return;
    }

    let mut builder = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(match verbosity {
            1 => "warn",
            2 => "info",
            3 => "debug",
            _ => "trace",
        });

    if verbosity > 2 {
        builder = builder.with_span_events(FmtSpan::NEW | FmtSpan::CLOSE);
    }

    match builder.try_init() {
        Ok(_) => info!("logging initialised"),
        Err(e) => eprintln!("Failed to initialise logging, continuing with none\n{e}"),
    }
}
