//! Logging bootstrap shared by the biolib binaries
//!
//! Library code only emits `tracing` events; installing a subscriber is left
//! to the binary. Diagnostics go to stderr so record output on stdout stays
//! clean.

use crate::BiolibError;
use tracing_subscriber::EnvFilter;

/// Environment variable holding an `EnvFilter` directive, e.g. `biolib_bio=debug`
pub const LOG_ENV: &str = "BIOLIB_LOG";

/// Level used when neither `BIOLIB_LOG` nor `RUST_LOG` is set
pub fn default_level(verbosity: u8, quiet: bool) -> &'static str {
    if quiet {
        return "error";
    }
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Install the global fmt subscriber.
///
/// `BIOLIB_LOG` wins over `RUST_LOG`, which wins over the verbosity-derived
/// default.
pub fn init(verbosity: u8, quiet: bool) -> Result<(), BiolibError> {
    let filter = match std::env::var(LOG_ENV) {
        Ok(directive) => EnvFilter::try_new(directive)
            .map_err(|e| BiolibError::Configuration(format!("Invalid {}: {}", LOG_ENV, e)))?,
        Err(_) => EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(default_level(verbosity, quiet))),
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| BiolibError::Other(format!("Failed to initialise logging: {}", e)))
}
