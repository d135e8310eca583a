//! Logging utilities using the tracing framework
//!
//! All diagnostics go to stderr so stdout carries only the report.

use std::fmt::Display;
use tracing_subscriber::EnvFilter;

/// Map the `-v` count to a default filter directive
pub fn level_for_verbosity(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",  // Default: only warnings and errors
        1 => "info",  // -v: info level
        2 => "debug", // -vv: debug level
        _ => "trace", // -vvv: trace level
    }
}

/// Install the global subscriber. `RUST_LOG` wins over the verbosity flag.
pub fn init(verbose: u8) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_for_verbosity(verbose)));

    // A second init (e.g. from tests) is not an error worth surfacing
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Log an informational message (wrapper around tracing::info)
pub fn log_info<T: Display>(msg: T) {
    tracing::info!("{}", msg);
}

/// Log a warning message (wrapper around tracing::warn)
pub fn log_warn<T: Display>(msg: T) {
    tracing::warn!("{}", msg);
}

/// Log an error message (wrapper around tracing::error)
pub fn log_error<T: Display>(msg: T) {
    tracing::error!("{}", msg);
}

/// Macro for convenient info logging
#[macro_export]
macro_rules! log_info {
    ($($arg:tt)*) => {
        $crate::utils::logger::log_info(format!($($arg)*))
    };
}

/// Macro for convenient warning logging
#[macro_export]
macro_rules! log_warn {
    ($($arg:tt)*) => {
        $crate::utils::logger::log_warn(format!($($arg)*))
    };
}

/// Macro for convenient error logging
#[macro_export]
macro_rules! log_error {
    ($($arg:tt)*) => {
        $crate::utils::logger::log_error(format!($($arg)*))
    };
}
