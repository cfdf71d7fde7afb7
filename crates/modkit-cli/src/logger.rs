//! Logging setup for the modkit CLI.
//!
//! Library crates only emit `tracing` events; this module installs the
//! subscriber. Output goes to stderr.
//!
//! # Verbosity
//!
//! The filter is picked in this order:
//! 1. `--verbose`: debug for modkit crates
//! 2. `--quiet`: errors only
//! 3. `RUST_LOG`: custom filter
//! 4. `--log-level` or `settings.log_level` from the config file
//! 5. Default: info for modkit crates

use std::fmt;
use std::str::FromStr;

use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

const MODKIT_CRATES: [&str; 3] = ["modkit_cli", "modkit_config", "modkit_resolve"];

/// Log level for modkit output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogLevel {
    /// No logging output
    Silent,
    /// Only errors
    Error,
    /// Errors and warnings
    Warn,
    /// Errors, warnings, and info (default)
    #[default]
    Info,
    /// Debug output, including resolver setup and `~` retries
    Debug,
    /// Everything
    Trace,
}

impl LogLevel {
    /// Convert to tracing filter string
    pub fn as_filter(&self) -> &'static str {
        match self {
            LogLevel::Silent => "off",
            LogLevel::Error => "error",
            LogLevel::Warn => "warn",
            LogLevel::Info => "info",
            LogLevel::Debug => "debug",
            LogLevel::Trace => "trace",
        }
    }

    /// Filter directives scoping this level to the modkit crates.
    pub fn directives(&self) -> String {
        if *self == LogLevel::Silent {
            return "off".to_string();
        }

        MODKIT_CRATES
            .iter()
            .map(|krate| format!("{krate}={}", self.as_filter()))
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl FromStr for LogLevel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "off" => Ok(LogLevel::Silent),
            "error" => Ok(LogLevel::Error),
            "warn" | "warning" => Ok(LogLevel::Warn),
            "info" => Ok(LogLevel::Info),
            "debug" => Ok(LogLevel::Debug),
            "trace" => Ok(LogLevel::Trace),
            other => Err(format!("Invalid log level: {}", other)),
        }
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_filter())
    }
}

/// Build the filter for the given flags.
///
/// `RUST_LOG` is consulted only when neither flag is set.
pub fn build_filter(verbose: bool, quiet: bool, level: Option<LogLevel>) -> EnvFilter {
    if verbose {
        EnvFilter::new(LogLevel::Debug.directives())
    } else if quiet {
        EnvFilter::new(LogLevel::Error.directives())
    } else {
        EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(level.unwrap_or_default().directives()))
    }
}

/// Initialize the tracing subscriber.
///
/// Should be called once at the start of the program, before any logging.
///
/// ```rust,no_run
/// use modkit_cli::logger::{init_logger, LogLevel};
///
/// init_logger(false, false, false, Some(LogLevel::Warn));
/// tracing::warn!("tsconfig not found");
/// ```
pub fn init_logger(verbose: bool, quiet: bool, no_color: bool, level: Option<LogLevel>) {
    let filter = build_filter(verbose, quiet, level);

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(false)
        .with_level(true)
        .with_ansi(!no_color && crate::ui::should_use_color())
        .with_writer(std::io::stderr)
        .compact();

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();
}
