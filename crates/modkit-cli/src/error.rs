//! Error handling for the modkit CLI.
//!
//! Domain errors from `modkit-config` and `modkit-resolve` convert into
//! [`CliError`] with `?`; `main` turns the result into a miette report.

use std::path::PathBuf;

use miette::Report;
use thiserror::Error;

/// Top-level CLI error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Config file loading, profiles and validation
    #[error("Configuration error: {0}")]
    Config(#[from] modkit_config::ConfigError),

    /// A specifier could not be resolved
    #[error(transparent)]
    Resolve(#[from] modkit_resolve::ResolutionError),

    /// Layered config (file, `MODKIT_*` env, flags) did not extract
    #[error("Invalid configuration: {message}\n\nHint: {hint}")]
    InvalidConfig { message: String, hint: String },

    /// File or directory not found
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    /// I/O errors from file system operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        CliError::InvalidConfig {
            message: err.to_string(),
            hint: "Check modkit.toml and MODKIT_* environment variables".to_string(),
        }
    }
}

/// Result type alias using `CliError` as the default error type.
pub type Result<T, E = CliError> = std::result::Result<T, E>;

/// Convert CliError to miette Report
pub fn cli_error_to_miette(err: CliError) -> Report {
    match err {
        CliError::Resolve(e) => Report::new(e),
        CliError::Config(modkit_config::ConfigError::ProfileNotFound(name)) => miette::miette!(
            "Profile '{}' not found in config\n\nHint: Define it under [profiles.{}] in modkit.toml",
            name,
            name
        ),
        _ => miette::miette!("{}", err),
    }
}
