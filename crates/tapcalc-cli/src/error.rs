//! Error types for the CLI

use tapcalc::config::ConfigError;
use tapcalc::keypad::KeyError;
use thiserror::Error;

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;

/// Errors that can occur in the CLI
///
/// Evaluation errors are not listed: they are part of the view-state and
/// are printed, not raised.
#[derive(Debug, Error)]
pub enum CliError {
    /// Key sequence could not be parsed
    #[error("{0}")]
    Key(#[from] KeyError),

    /// Configuration file is invalid
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Configuration file could not be read
    #[error("Cannot read config file {path}: {source}")]
    ConfigFile {
        /// Path that was read
        path: String,
        /// Underlying error
        source: std::io::Error,
    },

    /// IO error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Output could not be serialized
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Logging could not be initialised
    #[error("Logging setup failed: {message}")]
    Logging {
        /// Error message
        message: String,
    },
}

impl CliError {
    /// Create a config file read error
    #[must_use]
    pub fn config_file(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::ConfigFile {
            path: path.into(),
            source,
        }
    }

    /// Create a logging setup error
    #[must_use]
    pub fn logging(message: impl Into<String>) -> Self {
        Self::Logging {
            message: message.into(),
        }
    }
}
