//! Evaluation and input configuration

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while loading or validating an [`EvalConfig`]
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration text is not valid JSON for this schema
    #[error("Invalid configuration JSON: {0}")]
    Parse(#[from] serde_json::Error),

    /// A field holds a value outside its allowed range
    #[error("Invalid configuration: {message}")]
    Invalid {
        /// Error message
        message: String,
    },
}

impl ConfigError {
    /// Create an invalid-value error
    #[must_use]
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::Invalid {
            message: message.into(),
        }
    }
}

/// Limits and policies shared by the buffer, evaluator and formatter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvalConfig {
    /// Largest magnitude any intermediate or final value may reach
    pub max_magnitude: f64,
    /// Fractional digits kept when formatting a result
    pub precision: usize,
    /// Accept juxtaposed operands (`2(3)`, `2√9`) as multiplication
    pub implicit_multiplication: bool,
    /// Maximum number of tokens a buffer holds
    pub max_tokens: usize,
}

impl Default for EvalConfig {
    fn default() -> Self {
        Self {
            max_magnitude: Self::DEFAULT_MAX_MAGNITUDE,
            precision: Self::DEFAULT_PRECISION,
            implicit_multiplication: true,
            max_tokens: Self::DEFAULT_MAX_TOKENS,
        }
    }
}

impl EvalConfig {
    /// Default overflow ceiling
    pub const DEFAULT_MAX_MAGNITUDE: f64 = 1e100;
    /// Default fractional display digits
    pub const DEFAULT_PRECISION: usize = 10;
    /// Default buffer capacity
    pub const DEFAULT_MAX_TOKENS: usize = 256;
    /// Largest precision `f64` formatting can honour meaningfully
    pub const MAX_PRECISION: usize = 15;

    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the overflow ceiling
    #[must_use]
    pub fn with_max_magnitude(mut self, max_magnitude: f64) -> Self {
        self.max_magnitude = max_magnitude;
        self
    }

    /// Set the display precision
    #[must_use]
    pub const fn with_precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Enable or disable implicit multiplication
    #[must_use]
    pub const fn with_implicit_multiplication(mut self, enabled: bool) -> Self {
        self.implicit_multiplication = enabled;
        self
    }

    /// Set the buffer capacity
    #[must_use]
    pub const fn with_max_tokens(mut self, max_tokens: usize) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Checks every field is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.max_magnitude.is_finite() || self.max_magnitude <= 0.0 {
            return Err(ConfigError::invalid(format!(
                "max_magnitude must be positive and finite, got {}",
                self.max_magnitude
            )));
        }
        if self.precision > Self::MAX_PRECISION {
            return Err(ConfigError::invalid(format!(
                "precision must be at most {}, got {}",
                Self::MAX_PRECISION,
                self.precision
            )));
        }
        if self.max_tokens == 0 {
            return Err(ConfigError::invalid("max_tokens must be at least 1"));
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration; missing fields take defaults
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}
