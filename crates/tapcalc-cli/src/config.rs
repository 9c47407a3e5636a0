//! CLI configuration

use crate::commands::{Cli, OutputFormat};
use crate::error::{CliError, CliResult};
use std::path::Path;
use tapcalc::config::EvalConfig;
use tracing_subscriber::EnvFilter;

/// CLI verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Quiet - results only
    Quiet,
    /// Normal - default output
    #[default]
    Normal,
    /// Verbose - extra output
    Verbose,
    /// Debug - maximum output
    Debug,
}

impl Verbosity {
    /// Derives the level from `-q` and the `-v` count
    #[must_use]
    pub const fn from_flags(quiet: bool, verbose: u8) -> Self {
        if quiet {
            return Self::Quiet;
        }
        match verbose {
            0 => Self::Normal,
            1 => Self::Verbose,
            _ => Self::Debug,
        }
    }

    /// Check if quiet mode
    #[must_use]
    pub const fn is_quiet(self) -> bool {
        matches!(self, Self::Quiet)
    }

    /// Check if verbose or higher
    #[must_use]
    pub const fn is_verbose(self) -> bool {
        matches!(self, Self::Verbose | Self::Debug)
    }

    /// Default log filter when `RUST_LOG` is unset
    #[must_use]
    pub const fn filter_directive(self) -> &'static str {
        match self {
            Self::Quiet => "error",
            Self::Normal => "warn",
            Self::Verbose => "tapcalc=info,tapcalc_cli=info",
            Self::Debug => "tapcalc=debug,tapcalc_cli=debug",
        }
    }
}

/// CLI configuration
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Output format
    pub format: OutputFormat,
    /// Calculator settings
    pub eval: EvalConfig,
}

impl CliConfig {
    /// Create new default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the configuration from parsed arguments, loading `--config`
    pub fn from_cli(cli: &Cli) -> CliResult<Self> {
        let eval = match &cli.config {
            Some(path) => load_eval_config(path)?,
            None => EvalConfig::default(),
        };
        Ok(Self::new()
            .with_verbosity(Verbosity::from_flags(cli.quiet, cli.verbose))
            .with_format(cli.format)
            .with_eval(eval))
    }

    /// Set verbosity
    #[must_use]
    pub const fn with_verbosity(mut self, verbosity: Verbosity) -> Self {
        self.verbosity = verbosity;
        self
    }

    /// Set output format
    #[must_use]
    pub const fn with_format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    /// Set calculator settings
    #[must_use]
    pub fn with_eval(mut self, eval: EvalConfig) -> Self {
        self.eval = eval;
        self
    }
}

/// Reads and validates a JSON [`EvalConfig`] file
pub fn load_eval_config(path: &Path) -> CliResult<EvalConfig> {
    let text = std::fs::read_to_string(path)
        .map_err(|e| CliError::config_file(path.display().to_string(), e))?;
    Ok(EvalConfig::from_json_str(&text)?)
}

/// Installs the stderr log subscriber; `RUST_LOG` overrides the verbosity
pub fn init_tracing(verbosity: Verbosity) -> CliResult<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.filter_directive()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| CliError::logging(e.to_string()))
}
