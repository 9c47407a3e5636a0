//! Tapcalc CLI Library
//!
//! Command-line front end for the tapcalc keypad calculator.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

mod commands;
mod config;
mod error;
pub mod handlers;
mod output;

pub use commands::{Cli, Commands, EvalArgs, OutputFormat};
pub use config::{init_tracing, load_eval_config, CliConfig, Verbosity};
pub use error::{CliError, CliResult};
pub use output::{render_keys, render_view, KeyInfo};
