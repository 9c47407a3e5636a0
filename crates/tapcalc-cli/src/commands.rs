//! CLI command definitions using clap

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Tapcalc: keypad calculator driven by key sequences
#[derive(Parser, Debug)]
#[command(name = "tapcalc")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (print results only)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, value_enum, default_value = "text", global = true)]
    pub format: OutputFormat,

    /// JSON file with evaluation settings
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Press a key sequence on a fresh calculator and show the display
    ///
    /// Keys: 0-9 . + - * × / ÷ ( ) % ^ = C, r or √ (square root),
    /// s or ² (square), < or ⌫ (backspace). Whitespace is ignored.
    Eval(EvalArgs),

    /// Read key sequences line by line from stdin into one calculator
    Repl,

    /// List every key with its label and accepted characters
    Keys,
}

/// Arguments for the eval command
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Key sequence, e.g. "(2+3)*4="
    #[arg(required = true, allow_hyphen_values = true, num_args = 1..)]
    pub keys: Vec<String>,
}

impl EvalArgs {
    /// Joins the key arguments into one sequence
    #[must_use]
    pub fn sequence(&self) -> String {
        self.keys.concat()
    }
}

/// Output format
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text
    #[default]
    Text,
    /// One JSON document per view-state
    Json,
}
