//! Tapcalc CLI: keypad calculator driven by key sequences
//!
//! ## Usage
//!
//! ```bash
//! tapcalc eval "(2+3)*4="          # Press keys, print display and result
//! tapcalc --format json eval "r9=" # View-state as JSON
//! tapcalc repl                     # One session, key sequences from stdin
//! tapcalc keys                     # List keys and their characters
//! ```

use clap::Parser;
use std::io::{self, Write};
use std::process::ExitCode;
use tapcalc_cli::handlers::{run_eval, run_keys, run_repl};
use tapcalc_cli::{init_tracing, Cli, CliConfig, CliResult, Commands};

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> CliResult<()> {
    let cli = Cli::parse();
    let config = CliConfig::from_cli(&cli)?;
    init_tracing(config.verbosity)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match cli.command {
        Commands::Eval(args) => run_eval(&config, &args.sequence(), &mut out)?,
        Commands::Repl => run_repl(&config, io::stdin().lock(), &mut out)?,
        Commands::Keys => run_keys(&config, &mut out)?,
    }
    out.flush()?;
    Ok(())
}
