//! Subcommand handlers
//!
//! Handlers write to the supplied writer so they can be driven from tests
//! without spawning the binary.

use crate::config::CliConfig;
use crate::error::CliResult;
use crate::output::{render_keys, render_view};
use std::io::{BufRead, Write};
use tapcalc::keypad::parse_keys;
use tapcalc::session::Session;
use tracing::{debug, info, warn};

/// Presses a key sequence on a fresh session and prints the view-state
pub fn run_eval<W: Write>(config: &CliConfig, sequence: &str, out: &mut W) -> CliResult<()> {
    let keys = parse_keys(sequence)?;
    info!(keys = keys.len(), "eval");
    let mut session = Session::with_config(config.eval.clone());
    session.press_all(keys);
    writeln!(
        out,
        "{}",
        render_view(session.view_state(), config.format, config.verbosity)?
    )?;
    Ok(())
}

/// Feeds each input line into one session, printing the view-state per line
///
/// A line with an unknown key is reported on stderr and skipped as a whole.
pub fn run_repl<R: BufRead, W: Write>(config: &CliConfig, input: R, out: &mut W) -> CliResult<()> {
    let mut session = Session::with_config(config.eval.clone());
    for (number, line) in input.lines().enumerate() {
        let line = line?;
        match parse_keys(&line) {
            Ok(keys) => {
                debug!(line = number + 1, keys = keys.len(), "repl input");
                session.press_all(keys);
                writeln!(
                    out,
                    "{}",
                    render_view(session.view_state(), config.format, config.verbosity)?
                )?;
            }
            Err(e) => {
                warn!(line = number + 1, error = %e, "skipped line");
                eprintln!("Error: {e}");
            }
        }
    }
    Ok(())
}

/// Prints the key listing
pub fn run_keys<W: Write>(config: &CliConfig, out: &mut W) -> CliResult<()> {
    writeln!(out, "{}", render_keys(config.format)?)?;
    Ok(())
}
