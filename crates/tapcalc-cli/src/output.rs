//! Output rendering

use crate::commands::OutputFormat;
use crate::config::Verbosity;
use crate::error::CliResult;
use serde::Serialize;
use std::fmt::Write as _;
use tapcalc::keypad::Key;
use tapcalc::session::ViewState;

/// One row of the key listing
#[derive(Debug, Clone, Serialize)]
pub struct KeyInfo {
    /// Button identifier
    pub id: String,
    /// Button label
    pub label: &'static str,
    /// Characters accepted in a key sequence
    pub chars: String,
}

impl From<Key> for KeyInfo {
    fn from(key: Key) -> Self {
        Self {
            id: key.id(),
            label: key.label(),
            chars: key.chars().iter().collect(),
        }
    }
}

/// Renders a view-state
///
/// Text output shows the display (`0` when empty) and, once evaluated, the
/// result on a second line. Quiet text output shows the result alone.
pub fn render_view(view: &ViewState, format: OutputFormat, verbosity: Verbosity) -> CliResult<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string(view)?),
        OutputFormat::Text if verbosity.is_quiet() => Ok(view.expression_result.clone()),
        OutputFormat::Text => {
            let display = if view.display_expression.is_empty() {
                "0"
            } else {
                view.display_expression.as_str()
            };
            let mut out = display.to_string();
            if !view.expression_result.is_empty() {
                let marker = if view.error.is_some() { "!" } else { "=" };
                let _ = write!(out, "\n{marker} {}", view.expression_result);
            }
            Ok(out)
        }
    }
}

/// Renders the key listing
pub fn render_keys(format: OutputFormat) -> CliResult<String> {
    let keys: Vec<KeyInfo> = Key::all().into_iter().map(KeyInfo::from).collect();
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(&keys)?),
        OutputFormat::Text => {
            let mut out = format!("{:<18} {:<6} {}", "ID", "LABEL", "CHARS");
            for key in &keys {
                let _ = write!(out, "\n{:<18} {:<6} {}", key.id, key.label, key.chars);
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tapcalc::core::EvalError;

    fn view(display: &str, result: &str, error: Option<EvalError>) -> ViewState {
        ViewState {
            display_expression: display.to_string(),
            expression_result: result.to_string(),
            error,
        }
    }

    #[test]
    fn test_text_before_evaluation() {
        let out = render_view(&view("2+3", "", None), OutputFormat::Text, Verbosity::Normal).unwrap();
        assert_eq!(out, "2+3");
    }

    #[test]
    fn test_text_empty_display_shows_zero() {
        let out = render_view(&ViewState::default(), OutputFormat::Text, Verbosity::Normal).unwrap();
        assert_eq!(out, "0");
    }

    #[test]
    fn test_text_with_result() {
        let out = render_view(&view("2+3", "5", None), OutputFormat::Text, Verbosity::Normal).unwrap();
        assert_eq!(out, "2+3\n= 5");
    }

    #[test]
    fn test_text_with_error() {
        let v = view("5÷0", "Division by zero", Some(EvalError::DivisionByZero));
        let out = render_view(&v, OutputFormat::Text, Verbosity::Normal).unwrap();
        assert_eq!(out, "5÷0\n! Division by zero");
    }

    #[test]
    fn test_quiet_text_is_result_only() {
        let out = render_view(&view("2+3", "5", None), OutputFormat::Text, Verbosity::Quiet).unwrap();
        assert_eq!(out, "5");
    }

    #[test]
    fn test_json_view() {
        let out = render_view(&view("2+3", "5", None), OutputFormat::Json, Verbosity::Normal).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed["display_expression"], "2+3");
        assert_eq!(parsed["expression_result"], "5");
        assert!(parsed["error"].is_null());
    }

    #[test]
    fn test_keys_text_lists_every_key() {
        let out = render_keys(OutputFormat::Text).unwrap();
        assert_eq!(out.lines().count(), Key::all().len() + 1);
        assert!(out.contains("btn-sqrt"));
        assert!(out.contains("r√"));
    }

    #[test]
    fn test_keys_json() {
        let out = render_keys(OutputFormat::Json).unwrap();
        let parsed: Vec<serde_json::Value> = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed.len(), Key::all().len());
        assert_eq!(parsed[0]["label"], "0");
    }
}
