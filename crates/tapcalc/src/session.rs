//! Calculator session
//!
//! A [`Session`] owns one [`ExpressionBuffer`] and the view-state derived
//! from it. UI events arrive as [`Command`]s and are applied synchronously;
//! the display string is re-rendered after every change, the result only on
//! evaluation.

use crate::config::EvalConfig;
use crate::core::buffer::{AppendOutcome, ExpressionBuffer};
use crate::core::evaluator::Evaluator;
use crate::core::format::format_number;
use crate::core::render::render;
use crate::core::token::Token;
use crate::core::{EvalError, EvalResult};
use crate::keypad::Key;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// A UI event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Append a token to the expression
    Append(Token),
    /// Empty the expression
    Clear,
    /// Remove the last token
    RemoveLast,
    /// Evaluate the expression
    Evaluate,
}

/// What the display shows
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    /// Rendered expression (empty when the buffer is empty)
    pub display_expression: String,
    /// Formatted result or error message; empty until evaluated
    pub expression_result: String,
    /// Evaluation error, if the last evaluation failed
    pub error: Option<EvalError>,
}

/// One calculator session
#[derive(Debug)]
pub struct Session {
    buffer: ExpressionBuffer,
    evaluator: Evaluator,
    view: ViewState,
    last_result: Option<EvalResult<f64>>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    /// Creates a session with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(EvalConfig::default())
    }

    /// Creates a session with custom configuration
    #[must_use]
    pub fn with_config(config: EvalConfig) -> Self {
        Self {
            buffer: ExpressionBuffer::with_config(&config),
            evaluator: Evaluator::with_config(config),
            view: ViewState::default(),
            last_result: None,
        }
    }

    /// Returns the active configuration
    #[must_use]
    pub fn config(&self) -> &EvalConfig {
        self.evaluator.config()
    }

    /// Applies a command
    pub fn apply(&mut self, command: Command) {
        debug!(?command, "apply");
        match command {
            Command::Append(token) => {
                self.on_change_expression(token);
            }
            Command::Clear => self.on_clear_expression(),
            Command::RemoveLast => self.on_remove_last_symbol(),
            Command::Evaluate => {
                let _ = self.on_calculate_expression();
            }
        }
    }

    /// Applies the command a key issues
    pub fn press(&mut self, key: Key) {
        self.apply(key.command());
    }

    /// Applies every key in order
    pub fn press_all<I: IntoIterator<Item = Key>>(&mut self, keys: I) {
        for key in keys {
            self.press(key);
        }
    }

    /// Appends a token; a rejected token leaves the view-state untouched
    pub fn on_change_expression(&mut self, token: Token) -> AppendOutcome {
        let outcome = self.buffer.append(token);
        if outcome.is_accepted() {
            self.expression_changed();
        } else {
            debug!(%token, "token rejected");
        }
        outcome
    }

    /// Empties the expression and the result
    pub fn on_clear_expression(&mut self) {
        self.buffer.clear();
        self.expression_changed();
    }

    /// Removes the last token
    pub fn on_remove_last_symbol(&mut self) {
        if self.buffer.remove_last().is_some() {
            self.expression_changed();
        }
    }

    /// Evaluates the expression into the view-state
    pub fn on_calculate_expression(&mut self) -> EvalResult<f64> {
        let result = self.evaluator.evaluate(&self.buffer);
        match result {
            Ok(value) => {
                info!(expression = %self.view.display_expression, value, "calculated");
                self.view.expression_result = format_number(value, self.config().precision);
                self.view.error = None;
            }
            Err(e) => {
                info!(expression = %self.view.display_expression, error = %e, "calculation failed");
                self.view.expression_result = e.to_string();
                self.view.error = Some(e);
            }
        }
        self.last_result = Some(result);
        result
    }

    /// Returns the current view-state
    #[must_use]
    pub fn view_state(&self) -> &ViewState {
        &self.view
    }

    /// Returns the expression buffer
    #[must_use]
    pub fn buffer(&self) -> &ExpressionBuffer {
        &self.buffer
    }

    /// Returns the last evaluation, cleared by any expression change
    #[must_use]
    pub fn result(&self) -> Option<EvalResult<f64>> {
        self.last_result
    }

    fn expression_changed(&mut self) {
        self.view.display_expression = render(&self.buffer);
        self.view.expression_result.clear();
        self.view.error = None;
        self.last_result = None;
    }
}
