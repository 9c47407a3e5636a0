//! Expression buffer with keystroke insertion rules
//!
//! The buffer is a valid prefix of an expression at every step. Appends
//! that would break that are rejected as no-ops; they model live key
//! presses, where there is no failure UX, only a key that does nothing.
//!
//! Invariants:
//! - never starts with a binary operator or `)`
//! - no two consecutive binary operators (the later one replaces the former)
//! - `)` only while a `(` is open, so the nesting count never goes negative
//! - at most one `.` per numeric run
//! - length never exceeds the configured capacity

use crate::config::EvalConfig;
use crate::core::token::{BinaryOp, Token, UnaryOp};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// What an [`ExpressionBuffer::append`] did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppendOutcome {
    /// The token was pushed onto the end
    Appended,
    /// The token replaced the trailing operator
    Replaced,
    /// The token was not accepted; the buffer is unchanged
    Rejected,
}

impl AppendOutcome {
    /// Returns true if the buffer changed
    #[must_use]
    pub const fn is_accepted(&self) -> bool {
        !matches!(self, Self::Rejected)
    }
}

/// Ordered, well-formed token sequence for one calculation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpressionBuffer {
    tokens: Vec<Token>,
    open_brackets: usize,
    implicit_multiplication: bool,
    max_tokens: usize,
}

impl Default for ExpressionBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl ExpressionBuffer {
    /// Creates an empty buffer with default configuration
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(&EvalConfig::default())
    }

    /// Creates an empty buffer honouring the config's capacity and
    /// implicit-multiplication policy
    #[must_use]
    pub fn with_config(config: &EvalConfig) -> Self {
        Self {
            tokens: Vec::new(),
            open_brackets: 0,
            implicit_multiplication: config.implicit_multiplication,
            max_tokens: config.max_tokens,
        }
    }

    /// Appends a token, applying the insertion rules
    pub fn append(&mut self, token: Token) -> AppendOutcome {
        let mut outcome = self.classify(token);
        match outcome {
            AppendOutcome::Appended if self.is_full() => outcome = AppendOutcome::Rejected,
            AppendOutcome::Appended => {
                match token {
                    Token::LeftBracket => self.open_brackets += 1,
                    Token::RightBracket => self.open_brackets -= 1,
                    _ => {}
                }
                self.tokens.push(token);
            }
            AppendOutcome::Replaced => {
                // Only operators are replaced, so the bracket count is unaffected
                if let Some(last) = self.tokens.last_mut() {
                    *last = token;
                }
            }
            AppendOutcome::Rejected => {}
        }
        trace!(?token, ?outcome, len = self.tokens.len(), "append");
        outcome
    }

    /// Removes and returns the last token; no-op on an empty buffer
    pub fn remove_last(&mut self) -> Option<Token> {
        let token = self.tokens.pop()?;
        match token {
            Token::LeftBracket => self.open_brackets -= 1,
            Token::RightBracket => self.open_brackets += 1,
            _ => {}
        }
        Some(token)
    }

    /// Removes every token
    pub fn clear(&mut self) {
        self.tokens.clear();
        self.open_brackets = 0;
    }

    /// Returns true if the buffer holds no tokens
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Returns the number of tokens
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns true if no further token can be appended
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.tokens.len() >= self.max_tokens
    }

    /// Returns the last token
    #[must_use]
    pub fn last(&self) -> Option<Token> {
        self.tokens.last().copied()
    }

    /// Returns the number of `(` not yet closed
    #[must_use]
    pub fn open_brackets(&self) -> usize {
        self.open_brackets
    }

    /// Returns the tokens as a slice
    #[must_use]
    pub fn tokens(&self) -> &[Token] {
        &self.tokens
    }

    /// Returns a copy of the tokens
    #[must_use]
    pub fn to_list(&self) -> Vec<Token> {
        self.tokens.clone()
    }

    /// Iterates over the tokens in order
    pub fn iter(&self) -> std::slice::Iter<'_, Token> {
        self.tokens.iter()
    }

    /// Decides what appending `token` would do, ignoring capacity
    fn classify(&self, token: Token) -> AppendOutcome {
        let last = self.last();
        match token {
            Token::Digit(d) if d > 9 => AppendOutcome::Rejected,
            Token::Digit(0) if self.current_run() == [Token::Digit(0)] => AppendOutcome::Rejected,
            Token::Digit(_) => self.operand_start(token),
            Token::Point => {
                if self.current_run().contains(&Token::Point) {
                    AppendOutcome::Rejected
                } else {
                    self.operand_start(token)
                }
            }
            Token::Binary(op) => match last {
                None => AppendOutcome::Rejected,
                // Directly after `(` only a sign makes sense
                Some(Token::LeftBracket) if op == BinaryOp::Minus => AppendOutcome::Appended,
                Some(Token::Binary(_)) if !self.sign_position(self.tokens.len() - 1) => {
                    AppendOutcome::Replaced
                }
                Some(t) if t.closes_operand() => AppendOutcome::Appended,
                Some(_) => AppendOutcome::Rejected,
            },
            Token::Unary(UnaryOp::Sqrt) | Token::LeftBracket => self.operand_start(token),
            // `x^2^y` would read as `x^(2^y)`
            Token::Unary(UnaryOp::Pow) if last == Some(Token::Unary(UnaryOp::Sqr)) => {
                AppendOutcome::Rejected
            }
            Token::Unary(_) => match last {
                Some(t) if t.closes_operand() => AppendOutcome::Appended,
                _ => AppendOutcome::Rejected,
            },
            Token::RightBracket => match last {
                Some(t) if self.open_brackets > 0 && t.closes_operand() => AppendOutcome::Appended,
                _ => AppendOutcome::Rejected,
            },
        }
    }

    /// Handles tokens that begin an operand: a numeric run, `√` or `(`
    fn operand_start(&self, token: Token) -> AppendOutcome {
        let Some(last) = self.last() else {
            return AppendOutcome::Appended;
        };
        if token.is_numeric() && last.is_numeric() {
            return AppendOutcome::Appended;
        }
        if !last.closes_operand() {
            return AppendOutcome::Appended;
        }
        // `3^24` would read as a power, so numbers only follow `)` implicitly
        let numeric_after_postfix = token.is_numeric() && matches!(last, Token::Unary(_));
        if self.implicit_multiplication && !numeric_after_postfix {
            AppendOutcome::Appended
        } else {
            AppendOutcome::Rejected
        }
    }

    /// Returns true if the binary operator at `index` is the sign right after `(`
    fn sign_position(&self, index: usize) -> bool {
        index
            .checked_sub(1)
            .and_then(|i| self.tokens.get(i))
            .is_some_and(|t| *t == Token::LeftBracket)
    }

    /// Trailing digits and point of the number being typed
    fn current_run(&self) -> &[Token] {
        let start = self
            .tokens
            .iter()
            .rposition(|t| !t.is_numeric())
            .map_or(0, |i| i + 1);
        &self.tokens[start..]
    }
}

impl Extend<Token> for ExpressionBuffer {
    fn extend<I: IntoIterator<Item = Token>>(&mut self, iter: I) {
        for token in iter {
            self.append(token);
        }
    }
}

impl FromIterator<Token> for ExpressionBuffer {
    fn from_iter<I: IntoIterator<Item = Token>>(iter: I) -> Self {
        let mut buffer = Self::new();
        buffer.extend(iter);
        buffer
    }
}

impl<'a> IntoIterator for &'a ExpressionBuffer {
    type Item = &'a Token;
    type IntoIter = std::slice::Iter<'a, Token>;

    fn into_iter(self) -> Self::IntoIter {
        self.tokens.iter()
    }
}
