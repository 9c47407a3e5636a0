//! Expression core: tokens, buffer, renderer and evaluator
//!
//! Every buffer mutation is total (invalid input is rejected, never an
//! error); every evaluation failure is a typed [`EvalError`].

pub mod buffer;
pub mod evaluator;
pub mod format;
mod operations;
pub mod render;
pub mod token;

pub use operations::Arithmetic;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type for evaluation
pub type EvalResult<T> = Result<T, EvalError>;

/// Evaluation failure - exhaustive enum ensures all cases handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Error, Serialize, Deserialize)]
pub enum EvalError {
    /// Division (or a negative power) of zero
    #[error("Division by zero")]
    DivisionByZero,
    /// Unmatched brackets, empty operand slots, trailing operator or an empty buffer
    #[error("Malformed expression")]
    MalformedExpression,
    /// Square root of a negative number
    #[error("Square root of negative number")]
    NegativeSqrt,
    /// Magnitude above the configured ceiling
    #[error("Numeric overflow")]
    NumericOverflow,
    /// Result is not a number for any other reason
    #[error("Undefined result")]
    UndefinedResult,
}

impl EvalError {
    /// Returns true for arithmetic-domain errors (as opposed to structural ones)
    #[must_use]
    pub const fn is_domain_error(&self) -> bool {
        !matches!(self, Self::MalformedExpression)
    }
}
