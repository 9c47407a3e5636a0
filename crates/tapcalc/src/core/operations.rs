//! Checked arithmetic primitives
//!
//! Every primitive validates its result against the configured ceiling, so
//! an overflow is caught at the step that produced it.

use crate::config::EvalConfig;
use crate::core::token::BinaryOp;
use crate::core::{EvalError, EvalResult};

/// Arithmetic with an overflow ceiling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arithmetic {
    max_magnitude: f64,
}

impl Default for Arithmetic {
    fn default() -> Self {
        Self::new(EvalConfig::DEFAULT_MAX_MAGNITUDE)
    }
}

impl Arithmetic {
    /// Creates arithmetic bounded by `max_magnitude`
    #[must_use]
    pub const fn new(max_magnitude: f64) -> Self {
        Self { max_magnitude }
    }

    /// Creates arithmetic bounded by the config's ceiling
    #[must_use]
    pub const fn from_config(config: &EvalConfig) -> Self {
        Self::new(config.max_magnitude)
    }

    /// Returns the overflow ceiling
    #[must_use]
    pub const fn max_magnitude(&self) -> f64 {
        self.max_magnitude
    }

    /// Applies an infix operator
    pub fn binary(&self, a: f64, b: f64, op: BinaryOp) -> EvalResult<f64> {
        match op {
            BinaryOp::Plus => self.add(a, b),
            BinaryOp::Minus => self.subtract(a, b),
            BinaryOp::Mul => self.multiply(a, b),
            BinaryOp::Div => self.divide(a, b),
        }
    }

    /// Addition: a + b
    pub fn add(&self, a: f64, b: f64) -> EvalResult<f64> {
        self.check(a + b)
    }

    /// Subtraction: a - b
    pub fn subtract(&self, a: f64, b: f64) -> EvalResult<f64> {
        self.check(a - b)
    }

    /// Multiplication: a × b
    pub fn multiply(&self, a: f64, b: f64) -> EvalResult<f64> {
        self.check(a * b)
    }

    /// Division: a ÷ b
    pub fn divide(&self, a: f64, b: f64) -> EvalResult<f64> {
        if b == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        self.check(a / b)
    }

    /// Square root: √a
    pub fn sqrt(&self, a: f64) -> EvalResult<f64> {
        if a < 0.0 {
            return Err(EvalError::NegativeSqrt);
        }
        self.check(a.sqrt())
    }

    /// Square: a^2
    pub fn square(&self, a: f64) -> EvalResult<f64> {
        self.check(a * a)
    }

    /// Power: a^b
    pub fn power(&self, a: f64, b: f64) -> EvalResult<f64> {
        if a == 0.0 && b < 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        self.check(a.powf(b))
    }

    /// Percent: a / 100
    pub fn percent(&self, a: f64) -> EvalResult<f64> {
        self.check(a / 100.0)
    }

    /// Negation: -a
    pub fn negate(&self, a: f64) -> EvalResult<f64> {
        self.check(-a)
    }

    /// Validates a value against the ceiling
    pub fn check(&self, value: f64) -> EvalResult<f64> {
        if value.is_nan() {
            Err(EvalError::UndefinedResult)
        } else if value.is_infinite() || value.abs() > self.max_magnitude {
            Err(EvalError::NumericOverflow)
        } else {
            Ok(value)
        }
    }
}
