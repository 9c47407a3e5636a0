//! Expression tokens
//!
//! The closed set of keystroke-level units an expression is built from.

use serde::{Deserialize, Serialize};

/// Infix arithmetic operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// Addition (+)
    Plus,
    /// Subtraction (-)
    Minus,
    /// Multiplication (×)
    Mul,
    /// Division (÷)
    Div,
}

impl BinaryOp {
    /// All binary operators in keypad order
    pub const ALL: [Self; 4] = [Self::Plus, Self::Minus, Self::Mul, Self::Div];

    /// Returns the operator symbol for display
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Mul => "×",
            Self::Div => "÷",
        }
    }

    /// Returns the precedence level (higher = evaluated first)
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Plus | Self::Minus => 1,
            Self::Mul | Self::Div => 2,
        }
    }

    /// Returns true for the additive operators, which give `%` its
    /// "percentage of the left operand" meaning
    #[must_use]
    pub const fn is_additive(&self) -> bool {
        matches!(self, Self::Plus | Self::Minus)
    }
}

/// Single-operand operators
///
/// `Sqrt` is written before its operand, `Sqr` and `Percent` after it.
/// `Pow` sits between a base and an exponent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// Square root (√x)
    Sqrt,
    /// Square (x^2)
    Sqr,
    /// Percent (x%)
    Percent,
    /// Power (x^y)
    Pow,
}

impl UnaryOp {
    /// All unary operators in keypad order
    pub const ALL: [Self; 4] = [Self::Sqrt, Self::Sqr, Self::Percent, Self::Pow];

    /// Returns the display text for this operator
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Sqrt => "√",
            Self::Sqr => "^2",
            Self::Percent => "%",
            Self::Pow => "^",
        }
    }

    /// Returns true if the operator is written before its operand
    #[must_use]
    pub const fn is_prefix(&self) -> bool {
        matches!(self, Self::Sqrt)
    }

    /// Returns true if the operator is written after its operand
    #[must_use]
    pub const fn is_postfix(&self) -> bool {
        matches!(self, Self::Sqr | Self::Percent)
    }
}

/// Atomic unit of an expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Token {
    /// Decimal digit, always in `0..=9`
    Digit(u8),
    /// Decimal point
    Point,
    /// Infix arithmetic operator
    Binary(BinaryOp),
    /// Root, square, percent or power
    Unary(UnaryOp),
    /// Opening bracket
    LeftBracket,
    /// Closing bracket
    RightBracket,
}

impl Token {
    /// Creates a digit token, or `None` if `d` is not a decimal digit
    #[must_use]
    pub const fn digit(d: u8) -> Option<Self> {
        if d <= 9 {
            Some(Self::Digit(d))
        } else {
            None
        }
    }

    /// Returns true for digits and the decimal point
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Digit(_) | Self::Point)
    }

    /// Returns true if this token is a binary operator
    #[must_use]
    pub const fn is_binary(&self) -> bool {
        matches!(self, Self::Binary(_))
    }

    /// Returns true if an operand may end with this token
    #[must_use]
    pub const fn closes_operand(&self) -> bool {
        matches!(
            self,
            Self::Digit(_)
                | Self::Point
                | Self::RightBracket
                | Self::Unary(UnaryOp::Sqr | UnaryOp::Percent)
        )
    }

    /// Returns the display text for this token; an out-of-range digit
    /// shows its last decimal digit
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Digit(d) => DIGITS[(*d % 10) as usize],
            Self::Point => ".",
            Self::Binary(op) => op.symbol(),
            Self::Unary(op) => op.symbol(),
            Self::LeftBracket => "(",
            Self::RightBracket => ")",
        }
    }
}

const DIGITS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

impl From<BinaryOp> for Token {
    fn from(op: BinaryOp) -> Self {
        Self::Binary(op)
    }
}

impl From<UnaryOp> for Token {
    fn from(op: UnaryOp) -> Self {
        Self::Unary(op)
    }
}
