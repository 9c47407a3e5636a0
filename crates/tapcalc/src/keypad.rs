//! Calculator keys
//!
//! The closed set of buttons a calculator UI dispatches, the [`Command`]
//! each one issues, and a text notation for key sequences:
//!
//! ```text
//! 0-9 .          digits and point
//! + - * × / ÷    binary operators
//! r √            square root
//! s ²            square (x²)
//! ^              power (xʸ)
//! %              percent
//! ( )            brackets
//! < ⌫            remove last symbol
//! C c            clear
//! =              calculate
//! ```
//!
//! Square and power are separate keys issuing separate tokens.

use crate::core::token::{BinaryOp, Token, UnaryOp};
use crate::session::Command;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while parsing a key sequence
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum KeyError {
    /// A character that maps to no key
    #[error("Unknown key '{ch}' at position {position}")]
    UnknownKey {
        /// The offending character
        ch: char,
        /// Character index in the input
        position: usize,
    },
}

/// A calculator button
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// Digit button (0-9); build with [`Key::digit`]. Out-of-range values
    /// label and print as their last decimal digit and insert nothing
    Digit(u8),
    /// Decimal point
    Point,
    /// Addition
    Plus,
    /// Subtraction
    Minus,
    /// Multiplication
    Multiply,
    /// Division
    Divide,
    /// Square root (√)
    Sqrt,
    /// Square (x²)
    Square,
    /// Power (xʸ)
    Power,
    /// Percent
    Percent,
    /// Opening bracket
    LeftBracket,
    /// Closing bracket
    RightBracket,
    /// Clear the expression (C)
    Clear,
    /// Remove the last symbol (⌫)
    Backspace,
    /// Calculate (=)
    Equals,
}

const DIGIT_LABELS: [&str; 10] = ["0", "1", "2", "3", "4", "5", "6", "7", "8", "9"];

impl Key {
    /// Creates a digit key, or `None` if `d` is not a decimal digit
    #[must_use]
    pub const fn digit(d: u8) -> Option<Self> {
        if d <= 9 {
            Some(Self::Digit(d))
        } else {
            None
        }
    }

    /// Every key, digits first
    #[must_use]
    pub fn all() -> Vec<Self> {
        let mut keys: Vec<Self> = (0..=9).map(Self::Digit).collect();
        keys.extend([
            Self::Point,
            Self::Plus,
            Self::Minus,
            Self::Multiply,
            Self::Divide,
            Self::Sqrt,
            Self::Square,
            Self::Power,
            Self::Percent,
            Self::LeftBracket,
            Self::RightBracket,
            Self::Clear,
            Self::Backspace,
            Self::Equals,
        ]);
        keys
    }

    /// Returns the button label
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Digit(d) => DIGIT_LABELS[(*d % 10) as usize],
            Self::Point => ".",
            Self::Plus => "+",
            Self::Minus => "-",
            Self::Multiply => "×",
            Self::Divide => "÷",
            Self::Sqrt => "√",
            Self::Square => "x²",
            Self::Power => "xʸ",
            Self::Percent => "%",
            Self::LeftBracket => "(",
            Self::RightBracket => ")",
            Self::Clear => "C",
            Self::Backspace => "⌫",
            Self::Equals => "=",
        }
    }

    /// Returns a stable identifier for UI bindings
    #[must_use]
    pub fn id(&self) -> String {
        match self {
            Self::Digit(d) => format!("btn-{d}"),
            Self::Point => "btn-point".to_string(),
            Self::Plus => "btn-plus".to_string(),
            Self::Minus => "btn-minus".to_string(),
            Self::Multiply => "btn-mul".to_string(),
            Self::Divide => "btn-div".to_string(),
            Self::Sqrt => "btn-sqrt".to_string(),
            Self::Square => "btn-sqr".to_string(),
            Self::Power => "btn-pow".to_string(),
            Self::Percent => "btn-percent".to_string(),
            Self::LeftBracket => "btn-left-bracket".to_string(),
            Self::RightBracket => "btn-right-bracket".to_string(),
            Self::Clear => "btn-clear".to_string(),
            Self::Backspace => "btn-backspace".to_string(),
            Self::Equals => "btn-equals".to_string(),
        }
    }

    /// Returns the characters accepted for this key in a key sequence
    #[must_use]
    pub const fn chars(&self) -> &'static [char] {
        match self {
            Self::Digit(d) => match *d % 10 {
                0 => &['0'],
                1 => &['1'],
                2 => &['2'],
                3 => &['3'],
                4 => &['4'],
                5 => &['5'],
                6 => &['6'],
                7 => &['7'],
                8 => &['8'],
                _ => &['9'],
            },
            Self::Point => &['.'],
            Self::Plus => &['+'],
            Self::Minus => &['-'],
            Self::Multiply => &['*', '×'],
            Self::Divide => &['/', '÷'],
            Self::Sqrt => &['r', '√'],
            Self::Square => &['s', '²'],
            Self::Power => &['^'],
            Self::Percent => &['%'],
            Self::LeftBracket => &['('],
            Self::RightBracket => &[')'],
            Self::Clear => &['C', 'c'],
            Self::Backspace => &['<', '⌫'],
            Self::Equals => &['='],
        }
    }

    /// Maps a character to its key
    #[must_use]
    pub fn from_char(ch: char) -> Option<Self> {
        let key = match ch {
            '0'..='9' => Self::Digit(ch as u8 - b'0'),
            '.' => Self::Point,
            '+' => Self::Plus,
            '-' => Self::Minus,
            '*' | '×' => Self::Multiply,
            '/' | '÷' => Self::Divide,
            'r' | '√' => Self::Sqrt,
            's' | '²' => Self::Square,
            '^' => Self::Power,
            '%' => Self::Percent,
            '(' => Self::LeftBracket,
            ')' => Self::RightBracket,
            'C' | 'c' => Self::Clear,
            '<' | '⌫' => Self::Backspace,
            '=' => Self::Equals,
            _ => return None,
        };
        Some(key)
    }

    /// Returns the token this key inserts, if it inserts one
    #[must_use]
    pub const fn token(&self) -> Option<Token> {
        let token = match self {
            Self::Digit(d) => Token::Digit(*d),
            Self::Point => Token::Point,
            Self::Plus => Token::Binary(BinaryOp::Plus),
            Self::Minus => Token::Binary(BinaryOp::Minus),
            Self::Multiply => Token::Binary(BinaryOp::Mul),
            Self::Divide => Token::Binary(BinaryOp::Div),
            Self::Sqrt => Token::Unary(UnaryOp::Sqrt),
            Self::Square => Token::Unary(UnaryOp::Sqr),
            Self::Power => Token::Unary(UnaryOp::Pow),
            Self::Percent => Token::Unary(UnaryOp::Percent),
            Self::LeftBracket => Token::LeftBracket,
            Self::RightBracket => Token::RightBracket,
            Self::Clear | Self::Backspace | Self::Equals => return None,
        };
        Some(token)
    }

    /// Returns the command a press of this key issues
    #[must_use]
    pub const fn command(&self) -> Command {
        match (self, self.token()) {
            (_, Some(token)) => Command::Append(token),
            (Self::Clear, None) => Command::Clear,
            (Self::Backspace, None) => Command::RemoveLast,
            (_, None) => Command::Evaluate,
        }
    }
}

/// Parses a key sequence; whitespace is ignored
pub fn parse_keys(input: &str) -> Result<Vec<Key>, KeyError> {
    input
        .chars()
        .enumerate()
        .filter(|(_, ch)| !ch.is_whitespace())
        .map(|(position, ch)| Key::from_char(ch).ok_or(KeyError::UnknownKey { ch, position }))
        .collect()
}
