//! Tapcalc - keypad calculator core
//!
//! A calculator that builds its expression one key press at a time. The
//! buffer only ever holds a valid prefix of an expression; the display is
//! re-rendered after every key and the expression is evaluated on `=`.
//!
//! # Layers
//!
//! - [`core::token`]: the closed token set
//! - [`core::buffer`]: keystroke insertion rules
//! - [`core::render`]: display text
//! - [`core::evaluator`]: shunting-yard evaluation with typed errors
//! - [`keypad`]: buttons and key-sequence notation
//! - [`session`]: commands in, view-state out
//!
//! # Example
//!
//! ```rust
//! use tapcalc::prelude::*;
//!
//! let mut session = Session::new();
//! session.press_all(parse_keys("(2+3)×4=").unwrap());
//! assert_eq!(session.view_state().display_expression, "(2+3)×4");
//! assert_eq!(session.view_state().expression_result, "20");
//!
//! // Percent of the left operand
//! let buffer: ExpressionBuffer = parse_keys("50+10%")
//!     .unwrap()
//!     .iter()
//!     .filter_map(Key::token)
//!     .collect();
//! assert_eq!(Evaluator::new().evaluate(&buffer), Ok(55.0));
//! ```

#![cfg_attr(
    test,
    allow(
        clippy::unwrap_used,
        clippy::expect_used,
        clippy::panic,
        clippy::float_cmp
    )
)]
#![deny(missing_docs)]
#![deny(missing_debug_implementations)]

pub mod config;
pub mod core;
pub mod keypad;
pub mod session;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::config::{ConfigError, EvalConfig};
    pub use crate::core::buffer::{AppendOutcome, ExpressionBuffer};
    pub use crate::core::evaluator::{evaluate, Evaluator, Instruction};
    pub use crate::core::format::format_number;
    pub use crate::core::render::render;
    pub use crate::core::token::{BinaryOp, Token, UnaryOp};
    pub use crate::core::{Arithmetic, EvalError, EvalResult};
    pub use crate::keypad::{parse_keys, Key, KeyError};
    pub use crate::session::{Command, Session, ViewState};
}
