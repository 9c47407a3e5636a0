//! Display rendering
//!
//! Caret notation stands in for superscripts: `x^2` for square and `x^y`
//! for power. An empty buffer renders as an empty string; the display layer
//! decides what to show instead.

use crate::core::buffer::ExpressionBuffer;
use crate::core::token::Token;

/// Renders a buffer as display text
#[must_use]
pub fn render(buffer: &ExpressionBuffer) -> String {
    render_tokens(buffer.tokens())
}

/// Renders a token slice as display text
#[must_use]
pub fn render_tokens(tokens: &[Token]) -> String {
    tokens.iter().map(Token::symbol).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::test_support::tokens;

    fn rendered(input: &str) -> String {
        render(&tokens(input).into_iter().collect())
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&ExpressionBuffer::new()), "");
    }

    #[test]
    fn test_render_arithmetic() {
        assert_eq!(rendered("12+3*4/2-1"), "12+3×4÷2-1");
    }

    #[test]
    fn test_render_unary_caret_notation() {
        assert_eq!(rendered("3²"), "3^2");
        assert_eq!(rendered("2^10"), "2^10");
        assert_eq!(rendered("√(9)+50%"), "√(9)+50%");
    }

    #[test]
    fn test_square_then_power_not_confused_with_power_chain() {
        // (2²)^3 = 64 and 2^(2^3) = 256 must not share a display
        let squared: ExpressionBuffer = tokens("2²^3").into_iter().collect();
        let chained: ExpressionBuffer = tokens("2^2^3").into_iter().collect();
        assert_eq!(render(&chained), "2^2^3");
        assert_ne!(render(&squared), render(&chained));
    }

    #[test]
    fn test_render_decimal_and_sign() {
        assert_eq!(rendered("(-.5)"), "(-.5)");
    }

    #[test]
    fn test_render_idempotent() {
        let buffer: ExpressionBuffer = tokens("(2+3)×4").into_iter().collect();
        let first = render(&buffer);
        assert_eq!(render(&buffer), first);
        assert_eq!(render(&buffer), first);
    }

    #[test]
    fn test_render_tokens_slice() {
        assert_eq!(render_tokens(&tokens("1.5")), "1.5");
    }
}
