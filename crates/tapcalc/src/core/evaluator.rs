//! Shunting-yard evaluator
//!
//! Tokens are lexed into numbers and operators, converted to postfix
//! [`Instruction`]s, then run on a value stack. Evaluation is stateless per
//! call and bounded by the token count.
//!
//! Precedence, highest first:
//!
//! ```text
//! x^2  x%        postfix, bind to the operand right before them
//! x^y            right associative
//! √x  (-x)       prefix
//! ×  ÷           left associative
//! +  -           left associative
//! ```
//!
//! `a + x%` and `a - x%` take `x` percent of `a`; anywhere else `x%` is
//! `x / 100`.

use crate::config::EvalConfig;
use crate::core::buffer::ExpressionBuffer;
use crate::core::operations::Arithmetic;
use crate::core::token::{BinaryOp, Token, UnaryOp};
use crate::core::{EvalError, EvalResult};
use tracing::{debug, trace};

/// A postfix instruction
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Instruction {
    /// Push a literal
    Push(f64),
    /// Pop two operands and combine them
    Binary(BinaryOp),
    /// Negate the top operand
    Negate,
    /// Square root of the top operand
    Sqrt,
    /// Square the top operand
    Sqr,
    /// Turn the top operand into a percentage
    Percent,
    /// Pop exponent and base, push base^exponent
    Pow,
}

/// Lexed expression element
#[derive(Debug, Clone, Copy, PartialEq)]
enum Item {
    Number(f64),
    Binary(BinaryOp),
    Negate,
    Sqrt,
    Sqr,
    Percent,
    Pow,
    Open,
    Close,
}

impl Item {
    /// An operand may end with this item
    const fn ends_operand(self) -> bool {
        matches!(self, Self::Number(_) | Self::Close | Self::Sqr | Self::Percent)
    }

    /// An operand may begin with this item
    const fn starts_operand(self) -> bool {
        matches!(self, Self::Number(_) | Self::Open | Self::Sqrt)
    }
}

/// Operator waiting on the shunting-yard stack
#[derive(Debug, Clone, Copy, PartialEq)]
enum Pending {
    Binary(BinaryOp),
    Negate,
    Sqrt,
    Pow,
    Open,
}

impl Pending {
    const PREFIX_PRECEDENCE: u8 = 3;
    const POW_PRECEDENCE: u8 = 4;

    const fn precedence(self) -> u8 {
        match self {
            Self::Binary(op) => op.precedence(),
            Self::Negate | Self::Sqrt => Self::PREFIX_PRECEDENCE,
            Self::Pow => Self::POW_PRECEDENCE,
            Self::Open => 0,
        }
    }

    const fn instruction(self) -> Option<Instruction> {
        match self {
            Self::Binary(op) => Some(Instruction::Binary(op)),
            Self::Negate => Some(Instruction::Negate),
            Self::Sqrt => Some(Instruction::Sqrt),
            Self::Pow => Some(Instruction::Pow),
            Self::Open => None,
        }
    }
}

/// Value on the run stack; `percent` marks a value produced by `%`
#[derive(Debug, Clone, Copy)]
struct Operand {
    value: f64,
    percent: bool,
}

impl Operand {
    const fn plain(value: f64) -> Self {
        Self {
            value,
            percent: false,
        }
    }
}

/// Expression evaluator
#[derive(Debug, Clone, Default)]
pub struct Evaluator {
    config: EvalConfig,
    arithmetic: Arithmetic,
}

impl Evaluator {
    /// Creates an evaluator with default settings
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an evaluator with custom limits and policies
    #[must_use]
    pub fn with_config(config: EvalConfig) -> Self {
        Self {
            arithmetic: Arithmetic::from_config(&config),
            config,
        }
    }

    /// Returns the active configuration
    #[must_use]
    pub fn config(&self) -> &EvalConfig {
        &self.config
    }

    /// Evaluates a finished buffer
    pub fn evaluate(&self, buffer: &ExpressionBuffer) -> EvalResult<f64> {
        self.evaluate_tokens(buffer.tokens())
    }

    /// Evaluates a token sequence
    pub fn evaluate_tokens(&self, tokens: &[Token]) -> EvalResult<f64> {
        let program = self.compile(tokens)?;
        let result = self.run(&program);
        debug!(tokens = tokens.len(), ?result, "evaluated expression");
        result
    }

    /// Converts infix tokens to postfix instructions
    pub fn compile(&self, tokens: &[Token]) -> EvalResult<Vec<Instruction>> {
        let items = self.lex(tokens)?;
        let program = to_postfix(&items)?;
        trace!(?program, "compiled");
        Ok(program)
    }

    /// Runs postfix instructions on a value stack
    pub fn run(&self, program: &[Instruction]) -> EvalResult<f64> {
        let math = &self.arithmetic;
        let mut stack: Vec<Operand> = Vec::with_capacity(program.len());

        for instruction in program {
            let operand = match *instruction {
                Instruction::Push(value) => Operand::plain(math.check(value)?),
                Instruction::Negate => Operand::plain(math.negate(pop(&mut stack)?.value)?),
                Instruction::Sqrt => Operand::plain(math.sqrt(pop(&mut stack)?.value)?),
                Instruction::Sqr => Operand::plain(math.square(pop(&mut stack)?.value)?),
                Instruction::Percent => Operand {
                    value: math.percent(pop(&mut stack)?.value)?,
                    percent: true,
                },
                Instruction::Pow => {
                    let exponent = pop(&mut stack)?;
                    let base = pop(&mut stack)?;
                    Operand::plain(math.power(base.value, exponent.value)?)
                }
                Instruction::Binary(op) => {
                    let right = pop(&mut stack)?;
                    let left = pop(&mut stack)?;
                    let right_value = if right.percent && op.is_additive() {
                        math.multiply(left.value, right.value)?
                    } else {
                        right.value
                    };
                    Operand::plain(math.binary(left.value, right_value, op)?)
                }
            };
            stack.push(operand);
        }

        match stack.as_slice() {
            [result] => Ok(result.value),
            _ => Err(EvalError::MalformedExpression),
        }
    }

    /// Groups numeric runs, tells signs from subtraction, and makes implicit
    /// multiplication explicit
    fn lex(&self, tokens: &[Token]) -> EvalResult<Vec<Item>> {
        let mut items: Vec<Item> = Vec::with_capacity(tokens.len());
        let mut i = 0;

        while i < tokens.len() {
            let expecting_operand = items.last().map_or(true, |last| !last.ends_operand());
            let item = match tokens[i] {
                Token::Digit(_) | Token::Point => {
                    let end = tokens[i..]
                        .iter()
                        .position(|t| !t.is_numeric())
                        .map_or(tokens.len(), |offset| i + offset);
                    let value = parse_run(&tokens[i..end])?;
                    i = end - 1;
                    Item::Number(value)
                }
                Token::Binary(BinaryOp::Minus) if expecting_operand => Item::Negate,
                Token::Binary(op) => Item::Binary(op),
                Token::Unary(UnaryOp::Sqrt) => Item::Sqrt,
                Token::Unary(UnaryOp::Sqr) => Item::Sqr,
                Token::Unary(UnaryOp::Percent) => Item::Percent,
                Token::Unary(UnaryOp::Pow) => Item::Pow,
                Token::LeftBracket => Item::Open,
                Token::RightBracket => Item::Close,
            };

            if item.starts_operand() && !expecting_operand {
                if !self.config.implicit_multiplication {
                    return Err(EvalError::MalformedExpression);
                }
                items.push(Item::Binary(BinaryOp::Mul));
            }
            items.push(item);
            i += 1;
        }

        Ok(items)
    }
}

/// Evaluates a buffer with the default configuration
pub fn evaluate(buffer: &ExpressionBuffer) -> EvalResult<f64> {
    Evaluator::new().evaluate(buffer)
}

fn pop(stack: &mut Vec<Operand>) -> EvalResult<Operand> {
    stack.pop().ok_or(EvalError::MalformedExpression)
}

/// Parses one run of digits and points
fn parse_run(run: &[Token]) -> EvalResult<f64> {
    let mut text = String::with_capacity(run.len());
    let mut digits = 0;
    let mut points = 0;
    for token in run {
        match token {
            Token::Digit(d) if *d <= 9 => {
                digits += 1;
                text.push(char::from(b'0' + d));
            }
            Token::Point => {
                points += 1;
                text.push('.');
            }
            _ => return Err(EvalError::MalformedExpression),
        }
    }
    if digits == 0 || points > 1 {
        return Err(EvalError::MalformedExpression);
    }
    text.parse()
        .map_err(|_| EvalError::MalformedExpression)
}

/// Shunting-yard conversion; also rejects empty operand slots, dangling
/// operators and unmatched brackets
fn to_postfix(items: &[Item]) -> EvalResult<Vec<Instruction>> {
    let mut output = Vec::with_capacity(items.len());
    let mut stack: Vec<Pending> = Vec::new();
    let mut expecting_operand = true;

    for &item in items {
        match item {
            Item::Number(value) => {
                require(expecting_operand)?;
                output.push(Instruction::Push(value));
                expecting_operand = false;
            }
            Item::Sqr | Item::Percent => {
                require(!expecting_operand)?;
                output.push(if item == Item::Sqr {
                    Instruction::Sqr
                } else {
                    Instruction::Percent
                });
            }
            Item::Negate | Item::Sqrt | Item::Open => {
                require(expecting_operand)?;
                stack.push(match item {
                    Item::Negate => Pending::Negate,
                    Item::Sqrt => Pending::Sqrt,
                    _ => Pending::Open,
                });
            }
            Item::Binary(op) => {
                require(!expecting_operand)?;
                // left associative: pop while the stacked operator binds at least as tight
                while let Some(&top) = stack.last() {
                    if top == Pending::Open || top.precedence() < op.precedence() {
                        break;
                    }
                    stack.pop();
                    output.extend(top.instruction());
                }
                stack.push(Pending::Binary(op));
                expecting_operand = true;
            }
            Item::Pow => {
                // nothing binds tighter than a stacked power, and right
                // associativity leaves equal precedence on the stack
                require(!expecting_operand)?;
                stack.push(Pending::Pow);
                expecting_operand = true;
            }
            Item::Close => {
                require(!expecting_operand)?;
                loop {
                    match stack.pop() {
                        Some(Pending::Open) => break,
                        Some(top) => output.extend(top.instruction()),
                        None => return Err(EvalError::MalformedExpression),
                    }
                }
            }
        }
    }

    require(!expecting_operand)?;
    while let Some(top) = stack.pop() {
        output.push(top.instruction().ok_or(EvalError::MalformedExpression)?);
    }
    Ok(output)
}

fn require(condition: bool) -> EvalResult<()> {
    if condition {
        Ok(())
    } else {
        Err(EvalError::MalformedExpression)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::core::test_support::tokens;

    fn eval(input: &str) -> EvalResult<f64> {
        let buffer: ExpressionBuffer = tokens(input).into_iter().collect();
        evaluate(&buffer)
    }

    fn eval_raw(input: &str) -> EvalResult<f64> {
        Evaluator::new().evaluate_tokens(&tokens(input))
    }

    fn approx(result: EvalResult<f64>, expected: f64) {
        let value = result.unwrap();
        assert!(
            (value - expected).abs() < 1e-9,
            "expected {expected}, got {value}"
        );
    }

    // ===== Basic evaluation tests =====

    #[test]
    fn test_single_number() {
        assert_eq!(eval("42"), Ok(42.0));
        assert_eq!(eval("3.25"), Ok(3.25));
        assert_eq!(eval(".5"), Ok(0.5));
        assert_eq!(eval("7."), Ok(7.0));
    }

    #[test]
    fn test_addition() {
        assert_eq!(eval("2+3"), Ok(5.0));
    }

    #[test]
    fn test_precedence() {
        assert_eq!(eval("2+3×4"), Ok(14.0));
        assert_eq!(eval("10-6÷2"), Ok(7.0));
    }

    #[test]
    fn test_brackets_override_precedence() {
        assert_eq!(eval("(2+3)×4"), Ok(20.0));
        assert_eq!(eval("((1+2)×(3+4))"), Ok(21.0));
    }

    #[test]
    fn test_left_associativity() {
        assert_eq!(eval("10-4-3"), Ok(3.0));
        assert_eq!(eval("100÷10÷5"), Ok(2.0));
    }

    #[test]
    fn test_replaced_operator_evaluates() {
        // [2, Plus, Minus, 3] collapses to 2-3
        assert_eq!(eval("2+-3"), Ok(-1.0));
    }

    // ===== Unary operators =====

    #[test]
    fn test_sqrt() {
        assert_eq!(eval("√9"), Ok(3.0));
        assert_eq!(eval("√(16+9)"), Ok(5.0));
        assert_eq!(eval("√√16"), Ok(2.0));
        assert_eq!(eval("1+√4×3"), Ok(7.0));
    }

    #[test]
    fn test_square() {
        assert_eq!(eval("3²"), Ok(9.0));
        assert_eq!(eval("(1+2)²"), Ok(9.0));
        assert_eq!(eval("2×3²"), Ok(18.0));
        assert_eq!(eval("3²²"), Ok(81.0));
    }

    #[test]
    fn test_power() {
        assert_eq!(eval("2^10"), Ok(1024.0));
        assert_eq!(eval("2×3^2"), Ok(18.0));
        assert_eq!(eval("2^3^2"), Ok(512.0));
        assert_eq!(eval("2^(1+1)"), Ok(4.0));
    }

    #[test]
    fn test_sqrt_binds_looser_than_power() {
        assert_eq!(eval("√2^2"), Ok(2.0));
        assert_eq!(eval("√9^2"), Ok(9.0));
    }

    #[test]
    fn test_sign_inside_brackets() {
        assert_eq!(eval("(-5)+10"), Ok(5.0));
        assert_eq!(eval("(-2^2)"), Ok(-4.0));
        assert_eq!(eval("(-2)^2"), Ok(4.0));
    }

    // ===== Percent =====

    #[test]
    fn test_percent_standalone() {
        assert_eq!(eval("10%"), Ok(0.1));
    }

    #[test]
    fn test_percent_of_left_operand() {
        assert_eq!(eval("50+10%"), Ok(55.0));
        assert_eq!(eval("50-10%"), Ok(45.0));
        assert_eq!(eval("2×25+10%"), Ok(55.0));
    }

    #[test]
    fn test_percent_after_multiplicative() {
        assert_eq!(eval("50×10%"), Ok(5.0));
        assert_eq!(eval("5÷50%"), Ok(10.0));
    }

    #[test]
    fn test_percent_of_group() {
        assert_eq!(eval("200+(5+5)%"), Ok(220.0));
        approx(eval("√(50%)"), 0.5f64.sqrt());
    }

    #[test]
    fn test_percent_flag_cleared_by_operation() {
        // (10%)×2 is a plain 0.2, not a percentage of 100
        approx(eval("100+10%×2"), 100.2);
    }

    // ===== Implicit multiplication =====

    #[test]
    fn test_implicit_multiplication() {
        assert_eq!(eval("2(3)"), Ok(6.0));
        assert_eq!(eval("(1+1)4"), Ok(8.0));
        assert_eq!(eval("2√9"), Ok(6.0));
        assert_eq!(eval("(2)(3)"), Ok(6.0));
        assert_eq!(eval("3²(2)"), Ok(18.0));
    }

    #[test]
    fn test_implicit_multiplication_disabled() {
        let config = EvalConfig::new().with_implicit_multiplication(false);
        let evaluator = Evaluator::with_config(config);
        assert_eq!(
            evaluator.evaluate_tokens(&tokens("2(3)")),
            Err(EvalError::MalformedExpression)
        );
        assert_eq!(evaluator.evaluate_tokens(&tokens("2×(3)")), Ok(6.0));
    }

    // ===== Errors =====

    #[test]
    fn test_division_by_zero() {
        assert_eq!(eval("5÷0"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("5÷(2-2)"), Err(EvalError::DivisionByZero));
        assert_eq!(eval("0^(0-1)"), Err(EvalError::DivisionByZero));
    }

    #[test]
    fn test_negative_sqrt() {
        assert_eq!(eval("√(-1)"), Err(EvalError::NegativeSqrt));
        assert_eq!(eval("√(1-5)"), Err(EvalError::NegativeSqrt));
    }

    #[test]
    fn test_malformed() {
        assert_eq!(eval(""), Err(EvalError::MalformedExpression));
        assert_eq!(eval("2+"), Err(EvalError::MalformedExpression));
        assert_eq!(eval("(2+3"), Err(EvalError::MalformedExpression));
        assert_eq!(eval("√"), Err(EvalError::MalformedExpression));
        assert_eq!(eval("2^"), Err(EvalError::MalformedExpression));
        assert_eq!(eval("(-"), Err(EvalError::MalformedExpression));
    }

    #[test]
    fn test_malformed_raw_tokens() {
        // sequences the buffer would never produce
        assert_eq!(eval_raw("+2"), Err(EvalError::MalformedExpression));
        assert_eq!(eval_raw("2)"), Err(EvalError::MalformedExpression));
        assert_eq!(eval_raw("1.2.3"), Err(EvalError::MalformedExpression));
        assert_eq!(eval_raw("."), Err(EvalError::MalformedExpression));
        assert_eq!(eval_raw("()"), Err(EvalError::MalformedExpression));
        assert_eq!(eval_raw("%"), Err(EvalError::MalformedExpression));
        assert_eq!(eval_raw("2*/3"), Err(EvalError::MalformedExpression));
    }

    #[test]
    fn test_raw_tokens_minus_as_sign() {
        assert_eq!(eval_raw("-5+10"), Ok(5.0));
        assert_eq!(eval_raw("2+-3"), Ok(-1.0));
    }

    #[test]
    fn test_overflow() {
        assert_eq!(eval("10^1000"), Err(EvalError::NumericOverflow));
        assert_eq!(eval("10^99×100"), Err(EvalError::NumericOverflow));
    }

    #[test]
    fn test_overflow_custom_ceiling() {
        let evaluator = Evaluator::with_config(EvalConfig::new().with_max_magnitude(1000.0));
        assert_eq!(
            evaluator.evaluate_tokens(&tokens("40²")),
            Err(EvalError::NumericOverflow)
        );
        assert_eq!(
            evaluator.evaluate_tokens(&tokens("5000")),
            Err(EvalError::NumericOverflow)
        );
        assert_eq!(evaluator.evaluate_tokens(&tokens("30²")), Ok(900.0));
    }

    #[test]
    fn test_undefined_result() {
        assert_eq!(eval("(-8)^.5"), Err(EvalError::UndefinedResult));
    }

    // ===== Compilation =====

    #[test]
    fn test_compile_postfix_order() {
        let program = Evaluator::new().compile(&tokens("2+3×4")).unwrap();
        assert_eq!(
            program,
            vec![
                Instruction::Push(2.0),
                Instruction::Push(3.0),
                Instruction::Push(4.0),
                Instruction::Binary(BinaryOp::Mul),
                Instruction::Binary(BinaryOp::Plus),
            ]
        );
    }

    #[test]
    fn test_compile_implicit_multiplication() {
        let program = Evaluator::new().compile(&tokens("2(3)")).unwrap();
        assert_eq!(
            program,
            vec![
                Instruction::Push(2.0),
                Instruction::Push(3.0),
                Instruction::Binary(BinaryOp::Mul),
            ]
        );
    }

    #[test]
    fn test_run_stack_underflow() {
        let evaluator = Evaluator::new();
        assert_eq!(
            evaluator.run(&[Instruction::Binary(BinaryOp::Plus)]),
            Err(EvalError::MalformedExpression)
        );
        assert_eq!(
            evaluator.run(&[Instruction::Push(1.0), Instruction::Push(2.0)]),
            Err(EvalError::MalformedExpression)
        );
    }

    #[test]
    fn test_evaluator_config_access() {
        let evaluator = Evaluator::with_config(EvalConfig::new().with_precision(2));
        assert_eq!(evaluator.config().precision, 2);
    }
}
