//! Arithmetic evaluation for `{{#expr: ... #}}`.
//!
//! Supports `+`, `-`, `*`, `/`, `%`, `^` (right-associative), unary sign,
//! parentheses and decimal literals.
//!
//! ```text
//! {{#expr: 3+3 #}}          ->  6
//! {{#expr: (10-2)*3 #}}     ->  24
//! {{#expr: 2^3^2 #}}        ->  512
//! ```
use std::iter::Peekable;
use std::str::Chars;

use thiserror::Error;

use crate::diagnostic::MessageKey;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    #[error("invalid character '{0}'")]
    InvalidExpression(char),
    #[error("{0}")]
    UndefinedResult(String),
    #[error("{0}")]
    Evaluation(String),
}

impl EvalError {
    pub fn message_key(&self) -> MessageKey {
        match self {
            Self::InvalidExpression(_) => MessageKey::InvalidExpression,
            Self::UndefinedResult(_) => MessageKey::UndefinedResult,
            Self::Evaluation(_) => MessageKey::EvaluationError,
        }
    }
}

/// Evaluates an expression to its textual result.
pub trait ExpressionEvaluator {
    fn evaluate(&self, expr: &str) -> std::result::Result<String, EvalError>;
}

impl<F> ExpressionEvaluator for F
where
    F: Fn(&str) -> std::result::Result<String, EvalError>,
{
    fn evaluate(&self, expr: &str) -> std::result::Result<String, EvalError> {
        self(expr)
    }
}

/// The built-in recursive-descent evaluator.
#[derive(Debug, Clone, Copy, Default)]
pub struct Arithmetic;

impl ExpressionEvaluator for Arithmetic {
    fn evaluate(&self, expr: &str) -> std::result::Result<String, EvalError> {
        if let Some(c) = expr.chars().find(|c| !is_expression_char(*c)) {
            return Err(EvalError::InvalidExpression(c));
        }
        if expr.trim().is_empty() {
            return Ok(String::new());
        }

        let value = ExprParser::new(expr).parse()?;
        if !value.is_finite() {
            return Err(EvalError::UndefinedResult("non-finite result".into()));
        }

        // Format as integer when there is no fractional part.
        let s = if value.fract() == 0.0 && value.abs() < 1e15 {
            format!("{}", value as i64)
        } else {
            format!("{}", value)
        };
        Ok(s)
    }
}

fn is_expression_char(c: char) -> bool {
    c.is_ascii_digit() || c.is_whitespace() || "+-*/%^().".contains(c)
}

// ---------------------------------------------------------------------------
// Recursive-descent parser
// ---------------------------------------------------------------------------

/// Deepest chain of groups, signs and exponents accepted in one expression.
pub const MAX_NESTING: usize = 256;

type Eval = std::result::Result<f64, EvalError>;

/// Evaluates while parsing; one instance per expression.
///
/// ```text
/// sum     = product (('+' | '-') product)*
/// product = signed (('*' | '/' | '%') signed)*
/// signed  = ('-' | '+') signed | power
/// power   = atom ('^' signed)?
/// atom    = '(' sum ')' | NUMBER
/// ```
///
/// Every recursive path passes through `signed`, which is where nesting is
/// counted.
struct ExprParser<'a> {
    chars: Peekable<Chars<'a>>,
    nesting: usize,
}

impl<'a> ExprParser<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.chars().peekable(),
            nesting: 0,
        }
    }

    fn parse(mut self) -> Eval {
        let value = self.sum()?;
        self.skip_ws();
        match self.chars.peek() {
            Some(c) => Err(EvalError::Evaluation(format!("unexpected character '{c}'"))),
            None => Ok(value),
        }
    }

    fn skip_ws(&mut self) {
        while self.chars.next_if(|c| c.is_whitespace()).is_some() {}
    }

    /// Consume `want` if it is the next non-blank character.
    fn eat(&mut self, want: char) -> bool {
        self.skip_ws();
        self.chars.next_if_eq(&want).is_some()
    }

    fn sum(&mut self) -> Eval {
        let mut acc = self.product()?;
        loop {
            if self.eat('+') {
                acc += self.product()?;
            } else if self.eat('-') {
                acc -= self.product()?;
            } else {
                return Ok(acc);
            }
        }
    }

    fn product(&mut self) -> Eval {
        let mut acc = self.signed()?;
        loop {
            if self.eat('*') {
                acc *= self.signed()?;
            } else if self.eat('/') {
                acc /= non_zero(self.signed()?, "division by zero")?;
            } else if self.eat('%') {
                acc %= non_zero(self.signed()?, "modulo by zero")?;
            } else {
                return Ok(acc);
            }
        }
    }

    fn signed(&mut self) -> Eval {
        if self.nesting == MAX_NESTING {
            return Err(EvalError::Evaluation(format!(
                "expression nested deeper than {MAX_NESTING} levels"
            )));
        }
        self.nesting += 1;
        let value = if self.eat('-') {
            self.signed().map(|v| -v)
        } else if self.eat('+') {
            self.signed()
        } else {
            self.power()
        };
        self.nesting -= 1;
        value
    }

    fn power(&mut self) -> Eval {
        let base = self.atom()?;
        if self.eat('^') {
            Ok(base.powf(self.signed()?))
        } else {
            Ok(base)
        }
    }

    fn atom(&mut self) -> Eval {
        if self.eat('(') {
            let value = self.sum()?;
            if self.eat(')') {
                return Ok(value);
            }
            return Err(EvalError::Evaluation(format!(
                "expected ')', got {:?}",
                self.chars.peek()
            )));
        }

        let mut literal = String::new();
        while let Some(c) = self.chars.next_if(|c| c.is_ascii_digit() || *c == '.') {
            literal.push(c);
        }
        if literal.is_empty() {
            return Err(EvalError::Evaluation(match self.chars.peek() {
                Some(c) => format!("expected number, got '{c}'"),
                None => "expected number, got end of expression".to_string(),
            }));
        }
        literal
            .parse()
            .map_err(|_| EvalError::Evaluation(format!("invalid number literal '{literal}'")))
    }
}

fn non_zero(divisor: f64, what: &str) -> Eval {
    if divisor == 0.0 {
        Err(EvalError::UndefinedResult(what.to_string()))
    } else {
        Ok(divisor)
    }
}
