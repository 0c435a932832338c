/// `expr` — evaluate an arithmetic expression.
///
/// ```text
/// {{#expr: (10-2)*3 #}}   ->  24
/// ```
///
/// Only the first argument is evaluated.
use tracing::debug;

use crate::diagnostic::Diagnostic;
use crate::functions::{Env, Outcome, ParserFunction};

pub struct Expr;

impl ParserFunction for Expr {
    fn min_args(&self) -> usize {
        1
    }

    fn call(&self, env: &Env<'_>, args: &[String]) -> Outcome {
        env.evaluator.evaluate(&args[0]).map_err(|e| {
            debug!(expression = %args[0], error = %e, "expression failed");
            Diagnostic::alert("expr", e.message_key())
        })
    }
}
