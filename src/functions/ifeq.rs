/// `ifeq` — branch on exact string equality.
///
/// ```text
/// {{#ifeq: string 1 | string 2 | value if identical | value if different #}}
/// ```
///
/// Comparison is byte-for-byte: case matters and numbers are not coerced,
/// so `1` and `1.0` differ.
use crate::functions::{arg, Env, Outcome, ParserFunction};

pub struct IfEq;

impl ParserFunction for IfEq {
    fn min_args(&self) -> usize {
        2
    }

    fn call(&self, _env: &Env<'_>, args: &[String]) -> Outcome {
        let branch = if args[0] == args[1] { 2 } else { 3 };
        Ok(arg(args, branch))
    }
}
