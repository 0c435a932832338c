/// `if` — branch on whether the test string has content.
///
/// ```text
/// {{#if: test | value if test is not empty | value if test is empty #}}
/// ```
///
/// A test made only of whitespace counts as empty.
use crate::functions::{arg, Env, Outcome, ParserFunction};

pub struct If;

impl ParserFunction for If {
    fn min_args(&self) -> usize {
        1
    }

    fn call(&self, _env: &Env<'_>, args: &[String]) -> Outcome {
        let branch = if args[0].trim().is_empty() { 2 } else { 1 };
        Ok(arg(args, branch))
    }
}
