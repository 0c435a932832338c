/// `ifexist` — branch on whether a page, media file, namespace or path exists.
///
/// ```text
/// {{#ifexist: wiki:start | value if it exists | value if it does not #}}
/// ```
use crate::diagnostic::{Diagnostic, MessageKey};
use crate::functions::{arg, Env, Outcome, ParserFunction};

pub struct IfExist;

impl ParserFunction for IfExist {
    fn min_args(&self) -> usize {
        1
    }

    fn call(&self, env: &Env<'_>, args: &[String]) -> Outcome {
        let target = args[0].trim();
        if target.is_empty() {
            return Err(Diagnostic::alert("ifexist", MessageKey::EmptyTestParameter));
        }
        let branch = if env.oracle.exists(target) { 1 } else { 2 };
        Ok(arg(args, branch))
    }
}
