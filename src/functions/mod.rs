use crate::diagnostic::{Diagnostic, MessageKey};
use crate::math::ExpressionEvaluator;
use crate::oracle::ExistenceOracle;

// ---------------------------------------------------------------------------
// Core trait
// ---------------------------------------------------------------------------

/// Result of evaluating one call: the substituted text, or an inline error.
pub type Outcome = std::result::Result<String, Diagnostic>;

/// Collaborators a function may consult. Every function is otherwise pure.
#[derive(Clone, Copy)]
pub struct Env<'a> {
    pub oracle: &'a dyn ExistenceOracle,
    pub evaluator: &'a dyn ExpressionEvaluator,
}

/// One built-in parser function.
///
/// # Calling convention
/// - `args` — the split, trimmed arguments, 0-indexed, with any nested calls
///   already resolved to plain text. Empty strings are real arguments.
/// - `call` is only invoked once `args.len() >= min_args()`; the dispatcher
///   reports `not_enough_params` otherwise.
pub trait ParserFunction {
    fn min_args(&self) -> usize;
    fn call(&self, env: &Env<'_>, args: &[String]) -> Outcome;
}

// ---------------------------------------------------------------------------
// Built-in modules
// ---------------------------------------------------------------------------

pub mod expr;    // expr
pub mod if_fn;   // if
pub mod ifeq;    // ifeq
pub mod ifexist; // ifexist
pub mod switch;  // switch

// ---------------------------------------------------------------------------
// Dispatch
// ---------------------------------------------------------------------------

/// The closed set of functions a call can name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Builtin {
    If,
    IfEq,
    IfExist,
    Switch,
    Expr,
}

impl Builtin {
    pub const ALL: [Builtin; 5] = [
        Builtin::If,
        Builtin::IfEq,
        Builtin::IfExist,
        Builtin::Switch,
        Builtin::Expr,
    ];

    /// Look up a function by name, ignoring case.
    pub fn from_name(name: &str) -> Option<Self> {
        let folded = name.to_lowercase();
        Self::ALL.into_iter().find(|b| b.name() == folded)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::If => "if",
            Self::IfEq => "ifeq",
            Self::IfExist => "ifexist",
            Self::Switch => "switch",
            Self::Expr => "expr",
        }
    }

    fn handler(self) -> &'static dyn ParserFunction {
        match self {
            Self::If => &if_fn::If,
            Self::IfEq => &ifeq::IfEq,
            Self::IfExist => &ifexist::IfExist,
            Self::Switch => &switch::Switch,
            Self::Expr => &expr::Expr,
        }
    }
}

/// Evaluate `name(args)`.
pub fn dispatch(env: &Env<'_>, name: &str, args: &[String]) -> Outcome {
    let Some(builtin) = Builtin::from_name(name) else {
        return Err(Diagnostic::important(
            name.to_lowercase(),
            MessageKey::NoSuchFunction,
        ));
    };

    let handler = builtin.handler();
    if args.len() < handler.min_args() {
        return Err(Diagnostic::alert(builtin.name(), MessageKey::NotEnoughParams));
    }
    handler.call(env, args)
}

/// Argument `index`, or the empty string when it was not supplied.
pub(crate) fn arg(args: &[String], index: usize) -> String {
    args.get(index).cloned().unwrap_or_default()
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::math::Arithmetic;

    pub fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    pub fn call(name: &str, list: &[&str]) -> Outcome {
        let oracle = |target: &str| target == "wiki:start";
        let env = Env {
            oracle: &oracle,
            evaluator: &Arithmetic,
        };
        dispatch(&env, name, &args(list))
    }
}
