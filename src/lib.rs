//! Resolver for nested wiki parser functions.
//!
//! Markup such as
//!
//! ```text
//! {{#if: {{#ifexist: wiki:start | yes #}} | Start page exists | No start page #}}
//! ```
//!
//! is reduced to plain markup before the host's own parser runs. Calls are
//! found with a balanced-delimiter scanner, evaluated innermost first, and
//! their results spliced back into the document until none remain.
//!
//! | Function | Arguments | Result |
//! |---|---|---|
//! | `if` | test, then, else | `then` when test is non-blank |
//! | `ifeq` | a, b, then, else | `then` when `a == b` exactly |
//! | `ifexist` | target, then, else | `then` when the target exists |
//! | `switch` | test, `case=value`... | value of the matching case, or the default |
//! | `expr` | expression | arithmetic result |
//!
//! Problems inside a call never abort resolution: they are rendered inline
//! as `**ERROR: <function>: <message>**`. An unterminated call is left as-is.
//!
//! ```
//! let out = parserfn::resolve_all("{{#switch: b | a = 1 | b = 2 #}}");
//! assert_eq!(out, "2");
//! ```

pub mod ast;
pub mod case_table;
pub mod config;
pub mod diagnostic;
pub mod error;
pub mod escape;
pub mod functions;
pub mod math;
pub mod oracle;
pub mod params;
pub mod parser;
pub mod resolver;
pub mod scanner;

pub use config::Config;
pub use diagnostic::{Diagnostic, Formatter, Lang, MessageKey, Severity};
pub use error::{Error, Result};
pub use math::{Arithmetic, EvalError, ExpressionEvaluator};
pub use oracle::{ExistenceOracle, WikiTree};
pub use resolver::{resolve_all, Resolver};
