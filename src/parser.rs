use crate::ast::Call;
use crate::diagnostic::{Diagnostic, MessageKey};

/// Parse the inside of a call into its name and raw argument text.
///
/// Grammar:
/// ```text
/// inner = WS* NAME WS* ':' ARGS
/// NAME  = [A-Za-z0-9]+
/// ```
///
/// The first `:` separates the name from the arguments; later colons belong
/// to the arguments. A missing `:` or a malformed name is `invalid_syntax`.
pub fn parse_call(inner: &str) -> Result<Call, Diagnostic> {
    let Some((name, raw_args)) = inner.split_once(':') else {
        return Err(Diagnostic::important(
            leading_word(inner),
            MessageKey::InvalidSyntax,
        ));
    };

    let name = name.trim();
    if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(Diagnostic::important(name, MessageKey::InvalidSyntax));
    }

    Ok(Call {
        name: name.to_string(),
        raw_args: raw_args.to_string(),
    })
}

/// Best-effort function name for an error message on a call without `:`.
fn leading_word(inner: &str) -> &str {
    let trimmed = inner.trim_start();
    let end = trimmed
        .find(|c: char| !c.is_ascii_alphanumeric())
        .unwrap_or(trimmed.len());
    &trimmed[..end]
}
