//! Argument splitting.
//!
//! A separator wrapped in the inline escape marker (`%%|%%`, `%%=%%`) is part
//! of the value, not a separator. The escaped form is kept as written so the
//! host renders it as the bare character.

const ESCAPE: &str = "%%";

/// Split a call's argument text on unescaped `|` and trim every piece.
///
/// Empty pieces are kept: `"a||b"` yields `["a", "", "b"]`, and the empty
/// string yields a single empty argument.
pub fn split(raw_args: &str) -> Vec<String> {
    split_unescaped(raw_args, '|', usize::MAX)
        .into_iter()
        .map(|piece| piece.trim().to_string())
        .collect()
}

/// Split a `key = value` descriptor on its first unescaped `=`.
///
/// Returns `None` when the descriptor has no unescaped `=`.
pub fn split_pair(descriptor: &str) -> Option<(String, String)> {
    let mut parts = split_unescaped(descriptor, '=', 2).into_iter();
    let key = parts.next()?;
    let value = parts.next()?;
    Some((key.trim().to_string(), value.trim().to_string()))
}

/// Split `text` on `sep`, skipping `%%<sep>%%`, into at most `limit` pieces.
fn split_unescaped(text: &str, sep: char, limit: usize) -> Vec<&str> {
    let escaped = format!("{ESCAPE}{sep}{ESCAPE}");
    let mut pieces = Vec::new();
    let mut piece_start = 0;
    let mut i = 0;

    while i < text.len() && pieces.len() + 1 < limit {
        let rest = &text[i..];
        if rest.starts_with(&escaped) {
            i += escaped.len();
        } else if rest.starts_with(sep) {
            pieces.push(&text[piece_start..i]);
            i += sep.len_utf8();
            piece_start = i;
        } else {
            // Advance one whole character.
            i += rest.chars().next().map_or(1, char::len_utf8);
        }
    }

    pieces.push(&text[piece_start..]);
    pieces
}
