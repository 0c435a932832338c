//! Balanced `{{# ... #}}` scanner.
//!
//! Calls nest, so a single pattern match cannot find where one ends. The
//! scanner walks the buffer once, counting `{{#` as +1 and `#}}` as -1, and
//! reports the span that brings the count back to zero.
use tracing::trace;

use crate::ast::Span;

pub const OPEN: &str = "{{#";
pub const CLOSE: &str = "#}}";

/// Outcome of looking for the next call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scan {
    /// No opening delimiter in the text.
    Absent,
    /// An opening delimiter at `start` is never closed.
    Malformed { start: usize },
    /// A complete, balanced call.
    Found(Span),
}

/// Find the first complete call in `text`.
pub fn next_balanced(text: &str) -> Scan {
    next_balanced_from(text, 0)
}

/// Find the first complete call starting at or after byte offset `from`.
pub fn next_balanced_from(text: &str, from: usize) -> Scan {
    let Some(rel) = text.get(from..).and_then(|rest| rest.find(OPEN)) else {
        return Scan::Absent;
    };
    let start = from + rel;
    let bytes = text.as_bytes();

    let mut depth = 0usize;
    let mut i = start;
    while i + 3 <= bytes.len() {
        match &bytes[i..i + 3] {
            b"{{#" => {
                depth += 1;
                i += 3;
            }
            b"#}}" => {
                depth -= 1;
                i += 3;
                if depth == 0 {
                    let span = Span { start, end: i - 1 };
                    trace!(start = span.start, end = span.end, "balanced call");
                    return Scan::Found(span);
                }
            }
            _ => i += 1,
        }
    }

    Scan::Malformed { start }
}

/// Successive top-level calls of `text`, left to right.
///
/// Stops at the first malformed call.
pub fn spans(text: &str) -> Spans<'_> {
    Spans { text, cursor: 0 }
}

pub struct Spans<'a> {
    text: &'a str,
    cursor: usize,
}

impl Iterator for Spans<'_> {
    type Item = Span;

    fn next(&mut self) -> Option<Span> {
        match next_balanced_from(self.text, self.cursor) {
            Scan::Found(span) => {
                self.cursor = span.end + 1;
                Some(span)
            }
            Scan::Absent | Scan::Malformed { .. } => {
                self.cursor = self.text.len();
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_absent_when_no_opener() {
        assert_eq!(next_balanced("plain #}} text"), Scan::Absent);
    }

    #[test]
    fn finds_simple_call() {
        let text = "ab {{#if: x | y #}} cd";
        let Scan::Found(span) = next_balanced(text) else {
            panic!("expected a call");
        };
        assert_eq!(&text[span.range()], "{{#if: x | y #}}");
        assert_eq!(span.inner(text), "if: x | y ");
    }

    #[test]
    fn outer_span_covers_nested_calls() {
        let text = "{{#if: 1 | {{#if: 1 | inner #}} | outer #}} tail";
        let Scan::Found(span) = next_balanced(text) else {
            panic!("expected a call");
        };
        assert_eq!(span.start, 0);
        assert_eq!(&text[span.range()], "{{#if: 1 | {{#if: 1 | inner #}} | outer #}}");
    }

    #[test]
    fn unterminated_call_is_malformed() {
        assert_eq!(next_balanced("x {{#if: a | b"), Scan::Malformed { start: 2 });
        assert_eq!(
            next_balanced("{{#if: {{#if: a #}} | b"),
            Scan::Malformed { start: 0 }
        );
    }

    #[test]
    fn empty_call_is_found() {
        let text = "{{##}}";
        let Scan::Found(span) = next_balanced(text) else {
            panic!("expected a call");
        };
        assert_eq!(span.inner(text), "");
    }

    #[test]
    fn iterates_sibling_calls_in_order() {
        let text = "{{#a: 1 #}} mid {{#b: {{#c: 2 #}} #}} end";
        let found: Vec<&str> = spans(text).map(|s| &text[s.range()]).collect();
        assert_eq!(found, vec!["{{#a: 1 #}}", "{{#b: {{#c: 2 #}} #}}"]);
    }

    #[test]
    fn handles_multibyte_text_around_calls() {
        let text = "é {{#if: ü | ß #}} ñ";
        let Scan::Found(span) = next_balanced(text) else {
            panic!("expected a call");
        };
        assert_eq!(span.inner(text), "if: ü | ß ");
    }
}
