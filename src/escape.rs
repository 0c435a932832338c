//! Literal regions that the call scanner must never look into.
//!
//! Two kinds of span are shielded before scanning:
//! - inline `%%...%%` escapes, and
//! - block literals `<nowiki>`, `<code>`, `<file>` and `<html>` (tag names
//!   case-insensitive, attributes allowed, content may span lines).
//!
//! Each span is swapped for a placeholder `O<n>C`, where `O` and `C` are two
//! distinct private-use characters that do not occur anywhere in the input.
//! Since neither sentinel is in the document, a placeholder can never be
//! confused with document text or with a neighbouring placeholder, and
//! restoring is an exact inverse of protecting.
use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use tracing::{trace, warn};

static LITERAL_SPAN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"(?is)%%.*?%%|<nowiki\b[^>]*>.*?</nowiki\s*>|<code\b[^>]*>.*?</code\s*>|<file\b[^>]*>.*?</file\s*>|<html\b[^>]*>.*?</html\s*>",
    )
    .expect("literal span pattern is valid")
});

/// Deprecated entity escapes, decoded in this exact order. `&num;` must stay
/// last: every other key contains it.
const LEGACY_ENTITIES: [(&str, &str); 5] = [
    ("&&num;61;", "="),
    ("&&num;123;", "%%{%%"),
    ("&&num;124;", "|"),
    ("&&num;125;", "%%}%%"),
    ("&num;", "#"),
];

/// One shielded span.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProtectedBlock {
    pub placeholder: String,
    pub original: String,
}

/// Hands out placeholders built from two sentinels absent from a text.
///
/// Identical originals share a placeholder.
#[derive(Debug, Clone)]
pub struct Shield {
    open: char,
    close: char,
    blocks: Vec<ProtectedBlock>,
}

impl Shield {
    /// `None` when every private-use character already occurs in `text`.
    pub fn for_text(text: &str) -> Option<Self> {
        let (open, close) = free_sentinels(text)?;
        Some(Self {
            open,
            close,
            blocks: Vec::new(),
        })
    }

    /// Register `original` and return the placeholder standing in for it.
    pub fn hide(&mut self, original: &str) -> String {
        if let Some(existing) = self.blocks.iter().find(|b| b.original == original) {
            return existing.placeholder.clone();
        }
        let placeholder = format!("{}{}{}", self.open, self.blocks.len(), self.close);
        trace!(%placeholder, len = original.len(), "shielded span");
        self.blocks.push(ProtectedBlock {
            placeholder: placeholder.clone(),
            original: original.to_string(),
        });
        placeholder
    }

    pub fn blocks(&self) -> &[ProtectedBlock] {
        &self.blocks
    }

    pub fn reveal(&self, text: &str) -> String {
        restore(text, &self.blocks)
    }
}

/// Replace every literal span in `text` with a placeholder.
///
/// Identical spans share a placeholder, so two equal literals still compare
/// equal after protection.
pub fn protect(text: &str) -> (String, Vec<ProtectedBlock>) {
    if !LITERAL_SPAN.is_match(text) {
        return (text.to_string(), Vec::new());
    }
    let Some(mut shield) = Shield::for_text(text) else {
        warn!("no free private-use characters; literal spans left unprotected");
        return (text.to_string(), Vec::new());
    };

    let guarded = LITERAL_SPAN
        .replace_all(text, |caps: &Captures<'_>| shield.hide(&caps[0]))
        .into_owned();
    (guarded, shield.blocks)
}

/// Put the original spans back.
///
/// Blocks are restored newest first, so a block whose original contains an
/// older placeholder is fully expanded.
pub fn restore(text: &str, blocks: &[ProtectedBlock]) -> String {
    let mut out = text.to_string();
    for block in blocks.iter().rev() {
        if out.contains(&block.placeholder) {
            out = out.replace(&block.placeholder, &block.original);
        }
    }
    out
}

/// Decode the legacy `&&num;NN;` / `&num;` escapes.
pub fn decode_legacy_entities(text: &str) -> String {
    if !text.contains("&num;") {
        return text.to_string();
    }
    LEGACY_ENTITIES
        .iter()
        .fold(text.to_string(), |acc, (from, to)| acc.replace(from, to))
}

fn private_use() -> impl Iterator<Item = char> {
    ('\u{E000}'..='\u{F8FF}').chain('\u{F0000}'..='\u{FFFFD}')
}

fn free_sentinels(text: &str) -> Option<(char, char)> {
    let used: HashSet<char> = text
        .chars()
        .filter(|c| matches!(c, '\u{E000}'..='\u{F8FF}' | '\u{F0000}'..='\u{FFFFD}'))
        .collect();
    let mut free = private_use().filter(|c| !used.contains(c));
    Some((free.next()?, free.next()?))
}
