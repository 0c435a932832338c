/// Byte range of one complete `{{#...#}}` call in a buffer.
///
/// `end` is inclusive: it points at the final `}` of the closing `#}}`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Byte range usable for slicing and `replace_range`.
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end + 1
    }

    /// The text between the opening `{{#` and the closing `#}}`.
    pub fn inner<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start + 3..self.end - 2]
    }
}

/// A single call before argument splitting: `{{#name: raw_args #}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    /// Function name as written (surrounding whitespace removed).
    pub name: String,
    /// Everything after the first `:`, untouched.
    pub raw_args: String,
}
