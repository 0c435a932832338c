//! Case tables for `{{#switch: ... #}}`.
//!
//! Descriptors are folded left to right:
//!
//! | Descriptor | Effect |
//! |---|---|
//! | `label = value` | `cases[label] = value`; `value` becomes the fallthrough value |
//! | `#default = value` | explicit default; `value` becomes the fallthrough value |
//! | `#default` | explicit default = current fallthrough value |
//! | `label` | `cases[label]` = current fallthrough value |
//!
//! The fallthrough value is the value of the nearest *preceding* valued
//! descriptor, so `a=1 | b | c=2` maps `b` to `1`. A bare label seen before
//! any value maps to the empty string. Without an explicit default, the
//! default is the last fallthrough value.
use indexmap::IndexMap;

use crate::params;

pub const DEFAULT_MARKER: &str = "#default";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CaseTable {
    pub test: String,
    /// Case labels in first-seen order; a repeated label keeps its position
    /// and takes the later value.
    pub cases: IndexMap<String, String>,
    pub default: Option<String>,
}

impl CaseTable {
    /// Build a table from switch arguments: `args[0]` is the test value,
    /// the rest are case descriptors.
    pub fn build(args: &[String]) -> Self {
        let Some((test, descriptors)) = args.split_first() else {
            return Self::default();
        };
        descriptors
            .iter()
            .fold(CaseTableBuilder::with_test(test), |builder, d| {
                builder.descriptor(d)
            })
            .finish()
    }

    /// The value selected by the test: an exact case match (even when that
    /// value is empty), else the default, else the empty string.
    pub fn lookup(&self) -> &str {
        self.cases
            .get(&self.test)
            .or(self.default.as_ref())
            .map_or("", String::as_str)
    }
}

/// Incremental construction of a [`CaseTable`].
#[derive(Debug, Clone, Default)]
pub struct CaseTableBuilder {
    test: Option<String>,
    cases: IndexMap<String, String>,
    explicit_default: Option<String>,
    fallthrough: Option<String>,
}

impl CaseTableBuilder {
    /// Builder without a fixed test value: the first bare descriptor becomes
    /// the test.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_test(test: &str) -> Self {
        Self {
            test: Some(test.trim().to_string()),
            ..Self::default()
        }
    }

    pub fn descriptor(mut self, descriptor: &str) -> Self {
        match params::split_pair(descriptor) {
            Some((label, value)) => {
                if label == DEFAULT_MARKER {
                    self.explicit_default = Some(value.clone());
                } else {
                    self.cases.insert(label, value.clone());
                }
                self.fallthrough = Some(value);
            }
            None => {
                let label = descriptor.trim();
                let current = self.fallthrough.clone().unwrap_or_default();
                if self.test.is_none() {
                    self.test = Some(label.to_string());
                } else if label == DEFAULT_MARKER {
                    self.explicit_default = Some(current);
                } else {
                    self.cases.insert(label.to_string(), current);
                }
            }
        }
        self
    }

    pub fn finish(self) -> CaseTable {
        CaseTable {
            test: self.test.unwrap_or_default(),
            cases: self.cases,
            default: self.explicit_default.or(self.fallthrough),
        }
    }
}
