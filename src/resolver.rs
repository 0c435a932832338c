use std::path::PathBuf;

use tracing::{debug, warn};

use crate::config::Config;
use crate::diagnostic::Formatter;
use crate::error::{Error, Result};
use crate::escape;
use crate::functions::{self, Env};
use crate::math::{Arithmetic, ExpressionEvaluator};
use crate::oracle::{ExistenceOracle, WikiTree};
use crate::params;
use crate::parser;
use crate::scanner::{self, Scan};

/// Reduces every `{{#...#}}` call in a document to plain markup.
///
/// Collaborators (existence oracle, expression evaluator) are injected at
/// construction; everything else is local to one `resolve_all` call.
pub struct Resolver {
    oracle: Box<dyn ExistenceOracle>,
    evaluator: Box<dyn ExpressionEvaluator>,
    formatter: Formatter,
    max_depth: usize,
    legacy_entities: bool,
}

impl Default for Resolver {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl Resolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &Config) -> Self {
        let root = config
            .wiki_root
            .clone()
            .unwrap_or_else(|| PathBuf::from("."));
        Self {
            oracle: Box::new(WikiTree::new(root)),
            evaluator: Box::new(Arithmetic),
            formatter: Formatter::new(config.lang, config.wrap_errors),
            max_depth: config.max_depth.max(1),
            legacy_entities: config.legacy_entities,
        }
    }

    // -----------------------------------------------------------------------
    // Builder-style overrides
    // -----------------------------------------------------------------------

    pub fn with_oracle(mut self, oracle: impl ExistenceOracle + 'static) -> Self {
        self.oracle = Box::new(oracle);
        self
    }

    pub fn with_evaluator(mut self, evaluator: impl ExpressionEvaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    pub fn with_formatter(mut self, formatter: Formatter) -> Self {
        self.formatter = formatter;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth.max(1);
        self
    }

    pub fn with_legacy_entities(mut self, enabled: bool) -> Self {
        self.legacy_entities = enabled;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    // -----------------------------------------------------------------------
    // Entry points
    // -----------------------------------------------------------------------

    /// Shield literal spans, resolve every call, then put the literals back.
    pub fn resolve_all(&self, markup: &str) -> String {
        let (guarded, blocks) = escape::protect(markup);
        let resolved = self.resolve(&guarded);
        escape::restore(&resolved, &blocks)
    }

    /// Resolve calls until none remain.
    ///
    /// An unterminated call, or one nested deeper than the limit, is left
    /// verbatim and stops resolution of everything after it. Results whose
    /// legacy entities were decoded are final: they are shielded from the
    /// rescan and only put back once the loop is done.
    pub fn resolve(&self, text: &str) -> String {
        let mut buffer = text.to_string();
        let mut decoded = escape::Shield::for_text(text);
        loop {
            let span = match scanner::next_balanced(&buffer) {
                Scan::Absent => break,
                Scan::Malformed { start } => {
                    warn!(offset = start, "unterminated call left unresolved");
                    break;
                }
                Scan::Found(span) => span,
            };

            match self.evaluate(span.inner(&buffer), 1) {
                Ok(result) => {
                    let result = self.finish(result, &mut decoded);
                    buffer.replace_range(span.range(), &result);
                }
                Err(e) => {
                    warn!(offset = span.start, error = %e, "call left unresolved");
                    break;
                }
            }
        }
        match decoded {
            Some(shield) => shield.reveal(&buffer),
            None => buffer,
        }
    }

    /// Decode legacy entities in a top-level result and take it out of
    /// the scanner's sight.
    fn finish(&self, result: String, decoded: &mut Option<escape::Shield>) -> String {
        if !self.legacy_entities || !result.contains("&num;") {
            return result;
        }
        let plain = escape::decode_legacy_entities(&result);
        match decoded {
            Some(shield) => shield.hide(&plain),
            None => {
                warn!("no free private-use characters; decoded output stays scannable");
                plain
            }
        }
    }

    // -----------------------------------------------------------------------
    // Recursion
    // -----------------------------------------------------------------------

    /// Evaluate the inside of one call found at nesting `depth` (1-based).
    fn evaluate(&self, inner: &str, depth: usize) -> Result<String> {
        if depth > self.max_depth {
            return Err(Error::DepthExceeded {
                limit: self.max_depth,
            });
        }

        // Nested calls first, so the outer call only ever sees plain text.
        let inner = self.resolve_nested(inner, depth)?;

        let env = Env {
            oracle: self.oracle.as_ref(),
            evaluator: self.evaluator.as_ref(),
        };
        let outcome = parser::parse_call(&inner).and_then(|call| {
            let args = params::split(&call.raw_args);
            debug!(function = %call.name, args = args.len(), depth, "dispatching call");
            functions::dispatch(&env, &call.name, &args)
        });

        Ok(outcome.unwrap_or_else(|diagnostic| {
            debug!(function = %diagnostic.function, key = %diagnostic.key, "call failed");
            self.formatter.render(&diagnostic)
        }))
    }

    fn resolve_nested(&self, text: &str, depth: usize) -> Result<String> {
        let mut buffer = text.to_string();
        while let Scan::Found(span) = scanner::next_balanced(&buffer) {
            let result = self.evaluate(span.inner(&buffer), depth + 1)?;
            buffer.replace_range(span.range(), &result);
        }
        Ok(buffer)
    }
}

impl std::fmt::Debug for Resolver {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Resolver")
            .field("formatter", &self.formatter)
            .field("max_depth", &self.max_depth)
            .field("legacy_entities", &self.legacy_entities)
            .finish_non_exhaustive()
    }
}

/// Resolve `markup` with the default collaborators.
pub fn resolve_all(markup: &str) -> String {
    Resolver::default().resolve_all(markup)
}
