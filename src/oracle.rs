//! Existence checks behind `{{#ifexist: ... #}}`.
use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::trace;

static NAMESPACE_SEPARATOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s*:\s*").expect("separator pattern is valid"));

/// Answers whether a target names something that exists.
pub trait ExistenceOracle {
    fn exists(&self, target: &str) -> bool;
}

impl<F> ExistenceOracle for F
where
    F: Fn(&str) -> bool,
{
    fn exists(&self, target: &str) -> bool {
        self(target)
    }
}

/// Filesystem-backed oracle for a wiki laid out as
/// `<root>/data/pages/<ns>/<page>.txt` and `<root>/data/media/<ns>/<file>`.
///
/// A target is tried, in order, as:
/// 1. a filesystem path (absolute or relative to the working directory),
/// 2. a path relative to the wiki root when it starts with `/`,
/// 3. a page id (`wiki:start`),
/// 4. a media id (`wiki:logo.png`),
/// 5. a namespace directory (`wiki:` or `wiki`).
#[derive(Debug, Clone)]
pub struct WikiTree {
    root: PathBuf,
}

impl WikiTree {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn pages_dir(&self) -> PathBuf {
        self.root.join("data").join("pages")
    }

    fn media_dir(&self) -> PathBuf {
        self.root.join("data").join("media")
    }
}

impl ExistenceOracle for WikiTree {
    fn exists(&self, target: &str) -> bool {
        let target = NAMESPACE_SEPARATOR.replace_all(target.trim(), ":");

        if Path::new(&*target).exists() {
            trace!(%target, "exists as filesystem path");
            return true;
        }

        if let Some(relative) = target.strip_prefix('/') {
            if self.root.join(relative.trim_start_matches('/')).exists() {
                trace!(%target, "exists relative to wiki root");
                return true;
            }
        }

        let segments = id_segments(&target);
        if segments.is_empty() {
            return false;
        }
        let relative: PathBuf = segments.iter().collect();

        let mut page = self.pages_dir().join(&relative);
        page.set_extension("txt");
        if page.is_file() {
            trace!(%target, "exists as page");
            return true;
        }

        if self.media_dir().join(&relative).is_file() {
            trace!(%target, "exists as media");
            return true;
        }

        if self.pages_dir().join(&relative).is_dir() {
            trace!(%target, "exists as namespace");
            return true;
        }

        false
    }
}

/// Split an id into clean path segments: lower-cased, spaces as `_`, with
/// empty and relative (`.`, `..`) segments dropped.
fn id_segments(id: &str) -> Vec<String> {
    id.split(|c| matches!(c, ':' | '/' | '\\'))
        .map(|s| s.trim().to_lowercase().replace(' ', "_"))
        .filter(|s| !s.is_empty() && s != "." && s != "..")
        .collect()
}
