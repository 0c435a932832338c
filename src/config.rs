//! Resolver settings, loaded from TOML.
//!
//! Every key is optional:
//!
//! ```toml
//! max_depth = 64          # deepest allowed call nesting
//! lang = "pt-br"          # "en" or "pt-br"
//! wrap_errors = true      # wrap error text in <wrap SEVERITY>...</wrap>
//! legacy_entities = true  # decode &&num;NN; escapes in call output
//! wiki_root = "/srv/wiki" # tree consulted by {{#ifexist: ... #}}
//! ```
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::diagnostic::Lang;
use crate::error::{Error, Result};

pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub max_depth: usize,
    pub lang: Lang,
    pub wrap_errors: bool,
    pub legacy_entities: bool,
    pub wiki_root: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            lang: Lang::En,
            wrap_errors: false,
            legacy_entities: true,
            wiki_root: None,
        }
    }
}

impl Config {
    /// Read and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content).map_err(|source| Error::ConfigParse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_depth == 0 {
            return Err(Error::ConfigValue("max_depth must be at least 1".into()));
        }
        Ok(())
    }
}
