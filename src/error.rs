use std::path::PathBuf;

use thiserror::Error;

/// Failures outside the markup itself.
///
/// Problems *inside* a call (unknown function, missing parameters, bad
/// expression, ...) are never reported through this type: they become
/// inline [`Diagnostic`](crate::diagnostic::Diagnostic) text instead.
#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration in '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid configuration: {0}")]
    ConfigValue(String),

    #[error("call nesting exceeds the limit of {limit}")]
    DepthExceeded { limit: usize },
}

pub type Result<T> = std::result::Result<T, Error>;
