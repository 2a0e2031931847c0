//! Error types for configuration and selector parsing.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("empty selector")]
    Empty,

    #[error("unexpected {found} at byte {position} in selector `{selector}`")]
    Syntax {
        selector: String,
        position: usize,
        found: String,
    },
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid config JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid selector for `{field}`: {source}")]
    Selector {
        field: &'static str,
        #[source]
        source: SelectorError,
    },

    #[error("invalid class name for `{field}`: `{value}`")]
    ClassName { field: &'static str, value: String },

    #[error("scroll threshold must be finite and non-negative, got {0}")]
    ScrollThreshold(f64),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
