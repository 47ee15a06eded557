//! Error types for option discovery and configuration loading.
//!
//! The chunk-splitting rule itself never fails; these errors only surface
//! while turning files, environment variables or JSON values into typed
//! configuration.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("config not found: {}", .path.display())]
    #[diagnostic(
        code(vue_split::config::not_found),
        help("Create vue-split.toml or add a \"vueSplit\" field to package.json")
    )]
    NotFound { path: PathBuf },

    #[error("invalid config value for '{field}'{}", .hint.as_ref().map(|h| format!(": {}", h)).unwrap_or_default())]
    #[diagnostic(code(vue_split::config::invalid_value))]
    InvalidValue { field: String, hint: Option<String> },

    #[error("failed to extract configuration: {0}")]
    #[diagnostic(
        code(vue_split::config::extract),
        help("Check field names and types; `vue` and `router` must be booleans")
    )]
    Extract(String),

    #[error("I/O error: {0}")]
    #[diagnostic(code(vue_split::config::io))]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    /// Create an InvalidValue error with a hint
    pub fn invalid_value(field: impl Into<String>, hint: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            hint: Some(hint.into()),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Extract(err.to_string())
    }
}
