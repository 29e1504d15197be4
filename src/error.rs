//! Domain-specific error types for narrative-analysis

use thiserror::Error;

use crate::clients::CompletionError;

/// Main error type for configuration, wiring and the CLI
#[derive(Error, Debug)]
pub enum NarrativeError {
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Completion service error: {0}")]
    Completion(#[from] CompletionError),

    #[error("Serialization error: {message}")]
    Serialization { message: String },

    #[error("I/O error: {message}")]
    Io { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl From<anyhow::Error> for NarrativeError {
    fn from(err: anyhow::Error) -> Self {
        NarrativeError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for NarrativeError {
    fn from(err: serde_json::Error) -> Self {
        NarrativeError::Serialization {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for NarrativeError {
    fn from(err: toml::de::Error) -> Self {
        NarrativeError::Config {
            message: format!("invalid TOML: {}", err),
        }
    }
}

impl From<reqwest::Error> for NarrativeError {
    fn from(err: reqwest::Error) -> Self {
        NarrativeError::Completion(CompletionError::Transport(err.to_string()))
    }
}

impl From<std::io::Error> for NarrativeError {
    fn from(err: std::io::Error) -> Self {
        NarrativeError::Io {
            message: err.to_string(),
        }
    }
}

/// Failures inside a single analyzer operation.
///
/// The `Display` text is what ends up after `"Error: "` in a failure envelope.
#[derive(Error, Debug)]
pub enum AnalysisError {
    #[error("{0}")]
    Completion(#[from] CompletionError),

    /// Parser diagnostic preserved verbatim.
    #[error("{0}")]
    Parse(String),

    /// Keyword replies report a fixed message; the parser diagnostic is dropped.
    #[error("Error parsing JSON:")]
    KeywordParse,
}

/// Result type alias for narrative-analysis operations
pub type Result<T> = std::result::Result<T, NarrativeError>;
