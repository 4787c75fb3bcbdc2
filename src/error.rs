//! Error types for the moatscope library
//!
//! Scorers and classifiers never fail on well-formed input; errors come from
//! configuration loading, input validation and file I/O.

use thiserror::Error;

/// Errors that can occur while configuring or feeding the scoring pipeline
#[derive(Error, Debug)]
pub enum MoatscopeError {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Unknown category '{id}' in {table} table")]
    UnknownCategory { table: String, id: String },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to parse TOML: {0}")]
    Toml(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, MoatscopeError>;
