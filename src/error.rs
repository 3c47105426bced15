//! @acp:module "Errors"
//! @acp:summary "Crate-wide error type and result alias"
//! @acp:domain cli
//! @acp:layer types

use thiserror::Error;

/// @acp:summary "Errors raised by the Sophia library"
#[derive(Debug, Error)]
pub enum SophiaError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("Invalid question catalogue: {0}")]
    InvalidCatalogue(String),

    #[error("Unsupported file type '{name}'. Accepted: {accepted}")]
    UnsupportedUpload { name: String, accepted: String },

    #[error("Unknown question: {0}")]
    UnknownQuestion(String),

    #[error("Schema validation failed: {0}")]
    Schema(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, SophiaError>;
