//! Error types shared by the chunk store and the distribution compiler.
//!
//! Every failure is surfaced to the caller. The core never retries or
//! recovers silently; the CLI layer decides how to present the error.

use std::{io, path::PathBuf};

use thiserror::Error;

pub type Result<T, E = ResxError> = std::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum ResxError {
    /// A chunk with this name is already persisted.
    #[error("Resource '{0}' already exists")]
    AlreadyExists(String),
    /// The operation targets a chunk that does not exist.
    #[error("Resource '{0}' not found")]
    NotFound(String),
    /// A precondition of a mutation was violated. Nothing was written.
    #[error(transparent)]
    Validation(#[from] ValidationError),
    /// Persisted chunk data is malformed or breaks the language invariants.
    #[error("Invalid source data in '{chunk}': {reason}")]
    InvalidSourceData { chunk: String, reason: String },
    /// Underlying storage failure.
    #[error("I/O failure on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ResxError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn invalid_source(chunk: &str, reason: impl Into<String>) -> Self {
        Self::InvalidSourceData {
            chunk: chunk.to_string(),
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Key '{key}' already exists in '{chunk}'")]
    DuplicateKey { chunk: String, key: String },
    #[error("Default language ({lang}) value is required for key '{key}'")]
    MissingDefaultLanguage { key: String, lang: String },
    #[error("Can't add empty '{lang}' value for key '{key}'")]
    EmptyValue { key: String, lang: String },
    #[error("Language '{lang}' is not configured")]
    UnknownLanguage { lang: String },
    #[error("Invalid resource name '{name}': {reason}")]
    InvalidChunkName { name: String, reason: &'static str },
    #[error("Invalid key name '{name}': {reason}")]
    InvalidKeyName { name: String, reason: &'static str },
}
