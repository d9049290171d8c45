//! Core error types for the generation pipeline
//!
//! Only input problems are errors. Edges that point at unknown cells are
//! tallied in the resolution report instead, and rendering cannot fail.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading or parsing a diagram
#[derive(Error, Debug)]
pub enum GeneratorError {
    #[error("Malformed document: {message} at position {position}")]
    MalformedDocument { message: String, position: u64 },

    #[error("Input file not found: {}", path.display())]
    InputNotFound { path: PathBuf },

    #[error("IO error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
}

impl GeneratorError {
    /// Create a new malformed document error
    pub fn malformed_document(message: impl Into<String>, position: u64) -> Self {
        Self::MalformedDocument {
            message: message.into(),
            position,
        }
    }

    /// Create a new input-not-found error
    pub fn input_not_found(path: impl Into<PathBuf>) -> Self {
        Self::InputNotFound { path: path.into() }
    }

    /// True for errors caused by the document content rather than the filesystem
    pub fn is_malformed(&self) -> bool {
        matches!(self, Self::MalformedDocument { .. })
    }
}
