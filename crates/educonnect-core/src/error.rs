//! Error types for educonnect-core

use thiserror::Error;

use crate::models::NoteId;

/// Result type alias using educonnect-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in educonnect-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// libSQL error
    #[error("libSQL error: {0}")]
    LibSql(#[from] libsql::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Username already registered
    #[error("Username already taken: {0}")]
    UsernameTaken(String),

    /// Note not found
    #[error("Note not found: {0}")]
    NoteNotFound(NoteId),

    /// Uploaded file not found in the blob store
    #[error("File not found: {0}")]
    BlobNotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),
}
