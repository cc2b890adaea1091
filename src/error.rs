//! Error types for dirkv
//!
//! Provides a unified error type for all operations.
//!
//! Only the "file is missing" case is translated (into [`DirKvError::KeyNotFound`]);
//! every other filesystem failure is carried verbatim in [`DirKvError::Io`].

use thiserror::Error;

/// Result type alias using DirKvError
pub type Result<T> = std::result::Result<T, DirKvError>;

/// Unified error type for dirkv operations
#[derive(Debug, Error)]
pub enum DirKvError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Caller Errors
    // -------------------------------------------------------------------------
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Key resolves outside the store root: {0:?}")]
    PathEscapesRoot(String),

    // -------------------------------------------------------------------------
    // Lookup Errors
    // -------------------------------------------------------------------------
    #[error("Key not found: {0:?}")]
    KeyNotFound(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    // -------------------------------------------------------------------------
    // Async Facade Errors
    // -------------------------------------------------------------------------
    #[error("Blocking task failed: {0}")]
    Task(String),
}

impl DirKvError {
    /// True when the error means "no entry for this key"
    pub fn is_not_found(&self) -> bool {
        matches!(self, DirKvError::KeyNotFound(_))
    }
}
