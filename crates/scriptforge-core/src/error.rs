//! Error types for scriptforge operations

use thiserror::Error;

/// Result type alias for scriptforge operations
pub type ForgeResult<T> = Result<T, ForgeError>;

/// Main error type for scriptforge operations
#[derive(Error, Debug, Clone)]
pub enum ForgeError {
    /// Path resolution failure. Deliberately ambiguous between "file is
    /// missing" and "file exists outside the configured roots" so that
    /// resolution cannot be used as an oracle for probing the filesystem.
    #[error("Script not found in workspace roots: {path}")]
    NotFound { path: String },

    /// Malformed search expression, reported before any file I/O
    #[error("Invalid search pattern: {0}")]
    InvalidPattern(String),

    /// Caller contract violations
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(String),

    /// Source file exceeds the read ceiling
    #[error("File too large to read: {path} ({size} bytes)")]
    TooLarge { path: String, size: u64 },

    /// Generic error with context
    #[error("Error: {0}")]
    Other(String),
}

impl ForgeError {
    /// Create a new not-found error
    pub fn not_found(path: impl Into<String>) -> Self {
        Self::NotFound { path: path.into() }
    }

    /// Create a new invalid-pattern error
    pub fn invalid_pattern(message: impl Into<String>) -> Self {
        Self::InvalidPattern(message.into())
    }

    /// Create a new invalid-input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a new IO error
    pub fn io(message: impl Into<String>) -> Self {
        Self::Io(message.into())
    }

    /// Create a new too-large error
    pub fn too_large(path: impl Into<String>, size: u64) -> Self {
        Self::TooLarge {
            path: path.into(),
            size,
        }
    }
}

impl From<std::io::Error> for ForgeError {
    fn from(error: std::io::Error) -> Self {
        Self::Io(error.to_string())
    }
}

impl From<anyhow::Error> for ForgeError {
    fn from(error: anyhow::Error) -> Self {
        Self::Other(error.to_string())
    }
}
