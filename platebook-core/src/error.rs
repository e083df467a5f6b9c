//! Error types for Platebook

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PlatebookError {
    #[error("Storage error: {0}")]
    Storage(String),

    #[error("Username already taken")]
    UsernameTaken,

    #[error("Email already registered")]
    EmailTaken,

    #[error("Invalid signing secret: {0}")]
    InvalidSecret(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl PlatebookError {
    /// True for failures caused by the caller's input rather than the backend
    pub fn is_conflict(&self) -> bool {
        matches!(self, PlatebookError::UsernameTaken | PlatebookError::EmailTaken)
    }
}
