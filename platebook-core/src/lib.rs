//! Core data models, authentication and storage contracts for Platebook

pub mod auth;
pub mod error;
pub mod recipes;
pub mod store;
pub mod types;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;

pub use error::*;
pub use types::*;

/// Result type alias for Platebook operations
pub type Result<T> = std::result::Result<T, PlatebookError>;
