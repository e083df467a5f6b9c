//! Authentication for Platebook
//!
//! This module implements the credential and session plane:
//! - Unsalted SHA-256 password digests
//! - HMAC-SHA256 signed, seven-day session tokens
//! - Header-based request authentication
//! - Constant-time comparisons for secret-derived values

pub mod gate;
pub mod password;
pub mod timing;
pub mod token;

pub use gate::*;
pub use password::*;
pub use timing::*;
pub use token::*;
