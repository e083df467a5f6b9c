//! Request authentication
//!
//! Turns the raw `Authorization` header of a request into a verified
//! username. Transport layers call [`authenticate`] and decide how to
//! report the failure.

use crate::auth::{AuthFailure, TokenVerifier};

/// Optional scheme prefix accepted in front of the token
pub const BEARER_PREFIX: &str = "Bearer ";

/// Strip a single leading `"Bearer "` (case-sensitive) if present
pub fn strip_bearer(value: &str) -> &str {
    value.strip_prefix(BEARER_PREFIX).unwrap_or(value)
}

/// Authenticate a request from its `Authorization` header value
pub fn authenticate(
    header: Option<&str>,
    verifier: &TokenVerifier,
) -> std::result::Result<String, AuthFailure> {
    let value = match header {
        Some(value) if !value.is_empty() => value,
        _ => return Err(AuthFailure::Missing),
    };

    verifier.verify(strip_bearer(value))
}
