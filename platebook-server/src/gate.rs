//! Auth gate for protected routes

use hyper::header::AUTHORIZATION;
use hyper::http::request::Parts;
use platebook_core::auth::{authenticate, AuthFailure, TokenVerifier};
use std::future::Future;
use tracing::debug;

use crate::error::{ApiError, HandlerResult};

/// Run `handler` with the caller's username, or answer 401
///
/// Only an absent or empty header counts as missing. Anything else present
/// goes to the verifier, and its failures are logged and reported as a
/// single "Invalid token" message.
pub async fn require_identity<F, Fut>(
    parts: &Parts,
    verifier: &TokenVerifier,
    handler: F,
) -> HandlerResult
where
    F: FnOnce(String) -> Fut,
    Fut: Future<Output = HandlerResult>,
{
    let outcome = match parts.headers.get(AUTHORIZATION) {
        None => authenticate(None, verifier),
        Some(value) => match value.to_str() {
            Ok(value) => authenticate(Some(value), verifier),
            Err(_) => Err(AuthFailure::Malformed),
        },
    };

    match outcome {
        Ok(username) => handler(username).await,
        Err(AuthFailure::Missing) => {
            debug!("Rejected {} {}: {}", parts.method, parts.uri.path(), AuthFailure::Missing);
            Err(ApiError::Unauthorized("Token is missing"))
        }
        Err(reason) => {
            debug!("Rejected {} {}: {}", parts.method, parts.uri.path(), reason);
            Err(ApiError::Unauthorized("Invalid token"))
        }
    }
}
