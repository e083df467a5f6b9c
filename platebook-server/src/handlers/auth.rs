//! Registration, login and password reset

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use bytes::Bytes;
use hyper::StatusCode;
use platebook_core::auth::hash_password;
use platebook_core::{Identity, PlatebookError};
use rand::RngCore;
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, info};

use super::{non_empty, parse_json};
use crate::error::{ApiError, HandlerResult};
use crate::response::{json_response, message_response};
use crate::state::AppState;

const RESET_TOKEN_BYTES: usize = 32;

#[derive(Deserialize)]
struct RegisterRequest {
    email: Option<String>,
    username: Option<String>,
    password: Option<String>,
}

#[derive(Deserialize)]
struct LoginRequest {
    email_or_username: Option<String>,
    password: Option<String>,
}

#[derive(Deserialize)]
struct ForgotPasswordRequest {
    email: Option<String>,
}

pub async fn register(body: &Bytes, state: &AppState) -> HandlerResult {
    let request: RegisterRequest = parse_json(body)?;

    let (email, username, password) = match (
        non_empty(request.email),
        non_empty(request.username),
        non_empty(request.password),
    ) {
        (Some(email), Some(username), Some(password)) => (email, username, password),
        _ => return Err(ApiError::bad_request("All fields are required")),
    };

    let identity = Identity::new(&username, &email, hash_password(&password));

    match state.stores.identities.insert_new(identity) {
        Ok(()) => {
            info!("Registered identity: username={}", username);
            Ok(message_response(StatusCode::CREATED, "User registered successfully"))
        }
        Err(e) if e.is_conflict() => {
            debug!("Registration refused for {}: {}", username, e);
            Err(ApiError::bad_request(e.to_string()))
        }
        Err(e) => Err(e.into()),
    }
}

pub async fn login(body: &Bytes, state: &AppState) -> HandlerResult {
    let request: LoginRequest = parse_json(body)?;

    let handle = non_empty(request.email_or_username);
    let (handle, password) = match (handle, non_empty(request.password)) {
        (Some(handle), Some(password)) => (handle, password),
        _ => return Err(ApiError::bad_request("Email/username and password are required")),
    };

    // Username record first, then email record; the first whose digest
    // matches wins.
    let by_username = state
        .stores
        .identities
        .get(&handle)?
        .filter(|identity| identity.password_digest.matches(&password));
    let identity = match by_username {
        Some(identity) => Some(identity),
        None => state
            .stores
            .identities
            .find_by_email(&handle)?
            .filter(|identity| identity.password_digest.matches(&password)),
    };

    match identity {
        Some(identity) => {
            let token = state.issuer.issue(&identity.username);
            info!("Login succeeded: username={}", identity.username);

            Ok(json_response(
                StatusCode::OK,
                &json!({
                    "token": token,
                    "username": identity.username,
                    "message": "Login successful",
                }),
            ))
        }
        _ => {
            debug!("Login refused for {}", handle);
            Err(ApiError::Unauthorized("Invalid credentials"))
        }
    }
}

/// Always answers the same way whether or not the email is registered
pub async fn forgot_password(body: &Bytes) -> HandlerResult {
    let request: ForgotPasswordRequest = parse_json(body)?;

    if non_empty(request.email).is_none() {
        return Err(ApiError::bad_request("Email is required"));
    }

    let mut raw = [0u8; RESET_TOKEN_BYTES];
    rand::thread_rng()
        .try_fill_bytes(&mut raw)
        .map_err(|e| PlatebookError::Internal(format!("random source failed: {}", e)))?;

    Ok(json_response(
        StatusCode::OK,
        &json!({
            "message": "If this email is registered, you will receive a password reset link",
            "reset_token": URL_SAFE_NO_PAD.encode(raw),
        }),
    ))
}
