//! HTTP request handlers

use bytes::Bytes;
use chrono::Utc;
use http_body_util::BodyExt;
use hyper::body::Body;
use hyper::http::request::Parts;
use hyper::{Method, Request, Response, StatusCode};
use platebook_core::{Collection, RecipeId};
use serde::de::DeserializeOwned;
use serde_json::json;
use std::convert::Infallible;
use std::fmt::Display;
use std::sync::Arc;
use tracing::{debug, info};

use crate::error::{ApiError, HandlerResult};
use crate::gate::require_identity;
use crate::response::{json_response, preflight_response, with_common_headers, BoxBody};
use crate::state::AppState;

pub mod auth;
pub mod recipes;
pub mod user;

const RECIPE_PREFIX: &str = "/api/recipes/";
const SAVED_PREFIX: &str = "/api/user/saved/";
const LIKED_PREFIX: &str = "/api/user/liked/";

/// Main request handler
pub async fn handle_request<B>(
    req: Request<B>,
    state: Arc<AppState>,
) -> Result<Response<BoxBody>, Infallible>
where
    B: Body<Data = Bytes>,
    B::Error: Display,
{
    let (parts, body) = req.into_parts();

    let result = match body.collect().await {
        Ok(collected) => route(&parts, collected.to_bytes(), &state).await,
        Err(e) => {
            debug!("Failed to read request body: {}", e);
            Err(ApiError::bad_request("Invalid JSON body"))
        }
    };

    let response = with_common_headers(result.unwrap_or_else(ApiError::into_response));
    info!("{} {} -> {}", parts.method, parts.uri.path(), response.status().as_u16());
    Ok(response)
}

async fn route(parts: &Parts, body: Bytes, state: &AppState) -> HandlerResult {
    let path = parts.uri.path();

    match (&parts.method, path) {
        (&Method::OPTIONS, _) => Ok(preflight_response()),

        (&Method::GET, "/") => Ok(index()),
        (&Method::GET, "/health") => Ok(health()),

        (&Method::POST, "/api/auth/register") => auth::register(&body, state).await,
        (&Method::POST, "/api/auth/login") => auth::login(&body, state).await,
        (&Method::POST, "/api/auth/forgot-password") => auth::forgot_password(&body).await,

        (&Method::GET, "/api/recipes") => recipes::list(state).await,
        (&Method::GET, "/api/recipes/search") => recipes::search(parts.uri.query(), state).await,
        (&Method::GET, "/api/recipes/random") => recipes::random(state).await,
        (&Method::POST, "/api/recipes/generate") => recipes::generate(&body, state).await,
        (&Method::GET, p) if p.starts_with(RECIPE_PREFIX) => {
            let id = path_id(p, RECIPE_PREFIX)?;
            recipes::get(id, state).await
        }

        (&Method::GET, "/api/user/saved") => {
            require_identity(parts, &state.verifier, |username| {
                user::list(username, Collection::Saved, state)
            })
            .await
        }
        (&Method::GET, "/api/user/liked") => {
            require_identity(parts, &state.verifier, |username| {
                user::list(username, Collection::Liked, state)
            })
            .await
        }
        (&Method::POST, "/api/user/saved") => {
            require_identity(parts, &state.verifier, |username| {
                user::add(username, Collection::Saved, &body, state)
            })
            .await
        }
        (&Method::POST, "/api/user/liked") => {
            require_identity(parts, &state.verifier, |username| {
                user::add(username, Collection::Liked, &body, state)
            })
            .await
        }
        (&Method::DELETE, p) if p.starts_with(SAVED_PREFIX) => {
            let id = path_id(p, SAVED_PREFIX)?;
            require_identity(parts, &state.verifier, |username| {
                user::remove(username, Collection::Saved, id, state)
            })
            .await
        }
        (&Method::DELETE, p) if p.starts_with(LIKED_PREFIX) => {
            let id = path_id(p, LIKED_PREFIX)?;
            require_identity(parts, &state.verifier, |username| {
                user::remove(username, Collection::Liked, id, state)
            })
            .await
        }

        _ => Err(ApiError::NotFound("Endpoint not found")),
    }
}

/// Parse the integer id after `prefix`; anything else is an unknown route
fn path_id(path: &str, prefix: &str) -> Result<RecipeId, ApiError> {
    path.strip_prefix(prefix)
        .filter(|rest| !rest.is_empty() && rest.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|rest| rest.parse().ok())
        .ok_or(ApiError::NotFound("Endpoint not found"))
}

/// Decode a JSON request body
pub(crate) fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body).map_err(|e| {
        debug!("Rejected request body: {}", e);
        ApiError::bad_request("Invalid JSON body")
    })
}

/// Treat a missing or empty string field as absent
pub(crate) fn non_empty(field: Option<String>) -> Option<String> {
    field.filter(|value| !value.is_empty())
}

fn index() -> Response<BoxBody> {
    json_response(
        StatusCode::OK,
        &json!({
            "message": "Platebook Recipe API",
            "status": "running",
            "version": env!("CARGO_PKG_VERSION"),
        }),
    )
}

fn health() -> Response<BoxBody> {
    json_response(
        StatusCode::OK,
        &json!({
            "status": "healthy",
            "timestamp": Utc::now().to_rfc3339(),
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_id() {
        assert_eq!(path_id("/api/recipes/12", RECIPE_PREFIX).unwrap(), RecipeId::new(12));
        assert!(path_id("/api/recipes/abc", RECIPE_PREFIX).is_err());
        assert!(path_id("/api/recipes/", RECIPE_PREFIX).is_err());
        assert!(path_id("/api/recipes/1/2", RECIPE_PREFIX).is_err());
        assert!(path_id("/api/recipes/+5", RECIPE_PREFIX).is_err());
    }

    #[test]
    fn test_non_empty() {
        assert_eq!(non_empty(Some("a".to_string())), Some("a".to_string()));
        assert_eq!(non_empty(Some(String::new())), None);
        assert_eq!(non_empty(None), None);
    }
}
