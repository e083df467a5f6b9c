//! Saved and liked lists of the authenticated user

use bytes::Bytes;
use hyper::StatusCode;
use platebook_core::{Collection, RecipeId};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use super::parse_json;
use crate::error::{ApiError, HandlerResult};
use crate::response::{json_response, message_response};
use crate::state::AppState;

#[derive(Deserialize)]
struct MembershipRequest {
    recipe_id: Option<Value>,
}

fn added_message(collection: Collection) -> &'static str {
    match collection {
        Collection::Saved => "Recipe saved successfully",
        Collection::Liked => "Recipe liked successfully",
    }
}

fn removed_message(collection: Collection) -> &'static str {
    match collection {
        Collection::Saved => "Recipe removed from saved",
        Collection::Liked => "Recipe removed from liked",
    }
}

pub async fn list(username: String, collection: Collection, state: &AppState) -> HandlerResult {
    let recipes = state.stores.collection_recipes(&username, collection)?;
    Ok(json_response(StatusCode::OK, &recipes))
}

/// The recipe id is taken as given; it is not checked against the catalog
pub async fn add(
    username: String,
    collection: Collection,
    body: &Bytes,
    state: &AppState,
) -> HandlerResult {
    let request: MembershipRequest = parse_json(body)?;

    let id = request
        .recipe_id
        .as_ref()
        .and_then(Value::as_u64)
        .map(RecipeId::new)
        .ok_or_else(|| ApiError::bad_request("Recipe ID is required"))?;

    let added = state.stores.collections.add(&username, collection, id)?;
    debug!("{} {}: recipe={}, new={}", username, collection, id, added);

    Ok(message_response(StatusCode::OK, added_message(collection)))
}

pub async fn remove(
    username: String,
    collection: Collection,
    id: RecipeId,
    state: &AppState,
) -> HandlerResult {
    let removed = state.stores.collections.remove(&username, collection, id)?;
    debug!("{} {}: recipe={}, removed={}", username, collection, id, removed);

    Ok(message_response(StatusCode::OK, removed_message(collection)))
}
