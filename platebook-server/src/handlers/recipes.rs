//! Public recipe catalog endpoints

use bytes::Bytes;
use hyper::StatusCode;
use platebook_core::recipes::generate_recipe;
use platebook_core::RecipeId;
use rand::seq::SliceRandom;
use serde::Deserialize;
use tracing::{debug, info};

use super::parse_json;
use crate::error::{ApiError, HandlerResult};
use crate::response::json_response;
use crate::state::AppState;

#[derive(Deserialize, Default)]
struct SearchQuery {
    #[serde(default)]
    q: String,
}

#[derive(Deserialize)]
struct GenerateRequest {
    input: Option<String>,
}

pub async fn list(state: &AppState) -> HandlerResult {
    let recipes = state.stores.recipes.list()?;
    Ok(json_response(StatusCode::OK, &recipes))
}

pub async fn get(id: RecipeId, state: &AppState) -> HandlerResult {
    match state.stores.recipes.get(id)? {
        Some(recipe) => Ok(json_response(StatusCode::OK, &recipe)),
        None => Err(ApiError::NotFound("Recipe not found")),
    }
}

pub async fn search(query: Option<&str>, state: &AppState) -> HandlerResult {
    let params: SearchQuery = match query {
        Some(raw) => serde_urlencoded::from_str(raw).unwrap_or_else(|e| {
            debug!("Ignoring unparseable query {:?}: {}", raw, e);
            SearchQuery::default()
        }),
        None => SearchQuery::default(),
    };

    let recipes = state.stores.recipes.search(&params.q)?;
    Ok(json_response(StatusCode::OK, &recipes))
}

pub async fn random(state: &AppState) -> HandlerResult {
    let recipes = state.stores.recipes.list()?;

    let pick = recipes.choose(&mut rand::thread_rng());

    match pick {
        Some(recipe) => Ok(json_response(StatusCode::OK, recipe)),
        None => Err(ApiError::NotFound("No recipes available")),
    }
}

pub async fn generate(body: &Bytes, state: &AppState) -> HandlerResult {
    let request: GenerateRequest = parse_json(body)?;
    let input = request.input.unwrap_or_default();

    let draft = generate_recipe(&input, &mut rand::thread_rng())
        .ok_or_else(|| ApiError::bad_request("Please provide a recipe name or description"))?;

    let recipe = state.stores.recipes.add(draft)?;
    info!("Generated recipe: id={}, name={}", recipe.id, recipe.name());

    Ok(json_response(StatusCode::CREATED, &recipe))
}
