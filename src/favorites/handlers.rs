use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use tracing::{info, instrument};

use super::repo;
use crate::{
    auth::AuthUser,
    catalog::{repo::recipe_exists, repo_types::Recipe},
    error::AppError,
    extract::PathParam,
    state::AppState,
};

#[derive(Debug, Serialize)]
pub struct ToggleFavoriteResponse {
    pub message: String,
    pub favorited: bool,
}

pub fn favorites_routes() -> Router<AppState> {
    Router::new()
        .route("/favorites", get(list_favorites))
        .route("/favorites/:id", post(toggle_favorite))
}

#[instrument(skip(state))]
pub async fn list_favorites(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Vec<Recipe>>, AppError> {
    Ok(Json(repo::list_recipes_for_user(&state.db, user_id).await?))
}

/// Adds the recipe to the caller's favorites, or removes it when already there.
#[instrument(skip(state))]
pub async fn toggle_favorite(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    PathParam(recipe_id): PathParam<i64>,
) -> Result<Json<ToggleFavoriteResponse>, AppError> {
    if repo::remove(&state.db, user_id, recipe_id).await? {
        info!(user_id, recipe_id, "favorite removed");
        return Ok(Json(ToggleFavoriteResponse {
            message: "Removed from favorites".into(),
            favorited: false,
        }));
    }

    if !recipe_exists(&state.db, recipe_id).await? {
        return Err(AppError::not_found("Recipe"));
    }

    repo::add(&state.db, user_id, recipe_id).await?;
    info!(user_id, recipe_id, "favorite added");
    Ok(Json(ToggleFavoriteResponse {
        message: "Added to favorites".into(),
        favorited: true,
    }))
}
