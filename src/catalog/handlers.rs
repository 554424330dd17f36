use axum::{
    extract::State,
    routing::get,
    Json, Router,
};
use tracing::{debug, instrument};

use super::{
    dto::RecipeDetails,
    repo,
    repo_types::{Ingredient, Recipe},
};
use crate::{error::AppError, extract::PathParam, state::AppState};

const POPULAR_LIMIT: i64 = 5;

pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/recipes", get(list_recipes))
        .route("/recipes/:id", get(get_recipe))
        .route("/popular-recipes", get(popular_recipes))
        .route("/random-recipe", get(random_recipe))
        .route("/ingredients", get(list_ingredients))
}

#[instrument(skip(state))]
pub async fn list_recipes(State(state): State<AppState>) -> Result<Json<Vec<Recipe>>, AppError> {
    Ok(Json(repo::list_recipes(&state.db).await?))
}

#[instrument(skip(state))]
pub async fn get_recipe(
    State(state): State<AppState>,
    PathParam(id): PathParam<i64>,
) -> Result<Json<RecipeDetails>, AppError> {
    let recipe = repo::find_recipe(&state.db, id)
        .await?
        .ok_or_else(|| AppError::not_found("Recipe"))?;
    let ingredients = repo::ingredients_for_recipe(&state.db, id).await?;
    debug!(recipe_id = id, lines = ingredients.len(), "recipe loaded");
    Ok(Json(RecipeDetails {
        recipe,
        ingredients,
    }))
}

#[instrument(skip(state))]
pub async fn popular_recipes(
    State(state): State<AppState>,
) -> Result<Json<Vec<Recipe>>, AppError> {
    Ok(Json(repo::popular_recipes(&state.db, POPULAR_LIMIT).await?))
}

#[instrument(skip(state))]
pub async fn random_recipe(State(state): State<AppState>) -> Result<Json<Recipe>, AppError> {
    repo::random_recipe(&state.db)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Recipe"))
}

#[instrument(skip(state))]
pub async fn list_ingredients(
    State(state): State<AppState>,
) -> Result<Json<Vec<Ingredient>>, AppError> {
    Ok(Json(repo::list_ingredients(&state.db).await?))
}
