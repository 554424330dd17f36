use axum::{extract::State, routing::get, Json, Router};
use serde::Deserialize;
use tracing::{info, instrument};

use super::repo::{self, Profile};
use crate::{auth::AuthUser, error::AppError, extract::JsonBody, state::AppState};

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    pub bmr: f64,
    pub tdee: f64,
}

impl UpdateProfileRequest {
    fn validate(&self) -> Result<(), AppError> {
        if !self.bmr.is_finite() || !self.tdee.is_finite() || self.bmr < 0.0 || self.tdee < 0.0 {
            return Err(AppError::Validation(
                "bmr and tdee must be non-negative numbers".into(),
            ));
        }
        Ok(())
    }
}

pub fn profile_routes() -> Router<AppState> {
    Router::new().route("/profile", get(get_profile).put(update_profile))
}

#[instrument(skip(state))]
pub async fn get_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
) -> Result<Json<Profile>, AppError> {
    repo::find_by_user(&state.db, user_id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Profile"))
}

#[instrument(skip(state, payload))]
pub async fn update_profile(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    JsonBody(payload): JsonBody<UpdateProfileRequest>,
) -> Result<Json<Profile>, AppError> {
    payload.validate()?;
    let profile = repo::upsert(&state.db, user_id, payload.bmr, payload.tdee).await?;
    info!(user_id, bmr = profile.bmr, tdee = profile.tdee, "profile saved");
    Ok(Json(profile))
}
