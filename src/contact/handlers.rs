use axum::{extract::State, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use super::repo;
use crate::{error::AppError, extract::JsonBody, state::AppState};

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ContactResponse {
    pub message: String,
}

pub fn contact_routes() -> Router<AppState> {
    Router::new().route("/contact", post(submit_contact))
}

#[instrument(skip(state, payload))]
pub async fn submit_contact(
    State(state): State<AppState>,
    JsonBody(payload): JsonBody<ContactRequest>,
) -> Result<Json<ContactResponse>, AppError> {
    if payload.message.trim().is_empty() {
        return Err(AppError::Validation("Message is required".into()));
    }

    let id = repo::insert(
        &state.db,
        payload.name.trim(),
        payload.email.trim(),
        &payload.message,
    )
    .await?;
    info!(contact_id = id, "contact message stored");

    Ok(Json(ContactResponse {
        message: "Message sent".into(),
    }))
}
