use axum::{
    extract::{DefaultBodyLimit, Multipart, State},
    routing::post,
    Json, Router,
};
use serde::Serialize;
use tracing::{info, instrument, warn};

use super::{
    pipeline::{import_bytes, ImportReport},
    sink::PgCatalogSink,
};
use crate::{auth::AuthUser, error::AppError, state::AppState};

const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

#[derive(Debug, Serialize)]
pub struct ImportResponse {
    pub message: String,
    pub report: ImportReport,
}

pub fn import_routes() -> Router<AppState> {
    Router::new()
        .route("/import", post(upload_workbook))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
}

/// POST /import (multipart), field `file` holds the workbook.
#[instrument(skip(state, mp))]
pub async fn upload_workbook(
    State(state): State<AppState>,
    AuthUser(user_id): AuthUser,
    mut mp: Multipart,
) -> Result<Json<ImportResponse>, AppError> {
    let mut upload = None;
    while let Some(field) = mp
        .next_field()
        .await
        .map_err(|e| AppError::Validation(e.body_text()))?
    {
        if field.name() == Some("file") {
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::Validation(e.body_text()))?;
            upload = Some(data);
            break;
        }
    }
    let Some(data) = upload else {
        warn!(user_id, "import without file field");
        return Err(AppError::Validation("file is required".into()));
    };

    info!(user_id, bytes = data.len(), "workbook upload received");
    let sink = PgCatalogSink::new(state.db.clone());
    let report = import_bytes(data, &sink).await?;

    Ok(Json(ImportResponse {
        message: "Import completed".into(),
        report,
    }))
}
