mod app;
mod auth;
mod catalog;
mod config;
mod contact;
mod error;
mod extract;
mod favorites;
mod import;
mod profile;
mod state;

use crate::config::AppConfig;
use crate::import::{import_path, PgCatalogSink};
use crate::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let env_filter = std::env::var("RUST_LOG")
        .unwrap_or_else(|_| "recipe_catalog=debug,axum=info,tower_http=info".to_string());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v == "json")
        .unwrap_or(false);

    if json_logs {
        tracing_subscriber::fmt()
            .with_env_filter(env_filter)
            .with_target(false)
            .json()
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(env_filter).init();
    }

    let config = AppConfig::from_env()?;
    config.warn_on_gaps();
    let addr = config.bind_addr()?;

    let app_state = AppState::init(config).await?;

    if let Err(e) = sqlx::migrate!("./migrations").run(&app_state.db).await {
        tracing::warn!(error = %e, "migration failed; continuing");
    }

    if let Some(path) = app_state.config.import_workbook_path.clone() {
        let sink = PgCatalogSink::new(app_state.db.clone());
        match import_path(&path, &sink).await {
            Ok(report) => tracing::info!(path = %path, rows = report.inserted(), "startup import finished"),
            Err(e) => tracing::warn!(path = %path, error = %e, "startup import failed"),
        }
    }

    let app = app::build_app(app_state);
    app::serve(app, addr).await
}
