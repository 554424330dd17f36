use crate::auth::jwt::JwtKeys;
use crate::config::AppConfig;
use anyhow::Context;
use axum::extract::FromRef;
use sqlx::PgPool;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub config: Arc<AppConfig>,
    pub jwt: Arc<JwtKeys>,
}

impl AppState {
    pub async fn init(config: AppConfig) -> anyhow::Result<Self> {
        let db = sqlx::postgres::PgPoolOptions::new()
            .max_connections(config.db_max_connections)
            .connect(&config.database_url)
            .await
            .context("connect to database")?;

        Ok(Self::from_parts(db, Arc::new(config)))
    }

    pub fn from_parts(db: PgPool, config: Arc<AppConfig>) -> Self {
        let jwt = Arc::new(JwtKeys::new(&config.jwt));
        tracing::debug!(ttl_secs = jwt.ttl().as_secs(), "jwt keys ready");
        Self { db, config, jwt }
    }

    /// State backed by a pool that never connects. Only for routes that fail
    /// before reaching the database.
    #[cfg(test)]
    pub fn fake() -> Self {
        let config = AppConfig::for_tests();
        let db = sqlx::postgres::PgPoolOptions::new()
            .connect_lazy(&config.database_url)
            .expect("lazy pool ok");

        Self::from_parts(db, Arc::new(config))
    }
}

impl FromRef<AppState> for Arc<JwtKeys> {
    fn from_ref(state: &AppState) -> Self {
        state.jwt.clone()
    }
}
