use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use tracing::warn;

use super::{error::AuthError, jwt::JwtKeys};
use crate::error::AppError;

/// Authenticated caller, extracted from `Authorization: Bearer <token>`.
pub struct AuthUser(pub i64);

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    Arc<JwtKeys>: FromRef<S>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let keys = Arc::<JwtKeys>::from_ref(state);
        let reject = |e: AuthError| {
            warn!(reason = %e, "request rejected");
            AppError::from(e)
        };
        let header = match parts.headers.get(axum::http::header::AUTHORIZATION) {
            Some(value) => Some(value.to_str().map_err(|_| reject(AuthError::Malformed))?),
            None => None,
        };

        let claims = keys.verify_bearer(header).map_err(reject)?;

        Ok(AuthUser(claims.user_id))
    }
}
