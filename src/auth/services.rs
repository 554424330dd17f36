use lazy_static::lazy_static;
use regex::Regex;
use sqlx::PgPool;
use tracing::{info, warn};

use crate::auth::{
    dto::{LoginRequest, RegisterRequest},
    jwt::JwtKeys,
    password::{hash_password, verify_password},
    repo_types::User,
};
use crate::error::AppError;

pub const MIN_PASSWORD_LEN: usize = 6;

pub(crate) fn is_valid_email(email: &str) -> bool {
    lazy_static! {
        static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    }
    EMAIL_RE.is_match(email)
}

pub(crate) fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Checks a registration payload in place, normalizing its email and username.
pub(crate) fn validate_registration(payload: &mut RegisterRequest) -> Result<(), AppError> {
    payload.email = normalize_email(&payload.email);
    payload.username = payload.username.trim().to_string();

    if payload.username.is_empty() {
        return Err(AppError::Validation("Username is required".into()));
    }
    if !is_valid_email(&payload.email) {
        return Err(AppError::Validation("Invalid email".into()));
    }
    if payload.password.chars().count() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation("Password too short".into()));
    }
    Ok(())
}

pub async fn register_user(
    db: &PgPool,
    keys: &JwtKeys,
    mut payload: RegisterRequest,
) -> Result<(User, String), AppError> {
    if let Err(e) = validate_registration(&mut payload) {
        warn!(email = %payload.email, reason = %e, "registration rejected");
        return Err(e);
    }

    if User::find_by_email(db, &payload.email).await?.is_some() {
        warn!(email = %payload.email, "email already registered");
        return Err(AppError::Conflict("Email already registered".into()));
    }

    let hash = hash_password(&payload.password)?;
    let user = User::create(db, &payload.username, &payload.email, &hash).await?;
    let token = keys.issue(user.id)?;

    info!(user_id = user.id, email = %user.email, "user registered");
    Ok((user, token))
}

pub async fn login_user(
    db: &PgPool,
    keys: &JwtKeys,
    payload: LoginRequest,
) -> Result<(User, String), AppError> {
    let email = normalize_email(&payload.email);
    if !is_valid_email(&email) {
        warn!(email = %email, "invalid email");
        return Err(AppError::Validation("Invalid email".into()));
    }

    let Some(user) = User::find_by_email(db, &email).await? else {
        warn!(email = %email, "login unknown email");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    };

    if !verify_password(&payload.password, &user.password_hash)? {
        warn!(email = %email, user_id = user.id, "login invalid password");
        return Err(AppError::Unauthorized("Invalid credentials".into()));
    }

    let token = keys.issue(user.id)?;
    info!(user_id = user.id, email = %user.email, "user logged in");
    Ok((user, token))
}
