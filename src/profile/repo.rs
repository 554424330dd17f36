use anyhow::Context;
use serde::Serialize;
use sqlx::{FromRow, PgPool};
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, FromRow)]
pub struct Profile {
    pub id: i64,
    pub user_id: i64,
    pub bmr: f64,
    pub tdee: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

pub async fn find_by_user(db: &PgPool, user_id: i64) -> anyhow::Result<Option<Profile>> {
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        SELECT id, user_id, bmr, tdee, updated_at
        FROM profiles
        WHERE user_id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(db)
    .await
    .context("find profile")?;
    Ok(profile)
}

/// Creates the user's profile or overwrites its BMR/TDEE values.
pub async fn upsert(db: &PgPool, user_id: i64, bmr: f64, tdee: f64) -> anyhow::Result<Profile> {
    let profile = sqlx::query_as::<_, Profile>(
        r#"
        INSERT INTO profiles (user_id, bmr, tdee)
        VALUES ($1, $2, $3)
        ON CONFLICT (user_id)
        DO UPDATE SET bmr = EXCLUDED.bmr, tdee = EXCLUDED.tdee, updated_at = now()
        RETURNING id, user_id, bmr, tdee, updated_at
        "#,
    )
    .bind(user_id)
    .bind(bmr)
    .bind(tdee)
    .fetch_one(db)
    .await
    .context("upsert profile")?;
    Ok(profile)
}
