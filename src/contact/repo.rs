use anyhow::Context;
use sqlx::PgPool;

pub async fn insert(db: &PgPool, name: &str, email: &str, message: &str) -> anyhow::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO contacts (name, email, message)
        VALUES ($1, $2, $3)
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(email)
    .bind(message)
    .fetch_one(db)
    .await
    .context("insert contact message")?;
    Ok(id)
}
