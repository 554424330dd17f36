use anyhow::Context;
use sqlx::PgPool;

use crate::catalog::repo_types::Recipe;

/// Recipes the user marked as favorite, most recently added first.
pub async fn list_recipes_for_user(db: &PgPool, user_id: i64) -> anyhow::Result<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, Recipe>(
        r#"
        SELECT r.id, r.name, r.cooking_time, r.difficulty, r.total_calories, r.instructions,
               r.image_url, r.video_url, r.created_by_admin, r.diet_type, r.view_count,
               r.created_at
          FROM favorites f
          JOIN recipes r ON r.id = f.recipe_id
         WHERE f.user_id = $1
         ORDER BY f.created_at DESC, f.id DESC
        "#,
    )
    .bind(user_id)
    .fetch_all(db)
    .await
    .context("list favorites")?;
    Ok(rows)
}

/// Removes the favorite if present. Returns whether a row was deleted.
pub async fn remove(db: &PgPool, user_id: i64, recipe_id: i64) -> anyhow::Result<bool> {
    let result = sqlx::query("DELETE FROM favorites WHERE user_id = $1 AND recipe_id = $2")
        .bind(user_id)
        .bind(recipe_id)
        .execute(db)
        .await
        .context("delete favorite")?;
    Ok(result.rows_affected() > 0)
}

pub async fn add(db: &PgPool, user_id: i64, recipe_id: i64) -> anyhow::Result<()> {
    sqlx::query(
        r#"
        INSERT INTO favorites (user_id, recipe_id)
        VALUES ($1, $2)
        ON CONFLICT (user_id, recipe_id) DO NOTHING
        "#,
    )
    .bind(user_id)
    .bind(recipe_id)
    .execute(db)
    .await
    .context("insert favorite")?;
    Ok(())
}
