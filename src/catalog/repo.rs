use anyhow::Context;
use sqlx::PgPool;

use crate::catalog::repo_types::{
    Ingredient, NewIngredient, NewRecipe, NewRecipeIngredient, Recipe, RecipeIngredientLine,
};

const RECIPE_COLUMNS: &str = "id, name, cooking_time, difficulty, total_calories, instructions, \
     image_url, video_url, created_by_admin, diet_type, view_count, created_at";

pub async fn list_ingredients(db: &PgPool) -> anyhow::Result<Vec<Ingredient>> {
    let rows = sqlx::query_as::<_, Ingredient>(
        r#"
        SELECT id, name, unit, nutrient_type, calories_per_unit
        FROM ingredients
        ORDER BY id
        "#,
    )
    .fetch_all(db)
    .await
    .context("list ingredients")?;
    Ok(rows)
}

pub async fn list_recipes(db: &PgPool) -> anyhow::Result<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY id"
    ))
    .fetch_all(db)
    .await
    .context("list recipes")?;
    Ok(rows)
}

pub async fn find_recipe(db: &PgPool, id: i64) -> anyhow::Result<Option<Recipe>> {
    let row = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipes WHERE id = $1"
    ))
    .bind(id)
    .fetch_optional(db)
    .await
    .context("find recipe")?;
    Ok(row)
}

pub async fn recipe_exists(db: &PgPool, id: i64) -> anyhow::Result<bool> {
    let (exists,): (bool,) = sqlx::query_as("SELECT EXISTS (SELECT 1 FROM recipes WHERE id = $1)")
        .bind(id)
        .fetch_one(db)
        .await
        .context("check recipe exists")?;
    Ok(exists)
}

pub async fn ingredients_for_recipe(
    db: &PgPool,
    recipe_id: i64,
) -> anyhow::Result<Vec<RecipeIngredientLine>> {
    let rows = sqlx::query_as::<_, RecipeIngredientLine>(
        r#"
        SELECT ri.id, ri.ingredient_id, i.name, i.unit, ri.quantity, ri.calories
          FROM recipe_ingredients ri
          LEFT JOIN ingredients i ON i.id = ri.ingredient_id
         WHERE ri.recipe_id = $1
         ORDER BY ri.id
        "#,
    )
    .bind(recipe_id)
    .fetch_all(db)
    .await
    .context("list recipe ingredients")?;
    Ok(rows)
}

pub async fn popular_recipes(db: &PgPool, limit: i64) -> anyhow::Result<Vec<Recipe>> {
    let rows = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY view_count DESC, id LIMIT $1"
    ))
    .bind(limit)
    .fetch_all(db)
    .await
    .context("list popular recipes")?;
    Ok(rows)
}

pub async fn random_recipe(db: &PgPool) -> anyhow::Result<Option<Recipe>> {
    let row = sqlx::query_as::<_, Recipe>(&format!(
        "SELECT {RECIPE_COLUMNS} FROM recipes ORDER BY RANDOM() LIMIT 1"
    ))
    .fetch_optional(db)
    .await
    .context("pick random recipe")?;
    Ok(row)
}

pub async fn insert_ingredient(db: &PgPool, row: &NewIngredient) -> anyhow::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO ingredients (name, unit, nutrient_type, calories_per_unit)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(&row.name)
    .bind(&row.unit)
    .bind(&row.nutrient_type)
    .bind(row.calories_per_unit)
    .fetch_one(db)
    .await
    .context("insert ingredient")?;
    Ok(id)
}

pub async fn insert_recipe(db: &PgPool, row: &NewRecipe) -> anyhow::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO recipes (name, cooking_time, difficulty, total_calories, instructions,
                             image_url, video_url, created_by_admin, diet_type, view_count)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
        RETURNING id
        "#,
    )
    .bind(&row.name)
    .bind(row.cooking_time)
    .bind(&row.difficulty)
    .bind(row.total_calories)
    .bind(&row.instructions)
    .bind(&row.image_url)
    .bind(&row.video_url)
    .bind(row.created_by_admin)
    .bind(&row.diet_type)
    .bind(row.view_count)
    .fetch_one(db)
    .await
    .context("insert recipe")?;
    Ok(id)
}

/// Inserts a link row as given; the referenced ids are not checked.
pub async fn insert_recipe_ingredient(
    db: &PgPool,
    row: &NewRecipeIngredient,
) -> anyhow::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO recipe_ingredients (recipe_id, ingredient_id, quantity, calories)
        VALUES ($1, $2, $3, $4)
        RETURNING id
        "#,
    )
    .bind(row.recipe_id)
    .bind(row.ingredient_id)
    .bind(row.quantity)
    .bind(row.calories)
    .fetch_one(db)
    .await
    .context("insert recipe ingredient")?;
    Ok(id)
}
