use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use time::OffsetDateTime;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Ingredient {
    pub id: i64,
    pub name: String,
    pub unit: String,
    pub nutrient_type: String,
    pub calories_per_unit: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Recipe {
    pub id: i64,
    pub name: String,
    pub cooking_time: i32, // minutes
    pub difficulty: String,
    pub total_calories: f64,
    pub instructions: String,
    pub image_url: String,
    pub video_url: String,
    pub created_by_admin: bool,
    pub diet_type: String,
    pub view_count: i32,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// One ingredient line of a recipe. Name and unit are absent when the link
/// points at an ingredient id that does not exist.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct RecipeIngredientLine {
    pub id: i64,
    pub ingredient_id: i64,
    pub name: Option<String>,
    pub unit: Option<String>,
    pub quantity: f64,
    pub calories: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewIngredient {
    pub name: String,
    pub unit: String,
    pub nutrient_type: String,
    pub calories_per_unit: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipe {
    pub name: String,
    pub cooking_time: i32,
    pub difficulty: String,
    pub total_calories: f64,
    pub instructions: String,
    pub image_url: String,
    pub video_url: String,
    pub created_by_admin: bool,
    pub diet_type: String,
    pub view_count: i32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewRecipeIngredient {
    pub recipe_id: i64,
    pub ingredient_id: i64,
    pub quantity: f64,
    pub calories: f64,
}
