//! Positional cell parsing for the three catalog sheets.
//!
//! Cells never fail a row: numbers that do not parse become zero. Only a row
//! with too few cells is dropped.

use crate::catalog::repo_types::{NewIngredient, NewRecipe, NewRecipeIngredient};

pub const INGREDIENTS_SHEET: &str = "ingredients";
pub const RECIPES_SHEET: &str = "recipes";
pub const RECIPE_INGREDIENT_SHEET: &str = "recipe_ingredient";

const INGREDIENT_MIN_CELLS: usize = 4;
const RECIPE_MIN_CELLS: usize = 8;
const RECIPE_INGREDIENT_MIN_CELLS: usize = 3;

const RECIPE_VIDEO_URL_CELL: usize = 8;
const RECIPE_VIEW_COUNT_CELL: usize = 9;

/// A parsed sheet row, ready to be inserted.
#[derive(Debug, Clone, PartialEq)]
pub enum CatalogRow {
    Ingredient(NewIngredient),
    Recipe(NewRecipe),
    RecipeIngredient(NewRecipeIngredient),
}

pub fn ingredient_row(cells: &[String]) -> Option<CatalogRow> {
    if cells.len() < INGREDIENT_MIN_CELLS {
        return None;
    }
    Some(CatalogRow::Ingredient(NewIngredient {
        name: cells[0].clone(),
        unit: cells[1].clone(),
        nutrient_type: cells[2].clone(),
        calories_per_unit: lenient_f64(&cells[3]),
    }))
}

pub fn recipe_row(cells: &[String]) -> Option<CatalogRow> {
    if cells.len() < RECIPE_MIN_CELLS {
        return None;
    }
    Some(CatalogRow::Recipe(NewRecipe {
        name: cells[0].clone(),
        cooking_time: lenient_i32(&cells[1]),
        difficulty: cells[2].clone(),
        total_calories: lenient_f64(&cells[3]),
        instructions: cells[4].clone(),
        image_url: cells[5].clone(),
        created_by_admin: cells[6] == "true",
        diet_type: cells[7].clone(),
        video_url: cells
            .get(RECIPE_VIDEO_URL_CELL)
            .cloned()
            .unwrap_or_default(),
        view_count: cells
            .get(RECIPE_VIEW_COUNT_CELL)
            .map(|c| lenient_i32(c))
            .unwrap_or(0),
    }))
}

pub fn recipe_ingredient_row(cells: &[String]) -> Option<CatalogRow> {
    if cells.len() < RECIPE_INGREDIENT_MIN_CELLS {
        return None;
    }
    Some(CatalogRow::RecipeIngredient(NewRecipeIngredient {
        recipe_id: lenient_i64(&cells[0]),
        ingredient_id: lenient_i64(&cells[1]),
        quantity: lenient_f64(&cells[2]),
        calories: 0.0,
    }))
}

fn lenient_f64(cell: &str) -> f64 {
    cell.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

fn lenient_i32(cell: &str) -> i32 {
    cell.trim().parse().unwrap_or(0)
}

fn lenient_i64(cell: &str) -> i64 {
    cell.trim().parse().unwrap_or(0)
}
