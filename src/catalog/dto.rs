use serde::Serialize;

use crate::catalog::repo_types::{Recipe, RecipeIngredientLine};

/// A recipe together with its ingredient lines.
#[derive(Debug, Serialize)]
pub struct RecipeDetails {
    #[serde(flatten)]
    pub recipe: Recipe,
    pub ingredients: Vec<RecipeIngredientLine>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn details_flatten_recipe_fields() {
        let details = RecipeDetails {
            recipe: Recipe {
                id: 3,
                name: "Soup".into(),
                cooking_time: 30,
                difficulty: "easy".into(),
                total_calories: 120.0,
                instructions: "Boil.".into(),
                image_url: "img.png".into(),
                video_url: String::new(),
                created_by_admin: true,
                diet_type: "balanced".into(),
                view_count: 0,
                created_at: datetime!(2024-06-01 12:00 UTC),
            },
            ingredients: vec![RecipeIngredientLine {
                id: 1,
                ingredient_id: 99,
                name: None,
                unit: None,
                quantity: 2.0,
                calories: 0.0,
            }],
        };

        let json = serde_json::to_value(&details).unwrap();
        assert_eq!(json["name"], "Soup");
        assert_eq!(json["cooking_time"], 30);
        assert_eq!(json["created_at"], "2024-06-01T12:00:00Z");
        assert_eq!(json["ingredients"][0]["ingredient_id"], 99);
        assert!(json["ingredients"][0]["name"].is_null());
    }
}
