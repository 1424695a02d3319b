//! Recipe Model
//!
//! A recipe links one menu item to the ingredients (and per-portion
//! quantities) it is made of. Lines are ordered by `sort_order`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Recipe {
    pub id: String,
    pub restaurant_id: String,
    pub menu_item_id: String,
}

/// One ingredient line of a recipe
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct RecipeIngredient {
    pub id: String,
    pub recipe_id: String,
    pub ingredient_id: String,
    /// Per-portion quantity, non-negative
    pub quantity: f64,
    pub unit: String,
    pub sort_order: i64,
}

/// Recipe with its lines joined in
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecipeFull {
    pub id: String,
    pub restaurant_id: String,
    pub menu_item_id: String,
    pub ingredients: Vec<RecipeIngredient>,
}

impl RecipeFull {
    pub fn new(recipe: Recipe, mut ingredients: Vec<RecipeIngredient>) -> Self {
        ingredients.sort_by_key(|l| l.sort_order);
        Self {
            id: recipe.id,
            restaurant_id: recipe.restaurant_id,
            menu_item_id: recipe.menu_item_id,
            ingredients,
        }
    }
}
