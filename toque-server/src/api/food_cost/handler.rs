//! Food Cost Report Handler
//!
//! Derived on every request from the current catalog; nothing here is
//! persisted. Menu items without a recipe are excluded from the report
//! rather than shown at a phantom 100% margin.

use std::collections::HashMap;

use axum::{Json, extract::State};

use shared::models::FoodCostReport;

use crate::auth::RestaurantScope;
use crate::core::ServerState;
use crate::db::repository::{IngredientRepository, MenuItemRepository, RecipeRepository};
use crate::engine::{calculate_item_food_cost, summarize};
use crate::utils::AppResult;

/// GET /api/food-cost
pub async fn report(
    State(state): State<ServerState>,
    scope: RestaurantScope,
) -> AppResult<Json<FoodCostReport>> {
    let pool = state.pool().clone();
    let menu_items = MenuItemRepository::new(pool.clone())
        .find_all(scope.id())
        .await?;
    let recipes = RecipeRepository::new(pool.clone())
        .find_all_full(scope.id())
        .await?;
    let unit_costs: HashMap<String, f64> = IngredientRepository::new(pool)
        .find_all(scope.id())
        .await?
        .into_iter()
        .map(|i| (i.id, i.unit_cost))
        .collect();

    let mut items = Vec::new();
    for recipe in &recipes {
        let Some(menu_item) = menu_items.iter().find(|m| m.id == recipe.menu_item_id) else {
            continue;
        };
        items.push(calculate_item_food_cost(
            recipe,
            menu_item.price,
            &menu_item.name,
            &unit_costs,
        ));
    }

    let summary = summarize(&items);
    Ok(Json(FoodCostReport { items, summary }))
}
