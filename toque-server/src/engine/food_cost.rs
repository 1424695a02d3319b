//! Food Cost Calculator
//!
//! Turns a recipe's ingredient lines and unit costs into a margin and
//! health classification per menu item. Pure; bad input yields a
//! valid-but-zeroed result instead of an error.

use std::collections::HashMap;

use shared::models::{FoodCostResult, FoodCostSummary, RecipeFull};
use shared::types::MarginStatus;

use super::round_dp;

/// Margin below this is critical
const MARGIN_CRITICAL_BELOW: f64 = 60.0;
/// Margin below this (but not critical) is a warning
const MARGIN_WARNING_BELOW: f64 = 70.0;

/// Classify a margin percentage against the fixed thresholds
pub fn margin_status(margin: f64) -> MarginStatus {
    if margin < MARGIN_CRITICAL_BELOW {
        MarginStatus::Critical
    } else if margin < MARGIN_WARNING_BELOW {
        MarginStatus::Warning
    } else {
        MarginStatus::Healthy
    }
}

/// Calculate the food cost of one recipe.
///
/// `unit_costs` maps ingredient id to unit cost. Ingredients missing
/// from the map contribute zero — fail-open, so one bad reference never
/// aborts the whole menu. Callers surface missing-ingredient warnings
/// separately.
pub fn calculate_item_food_cost(
    recipe: &RecipeFull,
    selling_price: f64,
    menu_item_name: &str,
    unit_costs: &HashMap<String, f64>,
) -> FoodCostResult {
    let mut total_cost = 0.0;
    for line in &recipe.ingredients {
        if let Some(unit_cost) = unit_costs.get(&line.ingredient_id) {
            total_cost += unit_cost * line.quantity;
        }
    }

    let margin_amount = selling_price - total_cost;
    let margin = if selling_price > 0.0 {
        margin_amount / selling_price * 100.0
    } else {
        0.0
    };

    FoodCostResult {
        menu_item_id: recipe.menu_item_id.clone(),
        menu_item_name: menu_item_name.to_string(),
        selling_price,
        ingredient_cost: round_dp(total_cost, 2),
        margin: round_dp(margin, 1),
        margin_amount: round_dp(margin_amount, 2),
        // Classified before rounding; 59.96 reports as 60.0 but is critical
        status: margin_status(margin),
    }
}

/// Menu-level aggregate over per-item results.
///
/// The average margin is revenue-weighted, computed from the unrounded
/// totals, and rounded once at the boundary.
pub fn summarize(results: &[FoodCostResult]) -> FoodCostSummary {
    let total_cost: f64 = results.iter().map(|r| r.ingredient_cost).sum();
    let total_revenue: f64 = results.iter().map(|r| r.selling_price).sum();
    let avg_margin = if total_revenue > 0.0 {
        (total_revenue - total_cost) / total_revenue * 100.0
    } else {
        0.0
    };

    let critical_items = results
        .iter()
        .filter(|r| r.status == MarginStatus::Critical)
        .count();
    let warning_items = results
        .iter()
        .filter(|r| r.status == MarginStatus::Warning)
        .count();

    FoodCostSummary {
        avg_margin: round_dp(avg_margin, 1),
        total_menu_cost: round_dp(total_cost, 2),
        total_menu_revenue: round_dp(total_revenue, 2),
        critical_items,
        warning_items,
        healthy_items: results.len() - critical_items - warning_items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Recipe, RecipeIngredient};

    fn make_recipe(lines: &[(&str, f64)]) -> RecipeFull {
        let ingredients = lines
            .iter()
            .enumerate()
            .map(|(i, (ingredient_id, quantity))| RecipeIngredient {
                id: format!("line-{i}"),
                recipe_id: "recipe-1".into(),
                ingredient_id: ingredient_id.to_string(),
                quantity: *quantity,
                unit: "kg".into(),
                sort_order: i as i64,
            })
            .collect();
        RecipeFull {
            id: "recipe-1".into(),
            restaurant_id: "resto-1".into(),
            menu_item_id: "item-1".into(),
            ingredients,
        }
    }

    fn costs(pairs: &[(&str, f64)]) -> HashMap<String, f64> {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn healthy_item_end_to_end() {
        // recipe costs 4.50, sells for 18.00 -> 75.0% healthy, 13.50 margin
        let recipe = make_recipe(&[("onion", 1.0), ("stock", 0.5)]);
        let unit_costs = costs(&[("onion", 2.5), ("stock", 4.0)]);

        let result = calculate_item_food_cost(&recipe, 18.0, "Soupe à l'oignon", &unit_costs);
        assert_eq!(result.ingredient_cost, 4.5);
        assert_eq!(result.margin, 75.0);
        assert_eq!(result.margin_amount, 13.5);
        assert_eq!(result.status, MarginStatus::Healthy);
    }

    #[test]
    fn status_boundaries() {
        assert_eq!(margin_status(59.9), MarginStatus::Critical);
        assert_eq!(margin_status(60.0), MarginStatus::Warning);
        assert_eq!(margin_status(69.9), MarginStatus::Warning);
        assert_eq!(margin_status(70.0), MarginStatus::Healthy);
    }

    #[test]
    fn status_uses_unrounded_margin() {
        // cost 10.01 on 25.00 -> margin 59.96%, displayed as 60.0 but
        // still below the critical threshold
        let recipe = make_recipe(&[("duck", 1.0)]);
        let unit_costs = costs(&[("duck", 10.01)]);

        let result = calculate_item_food_cost(&recipe, 25.0, "Magret", &unit_costs);
        assert_eq!(result.margin, 60.0);
        assert_eq!(result.status, MarginStatus::Critical);
    }

    #[test]
    fn missing_ingredients_contribute_zero() {
        let recipe = make_recipe(&[("truffle", 0.01), ("butter", 0.05)]);
        let full = costs(&[("truffle", 120.0), ("butter", 12.0)]);
        let partial = costs(&[("butter", 12.0)]);

        let with_full = calculate_item_food_cost(&recipe, 20.0, "Risotto", &full);
        let with_partial = calculate_item_food_cost(&recipe, 20.0, "Risotto", &partial);

        assert!(with_partial.ingredient_cost <= with_full.ingredient_cost);
        assert_eq!(with_partial.ingredient_cost, 0.6);
    }

    #[test]
    fn zero_selling_price_yields_zero_margin() {
        let recipe = make_recipe(&[("onion", 1.0)]);
        let unit_costs = costs(&[("onion", 2.5)]);

        let result = calculate_item_food_cost(&recipe, 0.0, "Amuse-bouche", &unit_costs);
        assert_eq!(result.margin, 0.0);
        assert_eq!(result.margin_amount, -2.5);
    }

    #[test]
    fn calculator_is_idempotent() {
        let recipe = make_recipe(&[("salmon", 0.15), ("avocado", 0.5)]);
        let unit_costs = costs(&[("salmon", 38.0), ("avocado", 3.5)]);

        let first = calculate_item_food_cost(&recipe, 24.0, "Tartare", &unit_costs);
        let second = calculate_item_food_cost(&recipe, 24.0, "Tartare", &unit_costs);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn summary_counts_and_totals() {
        let recipes = [
            (make_recipe(&[("a", 1.0)]), 10.0), // cost 5.0 -> 50% critical
            (make_recipe(&[("a", 0.5)]), 10.0), // cost 2.5 -> 75% healthy
        ];
        let unit_costs = costs(&[("a", 5.0)]);

        let results: Vec<_> = recipes
            .iter()
            .map(|(r, price)| calculate_item_food_cost(r, *price, "x", &unit_costs))
            .collect();
        let summary = summarize(&results);

        assert_eq!(summary.total_menu_cost, 7.5);
        assert_eq!(summary.total_menu_revenue, 20.0);
        assert_eq!(summary.avg_margin, 62.5);
        assert_eq!(summary.critical_items, 1);
        assert_eq!(summary.warning_items, 0);
        assert_eq!(summary.healthy_items, 1);
    }
}
