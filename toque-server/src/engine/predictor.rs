//! Prep-List Predictor (stage 1)
//!
//! Deterministic arithmetic only: baseline portions from covers x item
//! share, scaled by the learned confidence modifier, then priority
//! scoring and raw-ingredient aggregation. Stage-2 AI enrichment lives
//! in the prep service; this module never fails and never does I/O.

use std::collections::HashMap;

use shared::models::{Ingredient, PosSale, RecipeFull};
use shared::types::{BcgCategory, Priority};

use super::{round_dp, round_whole};

/// Stage-1 adjustment: the baseline scaled by the learned modifier.
///
/// Never negative; valid for any baseline >= 0 and modifier > 0.
pub fn apply_modifier(baseline: f64, confidence_modifier: f64) -> i64 {
    round_whole(baseline * confidence_modifier).max(0)
}

/// Historical share of covers ordering each item, from POS sales.
///
/// Falls back to equal shares when no sales exist (so a brand-new
/// restaurant still gets a usable list). Shares are rounded to 4 dp.
pub fn item_mix(sales: &[PosSale], active_item_ids: &[String]) -> HashMap<String, f64> {
    if active_item_ids.is_empty() {
        return HashMap::new();
    }

    let mut totals: HashMap<&str, i64> = HashMap::new();
    let mut grand_total = 0i64;
    for sale in sales {
        let qty = sale.quantity_sold_weekly.max(0);
        *totals.entry(sale.menu_item_id.as_str()).or_insert(0) += qty;
        grand_total += qty;
    }

    let equal_share = 1.0 / active_item_ids.len() as f64;
    active_item_ids
        .iter()
        .map(|id| {
            let share = if grand_total > 0 {
                round_dp(*totals.get(id.as_str()).unwrap_or(&0) as f64 / grand_total as f64, 4)
            } else {
                equal_share
            };
            (id.clone(), share)
        })
        .collect()
}

/// True when the mix carries real POS signal (not the equal-share fallback)
pub fn has_pos_signal(mix: &HashMap<String, f64>) -> bool {
    mix.values().any(|share| *share > 0.0 && *share < 1.0)
}

/// Menu-engineering quadrant from the margin and popularity medians
pub fn classify_bcg(
    margin_percent: f64,
    median_margin: f64,
    item_sales: i64,
    median_sales: i64,
) -> BcgCategory {
    let high_margin = margin_percent >= median_margin;
    let popular = item_sales >= median_sales;
    match (high_margin, popular) {
        (true, true) => BcgCategory::Phare,
        (false, true) => BcgCategory::Ancre,
        (true, false) => BcgCategory::Derive,
        (false, false) => BcgCategory::Ecueil,
    }
}

fn bcg_weight(category: Option<BcgCategory>) -> f64 {
    match category {
        Some(BcgCategory::Phare) => 100.0,
        Some(BcgCategory::Ancre) => 70.0,
        Some(BcgCategory::Derive) => 50.0,
        Some(BcgCategory::Ecueil) => 20.0,
        None => 50.0,
    }
}

/// Priority from BCG weight (40%), normalized margin (30%) and
/// popularity (30%). `popularity_rank` is 0 for the most popular item,
/// 1 for the least popular.
pub fn calculate_priority(
    bcg_category: Option<BcgCategory>,
    margin_percent: f64,
    popularity_rank: f64,
) -> (Priority, i64) {
    // Margin normalized against a realistic ceiling of 90%
    let normalized_margin = (margin_percent / 90.0 * 100.0).min(100.0);
    let popularity_score = (1.0 - popularity_rank) * 100.0;

    let score = round_whole(
        bcg_weight(bcg_category) * 0.4 + normalized_margin * 0.3 + popularity_score * 0.3,
    )
    .clamp(0, 100);

    let priority = if score >= 65 {
        Priority::High
    } else if score >= 40 {
        Priority::Medium
    } else {
        Priority::Low
    };

    (priority, score)
}

/// Data-quality indicator for one predicted item (0-1). Separate from
/// the learned modifier: this says how much signal backed the number.
pub fn confidence_score(
    has_pos_data: bool,
    has_costed_recipe: bool,
    feedback_count: i64,
) -> f64 {
    let mut score: f64 = 0.30;
    if has_pos_data {
        score += 0.30;
    }
    if has_costed_recipe {
        score += 0.20;
    }
    if feedback_count >= 3 {
        score += 0.20;
    }
    round_dp(score.min(1.0), 2)
}

/// Middle element of a sorted copy; `default` when empty
pub fn median_or(values: &[f64], default: f64) -> f64 {
    if values.is_empty() {
        return default;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
    sorted[sorted.len() / 2]
}

/// A (menu item, predicted portions) pair feeding ingredient aggregation
#[derive(Debug, Clone)]
pub struct PortionPlan {
    pub menu_item_id: String,
    pub predicted_portions: i64,
}

/// Aggregated raw-ingredient requirement across the whole list
#[derive(Debug, Clone)]
pub struct AggregatedLine {
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub total_quantity: f64,
    pub unit: String,
    pub estimated_cost: f64,
}

/// Convert predicted portions into raw ingredient totals.
///
/// Quantities are rounded to 3 dp and costs to 2 dp at the boundary;
/// lines come back sorted most-expensive first.
pub fn aggregate_ingredients(
    plans: &[PortionPlan],
    recipes: &[RecipeFull],
    ingredients: &HashMap<String, Ingredient>,
) -> Vec<AggregatedLine> {
    struct Acc {
        name: String,
        quantity: f64,
        unit: String,
        cost: f64,
    }

    let recipe_by_item: HashMap<&str, &RecipeFull> = recipes
        .iter()
        .map(|r| (r.menu_item_id.as_str(), r))
        .collect();

    let mut acc: HashMap<String, Acc> = HashMap::new();
    for plan in plans {
        let Some(recipe) = recipe_by_item.get(plan.menu_item_id.as_str()) else {
            continue;
        };
        for line in &recipe.ingredients {
            let total_qty = line.quantity * plan.predicted_portions as f64;
            let ingredient = ingredients.get(&line.ingredient_id);
            let unit_cost = ingredient.map(|i| i.unit_cost).unwrap_or(0.0);

            let entry = acc.entry(line.ingredient_id.clone()).or_insert_with(|| Acc {
                name: ingredient
                    .map(|i| i.name.clone())
                    .unwrap_or_else(|| "Inconnu".to_string()),
                quantity: 0.0,
                unit: if line.unit.is_empty() {
                    ingredient.map(|i| i.unit.clone()).unwrap_or_else(|| "kg".into())
                } else {
                    line.unit.clone()
                },
                cost: 0.0,
            });
            entry.quantity += total_qty;
            entry.cost += total_qty * unit_cost;
        }
    }

    let mut lines: Vec<AggregatedLine> = acc
        .into_iter()
        .map(|(ingredient_id, a)| AggregatedLine {
            ingredient_id,
            ingredient_name: a.name,
            total_quantity: round_dp(a.quantity, 3),
            unit: a.unit,
            estimated_cost: round_dp(a.cost, 2),
        })
        .collect();
    lines.sort_by(|a, b| {
        b.estimated_cost
            .partial_cmp(&a.estimated_cost)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::models::{Recipe, RecipeIngredient};
    use shared::types::ServicePeriod;

    #[test]
    fn stage_one_is_deterministic_rounding() {
        assert_eq!(apply_modifier(40.0, 1.15), 46);
        assert_eq!(apply_modifier(30.0, 0.90), 27);
        assert_eq!(apply_modifier(0.0, 1.5), 0);
        assert_eq!(apply_modifier(10.0, 1.0), 10);
    }

    fn sale(item: &str, qty: i64) -> PosSale {
        PosSale {
            id: "s".into(),
            restaurant_id: "resto-1".into(),
            menu_item_id: item.into(),
            sale_date: "2026-02-20".into(),
            day_of_week: 5,
            service_period: ServicePeriod::Dinner,
            quantity_sold_weekly: qty,
        }
    }

    #[test]
    fn item_mix_shares_sum_to_one() {
        let ids = vec!["a".to_string(), "b".to_string()];
        let mix = item_mix(&[sale("a", 30), sale("b", 10)], &ids);
        assert_eq!(mix["a"], 0.75);
        assert_eq!(mix["b"], 0.25);
        assert!(has_pos_signal(&mix));
    }

    #[test]
    fn item_mix_falls_back_to_equal_shares() {
        let ids = vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string()];
        let mix = item_mix(&[], &ids);
        for id in &ids {
            assert_eq!(mix[id], 0.25);
        }
    }

    #[test]
    fn bcg_quadrants() {
        assert_eq!(classify_bcg(75.0, 65.0, 100, 50), BcgCategory::Phare);
        assert_eq!(classify_bcg(55.0, 65.0, 100, 50), BcgCategory::Ancre);
        assert_eq!(classify_bcg(75.0, 65.0, 10, 50), BcgCategory::Derive);
        assert_eq!(classify_bcg(55.0, 65.0, 10, 50), BcgCategory::Ecueil);
    }

    #[test]
    fn priority_banding() {
        // Phare, strong margin, most popular -> high
        let (priority, score) = calculate_priority(Some(BcgCategory::Phare), 75.0, 0.0);
        assert_eq!(priority, Priority::High);
        assert!(score >= 65);

        // Ecueil, weak margin, least popular -> low
        let (priority, score) = calculate_priority(Some(BcgCategory::Ecueil), 30.0, 1.0);
        assert_eq!(priority, Priority::Low);
        assert!(score < 40);

        // No BCG data defaults to the middle weight
        let (priority, _) = calculate_priority(None, 60.0, 0.5);
        assert_eq!(priority, Priority::Medium);
    }

    #[test]
    fn confidence_score_accumulates_and_caps() {
        assert_eq!(confidence_score(false, false, 0), 0.3);
        assert_eq!(confidence_score(true, false, 0), 0.6);
        assert_eq!(confidence_score(true, true, 3), 1.0);
        assert_eq!(confidence_score(true, true, 100), 1.0);
    }

    fn recipe_for(item: &str, lines: &[(&str, f64, &str)]) -> RecipeFull {
        RecipeFull::new(
            Recipe {
                id: format!("recipe-{item}"),
                restaurant_id: "resto-1".into(),
                menu_item_id: item.into(),
            },
            lines
                .iter()
                .enumerate()
                .map(|(i, (ing, qty, unit))| RecipeIngredient {
                    id: format!("l{i}"),
                    recipe_id: format!("recipe-{item}"),
                    ingredient_id: ing.to_string(),
                    quantity: *qty,
                    unit: unit.to_string(),
                    sort_order: i as i64,
                })
                .collect(),
        )
    }

    #[test]
    fn ingredients_aggregate_across_items_sorted_by_cost() {
        let recipes = vec![
            recipe_for("soupe", &[("onion", 0.3, "kg"), ("butter", 0.02, "kg")]),
            recipe_for("steak", &[("butter", 0.02, "kg"), ("beef", 0.25, "kg")]),
        ];
        let ingredients: HashMap<String, Ingredient> = [
            ("onion", 2.5, "kg"),
            ("butter", 12.0, "kg"),
            ("beef", 32.0, "kg"),
        ]
        .into_iter()
        .map(|(id, cost, unit)| {
            (
                id.to_string(),
                Ingredient {
                    id: id.to_string(),
                    restaurant_id: "resto-1".into(),
                    name: id.to_string(),
                    unit_cost: cost,
                    unit: unit.to_string(),
                },
            )
        })
        .collect();

        let plans = vec![
            PortionPlan {
                menu_item_id: "soupe".into(),
                predicted_portions: 10,
            },
            PortionPlan {
                menu_item_id: "steak".into(),
                predicted_portions: 20,
            },
        ];

        let lines = aggregate_ingredients(&plans, &recipes, &ingredients);
        assert_eq!(lines.len(), 3);
        // beef: 20 x 0.25 x 32 = 160, most expensive first
        assert_eq!(lines[0].ingredient_id, "beef");
        assert_eq!(lines[0].total_quantity, 5.0);
        assert_eq!(lines[0].estimated_cost, 160.0);
        // butter pooled across both recipes: 10x0.02 + 20x0.02 = 0.6 kg
        let butter = lines.iter().find(|l| l.ingredient_id == "butter").unwrap();
        assert_eq!(butter.total_quantity, 0.6);
        assert_eq!(butter.estimated_cost, 7.2);
    }

    #[test]
    fn median_of_values() {
        assert_eq!(median_or(&[], 65.0), 65.0);
        assert_eq!(median_or(&[3.0, 1.0, 2.0], 0.0), 2.0);
    }
}
