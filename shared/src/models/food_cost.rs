//! Food Cost Result Types
//!
//! Derived on every request, never persisted. JSON field names are
//! camelCase to match the dashboard contract.

use crate::types::MarginStatus;
use serde::{Deserialize, Serialize};

/// Margin breakdown for one menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCostResult {
    pub menu_item_id: String,
    pub menu_item_name: String,
    pub selling_price: f64,
    /// Summed ingredient cost, rounded to 2 dp
    pub ingredient_cost: f64,
    /// Margin percentage, rounded to 1 dp
    pub margin: f64,
    /// Margin amount in currency, rounded to 2 dp
    pub margin_amount: f64,
    pub status: MarginStatus,
}

/// Menu-level aggregate
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FoodCostSummary {
    pub avg_margin: f64,
    pub total_menu_cost: f64,
    pub total_menu_revenue: f64,
    pub critical_items: usize,
    pub warning_items: usize,
    pub healthy_items: usize,
}

/// Full payload of the food-cost endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FoodCostReport {
    pub items: Vec<FoodCostResult>,
    pub summary: FoodCostSummary,
}
