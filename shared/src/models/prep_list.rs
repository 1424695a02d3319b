//! Prep List Models
//!
//! A prep list is a generated production plan for one (date, service)
//! pair: predicted portion counts per menu item plus the aggregated raw
//! ingredients they require. The per-(restaurant, item) confidence
//! modifier is the only state that carries memory across generations.

use crate::types::{BcgCategory, PrepListStatus, Priority, ServicePeriod};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PrepList {
    pub id: String,
    pub restaurant_id: String,
    /// ISO date: 2026-02-27
    pub target_date: String,
    pub service_period: ServicePeriod,
    pub reserved_covers: i64,
    pub estimated_covers: i64,
    pub walk_in_ratio: f64,
    pub safety_buffer: f64,
    pub estimated_food_cost: f64,
    /// 1 = reservations only, 2 = + POS mix, 3 = + costed recipes
    pub generation_level: i64,
    pub status: PrepListStatus,
    pub created_at: i64,
    pub completed_at: Option<i64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PrepListItem {
    pub id: String,
    pub prep_list_id: String,
    pub menu_item_id: String,
    pub menu_item_name: String,
    /// Stage-1 prediction: covers x item share x confidence modifier
    pub predicted_portions: i64,
    /// Historical share of covers ordering this item (0-1)
    pub item_share: f64,
    pub priority: Priority,
    pub priority_score: i64,
    /// Data-quality indicator (0-1), not the learned modifier
    pub confidence_score: f64,
    /// Learned multiplier applied to the baseline, snapshot at generation
    pub confidence_modifier: f64,
    pub bcg_category: Option<BcgCategory>,
    pub estimated_cost: f64,
    // Chef feedback, filled after service
    pub actual_portions: Option<i64>,
    pub feedback_delta: Option<i64>,
    // Stage-2 enrichment, filled by the generation provider
    pub ai_suggestion_quantity: Option<i64>,
    pub ai_reasoning: Option<String>,
}

/// Aggregated raw-ingredient line for the shopping/prep view
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PrepListIngredient {
    pub id: String,
    pub prep_list_id: String,
    pub ingredient_id: String,
    pub ingredient_name: String,
    pub total_quantity: f64,
    pub unit: String,
    pub estimated_cost: f64,
}

/// Learned accuracy multiplier for one (restaurant, menu item) pair.
///
/// Mutated only by the feedback calibration rule; always inside the
/// clamp band enforced there.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ConfidenceModifier {
    pub restaurant_id: String,
    pub menu_item_id: String,
    pub modifier: f64,
    pub feedback_count: i64,
    /// Unix millis
    pub last_feedback_at: i64,
}
