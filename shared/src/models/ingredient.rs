//! Ingredient Model

use serde::{Deserialize, Serialize};

/// Priced reference data, edited by restaurant staff.
///
/// `unit_cost` is the cost per `unit` (e.g. per kg, per L, per unité).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Ingredient {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub unit_cost: f64,
    /// kg, L, unité, botte...
    pub unit: String,
}
