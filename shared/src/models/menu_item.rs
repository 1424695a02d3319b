//! Menu Item Model

use serde::{Deserialize, Serialize};

/// A sellable menu item
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct MenuItem {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    /// Selling price in the restaurant's currency
    pub price: f64,
    /// Unavailable items are excluded from prep prediction
    #[serde(default = "default_true")]
    pub available: bool,
}

fn default_true() -> bool {
    true
}
