//! Restaurant Model

use serde::{Deserialize, Serialize};

/// A tenant. Every other row is scoped to one restaurant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    /// Unix millis
    pub created_at: i64,
}
