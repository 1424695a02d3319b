//! POS Sale Model

use crate::types::ServicePeriod;
use serde::{Deserialize, Serialize};

/// Weekly sales volume for one menu item, synced from the POS.
///
/// One row per (item, sale week, day of week, service period).
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct PosSale {
    pub id: String,
    pub restaurant_id: String,
    pub menu_item_id: String,
    /// ISO date of the week the figure covers
    pub sale_date: String,
    /// 0 = Sunday .. 6 = Saturday
    pub day_of_week: i64,
    pub service_period: ServicePeriod,
    pub quantity_sold_weekly: i64,
}
