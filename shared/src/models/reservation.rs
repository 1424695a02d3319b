//! Reservation Model

use serde::{Deserialize, Serialize};

/// A booking aggregated from external reservation providers.
///
/// `reservation_time` is an ISO local datetime string
/// (`2026-02-27T19:30:00`); `status` is provider vocabulary, only
/// `cancelled` is interpreted by the engine.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: String,
    pub restaurant_id: String,
    pub reservation_time: String,
    pub guest_count: i64,
    pub status: String,
    pub customer_name: Option<String>,
    pub customer_notes: Option<String>,
}

impl Reservation {
    pub fn is_cancelled(&self) -> bool {
        self.status == "cancelled"
    }

    /// Hour of day (0-23), None when the timestamp does not parse
    pub fn hour(&self) -> Option<u32> {
        use chrono::Timelike;
        chrono::NaiveDateTime::parse_from_str(&self.reservation_time, "%Y-%m-%dT%H:%M:%S")
            .ok()
            .map(|dt| dt.hour())
    }
}
