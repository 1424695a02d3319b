/// Current UTC timestamp in milliseconds
pub fn now_millis() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// Generate a fresh string id for a new row.
///
/// UUID v4, stored as TEXT. Used by every repository so id generation
/// stays in one place.
pub fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}
