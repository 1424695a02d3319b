//! API Response types
//!
//! Standardized API response structures for the entire platform.
//! Success paths return their payload directly; failures go through
//! this envelope so every error carries a stable code.

use serde::{Deserialize, Serialize};

/// Unified error response structure
///
/// ```json
/// {
///     "code": "E0003",
///     "message": "Recipe abc not found"
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Error code
    pub code: String,
    /// Human-readable message
    pub message: String,
    /// Response data (optional)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

impl<T> ApiResponse<T> {
    /// Create an error response
    pub fn error(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            data: None,
        }
    }
}
