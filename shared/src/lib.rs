//! Shared types for the Toque restaurant operations platform
//!
//! Common types used by the server and any future clients: domain models,
//! response structures, and small utilities.

pub mod models;
pub mod response;
pub mod types;
pub mod util;

// Re-exports
pub use serde::{Deserialize, Serialize};

pub use response::ApiResponse;
pub use types::{MarginStatus, PrepListStatus, Priority, ServicePeriod};
