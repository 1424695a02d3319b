//! Restaurant Scope Extractor
//!
//! Authentication proper lives at the platform edge; by the time a
//! request reaches this server the tenant has been resolved and is
//! carried in the `x-restaurant-id` header. Every data-touching handler
//! takes this extractor so no query can run unscoped.

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::core::ServerState;
use crate::utils::AppError;

pub const RESTAURANT_HEADER: &str = "x-restaurant-id";

/// Tenant scope for the current request
#[derive(Debug, Clone)]
pub struct RestaurantScope(pub String);

impl RestaurantScope {
    pub fn id(&self) -> &str {
        &self.0
    }
}

impl FromRequestParts<ServerState> for RestaurantScope {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        _state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(scope) = parts.extensions.get::<RestaurantScope>() {
            return Ok(scope.clone());
        }

        let header = parts
            .headers
            .get(RESTAURANT_HEADER)
            .and_then(|h| h.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty());

        match header {
            Some(id) => {
                let scope = RestaurantScope(id.to_string());
                parts.extensions.insert(scope.clone());
                Ok(scope)
            }
            None => {
                tracing::warn!(uri = ?parts.uri, "Request without restaurant scope");
                Err(AppError::Unauthorized)
            }
        }
    }
}
