//! Health Check Routes
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/health | GET | liveness + database ping, no auth |

use axum::{Json, Router, extract::State, routing::get};
use serde::Serialize;

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().route("/api/health", get(health))
}

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    database: &'static str,
    /// True when stage-2 enrichment is available
    ai_enabled: bool,
}

pub async fn health(State(state): State<ServerState>) -> Json<HealthResponse> {
    let database = match sqlx::query("SELECT 1").execute(state.pool()).await {
        Ok(_) => "ok",
        Err(e) => {
            tracing::error!(error = %e, "Health check database ping failed");
            "error"
        }
    };

    Json(HealthResponse {
        status: if database == "ok" { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        database,
        ai_enabled: state.generation.is_some(),
    })
}
