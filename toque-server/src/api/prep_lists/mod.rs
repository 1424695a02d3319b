//! Prep List API
//!
//! | Path | Method | Notes |
//! |------|--------|-------|
//! | /api/prep-lists?date&service | GET | fetch or generate for (date, service) |
//! | /api/prep-lists/ai-generate | POST | stage-2 quantity suggestions |
//! | /api/prep-lists/feedback | PATCH | chef actuals, single item or whole list |

mod handler;

use axum::{
    Router,
    routing::{get, patch, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/prep-lists", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::fetch_or_generate))
        .route("/ai-generate", post(handler::ai_generate))
        .route("/feedback", patch(handler::feedback))
}
