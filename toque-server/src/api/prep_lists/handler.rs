//! Prep List API Handlers

use std::time::Duration;

use axum::{
    Json,
    extract::{Query, State},
};
use serde::{Deserialize, Serialize};
use validator::Validate;

use shared::types::ServicePeriod;

use crate::auth::RestaurantScope;
use crate::core::ServerState;
use crate::prep::{
    self, BatchFeedbackOutcome, EnrichmentResult, PrepListView, SingleFeedbackOutcome,
};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Deserialize)]
pub struct PrepListQuery {
    /// Target date, YYYY-MM-DD
    pub date: String,
    /// lunch | dinner | all_day (defaults to dinner)
    pub service: Option<String>,
}

/// GET /api/prep-lists?date=2026-02-27&service=dinner
///
/// Returns the stored list for the (date, service) pair, generating it
/// first when none exists.
pub async fn fetch_or_generate(
    State(state): State<ServerState>,
    scope: RestaurantScope,
    Query(query): Query<PrepListQuery>,
) -> AppResult<Json<PrepListView>> {
    let service_period = match query.service.as_deref() {
        None => ServicePeriod::Dinner,
        Some(raw) => raw
            .parse::<ServicePeriod>()
            .map_err(|_| AppError::validation(format!("Unknown service period: {raw}")))?,
    };

    let view =
        prep::fetch_or_generate(state.pool(), scope.id(), &query.date, service_period).await?;
    Ok(Json(view))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AiGeneratePayload {
    #[validate(length(min = 1))]
    pub prep_list_id: String,
    /// Free-text operator context (weather, events, closures...)
    #[validate(length(max = 2000))]
    pub context: Option<String>,
}

/// POST /api/prep-lists/ai-generate
///
/// Best-effort: provider problems degrade to the stored stage-1
/// quantities instead of failing the request.
pub async fn ai_generate(
    State(state): State<ServerState>,
    scope: RestaurantScope,
    Json(payload): Json<AiGeneratePayload>,
) -> AppResult<Json<EnrichmentResult>> {
    payload.validate()?;

    let timeout = Duration::from_millis(state.config.ai.timeout_ms);
    let result = prep::enrich_prep_list(
        state.pool(),
        state.generation.as_ref(),
        timeout,
        scope.id(),
        &payload.prep_list_id,
        payload.context.as_deref(),
    )
    .await?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
pub struct BatchFeedbackItem {
    pub menu_item_id: String,
    pub actual_portions: i64,
}

/// Single-item form during service, or whole-list close-out
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum FeedbackPayload {
    Single {
        item_id: String,
        actual_usage: i64,
    },
    Batch {
        prep_list_id: String,
        items: Vec<BatchFeedbackItem>,
    },
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum FeedbackResponse {
    Single(SingleFeedbackOutcome),
    Batch(BatchFeedbackOutcome),
}

/// PATCH /api/prep-lists/feedback
pub async fn feedback(
    State(state): State<ServerState>,
    scope: RestaurantScope,
    Json(payload): Json<FeedbackPayload>,
) -> AppResult<Json<FeedbackResponse>> {
    match payload {
        FeedbackPayload::Single {
            item_id,
            actual_usage,
        } => {
            let outcome =
                prep::submit_item_feedback(state.pool(), scope.id(), &item_id, actual_usage)
                    .await?;
            Ok(Json(FeedbackResponse::Single(outcome)))
        }
        FeedbackPayload::Batch {
            prep_list_id,
            items,
        } => {
            if items.is_empty() {
                return Err(AppError::validation("Feedback items must not be empty"));
            }
            let actuals: Vec<(String, i64)> = items
                .into_iter()
                .map(|i| (i.menu_item_id, i.actual_portions))
                .collect();
            let outcome =
                prep::submit_batch_feedback(state.pool(), scope.id(), &prep_list_id, &actuals)
                    .await?;
            Ok(Json(FeedbackResponse::Batch(outcome)))
        }
    }
}
