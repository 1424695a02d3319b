//! Chef Feedback
//!
//! Records actual usage against predictions and recalibrates the
//! per-item confidence modifier. Two entry points: a single item
//! during service, or the whole list at close-out (which also marks
//! the list completed).

use serde::Serialize;
use sqlx::SqlitePool;

use shared::models::{ConfidenceModifier, PrepListItem};
use shared::types::PrepListStatus;
use shared::util::now_millis;

use crate::db::repository::{ConfidenceRepository, PrepListRepository};
use crate::engine::{average_accuracy, updated_modifier};
use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, Serialize)]
pub struct SingleFeedbackOutcome {
    pub menu_item_id: String,
    pub modifier: f64,
    pub feedback_count: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BatchFeedbackOutcome {
    pub updated_items: usize,
    /// Percentage, 1 dp; 100 means every prediction was exact
    pub avg_accuracy: f64,
}

/// Record actuals for one item and recalibrate its modifier
pub async fn submit_item_feedback(
    pool: &SqlitePool,
    restaurant_id: &str,
    item_id: &str,
    actual_usage: i64,
) -> AppResult<SingleFeedbackOutcome> {
    if actual_usage < 0 {
        return Err(AppError::validation("actual_usage must be non-negative"));
    }

    let prep_lists = PrepListRepository::new(pool.clone());
    let confidence = ConfidenceRepository::new(pool.clone());

    let item = prep_lists
        .find_item_by_id(item_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Prep list item {item_id}")))?;
    // Ownership check through the parent list
    let list = prep_lists
        .find_by_id(restaurant_id, &item.prep_list_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Prep list item {item_id}")))?;
    if list.status == PrepListStatus::Completed {
        return Err(AppError::conflict("Feedback already submitted for this list"));
    }

    let (modifier, feedback_count) =
        apply_feedback(&prep_lists, &confidence, restaurant_id, &item, actual_usage).await?;

    Ok(SingleFeedbackOutcome {
        menu_item_id: item.menu_item_id,
        modifier,
        feedback_count,
    })
}

/// Close-out form: actuals for the whole list, keyed by menu item.
///
/// Items without a matching entry are left untouched. Marks the list
/// completed afterwards; a second submission gets a conflict.
pub async fn submit_batch_feedback(
    pool: &SqlitePool,
    restaurant_id: &str,
    prep_list_id: &str,
    actuals: &[(String, i64)],
) -> AppResult<BatchFeedbackOutcome> {
    let prep_lists = PrepListRepository::new(pool.clone());
    let confidence = ConfidenceRepository::new(pool.clone());

    let list = prep_lists
        .find_by_id(restaurant_id, prep_list_id)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Prep list {prep_list_id}")))?;
    if list.status == PrepListStatus::Completed {
        return Err(AppError::conflict("Feedback already submitted for this list"));
    }

    // Reject the whole batch up front; no partial application
    if actuals.iter().any(|(_, actual)| *actual < 0) {
        return Err(AppError::validation("actual_portions must be non-negative"));
    }

    let items = prep_lists.find_items(prep_list_id).await?;

    let mut updated_items = 0usize;
    let mut total_abs_delta = 0i64;
    let mut total_predicted = 0i64;

    for (menu_item_id, actual) in actuals {
        let Some(item) = items.iter().find(|i| &i.menu_item_id == menu_item_id) else {
            tracing::debug!(menu_item_id, "Feedback for item absent from list skipped");
            continue;
        };

        apply_feedback(&prep_lists, &confidence, restaurant_id, item, *actual).await?;

        total_abs_delta += (actual - item.predicted_portions).abs();
        total_predicted += item.predicted_portions;
        updated_items += 1;
    }

    prep_lists.mark_completed(prep_list_id).await?;

    Ok(BatchFeedbackOutcome {
        updated_items,
        avg_accuracy: average_accuracy(total_abs_delta, total_predicted),
    })
}

/// Write actuals on the item row and fold the accuracy ratio into the
/// (restaurant, menu item) modifier. Items predicted at zero still get
/// their actuals recorded but carry no calibration signal.
async fn apply_feedback(
    prep_lists: &PrepListRepository,
    confidence: &ConfidenceRepository,
    restaurant_id: &str,
    item: &PrepListItem,
    actual: i64,
) -> AppResult<(f64, i64)> {
    let delta = actual - item.predicted_portions;
    prep_lists
        .update_item_feedback(&item.id, actual, delta)
        .await?;

    let existing = confidence.find(restaurant_id, &item.menu_item_id).await?;
    let previous = existing.as_ref().map(|m| m.modifier).unwrap_or(1.0);
    let count = existing.as_ref().map(|m| m.feedback_count).unwrap_or(0);

    match updated_modifier(previous, item.predicted_portions, actual) {
        Some(modifier) => {
            let row = ConfidenceModifier {
                restaurant_id: restaurant_id.to_string(),
                menu_item_id: item.menu_item_id.clone(),
                modifier,
                feedback_count: count + 1,
                last_feedback_at: now_millis(),
            };
            confidence.upsert(&row).await?;
            Ok((modifier, row.feedback_count))
        }
        None => Ok((previous, count)),
    }
}
