//! Confidence Modifier Repository
//!
//! One row per (restaurant, menu item). Upserts are last-write-wins;
//! the modifier is advisory and self-corrects over feedback cycles, so
//! no optimistic locking is used.

use super::RepoResult;
use shared::models::ConfidenceModifier;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ConfidenceRepository {
    pool: SqlitePool,
}

impl ConfidenceRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, restaurant_id: &str) -> RepoResult<Vec<ConfidenceModifier>> {
        let rows = sqlx::query_as::<_, ConfidenceModifier>(
            "SELECT * FROM prep_confidence_modifiers WHERE restaurant_id = ?",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find(
        &self,
        restaurant_id: &str,
        menu_item_id: &str,
    ) -> RepoResult<Option<ConfidenceModifier>> {
        let row = sqlx::query_as::<_, ConfidenceModifier>(
            "SELECT * FROM prep_confidence_modifiers \
             WHERE restaurant_id = ? AND menu_item_id = ?",
        )
        .bind(restaurant_id)
        .bind(menu_item_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn upsert(&self, modifier: &ConfidenceModifier) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO prep_confidence_modifiers \
             (restaurant_id, menu_item_id, modifier, feedback_count, last_feedback_at) \
             VALUES (?, ?, ?, ?, ?) \
             ON CONFLICT(restaurant_id, menu_item_id) DO UPDATE SET \
               modifier = excluded.modifier, \
               feedback_count = excluded.feedback_count, \
               last_feedback_at = excluded.last_feedback_at",
        )
        .bind(&modifier.restaurant_id)
        .bind(&modifier.menu_item_id)
        .bind(modifier.modifier)
        .bind(modifier.feedback_count)
        .bind(modifier.last_feedback_at)
        .execute(&self.pool)
        .await?;
        Ok(())
    }
}
