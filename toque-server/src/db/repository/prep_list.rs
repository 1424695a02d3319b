//! Prep List Repository
//!
//! Persists generated lists with their items and aggregated ingredient
//! lines. AI enrichment and feedback write single items; those writes
//! are independent so one failure never blocks the rest.

use super::{RepoError, RepoResult};
use shared::models::{PrepList, PrepListIngredient, PrepListItem};
use shared::types::{PrepListStatus, ServicePeriod};
use shared::util::now_millis;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct PrepListRepository {
    pool: SqlitePool,
}

impl PrepListRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(
        &self,
        restaurant_id: &str,
        id: &str,
    ) -> RepoResult<Option<PrepList>> {
        let row = sqlx::query_as::<_, PrepList>(
            "SELECT * FROM prep_lists WHERE id = ? AND restaurant_id = ?",
        )
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn find_by_date_service(
        &self,
        restaurant_id: &str,
        target_date: &str,
        service_period: ServicePeriod,
    ) -> RepoResult<Option<PrepList>> {
        let row = sqlx::query_as::<_, PrepList>(
            "SELECT * FROM prep_lists \
             WHERE restaurant_id = ? AND target_date = ? AND service_period = ?",
        )
        .bind(restaurant_id)
        .bind(target_date)
        .bind(service_period)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn find_items(&self, prep_list_id: &str) -> RepoResult<Vec<PrepListItem>> {
        let rows = sqlx::query_as::<_, PrepListItem>(
            "SELECT * FROM prep_list_items WHERE prep_list_id = ? \
             ORDER BY priority_score DESC",
        )
        .bind(prep_list_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_item_by_id(&self, item_id: &str) -> RepoResult<Option<PrepListItem>> {
        let row = sqlx::query_as::<_, PrepListItem>(
            "SELECT * FROM prep_list_items WHERE id = ?",
        )
        .bind(item_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn find_ingredients(
        &self,
        prep_list_id: &str,
    ) -> RepoResult<Vec<PrepListIngredient>> {
        let rows = sqlx::query_as::<_, PrepListIngredient>(
            "SELECT * FROM prep_list_ingredients WHERE prep_list_id = ? \
             ORDER BY estimated_cost DESC",
        )
        .bind(prep_list_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Insert a freshly generated list with its items and ingredients
    pub async fn insert_generated(
        &self,
        list: &PrepList,
        items: &[PrepListItem],
        ingredients: &[PrepListIngredient],
    ) -> RepoResult<()> {
        sqlx::query(
            "INSERT INTO prep_lists \
             (id, restaurant_id, target_date, service_period, reserved_covers, \
              estimated_covers, walk_in_ratio, safety_buffer, estimated_food_cost, \
              generation_level, status, created_at, completed_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&list.id)
        .bind(&list.restaurant_id)
        .bind(&list.target_date)
        .bind(list.service_period)
        .bind(list.reserved_covers)
        .bind(list.estimated_covers)
        .bind(list.walk_in_ratio)
        .bind(list.safety_buffer)
        .bind(list.estimated_food_cost)
        .bind(list.generation_level)
        .bind(list.status)
        .bind(list.created_at)
        .bind(list.completed_at)
        .execute(&self.pool)
        .await?;

        for item in items {
            sqlx::query(
                "INSERT INTO prep_list_items \
                 (id, prep_list_id, menu_item_id, menu_item_name, predicted_portions, \
                  item_share, priority, priority_score, confidence_score, \
                  confidence_modifier, bcg_category, estimated_cost, actual_portions, \
                  feedback_delta, ai_suggestion_quantity, ai_reasoning) \
                 VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&item.id)
            .bind(&item.prep_list_id)
            .bind(&item.menu_item_id)
            .bind(&item.menu_item_name)
            .bind(item.predicted_portions)
            .bind(item.item_share)
            .bind(item.priority)
            .bind(item.priority_score)
            .bind(item.confidence_score)
            .bind(item.confidence_modifier)
            .bind(item.bcg_category)
            .bind(item.estimated_cost)
            .bind(item.actual_portions)
            .bind(item.feedback_delta)
            .bind(item.ai_suggestion_quantity)
            .bind(&item.ai_reasoning)
            .execute(&self.pool)
            .await?;
        }

        for ing in ingredients {
            sqlx::query(
                "INSERT INTO prep_list_ingredients \
                 (id, prep_list_id, ingredient_id, ingredient_name, total_quantity, \
                  unit, estimated_cost) \
                 VALUES (?, ?, ?, ?, ?, ?, ?)",
            )
            .bind(&ing.id)
            .bind(&ing.prep_list_id)
            .bind(&ing.ingredient_id)
            .bind(&ing.ingredient_name)
            .bind(ing.total_quantity)
            .bind(&ing.unit)
            .bind(ing.estimated_cost)
            .execute(&self.pool)
            .await?;
        }

        Ok(())
    }

    /// Overwrite the two enrichment fields of one item
    pub async fn update_item_suggestion(
        &self,
        item_id: &str,
        quantity: i64,
        reasoning: Option<&str>,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE prep_list_items SET ai_suggestion_quantity = ?, ai_reasoning = ? \
             WHERE id = ?",
        )
        .bind(quantity)
        .bind(reasoning)
        .bind(item_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!(
                "Prep list item {item_id} not found"
            )));
        }
        Ok(())
    }

    /// Record chef-reported actuals on one item
    pub async fn update_item_feedback(
        &self,
        item_id: &str,
        actual_portions: i64,
        feedback_delta: i64,
    ) -> RepoResult<()> {
        let result = sqlx::query(
            "UPDATE prep_list_items SET actual_portions = ?, feedback_delta = ? \
             WHERE id = ?",
        )
        .bind(actual_portions)
        .bind(feedback_delta)
        .bind(item_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!(
                "Prep list item {item_id} not found"
            )));
        }
        Ok(())
    }

    pub async fn mark_completed(&self, prep_list_id: &str) -> RepoResult<()> {
        sqlx::query("UPDATE prep_lists SET status = ?, completed_at = ? WHERE id = ?")
            .bind(PrepListStatus::Completed)
            .bind(now_millis())
            .bind(prep_list_id)
            .execute(&self.pool)
            .await?;
        Ok(())
    }
}
