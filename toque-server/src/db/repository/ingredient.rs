//! Ingredient Repository

use super::{RepoError, RepoResult};
use shared::models::Ingredient;
use shared::util::new_id;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct IngredientRepository {
    pool: SqlitePool,
}

impl IngredientRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// All ingredients of one restaurant, ordered by name
    pub async fn find_all(&self, restaurant_id: &str) -> RepoResult<Vec<Ingredient>> {
        let rows = sqlx::query_as::<_, Ingredient>(
            "SELECT * FROM ingredients WHERE restaurant_id = ? ORDER BY name",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(
        &self,
        restaurant_id: &str,
        id: &str,
    ) -> RepoResult<Option<Ingredient>> {
        let row = sqlx::query_as::<_, Ingredient>(
            "SELECT * FROM ingredients WHERE id = ? AND restaurant_id = ?",
        )
        .bind(id)
        .bind(restaurant_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn create(
        &self,
        restaurant_id: &str,
        name: &str,
        unit_cost: f64,
        unit: &str,
    ) -> RepoResult<Ingredient> {
        let ingredient = Ingredient {
            id: new_id(),
            restaurant_id: restaurant_id.to_string(),
            name: name.to_string(),
            unit_cost,
            unit: unit.to_string(),
        };
        sqlx::query(
            "INSERT INTO ingredients (id, restaurant_id, name, unit_cost, unit) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&ingredient.id)
        .bind(&ingredient.restaurant_id)
        .bind(&ingredient.name)
        .bind(ingredient.unit_cost)
        .bind(&ingredient.unit)
        .execute(&self.pool)
        .await?;
        Ok(ingredient)
    }

    pub async fn update(
        &self,
        restaurant_id: &str,
        id: &str,
        name: &str,
        unit_cost: f64,
        unit: &str,
    ) -> RepoResult<Ingredient> {
        let result = sqlx::query(
            "UPDATE ingredients SET name = ?, unit_cost = ?, unit = ? \
             WHERE id = ? AND restaurant_id = ?",
        )
        .bind(name)
        .bind(unit_cost)
        .bind(unit)
        .bind(id)
        .bind(restaurant_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Ingredient {id} not found")));
        }

        self.find_by_id(restaurant_id, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Ingredient {id} not found")))
    }

    pub async fn delete(&self, restaurant_id: &str, id: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM ingredients WHERE id = ? AND restaurant_id = ?")
            .bind(id)
            .bind(restaurant_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
