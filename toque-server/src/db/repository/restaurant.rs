//! Restaurant Repository

use super::RepoResult;
use shared::models::Restaurant;
use shared::util::{new_id, now_millis};
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct RestaurantRepository {
    pool: SqlitePool,
}

impl RestaurantRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_by_id(&self, id: &str) -> RepoResult<Option<Restaurant>> {
        let row = sqlx::query_as::<_, Restaurant>("SELECT * FROM restaurants WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    pub async fn create(&self, name: &str) -> RepoResult<Restaurant> {
        let restaurant = Restaurant {
            id: new_id(),
            name: name.to_string(),
            created_at: now_millis(),
        };
        sqlx::query("INSERT INTO restaurants (id, name, created_at) VALUES (?, ?, ?)")
            .bind(&restaurant.id)
            .bind(&restaurant.name)
            .bind(restaurant.created_at)
            .execute(&self.pool)
            .await?;
        Ok(restaurant)
    }
}
