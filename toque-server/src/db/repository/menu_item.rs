//! Menu Item Repository

use super::{RepoError, RepoResult};
use shared::models::MenuItem;
use shared::util::new_id;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct MenuItemRepository {
    pool: SqlitePool,
}

impl MenuItemRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    pub async fn find_all(&self, restaurant_id: &str) -> RepoResult<Vec<MenuItem>> {
        let rows = sqlx::query_as::<_, MenuItem>(
            "SELECT * FROM menu_items WHERE restaurant_id = ? ORDER BY name",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Items currently on the menu (prep prediction only covers these)
    pub async fn find_available(&self, restaurant_id: &str) -> RepoResult<Vec<MenuItem>> {
        let rows = sqlx::query_as::<_, MenuItem>(
            "SELECT * FROM menu_items WHERE restaurant_id = ? AND available = 1 ORDER BY name",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn find_by_id(&self, restaurant_id: &str, id: &str) -> RepoResult<Option<MenuItem>> {
        let row = sqlx::query_as::<_, MenuItem>(
            "SELECT * FROM menu_items WHERE id = ? AND restaurant_id = ?",
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
        price: f64,
        available: bool,
    ) -> RepoResult<MenuItem> {
        let item = MenuItem {
            id: new_id(),
            restaurant_id: restaurant_id.to_string(),
            name: name.to_string(),
            price,
            available,
        };
        sqlx::query(
            "INSERT INTO menu_items (id, restaurant_id, name, price, available) \
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&item.id)
        .bind(&item.restaurant_id)
        .bind(&item.name)
        .bind(item.price)
        .bind(item.available)
        .execute(&self.pool)
        .await?;
        Ok(item)
    }

    pub async fn update(
        &self,
        restaurant_id: &str,
        id: &str,
        name: &str,
        price: f64,
        available: bool,
    ) -> RepoResult<MenuItem> {
        let result = sqlx::query(
            "UPDATE menu_items SET name = ?, price = ?, available = ? \
             WHERE id = ? AND restaurant_id = ?",
        )
        .bind(name)
        .bind(price)
        .bind(available)
        .bind(id)
        .bind(restaurant_id)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound(format!("Menu item {id} not found")));
        }

        self.find_by_id(restaurant_id, id)
            .await?
            .ok_or_else(|| RepoError::NotFound(format!("Menu item {id} not found")))
    }

    pub async fn delete(&self, restaurant_id: &str, id: &str) -> RepoResult<bool> {
        let result = sqlx::query("DELETE FROM menu_items WHERE id = ? AND restaurant_id = ?")
            .bind(id)
            .bind(restaurant_id)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
