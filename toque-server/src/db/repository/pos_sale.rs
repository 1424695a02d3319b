//! POS Sale Repository

use super::RepoResult;
use shared::models::PosSale;
use shared::types::ServicePeriod;
use shared::util::new_id;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct PosSaleRepository {
    pool: SqlitePool,
}

impl PosSaleRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Sales for one day of week since a lookback date, optionally
    /// narrowed to a service period
    pub async fn find_for_day(
        &self,
        restaurant_id: &str,
        day_of_week: i64,
        since_date: &str,
        service_period: Option<ServicePeriod>,
    ) -> RepoResult<Vec<PosSale>> {
        let rows = match service_period {
            Some(period) => {
                sqlx::query_as::<_, PosSale>(
                    "SELECT * FROM pos_sales \
                     WHERE restaurant_id = ? AND day_of_week = ? AND sale_date >= ? \
                       AND service_period = ?",
                )
                .bind(restaurant_id)
                .bind(day_of_week)
                .bind(since_date)
                .bind(period)
                .fetch_all(&self.pool)
                .await?
            }
            None => {
                sqlx::query_as::<_, PosSale>(
                    "SELECT * FROM pos_sales \
                     WHERE restaurant_id = ? AND day_of_week = ? AND sale_date >= ?",
                )
                .bind(restaurant_id)
                .bind(day_of_week)
                .bind(since_date)
                .fetch_all(&self.pool)
                .await?
            }
        };
        Ok(rows)
    }

    /// All sales of a restaurant, for popularity medians
    pub async fn find_all(&self, restaurant_id: &str) -> RepoResult<Vec<PosSale>> {
        let rows = sqlx::query_as::<_, PosSale>(
            "SELECT * FROM pos_sales WHERE restaurant_id = ?",
        )
        .bind(restaurant_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create(&self, sale: &PosSale) -> RepoResult<PosSale> {
        let mut row = sale.clone();
        if row.id.is_empty() {
            row.id = new_id();
        }
        sqlx::query(
            "INSERT INTO pos_sales \
             (id, restaurant_id, menu_item_id, sale_date, day_of_week, service_period, quantity_sold_weekly) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.restaurant_id)
        .bind(&row.menu_item_id)
        .bind(&row.sale_date)
        .bind(row.day_of_week)
        .bind(row.service_period)
        .bind(row.quantity_sold_weekly)
        .execute(&self.pool)
        .await?;
        Ok(row)
    }
}
