//! Reservation Repository

use super::RepoResult;
use shared::models::Reservation;
use shared::util::new_id;
use sqlx::SqlitePool;

#[derive(Clone)]
pub struct ReservationRepository {
    pool: SqlitePool,
}

impl ReservationRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Reservations on one calendar date (any status)
    pub async fn find_for_date(
        &self,
        restaurant_id: &str,
        date: &str,
    ) -> RepoResult<Vec<Reservation>> {
        let prefix = format!("{date}%");
        let rows = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations \
             WHERE restaurant_id = ? AND reservation_time LIKE ? \
             ORDER BY reservation_time",
        )
        .bind(restaurant_id)
        .bind(prefix)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    /// Non-cancelled reservations since an ISO datetime, for history math
    pub async fn find_active_since(
        &self,
        restaurant_id: &str,
        since: &str,
    ) -> RepoResult<Vec<Reservation>> {
        let rows = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations \
             WHERE restaurant_id = ? AND status != 'cancelled' AND reservation_time >= ?",
        )
        .bind(restaurant_id)
        .bind(since)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn create(&self, reservation: &Reservation) -> RepoResult<Reservation> {
        let mut row = reservation.clone();
        if row.id.is_empty() {
            row.id = new_id();
        }
        sqlx::query(
            "INSERT INTO reservations \
             (id, restaurant_id, reservation_time, guest_count, status, customer_name, customer_notes) \
             VALUES (?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&row.id)
        .bind(&row.restaurant_id)
        .bind(&row.reservation_time)
        .bind(row.guest_count)
        .bind(&row.status)
        .bind(&row.customer_name)
        .bind(&row.customer_notes)
        .execute(&self.pool)
        .await?;
        Ok(row)
    }
}
