use crate::domain::models::booking::{Booking, BookingStatus};
use crate::domain::ports::BookingRepository;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn insert(&self, booking: &Booking) -> Result<Booking, AppError> {
        sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, business_id, service_id, customer_id, start_time, end_time, status, idempotency_key, management_token, hold_expires_at, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&booking.id).bind(&booking.business_id).bind(&booking.service_id).bind(&booking.customer_id)
            .bind(booking.start_time).bind(booking.end_time).bind(booking.status.as_str())
            .bind(&booking.idempotency_key).bind(&booking.management_token)
            .bind(booking.hold_expires_at).bind(booking.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, business_id: &str, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE business_id = ? AND id = ?")
            .bind(business_id).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_global_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE management_token = ?")
            .bind(token)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_idempotency_key(&self, business_id: &str, key: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE business_id = ? AND idempotency_key = ?")
            .bind(business_id).bind(key)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_active_in_range(&self, business_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings
             WHERE business_id = ? AND start_time < ? AND end_time > ?
               AND status IN ('pending', 'confirmed')"
        )
            .bind(business_id).bind(end).bind(start)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_business(&self, business_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE business_id = ? ORDER BY start_time ASC")
            .bind(business_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn transition(&self, id: &str, from: &[BookingStatus], to: BookingStatus) -> Result<Option<Booking>, AppError> {
        let placeholders = vec!["?"; from.len()].join(", ");
        let sql = format!(
            "UPDATE bookings SET status = ?, hold_expires_at = NULL
             WHERE id = ? AND status IN ({})
             RETURNING *",
            placeholders
        );

        let mut query = sqlx::query_as::<_, Booking>(&sql).bind(to.as_str()).bind(id);
        for status in from {
            query = query.bind(status.as_str());
        }

        query.fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_expired_holds(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings
             WHERE status = 'pending' AND hold_expires_at IS NOT NULL AND hold_expires_at <= ?
             ORDER BY hold_expires_at ASC LIMIT ?"
        )
            .bind(now).bind(limit)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_elapsed_confirmed(&self, cutoff: DateTime<Utc>, limit: i64) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>(
            "SELECT * FROM bookings
             WHERE status = 'confirmed' AND end_time <= ?
             ORDER BY end_time ASC LIMIT ?"
        )
            .bind(cutoff).bind(limit)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }
}
