use crate::domain::models::business::{Business, HoursException};
use crate::domain::ports::{BusinessHoursProvider, BusinessRepository};
use crate::domain::services::hours::resolve_open_interval;
use crate::domain::services::interval::Interval;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::NaiveDate;
use chrono_tz::Tz;
use sqlx::SqlitePool;

pub struct SqliteBusinessRepo {
    pool: SqlitePool,
}

impl SqliteBusinessRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessRepository for SqliteBusinessRepo {
    async fn create(&self, business: &Business) -> Result<Business, AppError> {
        sqlx::query_as::<_, Business>(
            "INSERT INTO businesses (id, name, timezone, hours_json, created_at)
             VALUES (?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&business.id).bind(&business.name).bind(&business.timezone)
            .bind(&business.hours_json).bind(business.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Business>, AppError> {
        sqlx::query_as::<_, Business>("SELECT * FROM businesses WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_hours(&self, id: &str, hours_json: &str) -> Result<Business, AppError> {
        sqlx::query_as::<_, Business>(
            "UPDATE businesses SET hours_json = ? WHERE id = ? RETURNING *"
        )
            .bind(hours_json).bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Business not found".into()))
    }

    async fn upsert_exception(&self, exception: &HoursException) -> Result<HoursException, AppError> {
        sqlx::query_as::<_, HoursException>(
            "INSERT INTO hours_exceptions (business_id, date, closed, open, close, created_at)
             VALUES (?, ?, ?, ?, ?, ?)
             ON CONFLICT (business_id, date) DO UPDATE
                 SET closed = excluded.closed, open = excluded.open, close = excluded.close
             RETURNING *"
        )
            .bind(&exception.business_id).bind(exception.date).bind(exception.closed)
            .bind(&exception.open).bind(&exception.close).bind(exception.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_exception(&self, business_id: &str, date: NaiveDate) -> Result<Option<HoursException>, AppError> {
        sqlx::query_as::<_, HoursException>(
            "SELECT * FROM hours_exceptions WHERE business_id = ? AND date = ?"
        )
            .bind(business_id).bind(date)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_exceptions(&self, business_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<HoursException>, AppError> {
        sqlx::query_as::<_, HoursException>(
            "SELECT * FROM hours_exceptions WHERE business_id = ? AND date >= ? AND date <= ?"
        )
            .bind(business_id).bind(start).bind(end)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete_exception(&self, business_id: &str, date: NaiveDate) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM hours_exceptions WHERE business_id = ? AND date = ?")
            .bind(business_id).bind(date)
            .execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("Exception not found".into()));
        }
        Ok(())
    }
}

#[async_trait]
impl BusinessHoursProvider for SqliteBusinessRepo {
    async fn timezone(&self, business_id: &str) -> Result<Option<Tz>, AppError> {
        Ok(self.find_by_id(business_id).await?.map(|b| b.tz()))
    }

    async fn operating_hours(&self, business_id: &str, date: NaiveDate) -> Result<Option<Interval>, AppError> {
        let business = match self.find_by_id(business_id).await? {
            Some(b) => b,
            None => return Ok(None),
        };
        let exception = self.find_exception(business_id, date).await?;
        Ok(resolve_open_interval(&business, exception.as_ref(), date))
    }
}
