use crate::domain::models::service::Service;
use crate::domain::ports::ServiceCatalog;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteServiceRepo {
    pool: SqlitePool,
}

impl SqliteServiceRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ServiceCatalog for SqliteServiceRepo {
    async fn create(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            "INSERT INTO services (id, business_id, name, duration_min, buffer_min, price_cents, active, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&service.id).bind(&service.business_id).bind(&service.name)
            .bind(service.duration_min).bind(service.buffer_min).bind(service.price_cents)
            .bind(service.active).bind(service.created_at)
            .fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Service>, AppError> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_business(&self, business_id: &str) -> Result<Vec<Service>, AppError> {
        sqlx::query_as::<_, Service>("SELECT * FROM services WHERE business_id = ? ORDER BY created_at ASC")
            .bind(business_id)
            .fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn update_metadata(&self, service: &Service) -> Result<Service, AppError> {
        sqlx::query_as::<_, Service>(
            "UPDATE services SET name = ?, price_cents = ?, active = ?
             WHERE id = ? AND business_id = ?
             RETURNING *"
        )
            .bind(&service.name).bind(service.price_cents).bind(service.active)
            .bind(&service.id).bind(&service.business_id)
            .fetch_optional(&self.pool).await.map_err(AppError::Database)?
            .ok_or_else(|| AppError::NotFound("Service not found".into()))
    }
}
