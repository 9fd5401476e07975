use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Service {
    pub id: String,
    pub business_id: String,
    pub name: String,
    pub duration_min: i64,
    pub buffer_min: i64,
    pub price_cents: i64,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

pub struct NewServiceParams {
    pub business_id: String,
    pub name: String,
    pub duration_min: i64,
    pub buffer_min: i64,
    pub price_cents: i64,
}

impl Service {
    pub fn new(params: NewServiceParams) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            business_id: params.business_id,
            name: params.name,
            duration_min: params.duration_min,
            buffer_min: params.buffer_min,
            price_cents: params.price_cents,
            active: true,
            created_at: Utc::now(),
        }
    }
}
