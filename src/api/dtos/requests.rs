use crate::domain::models::business::WeeklyHours;
use chrono::NaiveDate;
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateBusinessRequest {
    pub name: String,
    pub timezone: String,
    pub hours: WeeklyHours,
}

#[derive(Deserialize)]
pub struct UpdateHoursRequest {
    pub hours: WeeklyHours,
}

#[derive(Deserialize)]
pub struct HoursExceptionRequest {
    pub date: NaiveDate,
    pub closed: bool,
    pub open: Option<String>,
    pub close: Option<String>,
}

#[derive(Deserialize)]
pub struct CreateServiceRequest {
    pub name: String,
    pub duration_min: i64,
    pub buffer_min: Option<i64>,
    pub price_cents: Option<i64>,
}

#[derive(Deserialize)]
pub struct UpdateServiceRequest {
    pub name: Option<String>,
    pub price_cents: Option<i64>,
    pub active: Option<bool>,
}

#[derive(Deserialize)]
pub struct ReserveRequest {
    pub customer_id: String,
    /// Local calendar date in the business's timezone, "YYYY-MM-DD".
    pub date: String,
    /// Local start time, "HH:MM", or a full RFC 3339 instant.
    pub time: String,
    pub idempotency_key: Option<String>,
}
