use crate::domain::models::{
    booking::{Booking, BookingStatus},
    business::{Business, HoursException},
    service::Service,
};
use crate::domain::services::interval::Interval;
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;

#[async_trait]
pub trait BusinessRepository: Send + Sync {
    async fn create(&self, business: &Business) -> Result<Business, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Business>, AppError>;
    async fn update_hours(&self, id: &str, hours_json: &str) -> Result<Business, AppError>;
    async fn upsert_exception(&self, exception: &HoursException) -> Result<HoursException, AppError>;
    async fn find_exception(&self, business_id: &str, date: NaiveDate) -> Result<Option<HoursException>, AppError>;
    async fn list_exceptions(&self, business_id: &str, start: NaiveDate, end: NaiveDate) -> Result<Vec<HoursException>, AppError>;
    async fn delete_exception(&self, business_id: &str, date: NaiveDate) -> Result<(), AppError>;
}

/// Read-side view of a business's schedule, resolved per date with
/// exceptions already applied. `None` means closed that day.
#[async_trait]
pub trait BusinessHoursProvider: Send + Sync {
    async fn timezone(&self, business_id: &str) -> Result<Option<Tz>, AppError>;
    async fn operating_hours(&self, business_id: &str, date: NaiveDate) -> Result<Option<Interval>, AppError>;
}

#[async_trait]
pub trait ServiceCatalog: Send + Sync {
    async fn create(&self, service: &Service) -> Result<Service, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Service>, AppError>;
    async fn list_by_business(&self, business_id: &str) -> Result<Vec<Service>, AppError>;
    /// Metadata only: name, price and active flag. Duration and buffer are
    /// frozen once the service exists so committed bookings keep their shape.
    async fn update_metadata(&self, service: &Service) -> Result<Service, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    async fn insert(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, business_id: &str, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_global_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<Booking>, AppError>;
    async fn find_by_idempotency_key(&self, business_id: &str, key: &str) -> Result<Option<Booking>, AppError>;
    /// Pending/confirmed bookings whose interval intersects [start, end).
    async fn list_active_in_range(&self, business_id: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> Result<Vec<Booking>, AppError>;
    async fn list_by_business(&self, business_id: &str) -> Result<Vec<Booking>, AppError>;
    /// Conditional status update: succeeds only while the current status is in
    /// `from`, returning the updated row. `None` means another transition won.
    async fn transition(&self, id: &str, from: &[BookingStatus], to: BookingStatus) -> Result<Option<Booking>, AppError>;
    async fn list_expired_holds(&self, now: DateTime<Utc>, limit: i64) -> Result<Vec<Booking>, AppError>;
    async fn list_elapsed_confirmed(&self, cutoff: DateTime<Utc>, limit: i64) -> Result<Vec<Booking>, AppError>;
}

/// Fire-and-forget: delivery failures are logged and never roll back a
/// booking transition.
#[async_trait]
pub trait NotificationSender: Send + Sync {
    async fn booking_event(&self, event: &str, booking: &Booking) -> Result<(), AppError>;
}
