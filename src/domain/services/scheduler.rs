use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use tracing::{info, warn};

use crate::config::Config;
use crate::domain::models::booking::{Booking, NewBookingParams};
use crate::domain::ports::{
    BookingRepository, BusinessHoursProvider, NotificationSender, ServiceCatalog,
};
use crate::domain::services::interval::{is_grid_aligned, overlaps, Interval};
use crate::error::AppError;

pub struct ReserveParams {
    pub business_id: String,
    pub service_id: String,
    pub customer_id: String,
    pub start: DateTime<Utc>,
    pub idempotency_key: Option<String>,
}

/// Per-key async mutexes handed out on demand. Entries no caller currently
/// holds are swept on the next acquire, keeping the map bounded by the number
/// of in-flight reserves.
struct LockRegistry {
    inner: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl LockRegistry {
    fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    fn acquire(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        let mut locks = self.inner.lock().unwrap();
        locks.retain(|_, lock| Arc::strong_count(lock) > 1);
        locks
            .entry(key.to_string())
            .or_insert_with(|| Arc::new(tokio::sync::Mutex::new(())))
            .clone()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

/// The single write path. Validation and insert run under a per-business
/// mutex, so two racing reserves for overlapping intervals resolve to exactly
/// one booking and one `SlotUnavailable`. Businesses never contend with each
/// other.
pub struct BookingScheduler {
    bookings: Arc<dyn BookingRepository>,
    services: Arc<dyn ServiceCatalog>,
    hours: Arc<dyn BusinessHoursProvider>,
    notifier: Arc<dyn NotificationSender>,
    config: Config,
    locks: LockRegistry,
}

impl BookingScheduler {
    pub fn new(
        bookings: Arc<dyn BookingRepository>,
        services: Arc<dyn ServiceCatalog>,
        hours: Arc<dyn BusinessHoursProvider>,
        notifier: Arc<dyn NotificationSender>,
        config: Config,
    ) -> Self {
        Self {
            bookings,
            services,
            hours,
            notifier,
            config,
            locks: LockRegistry::new(),
        }
    }

    pub async fn reserve(&self, params: ReserveParams) -> Result<Booking, AppError> {
        if let Some(key) = &params.idempotency_key {
            if let Some(existing) = self
                .bookings
                .find_by_idempotency_key(&params.business_id, key)
                .await?
            {
                info!("Reserve replay via idempotency key, returning booking {}", existing.id);
                return Ok(existing);
            }
        }

        let service = self
            .services
            .find_by_id(&params.service_id)
            .await?
            .ok_or_else(|| AppError::InvalidService("Service not found".into()))?;

        if service.business_id != params.business_id {
            return Err(AppError::InvalidService(
                "Service does not belong to this business".into(),
            ));
        }
        if !service.active {
            return Err(AppError::InvalidService("Service is inactive".into()));
        }

        let now = Utc::now();
        if params.start < now {
            return Err(AppError::PastDate);
        }

        let tz = self
            .hours
            .timezone(&params.business_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Business not found".into()))?;

        let local_date = params.start.with_timezone(&tz).date_naive();
        let today = now.with_timezone(&tz).date_naive();
        if local_date > today + Duration::days(self.config.booking_horizon_days) {
            return Err(AppError::Validation(format!(
                "Date is beyond the {}-day booking horizon",
                self.config.booking_horizon_days
            )));
        }

        let window = self
            .hours
            .operating_hours(&params.business_id, local_date)
            .await?
            .ok_or_else(|| AppError::OutOfHours("Business is closed that day".into()))?;

        let end = params.start + Duration::minutes(service.duration_min);
        if params.start < window.start || end > window.end {
            return Err(AppError::OutOfHours(
                "Requested time falls outside opening hours".into(),
            ));
        }

        if !is_grid_aligned(params.start, window.start, self.config.slot_step_min) {
            return Err(AppError::Validation(format!(
                "Start time is not on the {}-minute slot grid",
                self.config.slot_step_min
            )));
        }

        let lock = self.locks.acquire(&params.business_id);
        let _guard = lock.lock().await;

        // Re-validate against live state while holding the lock. The query
        // range is padded by the buffer so neighbours just outside the window
        // still count.
        let buffer = Duration::minutes(service.buffer_min);
        let existing = self
            .bookings
            .list_active_in_range(
                &params.business_id,
                window.start - buffer,
                window.end + buffer,
            )
            .await?;

        let candidate = Interval::new(params.start, end);
        if existing
            .iter()
            .any(|b| overlaps(&candidate, &b.interval(), service.buffer_min))
        {
            return Err(AppError::SlotUnavailable(
                "Selected time slot is no longer available".into(),
            ));
        }

        let booking = Booking::new(NewBookingParams {
            business_id: params.business_id,
            service_id: params.service_id,
            customer_id: params.customer_id,
            start: params.start,
            duration_min: service.duration_min,
            idempotency_key: params.idempotency_key,
            hold_timeout_min: self.config.hold_timeout_min,
        });

        let created = self.bookings.insert(&booking).await?;
        drop(_guard);

        info!(
            "Booking {} reserved for business {} at {}",
            created.id, created.business_id, created.start_time
        );

        let notifier = self.notifier.clone();
        let notify_booking = created.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.booking_event("booking.created", &notify_booking).await {
                warn!("Notification 'booking.created' for booking {} failed: {}", notify_booking.id, e);
            }
        });

        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn registry_reuses_the_lock_while_it_is_held() {
        let registry = LockRegistry::new();
        let held = registry.acquire("b1");
        assert!(Arc::ptr_eq(&held, &registry.acquire("b1")));
    }

    #[test]
    fn registry_evicts_locks_nobody_holds() {
        let registry = LockRegistry::new();
        let held = registry.acquire("busy");
        for i in 0..10 {
            let _ = registry.acquire(&format!("one-off-{}", i));
        }
        let _last = registry.acquire("latest");

        // Only the held lock and the freshly returned one survive the sweep.
        assert_eq!(registry.len(), 2);
        assert!(Arc::ptr_eq(&held, &registry.acquire("busy")));
    }
}
