use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::domain::models::booking::{Booking, BookingStatus};
use crate::domain::ports::{BookingRepository, NotificationSender};
use crate::error::AppError;

/// Forward-only transition table. Cancellation is reachable from any
/// non-terminal state; terminal states accept nothing. Every conditional
/// update below derives its admissible `from` set from this table.
pub fn can_transition(from: BookingStatus, to: BookingStatus) -> bool {
    use BookingStatus::*;
    matches!(
        (from, to),
        (Pending, Confirmed)
            | (Pending, Expired)
            | (Pending, Cancelled)
            | (Confirmed, Completed)
            | (Confirmed, Cancelled)
            | (Confirmed, NoShow)
    )
}

const ALL_STATUSES: [BookingStatus; 6] = [
    BookingStatus::Pending,
    BookingStatus::Confirmed,
    BookingStatus::Completed,
    BookingStatus::Cancelled,
    BookingStatus::Expired,
    BookingStatus::NoShow,
];

/// Every status the table admits as a starting point for `to`.
fn sources_of(to: BookingStatus) -> Vec<BookingStatus> {
    ALL_STATUSES
        .into_iter()
        .filter(|&from| can_transition(from, to))
        .collect()
}

/// Drives bookings through their state machine. Every transition is a
/// conditional update in the repository, so a race between e.g. expiry and a
/// late confirmation resolves to whichever lands first; the loser observes the
/// final state and becomes a no-op.
pub struct BookingLifecycle {
    bookings: Arc<dyn BookingRepository>,
    notifier: Arc<dyn NotificationSender>,
}

impl BookingLifecycle {
    pub fn new(bookings: Arc<dyn BookingRepository>, notifier: Arc<dyn NotificationSender>) -> Self {
        Self { bookings, notifier }
    }

    pub async fn confirm(&self, booking_id: &str) -> Result<Booking, AppError> {
        let (booking, changed) = self.apply(booking_id, BookingStatus::Confirmed).await?;
        if changed {
            info!("Booking confirmed: {}", booking.id);
        }
        Ok(booking)
    }

    pub async fn cancel(&self, booking_id: &str) -> Result<Booking, AppError> {
        let (booking, changed) = self.apply(booking_id, BookingStatus::Cancelled).await?;
        if changed {
            info!("Booking cancelled: {}", booking.id);
            self.notify("booking.cancelled", &booking);
        }
        Ok(booking)
    }

    pub async fn expire(&self, booking_id: &str) -> Result<Booking, AppError> {
        let (booking, changed) = self.apply(booking_id, BookingStatus::Expired).await?;
        if changed {
            info!("Booking hold expired: {}", booking.id);
            self.notify("booking.expired", &booking);
        }
        Ok(booking)
    }

    pub async fn complete(&self, booking_id: &str) -> Result<Booking, AppError> {
        let (booking, _) = self.apply(booking_id, BookingStatus::Completed).await?;
        Ok(booking)
    }

    pub async fn mark_no_show(&self, booking_id: &str) -> Result<Booking, AppError> {
        let (booking, changed) = self.apply(booking_id, BookingStatus::NoShow).await?;
        if changed {
            info!("Booking marked no-show: {}", booking.id);
        }
        Ok(booking)
    }

    /// Conditional transition; a lost race returns the current row unchanged.
    async fn apply(
        &self,
        booking_id: &str,
        to: BookingStatus,
    ) -> Result<(Booking, bool), AppError> {
        let from = sources_of(to);
        if let Some(updated) = self.bookings.transition(booking_id, &from, to).await? {
            return Ok((updated, true));
        }

        let current = self
            .bookings
            .find_by_global_id(booking_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Booking {} not found", booking_id)))?;

        debug!(
            "Transition to {} skipped for booking {} (status is {})",
            to.as_str(),
            booking_id,
            current.status.as_str()
        );
        Ok((current, false))
    }

    fn notify(&self, event: &'static str, booking: &Booking) {
        let notifier = self.notifier.clone();
        let booking = booking.clone();
        tokio::spawn(async move {
            if let Err(e) = notifier.booking_event(event, &booking).await {
                warn!("Notification '{}' for booking {} failed: {}", event, booking.id, e);
            }
        });
    }
}
