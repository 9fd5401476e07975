use chrono::{DateTime, Utc};
use serde::Serialize;

/// Ephemeral slot candidate for one (business, service, date) query.
/// Never persisted; `display` is the start time in the business's timezone.
#[derive(Debug, Serialize, Clone)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub display: String,
    pub available: bool,
}
