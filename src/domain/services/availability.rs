use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use crate::domain::models::booking::Booking;
use crate::domain::models::service::Service;
use crate::domain::models::slot::TimeSlot;
use crate::domain::services::interval::{max_free_gap, overlaps, Interval};

pub struct SlotQuery<'a> {
    pub window: Interval,
    pub tz: Tz,
    pub service: &'a Service,
    pub bookings: &'a [Booking],
    pub now: DateTime<Utc>,
    pub step_min: i64,
    pub lead_time_min: i64,
}

/// Enumerates every grid candidate inside the open window, flagged
/// available/unavailable so callers can render both states. Candidates step by
/// a fixed grid anchored at the window start and cover the whole window; a
/// candidate is available iff it fits before closing, clears every active
/// booking by the service's buffer, and is not in the past.
pub fn generate_slots(q: &SlotQuery) -> Vec<TimeSlot> {
    let duration = Duration::minutes(q.service.duration_min);
    let step = Duration::minutes(q.step_min.max(1));
    let earliest = q.now + Duration::minutes(q.lead_time_min);

    let active: Vec<Interval> = q
        .bookings
        .iter()
        .filter(|b| b.status.blocks_slot())
        .map(|b| b.interval())
        .collect();

    let mut slots = Vec::new();
    let mut cursor = q.window.start;

    while cursor < q.window.end {
        let candidate = Interval::new(cursor, cursor + duration);
        let fits = candidate.end <= q.window.end;
        let clashes = active
            .iter()
            .any(|b| overlaps(&candidate, b, q.service.buffer_min));

        slots.push(TimeSlot {
            start: cursor,
            display: cursor.with_timezone(&q.tz).format("%H:%M").to_string(),
            available: fits && !clashes && cursor >= earliest,
        });

        cursor += step;
    }

    slots
}

/// Whether at least one contiguous free gap of the service's duration remains
/// in the window after subtracting buffer-expanded active bookings. Drives the
/// available-dates calendar; grid placement is checked later at slot level.
pub fn day_has_capacity(
    window: &Interval,
    service: &Service,
    bookings: &[Booking],
    now: DateTime<Utc>,
    lead_time_min: i64,
) -> bool {
    let earliest = now + Duration::minutes(lead_time_min);
    let effective = Interval::new(window.start.max(earliest), window.end);
    if effective.start >= effective.end {
        return false;
    }

    let buffer = Duration::minutes(service.buffer_min);
    let blocked: Vec<Interval> = bookings
        .iter()
        .filter(|b| b.status.blocks_slot())
        .map(|b| Interval::new(b.start_time - buffer, b.end_time + buffer))
        .collect();

    if blocked.is_empty() {
        return effective.len_minutes() >= service.duration_min;
    }

    max_free_gap(&effective, &blocked) >= service.duration_min
}
