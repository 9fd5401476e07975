use chrono::{DateTime, Duration, Utc};

/// Closed-open interval [start, end) on the UTC timeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl Interval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn len_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// Symmetric-buffer overlap: two intervals conflict unless a gap of at least
/// `buffer_min` minutes separates them on either side.
pub fn overlaps(a: &Interval, b: &Interval, buffer_min: i64) -> bool {
    let buffer = Duration::minutes(buffer_min);
    !(a.end + buffer <= b.start || b.end + buffer <= a.start)
}

/// Rounds `t` down to the nearest grid boundary. The grid origin is the
/// business's opening time for the day.
pub fn align_to_grid(t: DateTime<Utc>, origin: DateTime<Utc>, step_min: i64) -> DateTime<Utc> {
    let step = step_min.max(1);
    let offset = (t - origin).num_minutes();
    origin + Duration::minutes(offset.div_euclid(step) * step)
}

pub fn is_grid_aligned(t: DateTime<Utc>, origin: DateTime<Utc>, step_min: i64) -> bool {
    align_to_grid(t, origin, step_min) == t
}

/// Length in minutes of the largest contiguous free gap inside `window` after
/// removing `blocked` sub-intervals. Blocked intervals may overlap each other
/// and extend past the window edges.
pub fn max_free_gap(window: &Interval, blocked: &[Interval]) -> i64 {
    let mut sorted: Vec<Interval> = blocked
        .iter()
        .filter(|b| b.start < window.end && b.end > window.start)
        .copied()
        .collect();
    sorted.sort_by_key(|b| b.start);

    let mut best = 0i64;
    let mut cursor = window.start;

    for b in sorted {
        if b.start > cursor {
            best = best.max((b.start.min(window.end) - cursor).num_minutes());
        }
        cursor = cursor.max(b.end);
        if cursor >= window.end {
            return best;
        }
    }

    best.max((window.end - cursor).num_minutes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(h: u32, m: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 2, h, m, 0).unwrap()
    }

    fn iv(sh: u32, sm: u32, eh: u32, em: u32) -> Interval {
        Interval::new(at(sh, sm), at(eh, em))
    }

    #[test]
    fn overlap_requires_buffer_gap_on_both_sides() {
        let existing = iv(10, 0, 11, 0);

        // 09:00-10:00 ends exactly at the other booking's start, but the
        // 15 min buffer makes them conflict: 10:00 + 15 > 10:00.
        assert!(overlaps(&iv(9, 0, 10, 0), &existing, 15));

        // 08:45-09:45 leaves exactly the required gap.
        assert!(!overlaps(&iv(8, 45, 9, 45), &existing, 15));

        // 11:15 start is the first aligned time clear of the trailing buffer.
        assert!(!overlaps(&iv(11, 15, 12, 15), &existing, 15));
        assert!(overlaps(&iv(11, 0, 12, 0), &existing, 15));
    }

    #[test]
    fn zero_buffer_allows_touching_intervals() {
        let existing = iv(10, 0, 11, 0);
        assert!(!overlaps(&iv(9, 0, 10, 0), &existing, 0));
        assert!(!overlaps(&iv(11, 0, 12, 0), &existing, 0));
        assert!(overlaps(&iv(10, 30, 11, 30), &existing, 0));
    }

    #[test]
    fn overlap_is_symmetric() {
        let a = iv(9, 0, 10, 0);
        let b = iv(10, 10, 11, 0);
        assert_eq!(overlaps(&a, &b, 15), overlaps(&b, &a, 15));
        assert!(overlaps(&a, &b, 15));
        assert!(!overlaps(&a, &b, 10));
    }

    #[test]
    fn grid_alignment_rounds_down_from_origin() {
        let origin = at(9, 0);
        assert_eq!(align_to_grid(at(9, 14), origin, 15), at(9, 0));
        assert_eq!(align_to_grid(at(9, 15), origin, 15), at(9, 15));
        assert_eq!(align_to_grid(at(12, 7), origin, 30), at(12, 0));

        assert!(is_grid_aligned(at(10, 45), origin, 15));
        assert!(!is_grid_aligned(at(10, 50), origin, 15));
    }

    #[test]
    fn grid_alignment_with_offset_origin() {
        // A business opening at 09:30 shifts the whole grid.
        let origin = at(9, 30);
        assert_eq!(align_to_grid(at(10, 0), origin, 15), at(10, 0));
        assert!(!is_grid_aligned(at(10, 10), origin, 15));
        assert!(is_grid_aligned(at(10, 15), origin, 15));
    }

    #[test]
    fn max_free_gap_empty_day_is_whole_window() {
        let window = iv(9, 0, 17, 0);
        assert_eq!(max_free_gap(&window, &[]), 480);
    }

    #[test]
    fn max_free_gap_subtracts_blocked_intervals() {
        let window = iv(9, 0, 17, 0);
        // Buffer-expanded booking 10:00-11:00 with 15 min on both sides.
        let blocked = vec![iv(9, 45, 11, 15)];
        assert_eq!(max_free_gap(&window, &blocked), 345); // 11:15-17:00
    }

    #[test]
    fn max_free_gap_merges_overlapping_blocks() {
        let window = iv(9, 0, 17, 0);
        let blocked = vec![iv(10, 0, 12, 0), iv(11, 0, 13, 0), iv(12, 30, 14, 0)];
        assert_eq!(max_free_gap(&window, &blocked), 180); // 14:00-17:00
    }

    #[test]
    fn max_free_gap_clips_blocks_to_window() {
        let window = iv(9, 0, 17, 0);
        let blocked = vec![iv(7, 0, 9, 30), iv(16, 0, 19, 0)];
        assert_eq!(max_free_gap(&window, &blocked), 390); // 09:30-16:00
    }

    #[test]
    fn max_free_gap_fully_blocked_is_zero() {
        let window = iv(9, 0, 17, 0);
        let blocked = vec![iv(8, 0, 18, 0)];
        assert_eq!(max_free_gap(&window, &blocked), 0);
    }
}
