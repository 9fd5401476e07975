use chrono::{Datelike, NaiveDate, NaiveTime, TimeZone, Utc};

use crate::domain::models::business::{Business, HoursException};
use crate::domain::services::interval::Interval;

/// Resolves the open interval for one calendar date in the business's
/// timezone, applying any date-specific exception. `None` means the business
/// does not accept bookings that day.
pub fn resolve_open_interval(
    business: &Business,
    exception: Option<&HoursException>,
    date: NaiveDate,
) -> Option<Interval> {
    if exception.is_some_and(|e| e.closed) {
        return None;
    }

    let hours = business.weekly_hours();
    let weekly = hours.window_for(date.weekday());

    let (open_str, close_str) = match exception {
        Some(e) if e.open.is_some() && e.close.is_some() => {
            (e.open.clone().unwrap(), e.close.clone().unwrap())
        }
        _ => {
            let window = weekly?;
            (window.open.clone(), window.close.clone())
        }
    };

    let open_t = NaiveTime::parse_from_str(&open_str, "%H:%M").ok()?;
    let close_t = NaiveTime::parse_from_str(&close_str, "%H:%M").ok()?;
    if close_t <= open_t {
        return None;
    }

    let tz = business.tz();
    // Ambiguous or skipped local times (DST) are treated as closed.
    let open = tz.from_local_datetime(&date.and_time(open_t)).single()?;
    let close = tz.from_local_datetime(&date.and_time(close_t)).single()?;

    Some(Interval::new(
        open.with_timezone(&Utc),
        close.with_timezone(&Utc),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::models::business::{DayWindow, WeeklyHours};
    use chrono::Utc as UtcTz;

    fn business_open_weekdays() -> Business {
        let hours = WeeklyHours {
            monday: Some(DayWindow { open: "09:00".into(), close: "17:00".into() }),
            tuesday: Some(DayWindow { open: "09:00".into(), close: "17:00".into() }),
            wednesday: Some(DayWindow { open: "09:00".into(), close: "17:00".into() }),
            thursday: Some(DayWindow { open: "09:00".into(), close: "17:00".into() }),
            friday: Some(DayWindow { open: "09:00".into(), close: "13:00".into() }),
            ..Default::default()
        };
        Business::new("Salon".into(), "UTC".into(), &hours)
    }

    #[test]
    fn weekly_window_resolves_for_open_day() {
        let business = business_open_weekdays();
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let window = resolve_open_interval(&business, None, monday).unwrap();
        assert_eq!(window.len_minutes(), 480);
    }

    #[test]
    fn missing_weekday_means_closed() {
        let business = business_open_weekdays();
        let saturday = NaiveDate::from_ymd_opt(2025, 6, 7).unwrap();
        assert!(resolve_open_interval(&business, None, saturday).is_none());
    }

    #[test]
    fn closed_exception_wins_over_weekly_hours() {
        let business = business_open_weekdays();
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let exception = HoursException {
            business_id: business.id.clone(),
            date: monday,
            closed: true,
            open: None,
            close: None,
            created_at: UtcTz::now(),
        };
        assert!(resolve_open_interval(&business, Some(&exception), monday).is_none());
    }

    #[test]
    fn exception_overrides_hours_for_one_date() {
        let business = business_open_weekdays();
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let exception = HoursException {
            business_id: business.id.clone(),
            date: monday,
            closed: false,
            open: Some("12:00".into()),
            close: Some("15:00".into()),
            created_at: UtcTz::now(),
        };
        let window = resolve_open_interval(&business, Some(&exception), monday).unwrap();
        assert_eq!(window.len_minutes(), 180);
    }

    #[test]
    fn inverted_hours_are_closed() {
        let business = business_open_weekdays();
        let monday = NaiveDate::from_ymd_opt(2025, 6, 2).unwrap();
        let exception = HoursException {
            business_id: business.id.clone(),
            date: monday,
            closed: false,
            open: Some("17:00".into()),
            close: Some("09:00".into()),
            created_at: UtcTz::now(),
        };
        assert!(resolve_open_interval(&business, Some(&exception), monday).is_none());
    }
}
