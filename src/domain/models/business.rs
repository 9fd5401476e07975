use chrono::{DateTime, NaiveDate, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One open/close pair in the business's local time, "HH:MM".
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct DayWindow {
    pub open: String,
    pub close: String,
}

/// Weekly operating hours. A missing weekday means closed that day.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct WeeklyHours {
    pub monday: Option<DayWindow>,
    pub tuesday: Option<DayWindow>,
    pub wednesday: Option<DayWindow>,
    pub thursday: Option<DayWindow>,
    pub friday: Option<DayWindow>,
    pub saturday: Option<DayWindow>,
    pub sunday: Option<DayWindow>,
}

impl WeeklyHours {
    pub fn window_for(&self, weekday: Weekday) -> Option<&DayWindow> {
        match weekday {
            Weekday::Mon => self.monday.as_ref(),
            Weekday::Tue => self.tuesday.as_ref(),
            Weekday::Wed => self.wednesday.as_ref(),
            Weekday::Thu => self.thursday.as_ref(),
            Weekday::Fri => self.friday.as_ref(),
            Weekday::Sat => self.saturday.as_ref(),
            Weekday::Sun => self.sunday.as_ref(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Business {
    pub id: String,
    pub name: String,
    pub timezone: String,
    pub hours_json: String,
    pub created_at: DateTime<Utc>,
}

impl Business {
    pub fn new(name: String, timezone: String, hours: &WeeklyHours) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name,
            timezone,
            hours_json: serde_json::to_string(hours).unwrap_or_else(|_| "{}".to_string()),
            created_at: Utc::now(),
        }
    }

    pub fn weekly_hours(&self) -> WeeklyHours {
        serde_json::from_str(&self.hours_json).unwrap_or_default()
    }

    pub fn tz(&self) -> Tz {
        self.timezone.parse().unwrap_or(chrono_tz::UTC)
    }
}

/// Date-specific override of the weekly schedule: a fully closed day, or
/// modified hours for just that date.
#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct HoursException {
    pub business_id: String,
    pub date: NaiveDate,
    pub closed: bool,
    pub open: Option<String>,
    pub close: Option<String>,
    pub created_at: DateTime<Utc>,
}
