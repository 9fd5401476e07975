use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Minutes an unpaid pending hold survives before the sweeper expires it.
    pub hold_timeout_min: i64,
    /// How far into the future slots may be requested or reserved.
    pub booking_horizon_days: i64,
    /// Slot grid granularity in minutes, anchored at each day's opening time.
    pub slot_step_min: i64,
    /// Minimum notice before a same-day slot becomes bookable.
    pub min_lead_time_min: i64,
    /// Confirmed bookings are completed once end_time + grace has passed,
    /// leaving a window for an external no-show signal.
    pub no_show_grace_min: i64,
    pub sweep_interval_secs: u64,
    pub notify_url: Option<String>,
    pub notify_token: String,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            hold_timeout_min: env_i64("HOLD_TIMEOUT_MIN", 15),
            booking_horizon_days: env_i64("BOOKING_HORIZON_DAYS", 60),
            slot_step_min: env_i64("SLOT_STEP_MIN", 15),
            min_lead_time_min: env_i64("MIN_LEAD_TIME_MIN", 0),
            no_show_grace_min: env_i64("NO_SHOW_GRACE_MIN", 30),
            sweep_interval_secs: env::var("SWEEP_INTERVAL_SECS").unwrap_or_else(|_| "30".to_string()).parse().expect("SWEEP_INTERVAL_SECS must be a number"),
            notify_url: env::var("NOTIFY_URL").ok(),
            notify_token: env::var("NOTIFY_TOKEN").unwrap_or_else(|_| "test-token-1".to_string()),
        }
    }
}

fn env_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
