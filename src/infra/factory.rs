use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::{ConnectOptions, SqlitePool};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::domain::services::lifecycle::BookingLifecycle;
use crate::domain::services::scheduler::BookingScheduler;
use crate::infra::notify::webhook_notifier::WebhookNotifier;
use crate::infra::repositories::{
    sqlite_booking_repo::SqliteBookingRepo, sqlite_business_repo::SqliteBusinessRepo,
    sqlite_service_repo::SqliteServiceRepo,
};
use crate::state::AppState;

pub async fn bootstrap_state(config: &Config) -> AppState {
    info!("Initializing SQLite connection with WAL Mode...");

    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .expect("Invalid SQLite connection string")
        .create_if_missing(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(5)
        .connect_with(opts)
        .await
        .expect("Failed to connect to SQLite");

    run_sqlite_migrations(&pool).await;

    build_state(config, pool)
}

pub fn build_state(config: &Config, pool: SqlitePool) -> AppState {
    let business_repo = Arc::new(SqliteBusinessRepo::new(pool.clone()));
    let service_catalog = Arc::new(SqliteServiceRepo::new(pool.clone()));
    let booking_repo = Arc::new(SqliteBookingRepo::new(pool.clone()));
    let notifier = Arc::new(WebhookNotifier::new(
        config.notify_url.clone(),
        config.notify_token.clone(),
    ));

    let scheduler = Arc::new(BookingScheduler::new(
        booking_repo.clone(),
        service_catalog.clone(),
        business_repo.clone(),
        notifier.clone(),
        config.clone(),
    ));
    let lifecycle = Arc::new(BookingLifecycle::new(booking_repo.clone(), notifier.clone()));

    AppState {
        config: config.clone(),
        business_repo: business_repo.clone(),
        hours: business_repo,
        service_catalog,
        booking_repo,
        notifier,
        scheduler,
        lifecycle,
    }
}

pub async fn run_sqlite_migrations(pool: &SqlitePool) {
    sqlx::migrate!("./migrations/sqlite")
        .run(pool)
        .await
        .expect("Failed to run SQLite migrations");
}
