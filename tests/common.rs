use booking_engine::{
    api::router::create_router,
    config::Config,
    infra::factory::{build_state, run_sqlite_migrations},
    state::AppState,
};
use axum::{
    body::Body,
    http::{header, Request},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value};
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Pool, Sqlite};
use std::str::FromStr;
use std::sync::Arc;
use tower::ServiceExt;
use uuid::Uuid;

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self::with_config(|_| {}).await
    }

    pub async fn with_config(adjust: impl FnOnce(&mut Config)) -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        run_sqlite_migrations(&pool).await;

        let mut config = Config {
            database_url: db_url.clone(),
            port: 0,
            hold_timeout_min: 15,
            booking_horizon_days: 60,
            slot_step_min: 15,
            min_lead_time_min: 0,
            no_show_grace_min: 30,
            sweep_interval_secs: 30,
            notify_url: None,
            notify_token: "token".to_string(),
        };
        adjust(&mut config);

        let state = Arc::new(build_state(&config, pool.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
        }
    }

    pub async fn post_json(&self, uri: &str, body: Value) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap()
        ).await.unwrap()
    }

    #[allow(dead_code)]
    pub async fn put_json(&self, uri: &str, body: Value) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("PUT")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap()
        ).await.unwrap()
    }

    pub async fn get(&self, uri: &str) -> axum::response::Response {
        self.router.clone().oneshot(
            Request::builder()
                .method("GET")
                .uri(uri)
                .body(Body::empty())
                .unwrap()
        ).await.unwrap()
    }

    /// Business open every day of the week with the given local hours.
    pub async fn create_business(&self, open: &str, close: &str) -> String {
        let window = json!({"open": open, "close": close});
        let res = self.post_json("/api/v1/businesses", json!({
            "name": "Test Salon",
            "timezone": "UTC",
            "hours": {
                "monday": window, "tuesday": window, "wednesday": window,
                "thursday": window, "friday": window, "saturday": window,
                "sunday": window
            }
        })).await;
        assert!(res.status().is_success(), "create_business failed: {}", res.status());
        parse_body(res).await["id"].as_str().unwrap().to_string()
    }

    pub async fn create_service(&self, business_id: &str, duration_min: i64, buffer_min: i64) -> String {
        let res = self.post_json(&format!("/api/v1/{}/services", business_id), json!({
            "name": "Haircut",
            "duration_min": duration_min,
            "buffer_min": buffer_min,
            "price_cents": 4500
        })).await;
        assert!(res.status().is_success(), "create_service failed: {}", res.status());
        parse_body(res).await["id"].as_str().unwrap().to_string()
    }

    #[allow(dead_code)]
    pub async fn reserve(&self, business_id: &str, service_id: &str, date: &str, time: &str) -> axum::response::Response {
        self.post_json(
            &format!("/api/v1/{}/services/{}/bookings", business_id, service_id),
            json!({"customer_id": "cust-1", "date": date, "time": time}),
        ).await
    }
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
    }
}

pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[allow(dead_code)]
pub fn future_date(days: i64) -> String {
    (Utc::now() + Duration::days(days)).format("%Y-%m-%d").to_string()
}
