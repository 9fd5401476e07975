use axum::{
    body::Body,
    extract::Request,
    routing::{get, post, put},
    Router,
};
use std::sync::Arc;
use std::time::Duration;
use crate::state::AppState;
use crate::api::handlers::{availability, booking, business, health, lifecycle, service};
use tower_http::{
    trace::TraceLayer,
    classify::ServerErrorsFailureClass,
};
use tracing::{error, info, info_span, Span};
use uuid::Uuid;

pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health::health_check))

        // Business profile & schedule
        .route("/api/v1/businesses", post(business::create_business))
        .route("/api/v1/businesses/{business_id}", get(business::get_business))
        .route("/api/v1/{business_id}/hours", put(business::update_hours))
        .route("/api/v1/{business_id}/hours/exceptions", get(business::list_exceptions).post(business::upsert_exception))
        .route("/api/v1/{business_id}/hours/exceptions/{date}", axum::routing::delete(business::delete_exception))

        // Service catalog
        .route("/api/v1/{business_id}/services", get(service::list_services).post(service::create_service))
        .route("/api/v1/{business_id}/services/{service_id}", put(service::update_service))

        // Public booking flow
        .route("/api/v1/{business_id}/services/{service_id}/dates", get(availability::get_available_dates))
        .route("/api/v1/{business_id}/services/{service_id}/slots", get(availability::get_slots))
        .route("/api/v1/{business_id}/services/{service_id}/bookings", post(booking::create_booking))

        // Customer booking management
        .route("/api/v1/bookings/manage/{token}", get(booking::get_booking_by_token))
        .route("/api/v1/bookings/manage/{token}/cancel", post(booking::cancel_booking_by_token))

        // Lifecycle driver (payment webhook / check-in integration)
        .route("/api/v1/bookings/{booking_id}/confirm", post(lifecycle::confirm_booking))
        .route("/api/v1/bookings/{booking_id}/expire", post(lifecycle::expire_booking))
        .route("/api/v1/bookings/{booking_id}/no-show", post(lifecycle::no_show_booking))

        // Admin booking management
        .route("/api/v1/{business_id}/bookings", get(booking::list_bookings))
        .route("/api/v1/{business_id}/bookings/{booking_id}", get(booking::get_booking))
        .route("/api/v1/{business_id}/bookings/{booking_id}/cancel", post(booking::cancel_booking))

        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<Body>| {
                    let request_id = Uuid::new_v4().to_string();
                    info_span!(
                        "http_request",
                        request_id = %request_id,
                        method = ?request.method(),
                        uri = ?request.uri(),
                        version = ?request.version(),
                        business_id = tracing::field::Empty,
                    )
                })
                .on_request(|request: &Request<Body>, _span: &Span| {
                    info!("started processing request: {} {}", request.method(), request.uri().path());
                })
                .on_response(|response: &axum::http::Response<Body>, latency: Duration, _span: &Span| {
                    info!(
                        status = response.status().as_u16(),
                        latency_ms = latency.as_millis(),
                        "finished processing request"
                    );
                })
                .on_failure(|error: ServerErrorsFailureClass, _latency: Duration, _span: &Span| {
                    error!("request failed: {:?}", error);
                })
        )
        .with_state(state)
}
