use axum::{extract::{Path, State}, response::IntoResponse, Json};
use chrono::{NaiveDate, NaiveTime, TimeZone, Utc};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::ReserveRequest;
use crate::domain::services::scheduler::ReserveParams;
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Path((business_id, service_id)): Path<(String, String)>,
    Json(payload): Json<ReserveRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.customer_id.trim().is_empty() {
        return Err(AppError::Validation("customer_id required".into()));
    }

    let business = state.business_repo.find_by_id(&business_id).await?
        .ok_or(AppError::NotFound("Business not found".into()))?;
    let tz = business.tz();

    let date = NaiveDate::parse_from_str(&payload.date, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;

    let time = if payload.time.contains('T') {
        let dt = chrono::DateTime::parse_from_rfc3339(&payload.time)
            .map_err(|_| AppError::Validation("Invalid ISO time format".into()))?;
        dt.with_timezone(&tz).time()
    } else {
        NaiveTime::parse_from_str(&payload.time, "%H:%M")
            .map_err(|_| AppError::Validation("Invalid time format (HH:MM)".into()))?
    };

    let start = tz.from_local_datetime(&date.and_time(time))
        .single()
        .ok_or(AppError::Validation("Invalid local time (ambiguous or skipped due to DST)".into()))?
        .with_timezone(&Utc);

    let booking = state.scheduler.reserve(ReserveParams {
        business_id,
        service_id,
        customer_id: payload.customer_id,
        start,
        idempotency_key: payload.idempotency_key,
    }).await?;

    Ok(Json(booking))
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.booking_repo.list_by_business(&business_id).await?;
    Ok(Json(bookings))
}

pub async fn get_booking(
    State(state): State<Arc<AppState>>,
    Path((business_id, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_id(&business_id, &booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn cancel_booking(
    State(state): State<Arc<AppState>>,
    Path((business_id, booking_id)): Path<(String, String)>,
) -> Result<impl IntoResponse, AppError> {
    state.booking_repo.find_by_id(&business_id, &booking_id).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    let cancelled = state.lifecycle.cancel(&booking_id).await?;
    Ok(Json(cancelled))
}

pub async fn get_booking_by_token(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_token(&token).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;
    Ok(Json(booking))
}

pub async fn cancel_booking_by_token(
    State(state): State<Arc<AppState>>,
    Path(token): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.booking_repo.find_by_token(&token).await?
        .ok_or(AppError::NotFound("Booking not found".into()))?;

    let cancelled = state.lifecycle.cancel(&booking.id).await?;
    info!("Booking cancelled via management token: {}", booking.id);
    Ok(Json(cancelled))
}
