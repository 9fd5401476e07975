use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use chrono::{NaiveDate, NaiveTime, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateBusinessRequest, HoursExceptionRequest, UpdateHoursRequest};
use crate::domain::models::business::{Business, HoursException, WeeklyHours};
use crate::error::AppError;
use crate::state::AppState;

fn validate_hours(hours: &WeeklyHours) -> Result<(), AppError> {
    let windows = [
        &hours.monday, &hours.tuesday, &hours.wednesday, &hours.thursday,
        &hours.friday, &hours.saturday, &hours.sunday,
    ];
    for window in windows.into_iter().flatten() {
        let open = NaiveTime::parse_from_str(&window.open, "%H:%M")
            .map_err(|_| AppError::Validation("Invalid open time (HH:MM)".into()))?;
        let close = NaiveTime::parse_from_str(&window.close, "%H:%M")
            .map_err(|_| AppError::Validation("Invalid close time (HH:MM)".into()))?;
        if close <= open {
            return Err(AppError::Validation("Close time must be after open time".into()));
        }
    }
    Ok(())
}

pub async fn create_business(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<CreateBusinessRequest>,
) -> Result<impl IntoResponse, AppError> {
    if payload.timezone.parse::<Tz>().is_err() {
        return Err(AppError::Validation("Invalid timezone".into()));
    }
    validate_hours(&payload.hours)?;

    let business = Business::new(payload.name, payload.timezone, &payload.hours);
    let created = state.business_repo.create(&business).await?;
    info!("Business created: {}", created.id);
    Ok(Json(created))
}

pub async fn get_business(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let business = state.business_repo.find_by_id(&business_id).await?
        .ok_or(AppError::NotFound("Business not found".into()))?;
    Ok(Json(business))
}

pub async fn update_hours(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Json(payload): Json<UpdateHoursRequest>,
) -> Result<impl IntoResponse, AppError> {
    validate_hours(&payload.hours)?;

    let hours_json = serde_json::to_string(&payload.hours)
        .map_err(|_| AppError::Validation("Invalid hours".into()))?;
    let updated = state.business_repo.update_hours(&business_id, &hours_json).await?;
    info!("Hours updated for business: {}", business_id);
    Ok(Json(updated))
}

pub async fn upsert_exception(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Json(payload): Json<HoursExceptionRequest>,
) -> Result<impl IntoResponse, AppError> {
    if !payload.closed {
        match (&payload.open, &payload.close) {
            (Some(open), Some(close)) => {
                let open_t = NaiveTime::parse_from_str(open, "%H:%M")
                    .map_err(|_| AppError::Validation("Invalid open time (HH:MM)".into()))?;
                let close_t = NaiveTime::parse_from_str(close, "%H:%M")
                    .map_err(|_| AppError::Validation("Invalid close time (HH:MM)".into()))?;
                if close_t <= open_t {
                    return Err(AppError::Validation("Close time must be after open time".into()));
                }
            }
            _ => return Err(AppError::Validation(
                "An open exception needs both open and close times".into(),
            )),
        }
    }

    let exception = HoursException {
        business_id: business_id.clone(),
        date: payload.date,
        closed: payload.closed,
        open: payload.open,
        close: payload.close,
        created_at: Utc::now(),
    };
    let saved = state.business_repo.upsert_exception(&exception).await?;
    info!("Hours exception upserted for business {} on {}", business_id, payload.date);
    Ok(Json(saved))
}

pub async fn list_exceptions(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let start_str = params.get("start").ok_or(AppError::Validation("start required".into()))?;
    let end_str = params.get("end").ok_or(AppError::Validation("end required".into()))?;
    let start = NaiveDate::parse_from_str(start_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid start".into()))?;
    let end = NaiveDate::parse_from_str(end_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid end".into()))?;

    let exceptions = state.business_repo.list_exceptions(&business_id, start, end).await?;
    Ok(Json(exceptions))
}

pub async fn delete_exception(
    State(state): State<Arc<AppState>>,
    Path((business_id, date)): Path<(String, NaiveDate)>,
) -> Result<impl IntoResponse, AppError> {
    state.business_repo.delete_exception(&business_id, date).await?;
    Ok(Json(serde_json::json!({"status": "deleted"})))
}
