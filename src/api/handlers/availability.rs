use axum::{extract::{Path, Query, State}, response::IntoResponse, Json};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::dtos::responses::SlotsResponse;
use crate::domain::models::business::Business;
use crate::domain::models::service::Service;
use crate::domain::services::availability::{day_has_capacity, generate_slots, SlotQuery};
use crate::domain::services::hours::resolve_open_interval;
use crate::error::AppError;
use crate::state::AppState;

const MAX_RANGE_DAYS: i64 = 366;

async fn load_business_and_service(
    state: &AppState,
    business_id: &str,
    service_id: &str,
) -> Result<(Business, Service), AppError> {
    let business = state.business_repo.find_by_id(business_id).await?
        .ok_or(AppError::NotFound("Business not found".into()))?;

    let service = state.service_catalog.find_by_id(service_id).await?
        .ok_or_else(|| AppError::InvalidService("Service not found".into()))?;
    if service.business_id != business.id {
        return Err(AppError::InvalidService("Service does not belong to this business".into()));
    }
    if !service.active {
        return Err(AppError::InvalidService("Service is inactive".into()));
    }

    Ok((business, service))
}

pub async fn get_available_dates(
    State(state): State<Arc<AppState>>,
    Path((business_id, service_id)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let (business, service) = load_business_and_service(&state, &business_id, &service_id).await?;

    let start_str = params.get("start").ok_or(AppError::Validation("start required".into()))?;
    let end_str = params.get("end").ok_or(AppError::Validation("end required".into()))?;
    let start_date = NaiveDate::parse_from_str(start_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid start".into()))?;
    let end_date = NaiveDate::parse_from_str(end_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid end".into()))?;

    if end_date < start_date {
        return Err(AppError::Validation("end must not be before start".into()));
    }
    if (end_date - start_date).num_days() > MAX_RANGE_DAYS {
        return Err(AppError::Validation("Date range too large".into()));
    }

    let tz = business.tz();
    let now = Utc::now();
    let today = now.with_timezone(&tz).date_naive();

    // One fetch for the whole span, partitioned per day below.
    let range_start = tz.from_local_datetime(&start_date.and_hms_opt(0, 0, 0).unwrap())
        .single().ok_or(AppError::Validation("Invalid range start".into()))?
        .with_timezone(&Utc);
    let range_end = tz.from_local_datetime(&end_date.and_hms_opt(23, 59, 59).unwrap())
        .single().ok_or(AppError::Validation("Invalid range end".into()))?
        .with_timezone(&Utc);

    let buffer = Duration::minutes(service.buffer_min);
    let all_bookings = state.booking_repo
        .list_active_in_range(&business.id, range_start - buffer, range_end + buffer)
        .await?;
    let exceptions = state.business_repo
        .list_exceptions(&business.id, start_date, end_date)
        .await?;

    let mut available_dates = Vec::new();
    let mut current_date = start_date;

    while current_date <= end_date {
        if current_date < today {
            current_date += Duration::days(1);
            continue;
        }

        let exception = exceptions.iter().find(|e| e.date == current_date);
        if let Some(window) = resolve_open_interval(&business, exception, current_date) {
            let day_bookings: Vec<_> = all_bookings.iter()
                .filter(|b| b.start_time < window.end + buffer && b.end_time > window.start - buffer)
                .cloned()
                .collect();

            if day_has_capacity(&window, &service, &day_bookings, now, state.config.min_lead_time_min) {
                available_dates.push(current_date.to_string());
            }
        }
        current_date += Duration::days(1);
    }

    Ok(Json(available_dates))
}

pub async fn get_slots(
    State(state): State<Arc<AppState>>,
    Path((business_id, service_id)): Path<(String, String)>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, AppError> {
    let (business, service) = load_business_and_service(&state, &business_id, &service_id).await?;

    let date_str = params.get("date").ok_or(AppError::Validation("date required".into()))?;
    let date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| AppError::Validation("Invalid date format".into()))?;

    let tz = business.tz();
    let now = Utc::now();
    let today = now.with_timezone(&tz).date_naive();

    if date < today {
        return Err(AppError::PastDate);
    }
    if date > today + Duration::days(state.config.booking_horizon_days) {
        return Err(AppError::Validation(format!(
            "Date is beyond the {}-day booking horizon",
            state.config.booking_horizon_days
        )));
    }

    let exception = state.business_repo.find_exception(&business.id, date).await?;
    let Some(window) = resolve_open_interval(&business, exception.as_ref(), date) else {
        // Fully closed day: empty list, not an error.
        return Ok(Json(SlotsResponse { date: date_str.clone(), slots: Vec::new() }));
    };

    let buffer = Duration::minutes(service.buffer_min);
    let bookings = state.booking_repo
        .list_active_in_range(&business.id, window.start - buffer, window.end + buffer)
        .await?;

    let slots = generate_slots(&SlotQuery {
        window,
        tz,
        service: &service,
        bookings: &bookings,
        now,
        step_min: state.config.slot_step_min,
        lead_time_min: state.config.min_lead_time_min,
    });

    Ok(Json(SlotsResponse { date: date_str.clone(), slots }))
}
