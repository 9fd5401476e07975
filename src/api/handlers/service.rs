use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;
use tracing::info;

use crate::api::dtos::requests::{CreateServiceRequest, UpdateServiceRequest};
use crate::domain::models::service::{NewServiceParams, Service};
use crate::error::AppError;
use crate::state::AppState;

pub async fn create_service(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
    Json(payload): Json<CreateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    state.business_repo.find_by_id(&business_id).await?
        .ok_or(AppError::NotFound("Business not found".into()))?;

    if payload.duration_min <= 0 {
        return Err(AppError::Validation("duration_min must be positive".into()));
    }
    let buffer_min = payload.buffer_min.unwrap_or(15);
    if buffer_min < 0 {
        return Err(AppError::Validation("buffer_min must not be negative".into()));
    }

    let service = Service::new(NewServiceParams {
        business_id,
        name: payload.name,
        duration_min: payload.duration_min,
        buffer_min,
        price_cents: payload.price_cents.unwrap_or(0),
    });
    let created = state.service_catalog.create(&service).await?;
    info!("Service created: {} ({})", created.name, created.id);
    Ok(Json(created))
}

pub async fn list_services(
    State(state): State<Arc<AppState>>,
    Path(business_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let services = state.service_catalog.list_by_business(&business_id).await?;
    Ok(Json(services))
}

/// Metadata only. Duration and buffer stay frozen so committed bookings keep
/// the interval they were created with.
pub async fn update_service(
    State(state): State<Arc<AppState>>,
    Path((business_id, service_id)): Path<(String, String)>,
    Json(payload): Json<UpdateServiceRequest>,
) -> Result<impl IntoResponse, AppError> {
    let mut service = state.service_catalog.find_by_id(&service_id).await?
        .filter(|s| s.business_id == business_id)
        .ok_or(AppError::NotFound("Service not found".into()))?;

    if let Some(name) = payload.name { service.name = name; }
    if let Some(price) = payload.price_cents { service.price_cents = price; }
    if let Some(active) = payload.active { service.active = active; }

    let updated = state.service_catalog.update_metadata(&service).await?;
    info!("Service updated: {}", updated.id);
    Ok(Json(updated))
}
