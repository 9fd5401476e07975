use axum::{extract::{Path, State}, response::IntoResponse, Json};
use std::sync::Arc;

use crate::error::AppError;
use crate::state::AppState;

/// Consumed by the payment processor's success webhook, never by end-user
/// code. Replayed webhooks and signals racing an expiry are no-ops.
pub async fn confirm_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.lifecycle.confirm(&booking_id).await?;
    Ok(Json(booking))
}

pub async fn expire_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.lifecycle.expire(&booking_id).await?;
    Ok(Json(booking))
}

pub async fn no_show_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let booking = state.lifecycle.mark_no_show(&booking_id).await?;
    Ok(Json(booking))
}
