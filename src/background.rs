use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::time::sleep;
use tracing::{error, info, info_span, Instrument};

use crate::state::AppState;

const SWEEP_BATCH: i64 = 50;

/// Periodic lifecycle sweep: expires unpaid holds past their timeout and
/// completes confirmed bookings once their end time plus the no-show grace
/// window has passed. Runs outside any request path; each transition is
/// conditional, so racing a live confirmation or cancellation is harmless.
pub async fn start_lifecycle_sweeper(state: Arc<AppState>) {
    info!("Starting booking lifecycle sweeper...");

    loop {
        run_sweep_once(&state)
            .instrument(info_span!("lifecycle_sweep"))
            .await;
        sleep(Duration::from_secs(state.config.sweep_interval_secs)).await;
    }
}

pub async fn run_sweep_once(state: &Arc<AppState>) {
    let now = Utc::now();

    match state.booking_repo.list_expired_holds(now, SWEEP_BATCH).await {
        Ok(holds) => {
            for booking in holds {
                if let Err(e) = state.lifecycle.expire(&booking.id).await {
                    error!("Failed to expire booking {}: {}", booking.id, e);
                }
            }
        }
        Err(e) => error!("Failed to fetch expired holds: {}", e),
    }

    let completion_cutoff = now - chrono::Duration::minutes(state.config.no_show_grace_min);
    match state
        .booking_repo
        .list_elapsed_confirmed(completion_cutoff, SWEEP_BATCH)
        .await
    {
        Ok(finished) => {
            for booking in finished {
                if let Err(e) = state.lifecycle.complete(&booking.id).await {
                    error!("Failed to complete booking {}: {}", booking.id, e);
                }
            }
        }
        Err(e) => error!("Failed to fetch elapsed bookings: {}", e),
    }
}
