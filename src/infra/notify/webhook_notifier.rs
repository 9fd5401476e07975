use crate::domain::models::booking::Booking;
use crate::domain::ports::NotificationSender;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, error};

/// Posts booking events to an external notification endpoint. With no URL
/// configured (local dev, tests) events are logged and dropped.
pub struct WebhookNotifier {
    client: Client,
    url: Option<String>,
    token: String,
}

impl WebhookNotifier {
    pub fn new(url: Option<String>, token: String) -> Self {
        Self {
            client: Client::new(),
            url,
            token,
        }
    }
}

#[derive(Serialize)]
struct BookingEventPayload<'a> {
    event: &'a str,
    booking_id: &'a str,
    business_id: &'a str,
    service_id: &'a str,
    customer_id: &'a str,
    start_time: String,
    end_time: String,
    status: &'a str,
}

#[async_trait]
impl NotificationSender for WebhookNotifier {
    async fn booking_event(&self, event: &str, booking: &Booking) -> Result<(), AppError> {
        let Some(url) = &self.url else {
            debug!("Notification sink not configured, dropping '{}' for booking {}", event, booking.id);
            return Ok(());
        };

        let payload = BookingEventPayload {
            event,
            booking_id: &booking.id,
            business_id: &booking.business_id,
            service_id: &booking.service_id,
            customer_id: &booking.customer_id,
            start_time: booking.start_time.to_rfc3339(),
            end_time: booking.end_time.to_rfc3339(),
            status: booking.status.as_str(),
        };

        let res = self.client.post(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                let msg = format!("Notification service connection error: {}", e);
                error!("{}", msg);
                AppError::Internal(msg)
            })?;

        if !res.status().is_success() {
            let status = res.status();
            let text = res.text().await.unwrap_or_default();
            let msg = format!("Notification service failed. Status: {}, Body: {}", status, text);
            error!("{}", msg);
            return Err(AppError::Internal(msg));
        }

        Ok(())
    }
}
