use crate::domain::models::slot::TimeSlot;
use serde::Serialize;

#[derive(Serialize)]
pub struct SlotsResponse {
    pub date: String,
    pub slots: Vec<TimeSlot>,
}
