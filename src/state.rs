use std::sync::Arc;

use crate::config::Config;
use crate::domain::ports::{
    BookingRepository, BusinessHoursProvider, BusinessRepository, NotificationSender,
    ServiceCatalog,
};
use crate::domain::services::lifecycle::BookingLifecycle;
use crate::domain::services::scheduler::BookingScheduler;

#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub business_repo: Arc<dyn BusinessRepository>,
    pub hours: Arc<dyn BusinessHoursProvider>,
    pub service_catalog: Arc<dyn ServiceCatalog>,
    pub booking_repo: Arc<dyn BookingRepository>,
    pub notifier: Arc<dyn NotificationSender>,
    pub scheduler: Arc<BookingScheduler>,
    pub lifecycle: Arc<BookingLifecycle>,
}
