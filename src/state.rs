use crate::config::AppConfig;
use crate::services::AppointmentService;

pub struct AppState {
    pub appointments: AppointmentService,
    pub config: AppConfig,
}

impl AppState {
    pub fn new(config: AppConfig, appointments: AppointmentService) -> Self {
        Self {
            appointments,
            config,
        }
    }
}
