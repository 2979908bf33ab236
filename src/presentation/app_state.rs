// Application state for HTTP handlers
use crate::application::dashboard_service::DashboardService;
use crate::application::fleet_service::FleetService;

#[derive(Clone)]
pub struct AppState {
    pub fleet_service: FleetService,
    pub dashboard_service: DashboardService,
}

impl AppState {
    pub fn new(fleet_service: FleetService) -> Self {
        let dashboard_service = DashboardService::new(fleet_service.fleet());
        Self {
            fleet_service,
            dashboard_service,
        }
    }
}
