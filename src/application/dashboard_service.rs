// Dashboard service - Use case for building the fleet dashboard data
use crate::domain::dashboard::{BarData, Dashboard, LocationMarker};
use crate::domain::fleet::Fleet;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Clone)]
pub struct DashboardService {
    fleet: Arc<RwLock<Fleet>>,
}

impl DashboardService {
    pub fn new(fleet: Arc<RwLock<Fleet>>) -> Self {
        Self { fleet }
    }

    pub async fn get_dashboard(&self) -> Dashboard {
        let fleet = self.fleet.read().await;
        Self::build(&fleet)
    }

    fn build(fleet: &Fleet) -> Dashboard {
        let mut battery_levels = Vec::new();
        let mut locations = Vec::new();
        let mut lifetime_energy: Vec<BarData> = Vec::new();

        for vehicle in fleet.vehicles() {
            let Some(metrics) = vehicle.latest() else {
                // No data yet, skip this vehicle
                continue;
            };

            battery_levels.push(Dashboard::battery_bar(
                vehicle.display_name.clone(),
                metrics.battery_level,
            ));

            locations.push(LocationMarker {
                name: vehicle.display_name.clone(),
                latitude: metrics.latitude,
                longitude: metrics.longitude,
            });

            if let Some(kwh) = metrics.lifetime_energy_used {
                lifetime_energy.push(Dashboard::energy_bar(vehicle.display_name.clone(), kwh));
            }
        }

        let title = if fleet.is_empty() {
            "Fleet Dashboard (no vehicles)".to_string()
        } else {
            format!("Fleet Dashboard ({} vehicles)", fleet.len())
        };
        Dashboard::new(title, battery_levels, locations, lifetime_energy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::fixtures;
    use crate::domain::vehicle::Vehicle;

    #[tokio::test]
    async fn test_dashboard_from_latest_metrics() {
        let mut fleet = Fleet::new();
        let mut blue = fixtures::raw_vehicle("VIN1", "Blue", "model3", 1000.0, Some(12345.4));
        blue.last_state
            .as_mut()
            .and_then(|s| s.drive_state.as_mut())
            .unwrap()
            .latitude = Some(40.0);
        fleet.add(Vehicle::new(&blue, None).unwrap());
        fleet.add(Vehicle::new(&fixtures::raw_vehicle("VIN2", "Red", "modely", 10.0, None), None).unwrap());
        fleet.add(Vehicle::empty("VIN3".to_string(), "Grey".to_string()));

        let service = DashboardService::new(Arc::new(RwLock::new(fleet)));
        let dashboard = service.get_dashboard().await;

        assert_eq!(dashboard.title, "Fleet Dashboard (3 vehicles)");
        assert_eq!(dashboard.battery_levels.len(), 2);
        assert_eq!(dashboard.battery_levels[0].label, "80%");
        assert_eq!(dashboard.locations.len(), 2);

        let center = dashboard.map_center.unwrap();
        assert!((center.latitude - (40.0 + 37.77) / 2.0).abs() < 1e-9);
        assert!((center.longitude + 122.42).abs() < 1e-9);

        assert_eq!(dashboard.lifetime_energy.len(), 1);
        assert_eq!(dashboard.lifetime_energy[0].name, "Blue");
        assert_eq!(dashboard.lifetime_energy[0].label, "12,345 kWh");
    }

    #[tokio::test]
    async fn test_empty_fleet_dashboard() {
        let service = DashboardService::new(Arc::new(RwLock::new(Fleet::new())));
        let dashboard = service.get_dashboard().await;
        assert_eq!(dashboard.title, "Fleet Dashboard (no vehicles)");
        assert!(dashboard.battery_levels.is_empty());
        assert_eq!(dashboard.map_center, None);
    }
}
