// Fleet domain model - vehicle collection and real-time summary
use crate::domain::metrics::MetricRecord;
use crate::domain::vehicle::Vehicle;
use chrono::{DateTime, Utc};
use serde::Serialize;

#[derive(Debug, Clone, Default)]
pub struct Fleet {
    vehicles: Vec<Vehicle>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetSummary {
    pub total_vehicles: usize,
    pub active_vehicles: usize,
    pub total_fleet_miles: f64,
    /// Mean over vehicles with metrics; 0 when none have any.
    pub average_battery_level: f64,
    pub vehicles_charging: usize,
}

/// One flat row of a vehicle's latest metrics for tabular export.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExportRow {
    pub timestamp: DateTime<Utc>,
    pub vehicle_name: String,
    pub vehicle_type: String,
    pub battery_level: u8,
    pub battery_range: f64,
    pub is_active: bool,
    pub charging_state: String,
    pub odometer: f64,
    pub inside_temp: f64,
    pub outside_temp: f64,
}

impl Fleet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a vehicle; identifiers are not deduplicated.
    pub fn add(&mut self, vehicle: Vehicle) {
        self.vehicles.push(vehicle);
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn len(&self) -> usize {
        self.vehicles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vehicles.is_empty()
    }

    pub fn get(&self, vin: &str) -> Option<&Vehicle> {
        self.vehicles.iter().find(|v| v.vin == vin)
    }

    pub fn get_mut(&mut self, vin: &str) -> Option<&mut Vehicle> {
        self.vehicles.iter_mut().find(|v| v.vin == vin)
    }

    fn latest_metrics(&self) -> impl Iterator<Item = (&Vehicle, &MetricRecord)> {
        self.vehicles
            .iter()
            .filter_map(|v| v.latest().map(|m| (v, m)))
    }

    pub fn summary(&self) -> FleetSummary {
        let mut reporting = 0usize;
        let mut active_vehicles = 0usize;
        let mut vehicles_charging = 0usize;
        let mut total_fleet_miles = 0.0;
        let mut battery_total = 0.0;

        for (_, metrics) in self.latest_metrics() {
            reporting += 1;
            if metrics.is_active {
                active_vehicles += 1;
            }
            if metrics.is_charging() {
                vehicles_charging += 1;
            }
            total_fleet_miles += metrics.odometer;
            battery_total += f64::from(metrics.battery_level);
        }

        let average_battery_level = if reporting > 0 {
            battery_total / reporting as f64
        } else {
            0.0
        };

        FleetSummary {
            total_vehicles: self.vehicles.len(),
            active_vehicles,
            total_fleet_miles,
            average_battery_level,
            vehicles_charging,
        }
    }

    pub fn export_rows(&self) -> Vec<ExportRow> {
        self.latest_metrics()
            .map(|(vehicle, m)| ExportRow {
                timestamp: m.timestamp,
                vehicle_name: vehicle.display_name.clone(),
                vehicle_type: m.model_type.clone(),
                battery_level: m.battery_level,
                battery_range: m.battery_range,
                is_active: m.is_active,
                charging_state: m.charging_state.to_string(),
                odometer: m.odometer,
                inside_temp: m.inside_temp,
                outside_temp: m.outside_temp,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::telemetry::fixtures;

    fn vehicle(vin: &str, odometer: f64, level: i64, charging: &str, active: bool) -> Vehicle {
        let mut raw = fixtures::raw_vehicle(vin, vin, "model3", odometer, None);
        raw.is_active = Some(active);
        let charge = raw
            .last_state
            .as_mut()
            .and_then(|s| s.charge_state.as_mut())
            .unwrap();
        charge.battery_level = Some(level);
        charge.charging_state = Some(charging.to_string());
        Vehicle::new(&raw, None).unwrap()
    }

    #[test]
    fn test_summary() {
        let mut fleet = Fleet::new();
        fleet.add(vehicle("A", 1000.0, 80, "Charging", true));
        fleet.add(vehicle("B", 2500.0, 60, "Disconnected", false));
        fleet.add(vehicle("C", 500.0, 40, "Charging", true));

        let summary = fleet.summary();
        assert_eq!(summary.total_vehicles, 3);
        assert_eq!(summary.active_vehicles, 2);
        assert_eq!(summary.vehicles_charging, 2);
        assert_eq!(summary.total_fleet_miles, 4000.0);
        assert_eq!(summary.average_battery_level, 60.0);
    }

    #[test]
    fn test_empty_fleet_summary_is_zero() {
        let fleet = Fleet::new();
        assert!(fleet.is_empty());
        let summary = fleet.summary();
        assert_eq!(
            summary,
            FleetSummary {
                total_vehicles: 0,
                active_vehicles: 0,
                total_fleet_miles: 0.0,
                average_battery_level: 0.0,
                vehicles_charging: 0,
            }
        );
    }

    #[test]
    fn test_vehicle_without_metrics_counts_only_toward_total() {
        let mut fleet = Fleet::new();
        fleet.add(Vehicle::empty("X".to_string(), "Empty".to_string()));
        fleet.add(vehicle("A", 1000.0, 50, "Stopped", true));

        let summary = fleet.summary();
        assert_eq!(summary.total_vehicles, 2);
        assert_eq!(summary.average_battery_level, 50.0);
        assert_eq!(fleet.get("X").unwrap().latest(), None);
    }

    #[test]
    fn test_add_does_not_dedup() {
        let mut fleet = Fleet::new();
        fleet.add(vehicle("A", 1.0, 50, "Stopped", true));
        fleet.add(vehicle("A", 2.0, 50, "Stopped", true));
        assert_eq!(fleet.len(), 2);
        assert!(!fleet.is_empty());
        assert_eq!(fleet.get("A").unwrap().latest().unwrap().odometer, 1.0);
    }

    #[test]
    fn test_export_rows() {
        let mut fleet = Fleet::new();
        fleet.add(vehicle("A", 1000.0, 80, "Complete", true));
        fleet.add(Vehicle::empty("X".to_string(), "Empty".to_string()));

        let rows = fleet.export_rows();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].vehicle_name, "A");
        assert_eq!(rows[0].vehicle_type, "model3");
        assert_eq!(rows[0].charging_state, "Complete");
        assert_eq!(rows[0].odometer, 1000.0);
    }
}
