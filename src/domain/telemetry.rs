// Raw telemetry record schema as delivered by the vehicle data provider
//
// Every block is optional at the serde level so that a missing block surfaces
// as a `FleetError::MalformedInput` naming its path instead of a parse failure
// for the whole batch.
use crate::domain::error::FleetError;
use serde::{Deserialize, Serialize};

/// Vehicle descriptor: identity plus the most recent nested state.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawVehicle {
    #[serde(default)]
    pub vin: String,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default)]
    pub last_state: Option<RawState>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawState {
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub charge_state: Option<RawChargeState>,
    #[serde(default)]
    pub drive_state: Option<RawDriveState>,
    #[serde(default)]
    pub climate_state: Option<RawClimateState>,
    #[serde(default)]
    pub vehicle_state: Option<RawVehicleState>,
    #[serde(default)]
    pub vehicle_config: Option<RawVehicleConfig>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawChargeState {
    pub battery_level: Option<i64>,
    pub battery_range: Option<f64>,
    pub charging_state: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawDriveState {
    /// Epoch milliseconds.
    pub timestamp: Option<i64>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    #[serde(default)]
    pub speed: Option<f64>,
    #[serde(default)]
    pub power: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawClimateState {
    pub inside_temp: Option<f64>,
    pub outside_temp: Option<f64>,
    #[serde(default)]
    pub is_climate_on: Option<bool>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawVehicleState {
    pub odometer: Option<f64>,
    #[serde(default)]
    pub lifetime_energy_used: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawVehicleConfig {
    pub car_type: Option<String>,
    #[serde(default)]
    pub performance_package: Option<String>,
    #[serde(default)]
    pub trim_badging: Option<String>,
    #[serde(default)]
    pub efficiency_package: Option<String>,
}

/// Battery health descriptor, keyed by VIN.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct RawBatteryHealth {
    #[serde(default)]
    pub vin: String,
    pub max_range: Option<f64>,
    pub max_ideal_range: Option<f64>,
    pub capacity: Option<f64>,
    pub original_capacity: Option<f64>,
    pub degradation_percent: Option<f64>,
    pub health_percent: Option<f64>,
}

/// Unwrap a required sub-structure or leaf, naming `path` on absence.
pub fn required<'a, T>(value: &'a Option<T>, path: &str) -> Result<&'a T, FleetError> {
    value.as_ref().ok_or_else(|| FleetError::malformed(path))
}

#[cfg(test)]
pub mod fixtures {
    use super::*;
    use serde_json::json;

    pub fn raw_state(name: &str, car_type: &str, odometer: f64, energy: Option<f64>) -> RawState {
        serde_json::from_value(json!({
            "display_name": name,
            "charge_state": {
                "battery_level": 80,
                "battery_range": 250.5,
                "charging_state": "Disconnected"
            },
            "drive_state": {
                "timestamp": 1_700_000_000_000i64,
                "latitude": 37.77,
                "longitude": -122.42,
                "speed": null,
                "power": null
            },
            "climate_state": {
                "inside_temp": 21.5,
                "outside_temp": 15.0,
                "is_climate_on": false
            },
            "vehicle_state": {
                "odometer": odometer,
                "lifetime_energy_used": energy
            },
            "vehicle_config": {
                "car_type": car_type,
                "performance_package": "Base",
                "trim_badging": "74d",
                "efficiency_package": "Default"
            }
        }))
        .expect("fixture state")
    }

    pub fn raw_vehicle(vin: &str, name: &str, car_type: &str, odometer: f64, energy: Option<f64>) -> RawVehicle {
        RawVehicle {
            vin: vin.to_string(),
            is_active: Some(true),
            last_state: Some(raw_state(name, car_type, odometer, energy)),
        }
    }

    pub fn raw_health(vin: &str, health_percent: f64) -> RawBatteryHealth {
        RawBatteryHealth {
            vin: vin.to_string(),
            max_range: Some(310.0),
            max_ideal_range: Some(330.0),
            capacity: Some(72.5),
            original_capacity: Some(78.0),
            degradation_percent: Some(100.0 - health_percent),
            health_percent: Some(health_percent),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_blocks_deserialize_as_none() {
        let raw: RawVehicle = serde_json::from_value(json!({
            "vin": "5YJ3E1EA7KF000001",
            "last_state": { "display_name": "Blue" }
        }))
        .unwrap();

        let state = raw.last_state.unwrap();
        assert!(state.charge_state.is_none());
        assert_eq!(
            required(&state.charge_state, "charge_state").unwrap_err(),
            FleetError::malformed("charge_state")
        );
    }

    #[test]
    fn test_null_power_is_none() {
        let state = fixtures::raw_state("Blue", "model3", 10.0, None);
        assert!(state.drive_state.unwrap().power.is_none());
    }
}
