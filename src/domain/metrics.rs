// Metric record domain model
use crate::domain::error::FleetError;
use crate::domain::telemetry::RawBatteryHealth;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ChargingState {
    Charging,
    Disconnected,
    Stopped,
    Complete,
}

impl ChargingState {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChargingState::Charging => "Charging",
            ChargingState::Disconnected => "Disconnected",
            ChargingState::Stopped => "Stopped",
            ChargingState::Complete => "Complete",
        }
    }
}

impl FromStr for ChargingState {
    type Err = FleetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Charging" => Ok(ChargingState::Charging),
            "Disconnected" => Ok(ChargingState::Disconnected),
            "Stopped" => Ok(ChargingState::Stopped),
            "Complete" => Ok(ChargingState::Complete),
            _ => Err(FleetError::malformed("charge_state.charging_state")),
        }
    }
}

impl fmt::Display for ChargingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Long-term battery condition, independent of any single snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BatteryHealth {
    pub max_range: f64,
    pub max_ideal_range: f64,
    pub capacity: f64,
    pub original_capacity: f64,
    pub degradation_percent: f64,
    pub health_percent: f64,
}

impl TryFrom<&RawBatteryHealth> for BatteryHealth {
    type Error = FleetError;

    fn try_from(raw: &RawBatteryHealth) -> Result<Self, Self::Error> {
        let field = |value: Option<f64>, name: &str| {
            value.ok_or_else(|| FleetError::malformed(format!("battery_health.{}", name)))
        };

        Ok(Self {
            max_range: field(raw.max_range, "max_range")?,
            max_ideal_range: field(raw.max_ideal_range, "max_ideal_range")?,
            capacity: field(raw.capacity, "capacity")?,
            original_capacity: field(raw.original_capacity, "original_capacity")?,
            degradation_percent: field(raw.degradation_percent, "degradation_percent")?,
            health_percent: field(raw.health_percent, "health_percent")?,
        })
    }
}

/// One immutable snapshot of a vehicle's telemetry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricRecord {
    pub timestamp: DateTime<Utc>,
    pub is_active: bool,
    pub display_name: String,
    pub vin: String,

    pub battery_level: u8,
    pub battery_range: f64,
    pub charging_state: ChargingState,
    /// `None` when the vehicle does not report it.
    pub lifetime_energy_used: Option<f64>,
    pub battery_health: Option<BatteryHealth>,

    pub latitude: f64,
    pub longitude: f64,
    pub speed: Option<f64>,
    pub power: f64,
    pub odometer: f64,

    pub inside_temp: f64,
    pub outside_temp: f64,
    pub is_climate_on: bool,

    pub model_type: String,
    pub performance_package: String,
    pub trim_badging: String,
    pub efficiency_package: String,
}

impl MetricRecord {
    /// Reported lifetime energy, treating zero as not reported.
    pub fn reported_energy(&self) -> Option<f64> {
        self.lifetime_energy_used.filter(|kwh| *kwh > 0.0)
    }

    pub fn is_charging(&self) -> bool {
        self.charging_state == ChargingState::Charging
    }
}
