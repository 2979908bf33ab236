// Vehicle domain model - identity plus append-only metric history
use crate::domain::error::FleetError;
use crate::domain::metrics::{BatteryHealth, ChargingState, MetricRecord};
use crate::domain::telemetry::{RawBatteryHealth, RawState, RawVehicle, required};
use chrono::{DateTime, Utc};

#[derive(Debug, Clone)]
pub struct Vehicle {
    pub vin: String,
    pub display_name: String,
    is_active: bool,
    battery_health: Option<BatteryHealth>,
    history: Vec<MetricRecord>,
}

impl Vehicle {
    /// Build a vehicle from its descriptor and ingest the first snapshot.
    pub fn new(raw: &RawVehicle, health: Option<&RawBatteryHealth>) -> Result<Self, FleetError> {
        if raw.vin.is_empty() {
            return Err(FleetError::malformed("vin"));
        }
        let state = required(&raw.last_state, "last_state")?;
        let display_name = required(&state.display_name, "last_state.display_name")?;
        let health = health.map(BatteryHealth::try_from).transpose()?;

        let mut vehicle = Self::empty(raw.vin.clone(), display_name.clone());
        vehicle.append(state, raw.is_active.unwrap_or(false), health)?;

        Ok(vehicle)
    }

    pub fn empty(vin: String, display_name: String) -> Self {
        Self {
            vin,
            display_name,
            is_active: false,
            battery_health: None,
            history: Vec::new(),
        }
    }

    pub fn latest(&self) -> Option<&MetricRecord> {
        self.history.last()
    }

    pub fn history(&self) -> &[MetricRecord] {
        &self.history
    }

    pub fn is_active(&self) -> bool {
        self.is_active
    }

    pub fn battery_health(&self) -> Option<&BatteryHealth> {
        self.battery_health.as_ref()
    }

    /// Replace the health composite attached to subsequent snapshots.
    pub fn update_health(&mut self, raw: &RawBatteryHealth) -> Result<(), FleetError> {
        self.battery_health = Some(BatteryHealth::try_from(raw)?);
        Ok(())
    }

    /// Apply a later descriptor of this same vehicle, optionally with a new
    /// health composite. Flag, name and health change only if the snapshot
    /// is accepted.
    pub fn refresh(
        &mut self,
        raw: &RawVehicle,
        health: Option<BatteryHealth>,
    ) -> Result<&MetricRecord, FleetError> {
        if raw.vin != self.vin {
            return Err(FleetError::VinMismatch {
                expected: self.vin.clone(),
                reported: raw.vin.clone(),
            });
        }
        let state = required(&raw.last_state, "last_state")?;
        let is_active = raw.is_active.unwrap_or(self.is_active);
        self.append(state, is_active, health)
    }

    /// Flatten one raw state into a metric record and append it.
    ///
    /// Nothing is appended when validation fails.
    pub fn ingest(&mut self, state: &RawState) -> Result<&MetricRecord, FleetError> {
        let is_active = self.is_active;
        self.append(state, is_active, None)
    }

    fn append(
        &mut self,
        state: &RawState,
        is_active: bool,
        health: Option<BatteryHealth>,
    ) -> Result<&MetricRecord, FleetError> {
        let health = health.or_else(|| self.battery_health.clone());
        let record = self.normalize(state, is_active, health.clone())?;

        if let Some(previous) = self.latest() {
            if record.odometer < previous.odometer {
                return Err(FleetError::OdometerRegression {
                    vin: self.vin.clone(),
                    previous: previous.odometer,
                    reported: record.odometer,
                });
            }
        }

        self.is_active = is_active;
        self.battery_health = health;
        if let Some(name) = &state.display_name {
            self.display_name = name.clone();
        }
        self.history.push(record);
        tracing::debug!(vin = %self.vin, snapshots = self.history.len(), "ingested metrics");

        Ok(&self.history[self.history.len() - 1])
    }

    fn normalize(
        &self,
        state: &RawState,
        is_active: bool,
        battery_health: Option<BatteryHealth>,
    ) -> Result<MetricRecord, FleetError> {
        let charge = required(&state.charge_state, "charge_state")?;
        let drive = required(&state.drive_state, "drive_state")?;
        let climate = required(&state.climate_state, "climate_state")?;
        let vehicle_state = required(&state.vehicle_state, "vehicle_state")?;
        let config = required(&state.vehicle_config, "vehicle_config")?;

        let battery_level = *required(&charge.battery_level, "charge_state.battery_level")?;
        let battery_level = u8::try_from(battery_level)
            .ok()
            .filter(|level| *level <= 100)
            .ok_or_else(|| FleetError::malformed("charge_state.battery_level"))?;

        let charging_state: ChargingState =
            required(&charge.charging_state, "charge_state.charging_state")?.parse()?;

        let millis = *required(&drive.timestamp, "drive_state.timestamp")?;
        let timestamp = DateTime::<Utc>::from_timestamp_millis(millis)
            .ok_or_else(|| FleetError::malformed("drive_state.timestamp"))?;

        let odometer = *required(&vehicle_state.odometer, "vehicle_state.odometer")?;
        if !odometer.is_finite() || odometer < 0.0 {
            return Err(FleetError::malformed("vehicle_state.odometer"));
        }

        let text = |value: &Option<String>| value.clone().unwrap_or_default();

        Ok(MetricRecord {
            timestamp,
            is_active,
            display_name: state
                .display_name
                .clone()
                .unwrap_or_else(|| self.display_name.clone()),
            vin: self.vin.clone(),
            battery_level,
            battery_range: *required(&charge.battery_range, "charge_state.battery_range")?,
            charging_state,
            lifetime_energy_used: vehicle_state
                .lifetime_energy_used
                .filter(|kwh| kwh.is_finite() && *kwh >= 0.0),
            battery_health,
            latitude: *required(&drive.latitude, "drive_state.latitude")?,
            longitude: *required(&drive.longitude, "drive_state.longitude")?,
            speed: drive.speed,
            power: drive.power.unwrap_or(0.0),
            odometer,
            inside_temp: *required(&climate.inside_temp, "climate_state.inside_temp")?,
            outside_temp: *required(&climate.outside_temp, "climate_state.outside_temp")?,
            is_climate_on: climate.is_climate_on.unwrap_or(false),
            model_type: required(&config.car_type, "vehicle_config.car_type")?.clone(),
            performance_package: text(&config.performance_package),
            trim_badging: text(&config.trim_badging),
            efficiency_package: text(&config.efficiency_package),
        })
    }
}
