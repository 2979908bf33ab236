// Source trait for raw vehicle telemetry
use crate::domain::telemetry::{RawBatteryHealth, RawVehicle};
use async_trait::async_trait;

#[async_trait]
pub trait TelemetrySource: Send + Sync {
    /// List descriptors for every vehicle, active or not
    async fn list_vehicles(&self) -> anyhow::Result<Vec<RawVehicle>>;

    /// Battery health descriptors, one per vehicle that reports it
    async fn battery_health(&self) -> anyhow::Result<Vec<RawBatteryHealth>>;
}
