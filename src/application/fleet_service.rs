// Fleet service - Use cases for polling telemetry and reading fleet analytics
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::efficiency::{EfficiencyAnalyzer, EfficiencyReport, render_text_report};
use crate::domain::fleet::{ExportRow, Fleet, FleetSummary};
use crate::domain::metrics::{BatteryHealth, MetricRecord};
use crate::domain::telemetry::RawBatteryHealth;
use crate::domain::vehicle::Vehicle;
use crate::infrastructure::report_files;
use serde::Serialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PollOutcome {
    pub added: usize,
    pub refreshed: usize,
    pub rejected: usize,
}

/// A vehicle's identity with its most recent snapshot, if any.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleStatus {
    pub vin: String,
    pub display_name: String,
    pub latest: Option<MetricRecord>,
}

impl From<&Vehicle> for VehicleStatus {
    fn from(vehicle: &Vehicle) -> Self {
        Self {
            vin: vehicle.vin.clone(),
            display_name: vehicle.display_name.clone(),
            latest: vehicle.latest().cloned(),
        }
    }
}

#[derive(Clone)]
pub struct FleetService {
    source: Arc<dyn TelemetrySource>,
    fleet: Arc<RwLock<Fleet>>,
    analyzer: EfficiencyAnalyzer,
}

impl FleetService {
    pub fn new(source: Arc<dyn TelemetrySource>, analyzer: EfficiencyAnalyzer) -> Self {
        Self {
            source,
            fleet: Arc::new(RwLock::new(Fleet::new())),
            analyzer,
        }
    }

    pub fn fleet(&self) -> Arc<RwLock<Fleet>> {
        self.fleet.clone()
    }

    /// Fetch every vehicle once and fold the snapshots into the fleet
    pub async fn poll(&self) -> anyhow::Result<PollOutcome> {
        let vehicles = self.source.list_vehicles().await?;

        let health: HashMap<String, RawBatteryHealth> = match self.source.battery_health().await {
            Ok(items) => items.into_iter().map(|h| (h.vin.clone(), h)).collect(),
            Err(e) => {
                tracing::warn!(error = %e, "battery health unavailable, continuing without it");
                HashMap::new()
            }
        };

        let mut outcome = PollOutcome::default();
        let mut fleet = self.fleet.write().await;

        for raw in &vehicles {
            let health = health.get(&raw.vin);

            match fleet.get_mut(&raw.vin) {
                Some(vehicle) => {
                    // committed together with the snapshot, or not at all
                    let staged = health.and_then(|h| match BatteryHealth::try_from(h) {
                        Ok(parsed) => Some(parsed),
                        Err(e) => {
                            tracing::warn!(vin = %raw.vin, error = %e, "ignoring battery health");
                            None
                        }
                    });
                    match vehicle.refresh(raw, staged) {
                        Ok(_) => outcome.refreshed += 1,
                        Err(e) => {
                            tracing::warn!(vin = %raw.vin, error = %e, "rejected vehicle snapshot");
                            outcome.rejected += 1;
                        }
                    }
                }
                None => match Vehicle::new(raw, health) {
                    Ok(vehicle) => {
                        tracing::info!(vin = %vehicle.vin, name = %vehicle.display_name, "tracking new vehicle");
                        fleet.add(vehicle);
                        outcome.added += 1;
                    }
                    Err(e) => {
                        tracing::warn!(vin = %raw.vin, error = %e, "rejected vehicle descriptor");
                        outcome.rejected += 1;
                    }
                },
            }
        }

        tracing::info!(
            added = outcome.added,
            refreshed = outcome.refreshed,
            rejected = outcome.rejected,
            fleet_size = fleet.len(),
            "poll complete"
        );

        Ok(outcome)
    }

    /// Poll on a fixed interval until the task is aborted
    pub fn spawn_polling(self, interval: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                if let Err(e) = self.poll().await {
                    tracing::error!(error = %e, "fleet poll failed");
                }
            }
        })
    }

    pub async fn summary(&self) -> FleetSummary {
        self.fleet.read().await.summary()
    }

    pub async fn efficiency_report(&self) -> EfficiencyReport {
        let fleet = self.fleet.read().await;
        self.analyzer.analyze(fleet.vehicles())
    }

    pub async fn text_report(&self) -> String {
        render_text_report(&self.efficiency_report().await)
    }

    pub async fn export_rows(&self) -> Vec<ExportRow> {
        self.fleet.read().await.export_rows()
    }

    pub async fn vehicles_latest(&self) -> Vec<VehicleStatus> {
        let fleet = self.fleet.read().await;
        fleet.vehicles().iter().map(VehicleStatus::from).collect()
    }

    pub async fn latest_for(&self, vin: &str) -> Option<VehicleStatus> {
        self.fleet.read().await.get(vin).map(VehicleStatus::from)
    }

    /// Save the text report and CSV export to whichever paths are given
    pub async fn write_reports(
        &self,
        text_report_path: Option<&Path>,
        export_path: Option<&Path>,
    ) -> anyhow::Result<()> {
        if let Some(path) = text_report_path {
            report_files::write_text_report(path, &self.text_report().await).await?;
        }
        if let Some(path) = export_path {
            report_files::write_export_csv(path, &self.export_rows().await).await?;
        }
        Ok(())
    }
}
