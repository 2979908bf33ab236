// Energy efficiency and cost analysis over a fleet's latest metrics
use crate::domain::error::FleetError;
use crate::domain::format::with_thousands;
use crate::domain::metrics::MetricRecord;
use crate::domain::vehicle::Vehicle;
use serde::Serialize;
use std::fmt;

pub const DEFAULT_KWH_RATE: f64 = 0.36;

/// Estimated kWh per mile for a Model Y Long Range.
pub const MODEL_Y_KWH_PER_MILE: f64 = 0.285;
/// Estimated kWh per mile for everything else (Model 3 Standard Range).
pub const DEFAULT_KWH_PER_MILE: f64 = 0.245;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum EnergySource {
    Actual,
    Estimated,
}

impl fmt::Display for EnergySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EnergySource::Actual => f.write_str("Actual"),
            EnergySource::Estimated => f.write_str("Estimated"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VehicleEfficiency {
    pub name: String,
    pub model: String,
    pub total_miles: f64,
    pub total_energy: f64,
    /// kWh per mile.
    pub efficiency: f64,
    pub total_cost: f64,
    pub cost_per_mile: f64,
    pub source: EnergySource,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetEfficiency {
    pub total_vehicles: usize,
    pub total_energy_used: f64,
    pub total_miles: f64,
    pub fleet_efficiency: f64,
    pub total_cost: f64,
    pub average_cost_per_mile: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EfficiencyReport {
    /// Most efficient first.
    pub vehicles: Vec<VehicleEfficiency>,
    pub fleet_summary: FleetEfficiency,
}

#[derive(Debug, Clone, Copy)]
pub struct EfficiencyAnalyzer {
    kwh_rate: f64,
}

impl Default for EfficiencyAnalyzer {
    fn default() -> Self {
        Self {
            kwh_rate: DEFAULT_KWH_RATE,
        }
    }
}

/// Ratio that yields 0 for a zero denominator.
fn guarded_ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator > 0.0 {
        numerator / denominator
    } else {
        0.0
    }
}

/// Per-mile constant used when a vehicle does not report lifetime energy.
pub fn estimated_kwh_per_mile(model_type: &str) -> f64 {
    if model_type.to_lowercase() == "modely" {
        MODEL_Y_KWH_PER_MILE
    } else {
        DEFAULT_KWH_PER_MILE
    }
}

impl EfficiencyAnalyzer {
    pub fn new(kwh_rate: f64) -> Result<Self, FleetError> {
        if !kwh_rate.is_finite() || kwh_rate <= 0.0 {
            return Err(FleetError::InvalidRate(kwh_rate));
        }
        Ok(Self { kwh_rate })
    }

    pub fn kwh_rate(&self) -> f64 {
        self.kwh_rate
    }

    fn vehicle_efficiency(&self, vehicle: &Vehicle, metrics: &MetricRecord) -> Option<VehicleEfficiency> {
        let miles = metrics.odometer;
        if miles <= 0.0 {
            return None;
        }

        let (total_energy, source) = match metrics.reported_energy() {
            Some(kwh) => (kwh, EnergySource::Actual),
            None => (
                miles * estimated_kwh_per_mile(&metrics.model_type),
                EnergySource::Estimated,
            ),
        };

        let total_cost = total_energy * self.kwh_rate;

        Some(VehicleEfficiency {
            name: vehicle.display_name.clone(),
            model: metrics.model_type.clone(),
            total_miles: miles,
            total_energy,
            efficiency: total_energy / miles,
            total_cost,
            cost_per_mile: total_cost / miles,
            source,
        })
    }

    pub fn analyze(&self, vehicles: &[Vehicle]) -> EfficiencyReport {
        let mut rows: Vec<VehicleEfficiency> = vehicles
            .iter()
            .filter_map(|v| v.latest().and_then(|m| self.vehicle_efficiency(v, m)))
            .collect();

        rows.sort_by(|a, b| a.efficiency.total_cmp(&b.efficiency));

        let total_energy_used: f64 = rows.iter().map(|r| r.total_energy).sum();
        let total_miles: f64 = rows.iter().map(|r| r.total_miles).sum();
        let total_cost = total_energy_used * self.kwh_rate;

        tracing::debug!(
            included = rows.len(),
            skipped = vehicles.len() - rows.len(),
            "computed fleet efficiency"
        );

        EfficiencyReport {
            vehicles: rows,
            fleet_summary: FleetEfficiency {
                total_vehicles: vehicles.len(),
                total_energy_used,
                total_miles,
                fleet_efficiency: guarded_ratio(total_energy_used, total_miles),
                total_cost,
                average_cost_per_mile: guarded_ratio(total_cost, total_miles),
            },
        }
    }

    pub fn text_report(&self, vehicles: &[Vehicle]) -> String {
        render_text_report(&self.analyze(vehicles))
    }
}

pub fn render_text_report(report: &EfficiencyReport) -> String {
    let summary = &report.fleet_summary;
    let mut lines = vec![
        "Energy Efficiency and Cost Analysis Report".to_string(),
        String::new(),
        "Fleet Summary:".to_string(),
        format!("- Total Vehicles: {}", summary.total_vehicles),
        format!("- Total Energy Used: {} kWh", with_thousands(summary.total_energy_used, 2)),
        format!("- Total Miles Driven: {} miles", with_thousands(summary.total_miles, 2)),
        format!("- Fleet Average Efficiency: {:.3} kWh/mile", summary.fleet_efficiency),
        format!("- Total Energy Cost: ${}", with_thousands(summary.total_cost, 2)),
        format!("- Average Cost per Mile: ${:.3}", summary.average_cost_per_mile),
        String::new(),
        "Vehicle Rankings (by efficiency):".to_string(),
    ];

    for (idx, vehicle) in report.vehicles.iter().enumerate() {
        lines.push(String::new());
        lines.push(format!(
            "{}. {} ({}) - {} Data:",
            idx + 1,
            vehicle.name,
            vehicle.model,
            vehicle.source
        ));
        lines.push(format!("   - Efficiency: {:.3} kWh/mile", vehicle.efficiency));
        lines.push(format!("   - Total Energy Used: {} kWh", with_thousands(vehicle.total_energy, 1)));
        lines.push(format!("   - Total Cost: ${}", with_thousands(vehicle.total_cost, 2)));
        lines.push(format!("   - Cost per Mile: ${:.3}", vehicle.cost_per_mile));
    }

    lines.join("\n")
}
