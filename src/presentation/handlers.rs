// HTTP request handlers
use crate::application::fleet_service::VehicleStatus;
use crate::domain::dashboard::Dashboard;
use crate::domain::efficiency::EfficiencyReport;
use crate::domain::fleet::FleetSummary;
use crate::infrastructure::http_response::{TEXT_PLAIN, csv_attachment, typed_response};
use crate::infrastructure::report_files::export_csv;
use crate::presentation::app_state::AppState;
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::sync::Arc;

/// Health check endpoint
pub async fn health_check() -> &'static str {
    "ok"
}

pub async fn fleet_summary(State(state): State<Arc<AppState>>) -> Json<FleetSummary> {
    Json(state.fleet_service.summary().await)
}

pub async fn efficiency_report(State(state): State<Arc<AppState>>) -> Json<EfficiencyReport> {
    Json(state.fleet_service.efficiency_report().await)
}

/// Plain-text efficiency ranking
pub async fn text_report(State(state): State<Arc<AppState>>) -> Response {
    let report = state.fleet_service.text_report().await;
    match typed_response(report.into_bytes(), TEXT_PLAIN) {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

pub async fn dashboard(State(state): State<Arc<AppState>>) -> Json<Dashboard> {
    Json(state.dashboard_service.get_dashboard().await)
}

/// Latest metrics of every vehicle as CSV
pub async fn export_metrics(State(state): State<Arc<AppState>>) -> Response {
    let rows = state.fleet_service.export_rows().await;
    let body = match export_csv(&rows) {
        Ok(body) => body,
        Err(e) => {
            tracing::error!(error = %e, "failed to build fleet export");
            return StatusCode::INTERNAL_SERVER_ERROR.into_response();
        }
    };

    match csv_attachment(body, "fleet_metrics.csv") {
        Ok(response) => response,
        Err(status) => status.into_response(),
    }
}

pub async fn list_vehicles(State(state): State<Arc<AppState>>) -> Json<Vec<VehicleStatus>> {
    Json(state.fleet_service.vehicles_latest().await)
}

/// Latest snapshot for one vehicle: 404 if unknown, 204 if it has no data yet
pub async fn vehicle_latest(
    Path(vin): Path<String>,
    State(state): State<Arc<AppState>>,
) -> Response {
    match state.fleet_service.latest_for(&vin).await {
        Some(status) if status.latest.is_some() => Json(status).into_response(),
        Some(_) => StatusCode::NO_CONTENT.into_response(),
        None => StatusCode::NOT_FOUND.into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::fleet_service::FleetService;
    use crate::application::telemetry_source::TelemetrySource;
    use crate::domain::efficiency::EfficiencyAnalyzer;
    use crate::domain::telemetry::{RawBatteryHealth, RawVehicle, fixtures};
    use crate::domain::vehicle::Vehicle;
    use async_trait::async_trait;
    use axum::http::header;

    struct StaticSource(Vec<RawVehicle>);

    #[async_trait]
    impl TelemetrySource for StaticSource {
        async fn list_vehicles(&self) -> anyhow::Result<Vec<RawVehicle>> {
            Ok(self.0.clone())
        }

        async fn battery_health(&self) -> anyhow::Result<Vec<RawBatteryHealth>> {
            Ok(vec![])
        }
    }

    async fn state() -> Arc<AppState> {
        let source = StaticSource(vec![
            fixtures::raw_vehicle("VIN1", "Blue", "model3", 1000.0, Some(245.0)),
            fixtures::raw_vehicle("VIN2", "Red", "modely", 2000.0, None),
        ]);
        let service = FleetService::new(Arc::new(source), EfficiencyAnalyzer::default());
        service.poll().await.unwrap();
        service
            .fleet()
            .write()
            .await
            .add(Vehicle::empty("VIN3".to_string(), "Grey".to_string()));
        Arc::new(AppState::new(service))
    }

    #[tokio::test]
    async fn test_summary_and_efficiency() {
        let state = state().await;

        let Json(summary) = fleet_summary(State(state.clone())).await;
        assert_eq!(summary.total_vehicles, 3);
        assert_eq!(summary.total_fleet_miles, 3000.0);

        let Json(report) = efficiency_report(State(state)).await;
        assert_eq!(report.vehicles.len(), 2);
        assert_eq!(report.vehicles[0].name, "Blue");
    }

    #[tokio::test]
    async fn test_vehicle_latest_statuses() {
        let state = state().await;

        let found = vehicle_latest(Path("VIN1".to_string()), State(state.clone())).await;
        assert_eq!(found.status(), StatusCode::OK);

        let empty = vehicle_latest(Path("VIN3".to_string()), State(state.clone())).await;
        assert_eq!(empty.status(), StatusCode::NO_CONTENT);

        let missing = vehicle_latest(Path("NOPE".to_string()), State(state)).await;
        assert_eq!(missing.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_text_and_csv_content_types() {
        let state = state().await;

        let report = text_report(State(state.clone())).await;
        assert_eq!(report.headers()[header::CONTENT_TYPE], TEXT_PLAIN);

        let export = export_metrics(State(state)).await;
        assert_eq!(export.status(), StatusCode::OK);
        assert!(export.headers().contains_key(header::CONTENT_DISPOSITION));
    }

    #[tokio::test]
    async fn test_dashboard_and_vehicle_list() {
        let state = state().await;

        let Json(dash) = dashboard(State(state.clone())).await;
        assert_eq!(dash.battery_levels.len(), 2);
        assert_eq!(dash.lifetime_energy.len(), 1);

        let Json(vehicles) = list_vehicles(State(state)).await;
        assert_eq!(vehicles.len(), 3);
        assert!(vehicles[2].latest.is_none());
    }
}
