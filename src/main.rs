// Main entry point - Dependency injection, polling and server setup
mod application;
mod domain;
mod infrastructure;
mod presentation;

use std::{net::SocketAddr, sync::Arc};
use anyhow::Context;
use axum::{Router, routing::get};
use tower_http::compression::CompressionLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use crate::application::fleet_service::FleetService;
use crate::domain::efficiency::EfficiencyAnalyzer;
use crate::infrastructure::config::load_app_config;
use crate::infrastructure::tessie_client::TessieClient;
use crate::presentation::app_state::AppState;
use crate::presentation::handlers::{
    dashboard, efficiency_report, export_metrics, fleet_summary, health_check, list_vehicles,
    text_report, vehicle_latest,
};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("fleet_telemetry=info,tower_http=info"));

    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = load_app_config()?;

    // Telemetry source (infrastructure layer)
    let source = Arc::new(TessieClient::new(
        config.tessie.base_url.clone(),
        config.tessie.api_key.clone(),
    ));

    // Fleet service (application layer)
    let analyzer = EfficiencyAnalyzer::new(config.analysis.kwh_rate)?;
    let fleet_service = FleetService::new(source, analyzer);

    // Initial poll so the first requests see data
    match fleet_service.poll().await {
        Ok(outcome) => {
            let summary = fleet_service.summary().await;
            tracing::info!(?outcome, ?summary, "initial fleet poll");
        }
        Err(e) => tracing::error!(error = %e, "initial fleet poll failed"),
    }

    fleet_service
        .write_reports(
            config.reports.text_report_path.as_deref(),
            config.reports.export_path.as_deref(),
        )
        .await?;

    let poller = fleet_service.clone().spawn_polling(config.polling.interval());

    let state = Arc::new(AppState::new(fleet_service));

    // Build router (presentation layer)
    let router = Router::new()
        .route("/healthz", get(health_check))
        .route("/fleet/summary", get(fleet_summary))
        .route("/fleet/efficiency", get(efficiency_report))
        .route("/fleet/report", get(text_report))
        .route("/fleet/dashboard", get(dashboard))
        .route("/fleet/export.csv", get(export_metrics))
        .route("/vehicles", get(list_vehicles))
        .route("/vehicles/:vin", get(vehicle_latest))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    // Start server
    let addr: SocketAddr = config
        .server
        .bind_addr
        .parse()
        .with_context(|| format!("invalid bind address {}", config.server.bind_addr))?;
    tracing::info!("Starting fleet-telemetry service on {}", addr);

    axum::serve(tokio::net::TcpListener::bind(addr).await?, router).await?;

    poller.abort();
    Ok(())
}
