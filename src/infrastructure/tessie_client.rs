// Tessie API client implementation
use crate::application::telemetry_source::TelemetrySource;
use crate::domain::telemetry::{RawBatteryHealth, RawVehicle};
use anyhow::{Context, Result};
use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone)]
pub struct TessieClient {
    base_url: String,
    api_key: String,
    client: reqwest::Client,
}

#[derive(Debug, Deserialize)]
struct ResultsEnvelope<T> {
    results: Vec<T>,
}

impl TessieClient {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: reqwest::Client::new(),
        }
    }

    fn build_url(&self, path: &str, params: &[(&str, &str)]) -> String {
        let query: Vec<String> = params
            .iter()
            .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
            .collect();

        if query.is_empty() {
            format!("{}/{}", self.base_url, path)
        } else {
            format!("{}/{}?{}", self.base_url, path, query.join("&"))
        }
    }

    async fn fetch_results<T: DeserializeOwned>(&self, url: &str) -> Result<Vec<T>> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await
            .context("Failed to send request to Tessie")?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Tessie request failed with status {}: {}", status, body);
        }

        let envelope = response
            .json::<ResultsEnvelope<T>>()
            .await
            .context("Failed to parse Tessie response")?;

        Ok(envelope.results)
    }
}

#[async_trait]
impl TelemetrySource for TessieClient {
    async fn list_vehicles(&self) -> Result<Vec<RawVehicle>> {
        let url = self.build_url("vehicles", &[("only_active", "false")]);
        let vehicles: Vec<RawVehicle> = self.fetch_results(&url).await?;
        tracing::debug!("Fetched {} vehicle descriptors", vehicles.len());
        Ok(vehicles)
    }

    async fn battery_health(&self) -> Result<Vec<RawBatteryHealth>> {
        let url = self.build_url(
            "battery_health",
            &[("distance_format", "mi"), ("only_active", "false")],
        );
        self.fetch_results(&url).await
    }
}
