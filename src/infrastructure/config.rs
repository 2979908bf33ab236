use crate::domain::efficiency::DEFAULT_KWH_RATE;
use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    pub tessie: TessieSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
    #[serde(default)]
    pub polling: PollingSettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub reports: ReportSettings,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TessieSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    pub api_key: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AnalysisSettings {
    /// Energy price per kWh.
    pub kwh_rate: f64,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            kwh_rate: DEFAULT_KWH_RATE,
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct PollingSettings {
    pub interval_secs: u64,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self { interval_secs: 300 }
    }
}

impl PollingSettings {
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    pub bind_addr: String,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            bind_addr: "0.0.0.0:8080".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct ReportSettings {
    pub text_report_path: Option<PathBuf>,
    pub export_path: Option<PathBuf>,
}

fn default_base_url() -> String {
    "https://api.tessie.com".to_string()
}

/// Load `config/fleet.*` (optional) overlaid with `FLEET__SECTION__KEY` variables
pub fn load_app_config() -> anyhow::Result<AppConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name("config/fleet").required(false))
        .add_source(
            config::Environment::with_prefix("FLEET")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    validated(settings)
}

fn validated(settings: config::Config) -> anyhow::Result<AppConfig> {
    let cfg: AppConfig = settings.try_deserialize()?;

    anyhow::ensure!(!cfg.tessie.api_key.is_empty(), "tessie.api_key must be set");
    anyhow::ensure!(
        cfg.analysis.kwh_rate.is_finite() && cfg.analysis.kwh_rate > 0.0,
        "analysis.kwh_rate must be positive, got {}",
        cfg.analysis.kwh_rate
    );
    anyhow::ensure!(cfg.polling.interval_secs > 0, "polling.interval_secs must be positive");

    Ok(cfg)
}
