use serde::{Deserialize, Serialize};
use std::net::IpAddr;
use std::path::Path;

use crate::handlers::DELIVERY_ORDER_PRICE_PATH;

pub const DEFAULT_VENUE_API_BASE_URL: &str =
    "https://consumer-api.development.dev.woltapi.com/home-assignment-api/v1/venues";

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Config {
    pub server: ServerConfig,
    pub venue_api: VenueApiConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Map pricing errors to 4xx/5xx instead of answering 200
    pub strict_status_codes: bool,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VenueApiConfig {
    pub base_url: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub endpoint: String,
}

/// Load configuration from defaults, an optional TOML file and `DOPC_*` env vars
pub fn load_config(path: &Path) -> anyhow::Result<Config> {
    let config = config::Config::builder()
        .set_default("server.host", "0.0.0.0")?
        .set_default("server.port", 8000)?
        .set_default("server.strict_status_codes", false)?
        .set_default("venue_api.base_url", DEFAULT_VENUE_API_BASE_URL)?
        .set_default("venue_api.timeout_seconds", 10)?
        .set_default("metrics.enabled", true)?
        .set_default("metrics.endpoint", "/metrics")?
        .add_source(config::File::from(path).required(false))
        .add_source(config::Environment::with_prefix("DOPC").separator("__"))
        .build()?;

    let cfg: Config = config.try_deserialize()?;
    validate_config(&cfg)?;

    Ok(cfg)
}

fn validate_config(cfg: &Config) -> anyhow::Result<()> {
    if cfg.server.port == 0 {
        anyhow::bail!("Server port must be non-zero");
    }

    if cfg.server.host.parse::<IpAddr>().is_err() {
        anyhow::bail!("Server host '{}' is not a valid IP address", cfg.server.host);
    }

    let base_url = reqwest::Url::parse(&cfg.venue_api.base_url).map_err(|e| {
        anyhow::anyhow!("Invalid venue API base URL '{}': {}", cfg.venue_api.base_url, e)
    })?;
    if !matches!(base_url.scheme(), "http" | "https") {
        anyhow::bail!(
            "Venue API base URL must use http or https, got '{}'",
            base_url.scheme()
        );
    }

    if cfg.venue_api.timeout_seconds == 0 {
        anyhow::bail!("Venue API timeout must be at least one second");
    }

    if cfg.metrics.enabled {
        if !cfg.metrics.endpoint.starts_with('/') {
            anyhow::bail!("Metrics endpoint must start with '/'");
        }
        if cfg.metrics.endpoint == DELIVERY_ORDER_PRICE_PATH {
            anyhow::bail!("Metrics endpoint collides with the pricing route");
        }
    }

    Ok(())
}
