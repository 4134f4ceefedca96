use anyhow::Result;
use colored::Colorize;
use dopc::config::{self, Config};
use std::path::Path;
use tracing::info;

/// Execute the config show command
///
/// Prints the effective configuration (defaults, file and env merged) as TOML
pub fn show(config_path: &Path) -> Result<()> {
    println!("{}", "Loading configuration...".yellow());
    info!("Loading configuration for display");

    let cfg = config::load_config(config_path)?;

    println!("{}", "Current Configuration:".green().bold());
    println!();
    println!("{}", render_toml(&cfg)?);

    info!("Configuration displayed successfully");
    Ok(())
}

/// Execute the config validate command
pub fn validate(config_path: &Path) -> Result<()> {
    println!("{}", "Validating configuration...".yellow());
    info!("Validating configuration file");

    let cfg = config::load_config(config_path)?;

    println!("{}", "✓ Configuration is valid".green());
    println!();
    println!("{}", "Summary:".bold());
    println!("  Listen: {}:{}", cfg.server.host, cfg.server.port);
    println!("  Venue API: {}", cfg.venue_api.base_url);
    println!("  Metrics: {}", if cfg.metrics.enabled { "on" } else { "off" });

    info!("Configuration validation successful");
    Ok(())
}

fn render_toml(cfg: &Config) -> Result<String> {
    Ok(toml::to_string_pretty(cfg)?)
}
