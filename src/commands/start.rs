use anyhow::Result;
use colored::Colorize;
use dopc::{config, server};
use std::path::Path;
use tracing::info;

/// Execute the start command
///
/// Loads configuration and runs the server in the foreground until shutdown.
pub async fn execute(config_path: &Path) -> Result<()> {
    println!("{}", "Starting DOPC in foreground mode...".green());

    let cfg = config::load_config(config_path)?;
    info!(config = %config_path.display(), "Configuration loaded");

    server::start_server(cfg).await?;

    Ok(())
}
