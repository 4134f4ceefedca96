use clap::{Args, Parser, Subcommand};
use dopc::LogFormat;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "dopc", version, about = "Delivery Order Price Calculator")]
pub struct Cli {
    /// Configuration file path (optional; defaults apply when missing)
    #[arg(short, long, default_value = "config.toml", global = true)]
    pub config: PathBuf,

    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormat::Text, global = true, env = "DOPC_LOG_FORMAT")]
    pub log_format: LogFormat,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Start the pricing server (default)
    Start,

    /// Test configuration validity and print a summary
    Test,

    /// Configuration management commands
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Price a single order against the configured venue API
    Quote(QuoteArgs),

    /// Show version information
    Version,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the effective configuration
    Show,

    /// Validate configuration file
    Validate,
}

/// Raw query values; they go through the same validation as HTTP requests
#[derive(Args, Debug, Clone)]
pub struct QuoteArgs {
    #[arg(long)]
    pub venue_slug: String,

    #[arg(long, allow_hyphen_values = true)]
    pub cart_value: String,

    #[arg(long, allow_hyphen_values = true)]
    pub user_lat: String,

    #[arg(long, allow_hyphen_values = true)]
    pub user_lon: String,
}

impl Cli {
    /// Get the command to execute, defaulting to Start if none provided
    pub fn get_command(&self) -> Commands {
        self.command.clone().unwrap_or(Commands::Start)
    }
}
