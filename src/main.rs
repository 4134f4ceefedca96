use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;

use dopc::init_tracing;

#[tokio::main]
async fn main() -> Result<()> {
    let args = cli::Cli::parse();

    init_tracing(args.log_format);

    match args.get_command() {
        cli::Commands::Start => {
            commands::start::execute(&args.config).await?;
        }
        cli::Commands::Test => {
            commands::test::execute(&args.config)?;
        }
        cli::Commands::Config { action } => match action {
            cli::ConfigCommands::Show => commands::config::show(&args.config)?,
            cli::ConfigCommands::Validate => commands::config::validate(&args.config)?,
        },
        cli::Commands::Quote(quote_args) => {
            commands::quote::execute(&args.config, quote_args).await?;
        }
        cli::Commands::Version => {
            println!("DOPC v{}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
