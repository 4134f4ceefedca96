use anyhow::Result;
use dopc::{config, pricing::RawDeliveryQuery, server};
use std::path::Path;

use crate::cli::QuoteArgs;

/// Execute the quote command
///
/// Runs one request through the same pipeline the HTTP endpoint uses and
/// prints the quote as JSON.
pub async fn execute(config_path: &Path, args: QuoteArgs) -> Result<()> {
    let cfg = config::load_config(config_path)?;
    let state = server::build_app_state(&cfg)?;

    let query = RawDeliveryQuery {
        venue_slug: Some(args.venue_slug),
        cart_value: Some(args.cart_value),
        user_lat: Some(args.user_lat),
        user_lon: Some(args.user_lon),
    };

    // Errors propagate to main, which reports them once
    let quote = state.service.quote(&query).await?;
    println!("{}", serde_json::to_string_pretty(&quote)?);

    Ok(())
}
