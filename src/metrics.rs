use metrics::{counter, describe_counter, describe_gauge, describe_histogram, gauge, histogram};
use metrics_exporter_prometheus::{PrometheusBuilder, PrometheusHandle};
use std::time::Duration;

use crate::venue::VenueDocument;

/// Install the Prometheus recorder and describe all metrics
pub fn init_metrics() -> anyhow::Result<PrometheusHandle> {
    let handle = PrometheusBuilder::new()
        .install_recorder()
        .map_err(|e| anyhow::anyhow!("Failed to install Prometheus recorder: {}", e))?;

    init_metric_descriptions();

    Ok(handle)
}

/// Initialize metric descriptions (can be called multiple times safely)
fn init_metric_descriptions() {
    describe_counter!("dopc_quotes_total", "Total number of price quote requests");
    describe_counter!("dopc_errors_total", "Total number of failed quote requests");
    describe_histogram!(
        "dopc_quote_duration_seconds",
        "Quote computation duration in seconds, venue fetches included"
    );
    describe_counter!(
        "dopc_venue_fetch_total",
        "Total number of venue API document fetches"
    );
    describe_histogram!(
        "dopc_delivery_distance_meters",
        "Distance between customer and venue for successful quotes"
    );
    describe_gauge!("dopc_info", "Service version information");

    gauge!("dopc_info", "version" => env!("CARGO_PKG_VERSION")).set(1.0);
}

/// Record a finished quote request
pub fn record_quote(outcome: &str, duration: Duration) {
    counter!("dopc_quotes_total", "outcome" => outcome.to_string()).increment(1);
    histogram!("dopc_quote_duration_seconds").record(duration.as_secs_f64());
}

/// Record a failed quote by error kind
pub fn record_error(kind: &str) {
    counter!("dopc_errors_total", "kind" => kind.to_string()).increment(1);
}

pub fn record_distance(distance_meters: i64) {
    histogram!("dopc_delivery_distance_meters").record(distance_meters as f64);
}

/// Record one venue API call
pub fn record_venue_fetch(document: VenueDocument, outcome: &str) {
    counter!(
        "dopc_venue_fetch_total",
        "document" => document.as_str(),
        "outcome" => outcome.to_string(),
    )
    .increment(1);
}
