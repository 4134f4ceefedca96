use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, warn};

use super::{VenueDataProvider, VenueDocument};
use crate::{config::VenueApiConfig, error::PricingError, metrics};

/// Venue API client over HTTP
///
/// Documents live at `<base_url>/<slug>/static` and `<base_url>/<slug>/dynamic`.
#[derive(Debug, Clone)]
pub struct HttpVenueProvider {
    client: Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpVenueProvider {
    pub fn new(client: Client, config: &VenueApiConfig) -> anyhow::Result<Self> {
        let base_url = Url::parse(&config.base_url)?;
        if base_url.cannot_be_a_base() {
            anyhow::bail!("Venue API base URL cannot be a base: {}", config.base_url);
        }

        Ok(Self {
            client,
            base_url,
            timeout: Duration::from_secs(config.timeout_seconds),
        })
    }

    /// Build the document URL, escaping the slug as a single path segment
    pub fn document_url(&self, slug: &str, document: VenueDocument) -> Url {
        let mut url = self.base_url.clone();
        // cannot_be_a_base was rejected in `new`, so the segments are available
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().push(slug).push(document.as_str());
        }
        url
    }
}

#[async_trait]
impl VenueDataProvider for HttpVenueProvider {
    async fn fetch(&self, slug: &str, document: VenueDocument) -> Result<Value, PricingError> {
        let url = self.document_url(slug, document);
        let fetch_error = |cause: String| {
            warn!(venue_slug = %slug, document = %document, cause = %cause, "Venue fetch failed");
            metrics::record_venue_fetch(document, "failure");
            PricingError::Fetch {
                document,
                slug: slug.to_string(),
                cause,
            }
        };

        let response = self
            .client
            .get(url.clone())
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| fetch_error(e.to_string()))?;

        let status = response.status();
        debug!(venue_slug = %slug, document = %document, status = %status, "Venue API responded");

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let body = body.trim();
            let cause = if body.is_empty() {
                format!("{} for url {}", status, url)
            } else {
                format!("{} for url {}: {}", status, url, body)
            };
            return Err(fetch_error(cause));
        }

        let doc = response
            .json::<Value>()
            .await
            .map_err(|e| fetch_error(format!("invalid JSON body: {}", e)))?;

        metrics::record_venue_fetch(document, "success");
        Ok(doc)
    }
}
