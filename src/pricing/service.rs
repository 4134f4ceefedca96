use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

use super::{
    aggregator, distance, extractor, fee,
    models::{DeliveryQuote, DeliveryRequest, RawDeliveryQuery},
    validator,
};
use crate::{error::PricingError, metrics, venue::VenueDataProvider};

/// Delivery order pricing pipeline
///
/// validate -> fetch static -> fetch dynamic -> extract -> distance -> fee -> aggregate.
/// Venue data is fetched fresh for every call; nothing is cached.
#[derive(Clone)]
pub struct DeliveryPriceService {
    provider: Arc<dyn VenueDataProvider>,
}

impl DeliveryPriceService {
    pub fn new(provider: Arc<dyn VenueDataProvider>) -> Self {
        Self { provider }
    }

    /// Price a raw query, recording metrics and one log line for the outcome
    pub async fn quote(&self, query: &RawDeliveryQuery) -> Result<DeliveryQuote, PricingError> {
        let start = Instant::now();

        let result = match validator::validate(query) {
            Ok(request) => self.quote_request(&request).await,
            Err(e) => Err(e),
        };

        match &result {
            Ok(quote) => {
                metrics::record_quote("success", start.elapsed());
                metrics::record_distance(quote.delivery.distance);
                info!(
                    venue_slug = query.venue_slug.as_deref().unwrap_or_default(),
                    cart_value = quote.cart_value,
                    distance = quote.delivery.distance,
                    fee = quote.delivery.fee,
                    total_price = quote.total_price,
                    "Delivery order priced"
                );
            }
            Err(e) => {
                metrics::record_quote("error", start.elapsed());
                metrics::record_error(e.kind());
                warn!(
                    venue_slug = query.venue_slug.as_deref().unwrap_or_default(),
                    kind = e.kind(),
                    error = %e,
                    "Delivery order rejected"
                );
            }
        }

        result
    }

    /// Price an already validated request
    pub async fn quote_request(&self, request: &DeliveryRequest) -> Result<DeliveryQuote, PricingError> {
        // Static first; a failure here skips the dynamic fetch
        let static_doc = self.provider.fetch_static(&request.venue_slug).await?;
        let dynamic_doc = self.provider.fetch_dynamic(&request.venue_slug).await?;

        let spec = extractor::extract(&static_doc, &dynamic_doc)?;
        debug!(
            venue_slug = %request.venue_slug,
            base_price = spec.base_price,
            surcharge_threshold = spec.surcharge_threshold,
            tiers = spec.distance_tiers.len(),
            "Extracted delivery spec"
        );

        let venue = spec.venue_coordinates;
        let distance =
            distance::haversine_meters(request.user_lat, request.user_lon, venue.lat, venue.lon);
        let fee = fee::resolve(&spec, distance)?;

        aggregator::aggregate(request.cart_value, spec.surcharge_threshold, fee, distance)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::venue::VenueDocument;
    use async_trait::async_trait;
    use serde_json::{json, Value};
    use std::sync::Mutex;

    /// In-memory venue source; `None` documents answer with a 404-style fetch error
    struct FakeVenueProvider {
        static_doc: Option<Value>,
        dynamic_doc: Option<Value>,
        calls: Mutex<Vec<VenueDocument>>,
    }

    impl FakeVenueProvider {
        fn new(static_doc: Option<Value>, dynamic_doc: Option<Value>) -> Arc<Self> {
            Arc::new(Self {
                static_doc,
                dynamic_doc,
                calls: Mutex::new(Vec::new()),
            })
        }

        fn calls(&self) -> Vec<VenueDocument> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl VenueDataProvider for FakeVenueProvider {
        async fn fetch(&self, slug: &str, document: VenueDocument) -> Result<Value, PricingError> {
            self.calls.lock().unwrap().push(document);
            let doc = match document {
                VenueDocument::Static => &self.static_doc,
                VenueDocument::Dynamic => &self.dynamic_doc,
            };
            doc.clone().ok_or_else(|| PricingError::Fetch {
                document,
                slug: slug.to_string(),
                cause: "404 Not Found".to_string(),
            })
        }
    }

    fn static_doc() -> Value {
        json!({"venue_raw": {"location": {"coordinates": [24.92813512, 60.17012143]}}})
    }

    fn dynamic_doc(order_minimum: i64) -> Value {
        json!({
            "venue_raw": {
                "delivery_specs": {
                    "order_minimum_no_surcharge": order_minimum,
                    "delivery_pricing": {
                        "base_price": 190,
                        "distance_ranges": [
                            {"min": 0, "max": 500, "a": 0, "b": 0},
                            {"min": 500, "max": 1000, "a": 100, "b": 1},
                            {"min": 1000, "max": 1500, "a": 200, "b": 1},
                            {"min": 1500, "max": 2000, "a": 200, "b": 2},
                            {"min": 2000, "max": 0, "a": 0, "b": 0}
                        ]
                    }
                }
            }
        })
    }

    fn query(cart_value: &str, lat: &str, lon: &str) -> RawDeliveryQuery {
        RawDeliveryQuery {
            venue_slug: Some("home-assignment-venue-helsinki".to_string()),
            cart_value: Some(cart_value.to_string()),
            user_lat: Some(lat.to_string()),
            user_lon: Some(lon.to_string()),
        }
    }

    #[tokio::test]
    async fn test_quote_first_tier() {
        let provider = FakeVenueProvider::new(Some(static_doc()), Some(dynamic_doc(1000)));
        let service = DeliveryPriceService::new(provider.clone());

        let quote = service.quote(&query("1000", "60.1706", "24.9285")).await.unwrap();

        assert_eq!(quote.delivery.fee, 190);
        assert_eq!(quote.small_order_surcharge, 0);
        assert_eq!(quote.total_price, 1190);
        assert!(quote.delivery.distance < 500);
        assert_eq!(provider.calls(), vec![VenueDocument::Static, VenueDocument::Dynamic]);
    }

    #[tokio::test]
    async fn test_quote_small_order_surcharge() {
        let provider = FakeVenueProvider::new(Some(static_doc()), Some(dynamic_doc(500)));
        let service = DeliveryPriceService::new(provider);

        let quote = service.quote(&query("400", "60.1706", "24.9285")).await.unwrap();

        assert_eq!(quote.small_order_surcharge, 500);
        assert_eq!(quote.total_price, 400 + 500 + quote.delivery.fee);
    }

    #[tokio::test]
    async fn test_quote_too_far_away() {
        let provider = FakeVenueProvider::new(Some(static_doc()), Some(dynamic_doc(1000)));
        let service = DeliveryPriceService::new(provider);

        let result = service.quote(&query("1000", "0", "0")).await;
        assert!(matches!(result, Err(PricingError::NotDeliverable { .. })));
    }

    #[tokio::test]
    async fn test_validation_happens_before_fetch() {
        let provider = FakeVenueProvider::new(Some(static_doc()), Some(dynamic_doc(1000)));
        let service = DeliveryPriceService::new(provider.clone());

        let result = service.quote(&query("1000", "invalid", "24.0")).await;

        assert!(matches!(
            result,
            Err(PricingError::Validation { field: "user_lat", .. })
        ));
        assert!(provider.calls().is_empty());
    }

    #[tokio::test]
    async fn test_static_failure_skips_dynamic_fetch() {
        let provider = FakeVenueProvider::new(None, Some(dynamic_doc(1000)));
        let service = DeliveryPriceService::new(provider.clone());

        let result = service.quote(&query("1000", "60.1706", "24.9285")).await;

        assert!(matches!(
            result,
            Err(PricingError::Fetch { document: VenueDocument::Static, .. })
        ));
        assert_eq!(provider.calls(), vec![VenueDocument::Static]);
    }

    #[tokio::test]
    async fn test_max_cart_value_is_rejected_not_wrapped() {
        let provider = FakeVenueProvider::new(Some(static_doc()), Some(dynamic_doc(1000)));
        let service = DeliveryPriceService::new(provider);

        let result = service
            .quote(&query(&i64::MAX.to_string(), "60.1706", "24.9285"))
            .await;
        assert!(matches!(result, Err(PricingError::PriceOverflow { .. })));
    }

    #[tokio::test]
    async fn test_extraction_error_surfaces() {
        let provider = FakeVenueProvider::new(Some(json!({"venue_raw": {}})), Some(dynamic_doc(1000)));
        let service = DeliveryPriceService::new(provider);

        let result = service.quote(&query("1000", "60.1706", "24.9285")).await;
        assert!(matches!(result, Err(PricingError::Extraction { .. })));
    }
}
