use serde::{Deserialize, Serialize};

/// A validated pricing query
#[derive(Debug, Clone, PartialEq)]
pub struct DeliveryRequest {
    pub venue_slug: String,
    /// Minor currency units
    pub cart_value: i64,
    pub user_lat: f64,
    pub user_lon: f64,
}

/// Query string exactly as received; every field may be absent or malformed
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawDeliveryQuery {
    pub venue_slug: Option<String>,
    pub cart_value: Option<String>,
    pub user_lat: Option<String>,
    pub user_lon: Option<String>,
}

/// Venue coordinates as delivered upstream (longitude first)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub lon: f64,
    pub lat: f64,
}

/// A half-open `[min, max)` distance range with its fee coefficients.
///
/// `max == 0` marks the end of service coverage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DistanceTier {
    pub min: i64,
    pub max: i64,
    /// Flat addend
    pub a: i64,
    /// Multiplier per 10 meters
    pub b: i64,
}

impl DistanceTier {
    pub fn is_coverage_end(&self) -> bool {
        self.max == 0
    }

    pub fn contains(&self, distance: i64) -> bool {
        self.min <= distance && distance < self.max
    }
}

/// Pricing parameters of one venue, built fresh for every request
#[derive(Debug, Clone, PartialEq)]
pub struct DeliverySpec {
    pub venue_coordinates: Coordinates,
    pub base_price: i64,
    /// "Order minimum with no surcharge"
    pub surcharge_threshold: i64,
    /// In upstream order
    pub distance_tiers: Vec<DistanceTier>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryQuote {
    pub total_price: i64,
    pub small_order_surcharge: i64,
    pub cart_value: i64,
    pub delivery: DeliveryDetails,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryDetails {
    pub fee: i64,
    /// Meters, rounded
    pub distance: i64,
}
