use super::models::{DeliveryRequest, RawDeliveryQuery};
use crate::error::PricingError;

/// Check the raw query and turn it into a [`DeliveryRequest`].
///
/// Fields are checked in order `venue_slug`, `cart_value`, `user_lat`,
/// `user_lon`; the first violation is returned.
pub fn validate(query: &RawDeliveryQuery) -> Result<DeliveryRequest, PricingError> {
    let venue_slug = required("venue_slug", &query.venue_slug)?;
    if venue_slug.trim().is_empty() {
        return Err(PricingError::validation("venue_slug", "must not be empty"));
    }

    let cart_value = parse_cart_value(required("cart_value", &query.cart_value)?)?;
    let user_lat = parse_coordinate("user_lat", required("user_lat", &query.user_lat)?, 90.0)?;
    let user_lon = parse_coordinate("user_lon", required("user_lon", &query.user_lon)?, 180.0)?;

    Ok(DeliveryRequest {
        venue_slug: venue_slug.to_string(),
        cart_value,
        user_lat,
        user_lon,
    })
}

fn required<'a>(field: &'static str, value: &'a Option<String>) -> Result<&'a str, PricingError> {
    value
        .as_deref()
        .ok_or_else(|| PricingError::validation(field, "is required"))
}

fn parse_cart_value(raw: &str) -> Result<i64, PricingError> {
    let value: i64 = raw.trim().parse().map_err(|_| {
        PricingError::validation("cart_value", format!("must be an integer, got '{}'", raw))
    })?;

    if value < 0 {
        return Err(PricingError::validation(
            "cart_value",
            format!("must be non-negative, got {}", value),
        ));
    }

    Ok(value)
}

fn parse_coordinate(field: &'static str, raw: &str, limit: f64) -> Result<f64, PricingError> {
    let value: f64 = raw.trim().parse().map_err(|_| {
        PricingError::validation(field, format!("must be a number, got '{}'", raw))
    })?;

    // NaN fails the range check as well
    if !(-limit..=limit).contains(&value) {
        return Err(PricingError::validation(
            field,
            format!("must be between {} and {}, got {}", -limit, limit, raw),
        ));
    }

    Ok(value)
}
