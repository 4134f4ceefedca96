use serde_json::Value;

use super::models::{Coordinates, DeliverySpec, DistanceTier};
use crate::{error::PricingError, venue::VenueDocument};

const COORDINATES: &[&str] = &["venue_raw", "location", "coordinates"];
const ORDER_MINIMUM_NO_SURCHARGE: &[&str] =
    &["venue_raw", "delivery_specs", "order_minimum_no_surcharge"];
const BASE_PRICE: &[&str] = &["venue_raw", "delivery_specs", "delivery_pricing", "base_price"];
const DISTANCE_RANGES: &[&str] = &[
    "venue_raw",
    "delivery_specs",
    "delivery_pricing",
    "distance_ranges",
];

/// Build a [`DeliverySpec`] from the static and dynamic venue documents
pub fn extract(static_doc: &Value, dynamic_doc: &Value) -> Result<DeliverySpec, PricingError> {
    let venue_coordinates = extract_coordinates(static_doc)?;

    let surcharge_threshold = read_amount(dynamic_doc, ORDER_MINIMUM_NO_SURCHARGE)?;
    let base_price = read_amount(dynamic_doc, BASE_PRICE)?;
    let distance_tiers = extract_tiers(dynamic_doc)?;

    Ok(DeliverySpec {
        venue_coordinates,
        base_price,
        surcharge_threshold,
        distance_tiers,
    })
}

/// Walk `path` through nested objects; `null` counts as absent
fn lookup<'a>(
    doc: &'a Value,
    path: &[&str],
    document: VenueDocument,
) -> Result<&'a Value, PricingError> {
    path.iter()
        .try_fold(doc, |node, key| node.get(*key))
        .filter(|value| !value.is_null())
        .ok_or_else(|| invalid(document, path.join(".")))
}

fn invalid(document: VenueDocument, field: String) -> PricingError {
    PricingError::Extraction { document, field }
}

fn extract_coordinates(static_doc: &Value) -> Result<Coordinates, PricingError> {
    let document = VenueDocument::Static;
    let field = || invalid(document, COORDINATES.join("."));

    let pair = lookup(static_doc, COORDINATES, document)?
        .as_array()
        .filter(|pair| pair.len() == 2)
        .ok_or_else(field)?;

    // Upstream order is [lon, lat]
    let lon = pair[0].as_f64().ok_or_else(field)?;
    let lat = pair[1].as_f64().ok_or_else(field)?;

    if !(-180.0..=180.0).contains(&lon) || !(-90.0..=90.0).contains(&lat) {
        return Err(field());
    }

    Ok(Coordinates { lon, lat })
}

/// Non-negative integer amount in minor units
fn read_amount(dynamic_doc: &Value, path: &[&str]) -> Result<i64, PricingError> {
    let document = VenueDocument::Dynamic;
    lookup(dynamic_doc, path, document)?
        .as_i64()
        .filter(|amount| *amount >= 0)
        .ok_or_else(|| invalid(document, path.join(".")))
}

fn extract_tiers(dynamic_doc: &Value) -> Result<Vec<DistanceTier>, PricingError> {
    let document = VenueDocument::Dynamic;
    let base = DISTANCE_RANGES.join(".");

    let ranges = lookup(dynamic_doc, DISTANCE_RANGES, document)?
        .as_array()
        .ok_or_else(|| invalid(document, base.clone()))?;

    ranges
        .iter()
        .enumerate()
        .map(|(idx, range)| -> Result<DistanceTier, PricingError> {
            let int = |key: &str| {
                range
                    .get(key)
                    .and_then(Value::as_i64)
                    .ok_or_else(|| invalid(document, format!("{}[{}].{}", base, idx, key)))
            };

            Ok(DistanceTier {
                min: int("min")?,
                max: int("max")?,
                a: int("a")?,
                b: int("b")?,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn static_doc() -> Value {
        json!({
            "venue_raw": {
                "location": {"coordinates": [24.92813512, 60.17012143]}
            }
        })
    }

    fn dynamic_doc() -> Value {
        json!({
            "venue_raw": {
                "delivery_specs": {
                    "order_minimum_no_surcharge": 1000,
                    "delivery_pricing": {
                        "base_price": 190,
                        "distance_ranges": [
                            {"min": 0, "max": 500, "a": 0, "b": 0, "flag": null},
                            {"min": 500, "max": 1000, "a": 100, "b": 1, "flag": null},
                            {"min": 1000, "max": 0, "a": 0, "b": 0, "flag": null}
                        ]
                    }
                }
            }
        })
    }

    fn extraction_field(result: Result<DeliverySpec, PricingError>) -> (VenueDocument, String) {
        match result {
            Err(PricingError::Extraction { document, field }) => (document, field),
            other => panic!("Expected extraction error, got {:?}", other),
        }
    }

    #[test]
    fn test_extract_full_spec() {
        let spec = extract(&static_doc(), &dynamic_doc()).unwrap();

        assert_eq!(spec.venue_coordinates.lon, 24.92813512);
        assert_eq!(spec.venue_coordinates.lat, 60.17012143);
        assert_eq!(spec.base_price, 190);
        assert_eq!(spec.surcharge_threshold, 1000);
        assert_eq!(
            spec.distance_tiers,
            vec![
                DistanceTier { min: 0, max: 500, a: 0, b: 0 },
                DistanceTier { min: 500, max: 1000, a: 100, b: 1 },
                DistanceTier { min: 1000, max: 0, a: 0, b: 0 },
            ]
        );
    }

    #[test]
    fn test_missing_coordinates() {
        let result = extract(&json!({"venue_raw": {}}), &dynamic_doc());
        assert_eq!(
            extraction_field(result),
            (VenueDocument::Static, "venue_raw.location.coordinates".to_string())
        );
    }

    #[test]
    fn test_malformed_coordinates() {
        let doc = json!({"venue_raw": {"location": {"coordinates": [24.9]}}});
        assert_eq!(extraction_field(extract(&doc, &dynamic_doc())).0, VenueDocument::Static);

        let doc = json!({"venue_raw": {"location": {"coordinates": ["24.9", 60.1]}}});
        assert!(extract(&doc, &dynamic_doc()).is_err());

        // Latitude out of range means the pair was not [lon, lat]
        let doc = json!({"venue_raw": {"location": {"coordinates": [24.9, 160.1]}}});
        assert!(extract(&doc, &dynamic_doc()).is_err());
    }

    #[test]
    fn test_missing_base_price() {
        let mut doc = dynamic_doc();
        doc["venue_raw"]["delivery_specs"]["delivery_pricing"]
            .as_object_mut()
            .unwrap()
            .remove("base_price");

        assert_eq!(
            extraction_field(extract(&static_doc(), &doc)),
            (
                VenueDocument::Dynamic,
                "venue_raw.delivery_specs.delivery_pricing.base_price".to_string()
            )
        );
    }

    #[test]
    fn test_null_and_negative_threshold() {
        let mut doc = dynamic_doc();
        doc["venue_raw"]["delivery_specs"]["order_minimum_no_surcharge"] = Value::Null;
        let (_, field) = extraction_field(extract(&static_doc(), &doc));
        assert_eq!(field, "venue_raw.delivery_specs.order_minimum_no_surcharge");

        doc["venue_raw"]["delivery_specs"]["order_minimum_no_surcharge"] = json!(-1);
        assert!(extract(&static_doc(), &doc).is_err());
    }

    #[test]
    fn test_tier_field_reported_with_index() {
        let mut doc = dynamic_doc();
        doc["venue_raw"]["delivery_specs"]["delivery_pricing"]["distance_ranges"][1]["max"] =
            json!("1000");

        let (_, field) = extraction_field(extract(&static_doc(), &doc));
        assert_eq!(
            field,
            "venue_raw.delivery_specs.delivery_pricing.distance_ranges[1].max"
        );
    }

    #[test]
    fn test_distance_ranges_not_an_array() {
        let mut doc = dynamic_doc();
        doc["venue_raw"]["delivery_specs"]["delivery_pricing"]["distance_ranges"] = json!({});

        let (_, field) = extraction_field(extract(&static_doc(), &doc));
        assert_eq!(field, "venue_raw.delivery_specs.delivery_pricing.distance_ranges");
    }
}
