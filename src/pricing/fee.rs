use super::models::DeliverySpec;
use crate::error::{NotDeliverableReason, PricingError};

/// Delivery fee for `distance` meters.
///
/// Tiers are scanned in stored order and the first one containing the
/// distance wins. Reaching a `max == 0` tier ends the scan: the location is
/// outside coverage. The fee is `base_price + a + round(b * distance / 10)`,
/// rounded half-to-even; a fee that does not fit in `i64` is a
/// [`PricingError::PriceOverflow`].
pub fn resolve(spec: &DeliverySpec, distance: i64) -> Result<i64, PricingError> {
    for tier in &spec.distance_tiers {
        if tier.is_coverage_end() {
            return Err(PricingError::NotDeliverable {
                distance,
                reason: NotDeliverableReason::CoverageEnded,
            });
        }

        if tier.contains(distance) {
            let per_distance = (tier.b as f64 * distance as f64 / 10.0).round_ties_even();
            // `as` saturates, so anything at the i64 bounds is treated as out of range
            if per_distance <= i64::MIN as f64 || per_distance >= i64::MAX as f64 {
                return Err(overflow());
            }

            return spec
                .base_price
                .checked_add(tier.a)
                .and_then(|fee| fee.checked_add(per_distance as i64))
                .ok_or_else(overflow);
        }
    }

    Err(PricingError::NotDeliverable {
        distance,
        reason: NotDeliverableReason::NoMatchingTier,
    })
}

fn overflow() -> PricingError {
    PricingError::PriceOverflow {
        component: "delivery fee",
    }
}
