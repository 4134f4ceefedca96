use super::models::{DeliveryDetails, DeliveryQuote};
use crate::error::PricingError;

/// Assemble the final quote.
///
/// Below the threshold the threshold value itself is charged as the
/// small-order surcharge (not the shortfall `threshold - cart_value`).
/// A total that does not fit in `i64` is a [`PricingError::PriceOverflow`].
pub fn aggregate(
    cart_value: i64,
    surcharge_threshold: i64,
    fee: i64,
    distance: i64,
) -> Result<DeliveryQuote, PricingError> {
    let small_order_surcharge = if cart_value < surcharge_threshold {
        surcharge_threshold
    } else {
        0
    };

    let total_price = cart_value
        .checked_add(small_order_surcharge)
        .and_then(|total| total.checked_add(fee))
        .ok_or(PricingError::PriceOverflow {
            component: "total price",
        })?;

    Ok(DeliveryQuote {
        total_price,
        small_order_surcharge,
        cart_value,
        delivery: DeliveryDetails { fee, distance },
    })
}
