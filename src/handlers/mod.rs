pub mod delivery_order_price;
pub mod health;
pub mod metrics_handler;

use crate::pricing::DeliveryPriceService;

pub const DELIVERY_ORDER_PRICE_PATH: &str = "/api/v1/delivery-order-price";

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub service: DeliveryPriceService,
    pub strict_status_codes: bool,
}
