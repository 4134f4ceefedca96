use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
    Json,
};

use super::AppState;
use crate::pricing::RawDeliveryQuery;

/// Handle GET /api/v1/delivery-order-price
///
/// Query parameters are taken as plain strings so malformed values reach the
/// validator and come back as `{"Error": ...}` instead of an extractor rejection.
pub async fn handle_delivery_order_price(
    State(state): State<AppState>,
    Query(query): Query<RawDeliveryQuery>,
) -> Response {
    match state.service.quote(&query).await {
        Ok(quote) => Json(quote).into_response(),
        Err(e) => e.into_response_with_status(state.strict_status_codes),
    }
}
