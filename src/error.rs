use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::fmt;

use crate::venue::VenueDocument;

/// Why a location could not be served
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotDeliverableReason {
    /// Scan reached a `max == 0` tier
    CoverageEnded,
    /// Scan ran out of tiers without a match
    NoMatchingTier,
}

impl fmt::Display for NotDeliverableReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CoverageEnded => write!(f, "User is too far away"),
            Self::NoMatchingTier => write!(f, "Area not covered by service"),
        }
    }
}

/// Errors produced while pricing a delivery order
///
/// Every variant is terminal for the request; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum PricingError {
    /// Input failed a type or bounds check
    #[error("Invalid {field}: {reason}")]
    Validation { field: &'static str, reason: String },

    /// Venue API unreachable or answered with a non-2xx status
    #[error("Failed to fetch {document} venue data for '{slug}': {cause}")]
    Fetch {
        document: VenueDocument,
        slug: String,
        cause: String,
    },

    /// Required field missing or mistyped in a venue document
    #[error("Missing or invalid field '{field}' in {document} venue data")]
    Extraction {
        document: VenueDocument,
        field: String,
    },

    /// No distance tier covers the customer location
    #[error("{reason}: {distance} meters")]
    NotDeliverable {
        distance: i64,
        reason: NotDeliverableReason,
    },

    /// A price component does not fit in minor units
    #[error("Price out of range while computing {component}")]
    PriceOverflow { component: &'static str },
}

impl PricingError {
    pub fn validation(field: &'static str, reason: impl Into<String>) -> Self {
        Self::Validation {
            field,
            reason: reason.into(),
        }
    }

    /// Stable label used in logs and metrics
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation { .. } => "validation_error",
            Self::Fetch { .. } => "fetch_error",
            Self::Extraction { .. } => "extraction_error",
            Self::NotDeliverable { .. } => "not_deliverable",
            Self::PriceOverflow { .. } => "price_overflow",
        }
    }

    /// Status used when strict status codes are enabled
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Fetch { .. } | Self::Extraction { .. } => StatusCode::BAD_GATEWAY,
            Self::NotDeliverable { .. } | Self::PriceOverflow { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
        }
    }

    /// Render as `{"Error": "..."}`.
    ///
    /// With `strict` unset the status is always 200, which is what existing
    /// clients of this endpoint expect.
    pub fn into_response_with_status(self, strict: bool) -> Response {
        let status = if strict {
            self.status_code()
        } else {
            StatusCode::OK
        };
        let body = Json(json!({ "Error": self.to_string() }));
        (status, body).into_response()
    }
}

impl IntoResponse for PricingError {
    fn into_response(self) -> Response {
        self.into_response_with_status(false)
    }
}
