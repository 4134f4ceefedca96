//! Venue data source
//!
//! Each venue exposes two upstream documents: a static one (location) and a
//! dynamic one (pricing rules). The pricing core only sees them through the
//! [`VenueDataProvider`] trait.

pub mod http;

use async_trait::async_trait;
use serde_json::Value;
use std::fmt;

use crate::error::PricingError;

pub use http::HttpVenueProvider;

/// Which upstream document a value came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VenueDocument {
    Static,
    Dynamic,
}

impl VenueDocument {
    /// Trailing path segment on the venue API
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Static => "static",
            Self::Dynamic => "dynamic",
        }
    }
}

impl fmt::Display for VenueDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Source of raw venue documents.
///
/// Implementations return the JSON body untouched; interpreting it is the
/// job of the pricing extractor. Any failure is reported as
/// [`PricingError::Fetch`].
#[async_trait]
pub trait VenueDataProvider: Send + Sync + 'static {
    async fn fetch(&self, slug: &str, document: VenueDocument) -> Result<Value, PricingError>;

    async fn fetch_static(&self, slug: &str) -> Result<Value, PricingError> {
        self.fetch(slug, VenueDocument::Static).await
    }

    async fn fetch_dynamic(&self, slug: &str) -> Result<Value, PricingError> {
        self.fetch(slug, VenueDocument::Dynamic).await
    }
}
