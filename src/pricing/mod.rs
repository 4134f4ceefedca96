//! Delivery order pricing
//!
//! - `validator`: raw query checks
//! - `extractor`: venue documents to [`DeliverySpec`]
//! - `distance`: haversine distance in meters
//! - `fee`: distance tier resolution
//! - `aggregator`: surcharge and total
//! - `service`: the pipeline tying the stages to a venue data provider

pub mod aggregator;
pub mod distance;
pub mod extractor;
pub mod fee;
pub mod models;
pub mod service;
pub mod validator;

pub use models::{
    Coordinates, DeliveryDetails, DeliveryQuote, DeliveryRequest, DeliverySpec, DistanceTier,
    RawDeliveryQuery,
};
pub use service::DeliveryPriceService;
