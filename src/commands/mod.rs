//! Command implementations for the CLI
//!
//! - start: Start the pricing server
//! - test: Test configuration validity
//! - config: Configuration display and validation
//! - quote: Price one order from the command line

pub mod config;
pub mod quote;
pub mod start;
