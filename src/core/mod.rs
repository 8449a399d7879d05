//! Demand data, pricing calculations and their configuration

pub mod config;
pub mod error;
pub mod log;
pub mod pricing;
pub mod seasonal;
pub mod service;

// Re-export main types for cleaner imports
pub use error::PricingError;
pub use pricing::{DemandSource, PriceTerms, PricingInput, PricingResult, compute_scenario};
pub use seasonal::{SeasonalData, SeasonalRecord};
pub use service::Service;
