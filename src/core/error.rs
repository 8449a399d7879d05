//! Domain error taxonomy for demand lookups and pricing scenarios.

use crate::core::service::Service;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Error)]
pub enum PricingError {
    /// Demand must be positive before a scenario can be computed.
    #[error("Demand must be greater than zero to compute a scenario (got {demand})")]
    NotComputable { demand: f64 },

    /// The promotional price leaves no margin per unit, so no finite volume reaches the target.
    #[error(
        "Promotion can never reach the target profit: each unit sold at the promotional price yields {unit_profit:.2}"
    )]
    InfeasiblePromotion { unit_profit: f64 },

    /// The required quantity is too large to count in whole units.
    #[error(
        "Required quantity is out of range: a target of {desired_profit:.2} at {unit_profit} per unit cannot be reached"
    )]
    QuantityOutOfRange { desired_profit: f64, unit_profit: f64 },

    #[error("No seasonal data for {service} in {month}")]
    DataNotFound { service: Service, month: String },

    #[error("Invalid {field}: {reason}")]
    InvalidInput { field: &'static str, reason: String },
}
