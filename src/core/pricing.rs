//! Promotional pricing calculator.
//!
//! Given the demand expected at the original price, works out how many units
//! must be sold at a promotional price to reach a target profit increase, and
//! what that volume earns. All arithmetic is plain `f64`; rounding to display
//! precision is left to the presentation layer.

use crate::core::error::PricingError;
use crate::core::seasonal::SeasonalRecord;
use crate::core::service::Service;
use chrono::Month;
use serde::Serialize;
use tracing::debug;

/// Highest commission accepted, as a percentage of revenue.
pub const MAX_COMMISSION_PCT: f64 = 130.0;

/// Where the demand figure of a scenario came from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum DemandSource {
    /// Mean demand looked up from the seasonal table.
    Seasonal {
        service: Service,
        month: Month,
        std_dev: f64,
    },
    /// Demand typed in by the user for a service without seasonal data.
    Custom,
}

/// The form-supplied numbers of a scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PriceTerms {
    pub original_price: f64,
    pub promotional_price: f64,
    pub service_cost: f64,
    pub commission_pct: f64,
    pub desired_profit_increase_pct: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingInput {
    pub source: DemandSource,
    pub demand: f64,
    pub terms: PriceTerms,
}

impl PricingInput {
    /// Uses the mean demand of a seasonal record.
    pub fn seasonal(record: &SeasonalRecord, terms: PriceTerms) -> Self {
        Self {
            source: DemandSource::Seasonal {
                service: record.service,
                month: record.month,
                std_dev: record.std_dev,
            },
            demand: record.mean_demand,
            terms,
        }
    }

    pub fn custom(demand: f64, terms: PriceTerms) -> Self {
        Self {
            source: DemandSource::Custom,
            demand,
            terms,
        }
    }

    /// Checks every field is in range before a scenario is computed.
    pub fn validate(&self) -> Result<(), PricingError> {
        if self.demand.is_nan() || self.demand <= 0.0 {
            return Err(PricingError::NotComputable {
                demand: self.demand,
            });
        }
        if !self.demand.is_finite() {
            return Err(invalid("demand", "must be a finite number"));
        }

        let terms = &self.terms;
        non_negative("original price", terms.original_price)?;
        non_negative("promotional price", terms.promotional_price)?;
        non_negative("service cost", terms.service_cost)?;
        non_negative("desired profit increase", terms.desired_profit_increase_pct)?;
        non_negative("commission", terms.commission_pct)?;
        if terms.commission_pct > MAX_COMMISSION_PCT {
            return Err(invalid(
                "commission",
                format!(
                    "must be at most {MAX_COMMISSION_PCT}% (got {})",
                    terms.commission_pct
                ),
            ));
        }
        Ok(())
    }
}

fn invalid(field: &'static str, reason: impl Into<String>) -> PricingError {
    PricingError::InvalidInput {
        field,
        reason: reason.into(),
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<(), PricingError> {
    if !value.is_finite() {
        return Err(invalid(field, "must be a finite number"));
    }
    if value < 0.0 {
        return Err(invalid(field, format!("must not be negative (got {value})")));
    }
    Ok(())
}

/// Baseline and promotional outcomes of one pricing scenario.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PricingResult {
    pub revenue_without: f64,
    pub commission_without: f64,
    pub cost_without: f64,
    pub profit_without: f64,
    pub desired_profit: f64,
    pub unit_profit: f64,
    pub required_quantity: u64,
    pub revenue_with: f64,
    pub commission_with: f64,
    pub cost_with: f64,
    pub profit_with: f64,
    #[serde(skip)]
    promotional_price: f64,
    #[serde(skip)]
    commission_frac: f64,
    #[serde(skip)]
    service_cost: f64,
}

/// One category of the with/without promotion comparison.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub category: &'static str,
    pub without_promotion: f64,
    pub with_promotion: f64,
}

impl PricingResult {
    /// Profit of the promotional scenario at an arbitrary volume.
    pub fn profit_at(&self, quantity: u64) -> f64 {
        let revenue = self.promotional_price * quantity as f64;
        let commission = revenue * self.commission_frac;
        let cost = self.service_cost * quantity as f64;
        revenue - commission - cost
    }

    /// Relative change of profit against the baseline, in percent.
    ///
    /// `None` when the baseline profit is not positive.
    pub fn profit_change_pct(&self) -> Option<f64> {
        if self.profit_without > 0.0 {
            Some((self.profit_with / self.profit_without - 1.0) * 100.0)
        } else {
            None
        }
    }

    /// Revenue, Commission, Cost and Profit, without vs with the promotion.
    pub fn comparison(&self) -> [ComparisonRow; 4] {
        [
            ComparisonRow {
                category: "Revenue",
                without_promotion: self.revenue_without,
                with_promotion: self.revenue_with,
            },
            ComparisonRow {
                category: "Commission",
                without_promotion: self.commission_without,
                with_promotion: self.commission_with,
            },
            ComparisonRow {
                category: "Cost",
                without_promotion: self.cost_without,
                with_promotion: self.cost_with,
            },
            ComparisonRow {
                category: "Profit",
                without_promotion: self.profit_without,
                with_promotion: self.profit_with,
            },
        ]
    }
}

/// `floor(desired_profit / unit_profit) + 1`, or an error when that count
/// does not fit in a `u64`.
fn required_units(desired_profit: f64, unit_profit: f64) -> Result<u64, PricingError> {
    let out_of_range = || PricingError::QuantityOutOfRange {
        desired_profit,
        unit_profit,
    };

    let quotient = (desired_profit / unit_profit).floor();
    // u64::MAX rounds up to 2^64 as f64, so anything below it casts without saturating
    if !quotient.is_finite() || quotient >= u64::MAX as f64 {
        debug!("Required quantity out of range: {desired_profit} / {unit_profit}");
        return Err(out_of_range());
    }
    (quotient as u64).checked_add(1).ok_or_else(out_of_range)
}

/// Computes the baseline and promotional scenarios for `input`.
///
/// The required quantity is `floor(desired_profit / unit_profit) + 1`: one
/// unit is always added, so an exact quotient still overshoots the target by
/// one unit's margin. A non-positive target needs no sales at all.
pub fn compute_scenario(input: &PricingInput) -> Result<PricingResult, PricingError> {
    input.validate()?;

    let terms = &input.terms;
    let demand = input.demand;
    let commission_frac = terms.commission_pct / 100.0;
    let profit_increase_frac = terms.desired_profit_increase_pct / 100.0;

    let revenue_without = terms.original_price * demand;
    let commission_without = revenue_without * commission_frac;
    let cost_without = terms.service_cost * demand;
    let profit_without = revenue_without - commission_without - cost_without;

    let desired_profit = profit_without * (1.0 + profit_increase_frac);

    let unit_profit =
        terms.promotional_price - terms.promotional_price * commission_frac - terms.service_cost;

    let required_quantity = if desired_profit <= 0.0 {
        debug!("Target profit {desired_profit} needs no promotional sales");
        0
    } else if unit_profit <= 0.0 {
        debug!("Promotion infeasible: unit profit {unit_profit} for target {desired_profit}");
        return Err(PricingError::InfeasiblePromotion { unit_profit });
    } else {
        required_units(desired_profit, unit_profit)?
    };

    let revenue_with = terms.promotional_price * required_quantity as f64;
    let commission_with = revenue_with * commission_frac;
    let cost_with = terms.service_cost * required_quantity as f64;
    let profit_with = revenue_with - commission_with - cost_with;

    debug!(
        "Scenario: demand={demand}, profit_without={profit_without}, desired={desired_profit}, unit_profit={unit_profit}, quantity={required_quantity}, profit_with={profit_with}"
    );

    Ok(PricingResult {
        revenue_without,
        commission_without,
        cost_without,
        profit_without,
        desired_profit,
        unit_profit,
        required_quantity,
        revenue_with,
        commission_with,
        cost_with,
        profit_with,
        promotional_price: terms.promotional_price,
        commission_frac,
        service_cost: terms.service_cost,
    })
}
