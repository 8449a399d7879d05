//! Services offered and the calendar months demand is tracked by.

use anyhow::{Result, anyhow};
use chrono::Month;
use serde::Serialize;
use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    LymphaticDrainage,
    RelaxingMassage,
}

impl Service {
    pub const ALL: [Service; 2] = [Service::LymphaticDrainage, Service::RelaxingMassage];

    pub fn label(&self) -> &'static str {
        match self {
            Service::LymphaticDrainage => "Lymphatic Drainage (50 min)",
            Service::RelaxingMassage => "Relaxing Massage (50 min)",
        }
    }

    /// Noun for one unit of the service, e.g. "1 drainage".
    pub fn unit_singular(&self) -> &'static str {
        match self {
            Service::LymphaticDrainage => "drainage",
            Service::RelaxingMassage => "massage",
        }
    }

    pub fn unit_plural(&self) -> &'static str {
        match self {
            Service::LymphaticDrainage => "drainages",
            Service::RelaxingMassage => "massages",
        }
    }
}

impl Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for Service {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        match normalized.as_str() {
            "drainage" | "lymphatic_drainage" | "lymphatic-drainage" => {
                Ok(Service::LymphaticDrainage)
            }
            "massage" | "relaxing_massage" | "relaxing-massage" => Ok(Service::RelaxingMassage),
            // Labels as written by the dataset exports
            "lymphatic drainage (50 min)" | "drenagem linfática corporal (50 min)" => {
                Ok(Service::LymphaticDrainage)
            }
            "relaxing massage (50 min)" | "massagem relaxante (50 min)" => {
                Ok(Service::RelaxingMassage)
            }
            _ => Err(anyhow!("Invalid service: {}", s)),
        }
    }
}

/// Parses a month given either as its number (1-12) or its English name.
pub fn parse_month(s: &str) -> Result<Month> {
    let s = s.trim();
    if let Ok(number) = s.parse::<u8>() {
        return Month::try_from(number).map_err(|_| anyhow!("Month must be between 1 and 12: {s}"));
    }
    s.parse::<Month>()
        .map_err(|_| anyhow!("Invalid month: {}", s))
}

/// Converts a 1-based month number into a `Month`.
pub fn month_from_number(number: u32) -> Result<Month> {
    u8::try_from(number)
        .ok()
        .and_then(|n| Month::try_from(n).ok())
        .ok_or_else(|| anyhow!("Month must be between 1 and 12: {number}"))
}
