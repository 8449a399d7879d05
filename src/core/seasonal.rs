//! Seasonal demand table: mean demand and standard deviation per service and month.
//!
//! The table is loaded once from a flat CSV file with the columns
//! `service, month, mean_demand, std_dev` (the spreadsheet export headers
//! `Servico, Mes, Media, Desvio_padrao` are accepted too) and is read-only
//! afterwards.

use crate::core::error::PricingError;
use crate::core::service::{Service, month_from_number};
use anyhow::{Context, Result, bail};
use chrono::Month;
use serde::Deserialize;
use std::collections::HashMap;
use std::io::Read;
use std::path::Path;
use tracing::debug;

/// Illustrative figures shipped with the binary, used when no `data_path` is configured.
/// They are sample data, not measured demand.
const BUILTIN_DATASET: &str = include_str!("../../data/seasonal_demand.csv");

#[derive(Debug, Deserialize)]
struct SeasonalRow {
    #[serde(alias = "Servico")]
    service: String,
    #[serde(alias = "Mes")]
    month: u32,
    #[serde(alias = "Media")]
    mean_demand: f64,
    #[serde(alias = "Desvio_padrao")]
    std_dev: f64,
}

/// Demand statistics for one service in one calendar month.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeasonalRecord {
    pub service: Service,
    pub month: Month,
    pub mean_demand: f64,
    pub std_dev: f64,
}

impl TryFrom<SeasonalRow> for SeasonalRecord {
    type Error = anyhow::Error;

    fn try_from(row: SeasonalRow) -> Result<Self> {
        let service: Service = row.service.parse()?;
        let month = month_from_number(row.month)?;

        if !row.mean_demand.is_finite() || row.mean_demand < 0.0 {
            bail!("Mean demand must be a non-negative number: {}", row.mean_demand);
        }
        if !row.std_dev.is_finite() || row.std_dev < 0.0 {
            bail!("Standard deviation must be a non-negative number: {}", row.std_dev);
        }

        Ok(SeasonalRecord {
            service,
            month,
            mean_demand: row.mean_demand,
            std_dev: row.std_dev,
        })
    }
}

/// Immutable (service, month) keyed demand table.
#[derive(Debug, Clone, Default)]
pub struct SeasonalData {
    records: HashMap<(Service, Month), SeasonalRecord>,
    sample: bool,
}

impl SeasonalData {
    /// Loads the dataset embedded in the binary.
    pub fn builtin() -> Result<Self> {
        let data = Self::from_reader(BUILTIN_DATASET.as_bytes())
            .context("Failed to load built-in seasonal dataset")?;
        Ok(Self {
            sample: true,
            ..data
        })
    }

    /// Whether the table holds the built-in sample figures rather than a user's dataset.
    pub fn is_sample(&self) -> bool {
        self.sample
    }

    pub fn load_from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path)
            .with_context(|| format!("Failed to open seasonal data file: {}", path.display()))?;

        let data = Self::from_reader(file)
            .with_context(|| format!("Failed to load seasonal data file: {}", path.display()))?;
        debug!(
            "Loaded {} seasonal records from {}",
            data.len(),
            path.display()
        );
        Ok(data)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::All)
            .from_reader(reader);

        let mut records = Vec::new();
        for (line_num, result) in csv_reader.deserialize::<SeasonalRow>().enumerate() {
            // Header occupies line 1
            let line = line_num + 2;
            let row = result.with_context(|| format!("CSV parse error at line {line}"))?;
            let record = SeasonalRecord::try_from(row)
                .with_context(|| format!("Invalid seasonal record at line {line}"))?;
            records.push(record);
        }

        Self::from_records(records)
    }

    /// Builds the table, rejecting a second record for an existing (service, month) pair.
    pub fn from_records<I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = SeasonalRecord>,
    {
        let mut table = HashMap::new();
        for record in records {
            let key = (record.service, record.month);
            if table.insert(key, record).is_some() {
                bail!(
                    "Duplicate seasonal record for {} in {}",
                    record.service,
                    record.month.name()
                );
            }
        }
        Ok(Self {
            records: table,
            sample: false,
        })
    }

    pub fn lookup(&self, service: Service, month: Month) -> Result<&SeasonalRecord, PricingError> {
        match self.records.get(&(service, month)) {
            Some(record) => {
                debug!(
                    "Seasonal lookup HIT for {service} in {}: mean={}, std_dev={}",
                    month.name(),
                    record.mean_demand,
                    record.std_dev
                );
                Ok(record)
            }
            None => {
                debug!("Seasonal lookup MISS for {service} in {}", month.name());
                Err(PricingError::DataNotFound {
                    service,
                    month: month.name().to_string(),
                })
            }
        }
    }

    /// All records of a service, ordered January to December.
    pub fn series(&self, service: Service) -> Vec<&SeasonalRecord> {
        let mut series: Vec<_> = self
            .records
            .values()
            .filter(|r| r.service == service)
            .collect();
        series.sort_by_key(|r| r.month.number_from_month());
        series
    }

    /// Services that have at least one record.
    pub fn services(&self) -> Vec<Service> {
        let mut services: Vec<Service> = self.records.keys().map(|(s, _)| *s).collect();
        services.sort();
        services.dedup();
        services
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
