//! Exportable scenario report, written as Markdown or JSON.

use super::ui::format_money;
use crate::core::pricing::{ComparisonRow, DemandSource, PriceTerms, PricingInput, PricingResult};
use crate::core::service::Service;
use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use serde::Serialize;
use std::fmt::Write as _;
use std::path::Path;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Markdown,
    Json,
}

impl ReportFormat {
    /// `.json` files get JSON, anything else Markdown.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => ReportFormat::Json,
            _ => ReportFormat::Markdown,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub generated_at: DateTime<Local>,
    pub currency: String,
    /// `None` for a custom service with user-supplied demand.
    pub service: Option<Service>,
    pub month: Option<String>,
    pub demand: f64,
    pub std_dev: Option<f64>,
    pub terms: PriceTerms,
    pub result: PricingResult,
    pub comparison: [ComparisonRow; 4],
    pub profit_change_pct: Option<f64>,
}

impl Report {
    pub fn new(input: &PricingInput, result: &PricingResult, currency: &str) -> Self {
        let (service, month, std_dev) = match input.source {
            DemandSource::Seasonal {
                service,
                month,
                std_dev,
            } => (Some(service), Some(month.name().to_string()), Some(std_dev)),
            DemandSource::Custom => (None, None, None),
        };

        Report {
            generated_at: Local::now(),
            currency: currency.to_string(),
            service,
            month,
            demand: input.demand,
            std_dev,
            terms: input.terms,
            result: *result,
            comparison: result.comparison(),
            profit_change_pct: result.profit_change_pct(),
        }
    }

    fn money(&self, value: f64) -> String {
        format_money(&self.currency, value)
    }

    pub fn to_markdown(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail
        let _ = self.write_markdown(&mut out);
        out
    }

    fn write_markdown(&self, out: &mut String) -> std::fmt::Result {
        let r = &self.result;
        let units = self.service.map_or("units of the service", |s| s.unit_plural());

        writeln!(out, "# Seasonal Analysis and Pricing Report\n")?;
        writeln!(
            out,
            "Generated on {}\n",
            self.generated_at.format("%Y-%m-%d %H:%M")
        )?;

        writeln!(out, "## Service\n")?;
        match self.service {
            Some(service) => {
                writeln!(out, "- **Service:** {service}")?;
                if let Some(month) = &self.month {
                    writeln!(out, "- **Month:** {month}")?;
                }
            }
            None => {
                writeln!(out, "- **Service:** Other")?;
                writeln!(out, "- **Expected demand:** {:.1} {units}", self.demand)?;
            }
        }

        if self.service.is_some() {
            writeln!(out, "\n## Demand Analysis\n")?;
            writeln!(out, "- **Expected demand:** {:.1} {units}", self.demand)?;
            if let Some(std_dev) = self.std_dev {
                writeln!(out, "- **Standard deviation:** ±{std_dev:.2}")?;
            }
        }

        let t = &self.terms;
        writeln!(out, "\n## Pricing Parameters\n")?;
        writeln!(out, "- **Original price:** {}", self.money(t.original_price))?;
        writeln!(out, "- **Cost per service:** {}", self.money(t.service_cost))?;
        writeln!(out, "- **Commission:** {:.1}%", t.commission_pct)?;
        writeln!(
            out,
            "- **Desired profit increase:** {:.1}%",
            t.desired_profit_increase_pct
        )?;
        writeln!(
            out,
            "- **Promotional price:** {}",
            self.money(t.promotional_price)
        )?;

        writeln!(out, "\n## Scenario Without Promotion\n")?;
        writeln!(out, "- **Total revenue:** {}", self.money(r.revenue_without))?;
        writeln!(out, "- **Commission:** {}", self.money(r.commission_without))?;
        writeln!(out, "- **Total cost:** {}", self.money(r.cost_without))?;
        writeln!(out, "- **Profit:** {}", self.money(r.profit_without))?;

        writeln!(out, "\n## Promotional Scenario\n")?;
        writeln!(out, "- **Target profit:** {}", self.money(r.desired_profit))?;
        writeln!(
            out,
            "- **Required quantity:** {} {units}",
            r.required_quantity
        )?;
        writeln!(out, "- **Total revenue:** {}", self.money(r.revenue_with))?;
        writeln!(out, "- **Commission:** {}", self.money(r.commission_with))?;
        writeln!(out, "- **Total cost:** {}", self.money(r.cost_with))?;
        writeln!(out, "- **Profit:** {}", self.money(r.profit_with))?;

        writeln!(out, "\n## Comparison\n")?;
        writeln!(out, "| Category | Without Promotion | With Promotion |")?;
        writeln!(out, "|---|---:|---:|")?;
        for row in &self.comparison {
            writeln!(
                out,
                "| {} | {} | {} |",
                row.category,
                self.money(row.without_promotion),
                self.money(row.with_promotion)
            )?;
        }

        writeln!(out, "\n## Recommendation\n")?;
        writeln!(
            out,
            "Sell **{} {units}** at the promotional price of {} to reach a profit of {}.",
            r.required_quantity,
            self.money(t.promotional_price),
            self.money(r.desired_profit)
        )?;
        if let Some(change) = self.profit_change_pct {
            writeln!(out, "\nProfit change against the baseline: {change:+.1}%")?;
        }

        Ok(())
    }
}

/// Writes `report` to `path`, choosing the format from the file extension.
pub fn write_report<P: AsRef<Path>>(path: P, report: &Report) -> Result<()> {
    let path = path.as_ref();
    let format = ReportFormat::from_path(path);

    let content = match format {
        ReportFormat::Json => {
            serde_json::to_string_pretty(report).context("Failed to serialize report")?
        }
        ReportFormat::Markdown => report.to_markdown(),
    };

    std::fs::write(path, content)
        .with_context(|| format!("Failed to write report to {}", path.display()))?;
    debug!("Wrote {format:?} report to {}", path.display());
    Ok(())
}
