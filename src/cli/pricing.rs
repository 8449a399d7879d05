use super::report::{self, Report};
use super::ui;
use crate::core::config::AppConfig;
use crate::core::{
    DemandSource, PriceTerms, PricingInput, PricingResult, SeasonalData, Service,
    compute_scenario,
};
use anyhow::{Result, bail};
use chrono::{Datelike, Local, Month};
use comfy_table::{Cell, Color};
use std::path::PathBuf;
use tracing::{debug, info};

const BAR_WIDTH: usize = 16;

/// Parameters of one `price` invocation. Unset numbers fall back to the configured defaults.
#[derive(Debug, Clone, Default)]
pub struct PriceRequest {
    pub service: Option<Service>,
    pub month: Option<Month>,
    /// User-supplied demand for a service without seasonal data.
    pub demand: Option<f64>,
    pub original_price: Option<f64>,
    pub service_cost: Option<f64>,
    pub commission_pct: Option<f64>,
    pub desired_profit_increase_pct: Option<f64>,
    pub promotional_price: Option<f64>,
    pub report: Option<PathBuf>,
}

impl PriceRequest {
    fn terms(&self, config: &AppConfig) -> PriceTerms {
        let defaults = PriceTerms::from(&config.defaults);
        PriceTerms {
            original_price: self.original_price.unwrap_or(defaults.original_price),
            promotional_price: self.promotional_price.unwrap_or(defaults.promotional_price),
            service_cost: self.service_cost.unwrap_or(defaults.service_cost),
            commission_pct: self.commission_pct.unwrap_or(defaults.commission_pct),
            desired_profit_increase_pct: self
                .desired_profit_increase_pct
                .unwrap_or(defaults.desired_profit_increase_pct),
        }
    }
}

fn current_month() -> Month {
    // chrono reports months as 1..=12
    Month::try_from(Local::now().month() as u8).unwrap_or(Month::January)
}

/// Resolves the demand source and terms of a request into a calculator input.
pub fn build_input(
    request: &PriceRequest,
    config: &AppConfig,
    data: &SeasonalData,
) -> Result<PricingInput> {
    let terms = request.terms(config);

    if let Some(demand) = request.demand {
        if request.service.is_some() {
            debug!("Custom demand given, ignoring the seasonal lookup");
        }
        return Ok(PricingInput::custom(demand, terms));
    }

    let Some(service) = request.service else {
        bail!("Choose a service with --service or give a custom demand with --demand");
    };
    let month = request.month.unwrap_or_else(current_month);
    let record = data.lookup(service, month)?;
    Ok(PricingInput::seasonal(record, terms))
}

pub fn run(request: &PriceRequest, config: &AppConfig, data: &SeasonalData) -> Result<()> {
    let input = build_input(request, config, data)?;
    info!("Computing pricing scenario for demand {}", input.demand);

    let result = compute_scenario(&input)?;
    println!("{}", render_scenario(&input, &result, &config.currency));

    if let Some(path) = &request.report {
        report::write_report(path, &Report::new(&input, &result, &config.currency))?;
        println!(
            "\nReport written to {}",
            ui::style_text(&path.display().to_string(), ui::StyleType::TotalLabel)
        );
    }

    Ok(())
}

fn units_noun(source: &DemandSource) -> &'static str {
    match source {
        DemandSource::Seasonal { service, .. } => service.unit_plural(),
        DemandSource::Custom => "units of the service",
    }
}

/// Renders the baseline, the promotion target and the with/without comparison.
pub fn render_scenario(input: &PricingInput, result: &PricingResult, currency: &str) -> String {
    let units = units_noun(&input.source);
    let terms = &input.terms;

    let mut output = match input.source {
        DemandSource::Seasonal {
            service,
            month,
            std_dev,
        } => format!(
            "Service: {} ({})\nExpected demand: {:.1} {units} (±{std_dev:.2})\n\n",
            ui::style_text(service.label(), ui::StyleType::Title),
            month.name(),
            input.demand,
        ),
        DemandSource::Custom => format!(
            "Service: {}\nExpected demand: {:.1} {units}\n\n",
            ui::style_text("Other", ui::StyleType::Title),
            input.demand,
        ),
    };

    let mut baseline = ui::new_styled_table();
    baseline.set_header(vec![
        ui::header_cell("Without Promotion"),
        ui::header_cell("Amount"),
    ]);
    baseline.add_row(vec![
        Cell::new("Total revenue"),
        ui::money_cell(currency, result.revenue_without),
    ]);
    baseline.add_row(vec![
        Cell::new(format!("Commission ({:.1}%)", terms.commission_pct)),
        ui::money_cell(currency, result.commission_without),
    ]);
    baseline.add_row(vec![
        Cell::new("Service cost"),
        ui::money_cell(currency, result.cost_without),
    ]);
    baseline.add_row(vec![
        Cell::new("Profit"),
        ui::money_cell(currency, result.profit_without),
    ]);
    output.push_str(&baseline.to_string());

    output.push_str(&format!(
        "\n\n{} {}\n{}\n\n",
        ui::style_text("Target profit:", ui::StyleType::TotalLabel),
        ui::format_money(currency, result.desired_profit),
        ui::style_text(
            &format!(
                "You need to sell {} {units} at the promotional price of {}",
                result.required_quantity,
                ui::format_money(currency, terms.promotional_price)
            ),
            ui::StyleType::Highlight
        ),
    ));

    let rows = result.comparison();
    let max = rows
        .iter()
        .flat_map(|r| [r.without_promotion, r.with_promotion])
        .fold(0.0_f64, f64::max);

    let mut comparison = ui::new_styled_table();
    comparison.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("Without Promotion"),
        ui::header_cell("With Promotion"),
        ui::header_cell("Without"),
        ui::header_cell("With"),
    ]);
    for row in &rows {
        comparison.add_row(vec![
            Cell::new(row.category),
            ui::money_cell(currency, row.without_promotion),
            ui::money_cell(currency, row.with_promotion),
            ui::bar_cell(row.without_promotion, max, BAR_WIDTH, Color::Red),
            ui::bar_cell(row.with_promotion, max, BAR_WIDTH, Color::Green),
        ]);
    }
    output.push_str(&comparison.to_string());

    let change = result
        .profit_change_pct()
        .map_or_else(|| "N/A".to_string(), |c| format!("{c:+.1}%"));
    let change_style = match result.profit_change_pct() {
        Some(c) if c < 0.0 => ui::StyleType::Error,
        Some(_) => ui::StyleType::TotalValue,
        None => ui::StyleType::Subtle,
    };
    output.push_str(&format!(
        "\n\n{} {} ({})",
        ui::style_text("Profit with promotion:", ui::StyleType::TotalLabel),
        ui::style_text(
            &ui::format_money(currency, result.profit_with),
            ui::StyleType::TotalValue
        ),
        ui::style_text(&change, change_style),
    ));

    output
}
