use super::ui;
use crate::core::{SeasonalData, SeasonalRecord, Service};
use anyhow::Result;
use comfy_table::{Cell, Color};
use tracing::debug;

const BAR_WIDTH: usize = 30;

/// Prints the monthly demand table of one service, or of every service in the dataset.
pub fn run(data: &SeasonalData, service: Option<Service>) -> Result<()> {
    let services = match service {
        Some(s) => vec![s],
        None => data.services(),
    };
    debug!("Displaying seasonal demand for {} service(s)", services.len());

    if services.is_empty() {
        println!("No seasonal data to display.");
        return Ok(());
    }

    for (i, service) in services.iter().enumerate() {
        println!("{}", render_service(data, *service));
        if i < services.len() - 1 {
            ui::print_separator();
        }
    }

    Ok(())
}

/// Renders the title, month table and summary line for a service.
pub fn render_service(data: &SeasonalData, service: Service) -> String {
    let series = data.series(service);
    let mut output = format!(
        "Service: {}\n\n",
        ui::style_text(service.label(), ui::StyleType::Title)
    );

    if series.is_empty() {
        output.push_str(&ui::style_text(
            &format!("No seasonal data found for {service}"),
            ui::StyleType::Error,
        ));
        return output;
    }

    let max_demand = series
        .iter()
        .map(|r| r.mean_demand)
        .fold(0.0_f64, f64::max);

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Month"),
        ui::header_cell("Mean Demand"),
        ui::header_cell("Std Dev"),
        ui::header_cell("Demand"),
    ]);

    for record in &series {
        table.add_row(vec![
            Cell::new(record.month.name()),
            ui::number_cell(record.mean_demand, 1),
            ui::number_cell(record.std_dev, 2),
            ui::bar_cell(record.mean_demand, max_demand, BAR_WIDTH, Color::Green),
        ]);
    }
    output.push_str(&table.to_string());

    if let Some(summary) = summarize(&series) {
        output.push_str(&format!(
            "\n\n{} {} ({:.1} {})   {} {} ({:.1} {})   {} {:.1}",
            ui::style_text("Peak:", ui::StyleType::TotalLabel),
            summary.peak.month.name(),
            summary.peak.mean_demand,
            service.unit_plural(),
            ui::style_text("Low:", ui::StyleType::TotalLabel),
            summary.low.month.name(),
            summary.low.mean_demand,
            service.unit_plural(),
            ui::style_text("Monthly average:", ui::StyleType::TotalLabel),
            summary.average,
        ));
    }

    output
}

struct SeriesSummary<'a> {
    peak: &'a SeasonalRecord,
    low: &'a SeasonalRecord,
    average: f64,
}

fn summarize<'a>(series: &[&'a SeasonalRecord]) -> Option<SeriesSummary<'a>> {
    let peak = *series
        .iter()
        .max_by(|a, b| a.mean_demand.total_cmp(&b.mean_demand))?;
    let low = *series
        .iter()
        .min_by(|a, b| a.mean_demand.total_cmp(&b.mean_demand))?;
    let average = series.iter().map(|r| r.mean_demand).sum::<f64>() / series.len() as f64;

    Some(SeriesSummary { peak, low, average })
}
