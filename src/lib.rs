pub mod cli;
pub mod core;

use crate::cli::pricing::PriceRequest;
use crate::core::config::AppConfig;
use crate::core::{SeasonalData, Service};
use anyhow::Result;
use tracing::{debug, info};

/// A command that needs the configuration and the seasonal dataset.
#[derive(Debug, Clone)]
pub enum AppCommand {
    /// Show monthly demand for one service, or all of them.
    Seasonal { service: Option<Service> },
    /// Compute a promotional pricing scenario.
    Price(PriceRequest),
}

/// Loads the seasonal table named by the config, or the built-in one.
pub fn load_seasonal_data(config: &AppConfig) -> Result<SeasonalData> {
    match &config.data_path {
        Some(path) => SeasonalData::load_from_path(path),
        None => SeasonalData::builtin(),
    }
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    info!("promoplan starting...");

    let config = match config_path {
        Some(path) => AppConfig::load_from_path(path)?,
        None => AppConfig::load()?,
    };
    debug!("Loaded config: {config:#?}");

    let data = load_seasonal_data(&config)?;
    debug!("Loaded {} seasonal records", data.len());
    if let Some(notice) = cli::sample_data_notice(&data) {
        eprintln!("{notice}");
    }

    match command {
        AppCommand::Seasonal { service } => cli::seasonal::run(&data, service),
        AppCommand::Price(request) => cli::pricing::run(&request, &config, &data),
    }
}
