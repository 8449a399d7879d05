use chrono::Month;
use clap::{Args, CommandFactory, Parser, Subcommand};
use promoplan::cli::pricing::PriceRequest;
use promoplan::core::Service;
use promoplan::core::log::init_logging;
use promoplan::core::service::parse_month;
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Display monthly mean demand and standard deviation per service
    Seasonal {
        /// Only show this service (drainage, massage)
        #[arg(short, long)]
        service: Option<Service>,
    },
    /// Compute the promotional sales volume needed to reach a profit target
    Price(PriceArgs),
}

#[derive(Args)]
struct PriceArgs {
    /// Service whose seasonal demand is used (drainage, massage)
    #[arg(short, long, conflicts_with = "demand")]
    service: Option<Service>,

    /// Month of the seasonal lookup, as a number or a name [default: current month]
    #[arg(short, long, value_parser = parse_month, requires = "service")]
    month: Option<Month>,

    /// Expected demand for any other service
    #[arg(short, long)]
    demand: Option<f64>,

    /// Regular price per service
    #[arg(long)]
    original_price: Option<f64>,

    /// Cost of performing one service
    #[arg(long)]
    service_cost: Option<f64>,

    /// Commission paid per service, as a percentage of revenue (0-130)
    #[arg(long = "commission")]
    commission_pct: Option<f64>,

    /// Desired profit increase over the current scenario, in percent
    #[arg(long = "profit-increase")]
    desired_profit_increase_pct: Option<f64>,

    /// Promotional price per service
    #[arg(long)]
    promotional_price: Option<f64>,

    /// Write a report to this file (.json for JSON, Markdown otherwise)
    #[arg(short, long)]
    report: Option<PathBuf>,
}

impl From<PriceArgs> for PriceRequest {
    fn from(args: PriceArgs) -> PriceRequest {
        PriceRequest {
            service: args.service,
            month: args.month,
            demand: args.demand,
            original_price: args.original_price,
            service_cost: args.service_cost,
            commission_pct: args.commission_pct,
            desired_profit_increase_pct: args.desired_profit_increase_pct,
            promotional_price: args.promotional_price,
            report: args.report,
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let config_path = cli.config_path.as_deref();
    let result = match cli.command {
        Some(Commands::Setup) => promoplan::cli::setup::setup(),
        Some(Commands::Seasonal { service }) => {
            promoplan::run_command(promoplan::AppCommand::Seasonal { service }, config_path)
        }
        Some(Commands::Price(args)) => {
            promoplan::run_command(promoplan::AppCommand::Price(args.into()), config_path)
        }
        None => Cli::command().print_help().map_err(Into::into),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Application failed");
            eprintln!("{}", promoplan::cli::format_error(&e));
            ExitCode::FAILURE
        }
    }
}
