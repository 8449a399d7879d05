use promoplan::cli::pricing::PriceRequest;
use promoplan::core::{PricingError, Service};
use promoplan::{AppCommand, run_command};
use std::fs;
use std::path::Path;
use tempfile::TempDir;
use tracing::info;

mod test_utils {
    use std::fs;
    use std::path::{Path, PathBuf};

    pub const DATASET: &str = "\
service,month,mean_demand,std_dev
lymphatic_drainage,3,20,3.5
lymphatic_drainage,4,18,2.5
relaxing_massage,3,26,4.0
";

    /// Writes a dataset and a config pointing at it; returns the config path.
    pub fn write_config(dir: &Path, extra: &str) -> PathBuf {
        fs::write(dir.join("demand.csv"), DATASET).expect("Failed to write dataset");

        let config_path = dir.join("config.yaml");
        let config = format!(
            r#"
currency: "R$"
data_path: demand.csv
{extra}
"#
        );
        fs::write(&config_path, config).expect("Failed to write config file");
        config_path
    }
}

fn config_str(path: &Path) -> &str {
    path.to_str().expect("temp path should be UTF-8")
}

#[test_log::test]
fn test_seasonal_flow_with_custom_dataset() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(temp_dir.path(), "");

    let result = run_command(
        AppCommand::Seasonal { service: None },
        Some(config_str(&config_path)),
    );
    assert!(result.is_ok(), "Seasonal command failed with: {:?}", result.err());

    let result = run_command(
        AppCommand::Seasonal {
            service: Some(Service::RelaxingMassage),
        },
        Some(config_str(&config_path)),
    );
    assert!(result.is_ok());
}

#[test_log::test]
fn test_price_flow_writes_markdown_and_json_reports() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(temp_dir.path(), "");

    for file_name in ["report.md", "report.json"] {
        let report_path = temp_dir.path().join(file_name);
        let request = PriceRequest {
            service: Some(Service::LymphaticDrainage),
            month: Some(chrono::Month::March),
            report: Some(report_path.clone()),
            ..Default::default()
        };

        let result = run_command(AppCommand::Price(request), Some(config_str(&config_path)));
        assert!(result.is_ok(), "Price command failed with: {:?}", result.err());

        let content = fs::read_to_string(&report_path).unwrap();
        info!(file_name, "Report written");
        if file_name.ends_with(".json") {
            let value: serde_json::Value = serde_json::from_str(&content).unwrap();
            assert_eq!(value["result"]["required_quantity"], 22);
            assert_eq!(value["result"]["desired_profit"], 1050.0);
        } else {
            assert!(content.contains("Sell **22 drainages**"));
        }
    }
}

#[test_log::test]
fn test_price_flow_uses_config_defaults() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(
        temp_dir.path(),
        r#"
defaults:
  original_price: 200.0
  promotional_price: 150.0
  service_cost: 50.0
  commission_pct: 20.0
  desired_profit_increase_pct: 10.0
"#,
    );
    let report_path = temp_dir.path().join("custom.json");
    let request = PriceRequest {
        demand: Some(10.0),
        report: Some(report_path.clone()),
        ..Default::default()
    };

    run_command(AppCommand::Price(request), Some(config_str(&config_path))).unwrap();

    let value: serde_json::Value =
        serde_json::from_str(&fs::read_to_string(&report_path).unwrap()).unwrap();
    // Baseline: 2000 - 400 - 500 = 1100, target 1210, 70 per promotional unit
    assert_eq!(value["service"], serde_json::Value::Null);
    assert_eq!(value["terms"]["original_price"], 200.0);
    assert_eq!(value["result"]["profit_without"], 1100.0);
    assert_eq!(value["result"]["unit_profit"], 70.0);
    assert_eq!(value["result"]["required_quantity"], 18);
}

#[test_log::test]
fn test_price_flow_missing_month_is_data_not_found() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(temp_dir.path(), "");
    let request = PriceRequest {
        service: Some(Service::RelaxingMassage),
        month: Some(chrono::Month::April),
        ..Default::default()
    };

    let err = run_command(AppCommand::Price(request), Some(config_str(&config_path))).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PricingError>(),
        Some(PricingError::DataNotFound { service: Service::RelaxingMassage, .. })
    ));
}

#[test_log::test]
fn test_price_flow_rejects_infeasible_and_invalid_inputs() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(temp_dir.path(), "");

    let infeasible = PriceRequest {
        demand: Some(20.0),
        promotional_price: Some(25.0),
        ..Default::default()
    };
    let err =
        run_command(AppCommand::Price(infeasible), Some(config_str(&config_path))).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PricingError>(),
        Some(PricingError::InfeasiblePromotion { .. })
    ));

    let zero_demand = PriceRequest {
        demand: Some(0.0),
        ..Default::default()
    };
    let err =
        run_command(AppCommand::Price(zero_demand), Some(config_str(&config_path))).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PricingError>(),
        Some(PricingError::NotComputable { .. })
    ));

    let too_much_commission = PriceRequest {
        demand: Some(20.0),
        commission_pct: Some(150.0),
        ..Default::default()
    };
    let err = run_command(
        AppCommand::Price(too_much_commission),
        Some(config_str(&config_path)),
    )
    .unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PricingError>(),
        Some(PricingError::InvalidInput { field: "commission", .. })
    ));
}

#[test_log::test]
fn test_malformed_dataset_fails_fast() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(temp_dir.path(), "");
    fs::write(
        temp_dir.path().join("demand.csv"),
        "service,month,mean_demand,std_dev\nrelaxing_massage,3,26\n",
    )
    .unwrap();

    let err = run_command(
        AppCommand::Seasonal { service: None },
        Some(config_str(&config_path)),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Failed to load seasonal data file"));
}

#[test_log::test]
fn test_missing_config_file_fails() {
    let temp_dir = TempDir::new().unwrap();
    let missing = temp_dir.path().join("nope.yaml");

    let err = run_command(
        AppCommand::Seasonal { service: None },
        Some(config_str(&missing)),
    )
    .unwrap_err();
    assert!(err.to_string().contains("Failed to read config file"));
}

#[test_log::test]
fn test_price_flow_rejects_quantity_beyond_whole_units() {
    let temp_dir = TempDir::new().unwrap();
    let config_path = test_utils::write_config(temp_dir.path(), "");
    // Target of 1e14 at a margin of 1e-10 per service needs ~1e24 services
    let request = PriceRequest {
        demand: Some(1e12),
        original_price: Some(100.0),
        service_cost: Some(0.0),
        commission_pct: Some(0.0),
        desired_profit_increase_pct: Some(0.0),
        promotional_price: Some(1e-10),
        ..Default::default()
    };

    let err = run_command(AppCommand::Price(request), Some(config_str(&config_path))).unwrap_err();
    assert!(matches!(
        err.downcast_ref::<PricingError>(),
        Some(PricingError::QuantityOutOfRange { .. })
    ));

    let message = console::strip_ansi_codes(&promoplan::cli::format_error(&err)).to_string();
    assert!(message.starts_with("Error: Required quantity is out of range"));
    assert!(message.contains("Lower the profit increase"));
}
