use crate::core::pricing::PriceTerms;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

/// Values pre-filled into a pricing scenario when not given on the command line.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
#[serde(default)]
pub struct PricingDefaults {
    pub original_price: f64,
    pub service_cost: f64,
    pub commission_pct: f64,
    pub desired_profit_increase_pct: f64,
    pub promotional_price: f64,
}

impl Default for PricingDefaults {
    fn default() -> Self {
        PricingDefaults {
            original_price: 100.0,
            service_cost: 20.0,
            commission_pct: 30.0,
            desired_profit_increase_pct: 5.0,
            promotional_price: 100.0,
        }
    }
}

impl From<&PricingDefaults> for PriceTerms {
    fn from(defaults: &PricingDefaults) -> Self {
        PriceTerms {
            original_price: defaults.original_price,
            promotional_price: defaults.promotional_price,
            service_cost: defaults.service_cost,
            commission_pct: defaults.commission_pct,
            desired_profit_increase_pct: defaults.desired_profit_increase_pct,
        }
    }
}

fn default_currency() -> String {
    "R$".to_string()
}

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct AppConfig {
    /// Symbol printed in front of money amounts.
    #[serde(default = "default_currency")]
    pub currency: String,
    /// CSV file with the seasonal demand table; the built-in dataset is used when unset.
    pub data_path: Option<String>,
    #[serde(default)]
    pub defaults: PricingDefaults,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            currency: default_currency(),
            data_path: None,
            defaults: PricingDefaults::default(),
        }
    }
}

impl AppConfig {
    /// Loads the config at the default location, falling back to built-in
    /// defaults when no file has been created yet.
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        if !config_path.exists() {
            debug!(
                "No config file at {}, using defaults",
                config_path.display()
            );
            return Ok(Self::default());
        }
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("app", "promoplan", "promoplan")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let mut config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;

        // A relative data path is resolved against the config file's directory
        if let Some(data_path) = &config.data_path
            && PathBuf::from(data_path).is_relative()
            && let Some(parent) = path.as_ref().parent()
        {
            config.data_path = Some(parent.join(data_path).to_string_lossy().into_owned());
        }

        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
currency: "US$"
data_path: "/srv/promoplan/demand.csv"
defaults:
  original_price: 150.0
  service_cost: 35.5
  commission_pct: 40
  desired_profit_increase_pct: 12.5
  promotional_price: 120.0
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.currency, "US$");
        assert_eq!(
            config.data_path.as_deref(),
            Some("/srv/promoplan/demand.csv")
        );
        assert_eq!(config.defaults.original_price, 150.0);
        assert_eq!(config.defaults.service_cost, 35.5);
        assert_eq!(config.defaults.commission_pct, 40.0);
        assert_eq!(config.defaults.desired_profit_increase_pct, 12.5);
        assert_eq!(config.defaults.promotional_price, 120.0);
    }

    #[test]
    fn test_missing_fields_use_defaults() {
        let config: AppConfig = serde_yaml::from_str("defaults:\n  service_cost: 10\n").unwrap();
        assert_eq!(config.currency, "R$");
        assert!(config.data_path.is_none());
        assert_eq!(config.defaults.service_cost, 10.0);
        assert_eq!(config.defaults.original_price, 100.0);
        assert_eq!(config.defaults.commission_pct, 30.0);

        let empty: AppConfig = serde_yaml::from_str("{}").unwrap();
        assert_eq!(empty, AppConfig::default());
    }

    #[test]
    fn test_defaults_become_price_terms() {
        let terms = PriceTerms::from(&PricingDefaults::default());
        assert_eq!(terms.original_price, 100.0);
        assert_eq!(terms.promotional_price, 100.0);
        assert_eq!(terms.service_cost, 20.0);
        assert_eq!(terms.commission_pct, 30.0);
        assert_eq!(terms.desired_profit_increase_pct, 5.0);
    }

    #[test]
    fn test_relative_data_path_is_resolved_against_config_dir() -> Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "data_path: demand.csv\n")?;

        let config = AppConfig::load_from_path(&config_path)?;
        assert_eq!(
            config.data_path.map(PathBuf::from),
            Some(temp_dir.path().join("demand.csv"))
        );
        Ok(())
    }

    #[test]
    fn test_invalid_yaml_fails() -> Result<()> {
        let temp_dir = tempfile::TempDir::new()?;
        let config_path = temp_dir.path().join("config.yaml");
        fs::write(&config_path, "defaults: [1, 2")?;

        let err = AppConfig::load_from_path(&config_path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
        Ok(())
    }
}
