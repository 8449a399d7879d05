//! Terminal front end: one module per command, plus shared table styling

pub mod pricing;
pub mod report;
pub mod seasonal;
pub mod setup;
pub mod ui;

use crate::core::{PricingError, SeasonalData};

const SAMPLE_DATA_NOTICE: &str = "Showing the built-in sample demand figures. Set data_path in the config to use your own.";

/// Suggests what to change when a command fails with a domain error.
pub fn hint_for(error: &anyhow::Error) -> Option<&'static str> {
    match error.downcast_ref::<PricingError>()? {
        PricingError::InfeasiblePromotion { .. } => Some(
            "Raise the promotional price, or lower the commission or the cost per service.",
        ),
        PricingError::NotComputable { .. } => Some("Provide an expected demand greater than zero."),
        PricingError::DataNotFound { .. } => {
            Some("Pick another month, or give the expected demand with --demand.")
        }
        PricingError::QuantityOutOfRange { .. } => {
            Some("Lower the profit increase, or widen the margin per promotional service.")
        }
        PricingError::InvalidInput { .. } => None,
    }
}

/// Dimmed notice shown when the built-in sample dataset is in use.
pub fn sample_data_notice(data: &SeasonalData) -> Option<String> {
    data.is_sample()
        .then(|| ui::style_text(SAMPLE_DATA_NOTICE, ui::StyleType::Subtle))
}

/// Renders a failed command for stderr: the error chain in red, then a dimmed hint if one applies.
pub fn format_error(error: &anyhow::Error) -> String {
    let mut message = ui::style_text(&format!("Error: {error:#}"), ui::StyleType::Error);
    if let Some(hint) = hint_for(error) {
        message.push('\n');
        message.push_str(&ui::style_text(hint, ui::StyleType::Subtle));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Service;

    #[test]
    fn test_hint_for_domain_errors() {
        let err = anyhow::Error::from(PricingError::InfeasiblePromotion { unit_profit: -2.0 });
        assert!(hint_for(&err).unwrap().contains("promotional price"));

        let err = anyhow::Error::from(PricingError::DataNotFound {
            service: Service::RelaxingMassage,
            month: "May".to_string(),
        });
        assert!(hint_for(&err).unwrap().contains("--demand"));

        let err = anyhow::Error::from(PricingError::QuantityOutOfRange {
            desired_profit: 1e14,
            unit_profit: 1e-10,
        });
        assert!(hint_for(&err).unwrap().contains("margin"));

        assert!(hint_for(&anyhow::anyhow!("Failed to read config file")).is_none());
    }

    #[test]
    fn test_sample_data_notice_only_for_builtin_dataset() {
        let notice = sample_data_notice(&SeasonalData::builtin().unwrap()).unwrap();
        assert!(console::strip_ansi_codes(&notice).contains("data_path"));

        assert!(sample_data_notice(&SeasonalData::default()).is_none());
    }

    #[test]
    fn test_format_error_includes_chain_and_hint() {
        let err = anyhow::Error::from(PricingError::NotComputable { demand: 0.0 })
            .context("Failed to price the promotion");
        let message = console::strip_ansi_codes(&format_error(&err)).to_string();

        let mut lines = message.lines();
        let first = lines.next().unwrap();
        assert!(first.starts_with("Error: Failed to price the promotion: "));
        assert!(first.contains(&PricingError::NotComputable { demand: 0.0 }.to_string()));
        assert_eq!(lines.next(), Some("Provide an expected demand greater than zero."));
        assert_eq!(lines.next(), None);

        let message = format_error(&anyhow::anyhow!("Failed to read config file"));
        assert_eq!(
            console::strip_ansi_codes(&message),
            "Error: Failed to read config file"
        );
    }
}
