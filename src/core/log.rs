use tracing_subscriber::{
    EnvFilter, fmt, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
};

/// Target of every event emitted by this crate.
const APP_TARGET: &str = env!("CARGO_CRATE_NAME");

/// Filter directives used when `RUST_LOG` is not set.
///
/// `--verbose` opens up this crate's debug events only; dependencies stay quiet.
pub fn default_directives(verbose: bool) -> String {
    if verbose {
        format!("{APP_TARGET}=debug")
    } else {
        "off".to_string()
    }
}

/// Builds the event filter. Non-empty, well-formed `RUST_LOG` directives win over `verbose`.
pub fn build_filter(verbose: bool, env_directives: Option<&str>) -> EnvFilter {
    let fallback = || EnvFilter::new(default_directives(verbose));
    match env_directives.map(str::trim) {
        Some(directives) if !directives.is_empty() => {
            EnvFilter::try_new(directives).unwrap_or_else(|e| {
                eprintln!("Ignoring invalid RUST_LOG '{directives}': {e}");
                fallback()
            })
        }
        _ => fallback(),
    }
}

/// Installs the global subscriber, writing pretty events to stderr so tables on stdout stay clean.
pub fn init_logging(verbose: bool) {
    let env_directives = std::env::var(EnvFilter::DEFAULT_ENV).ok();

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .pretty()
                .without_time()
                .with_ansi(console::colors_enabled_stderr())
                .with_writer(std::io::stderr),
        )
        .with(build_filter(verbose, env_directives.as_deref()))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_directives_follow_verbosity() {
        assert_eq!(default_directives(true), "promoplan=debug");
        assert_eq!(default_directives(false), "off");
    }

    #[test]
    fn test_build_filter_prefers_env_directives() {
        let filter = build_filter(false, Some("promoplan::core=trace"));
        assert!(filter.to_string().contains("promoplan::core=trace"));

        let filter = build_filter(true, None);
        assert!(filter.to_string().contains("promoplan=debug"));
    }

    #[test]
    fn test_build_filter_falls_back_on_blank_or_invalid_env() {
        let filter = build_filter(true, Some("   "));
        assert!(filter.to_string().contains("promoplan=debug"));

        let filter = build_filter(true, Some("promoplan=notalevel"));
        assert!(filter.to_string().contains("promoplan=debug"));
    }
}
