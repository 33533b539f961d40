//! Process-wide log/trace subscriber for services embedding this crate.

use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{fmt, EnvFilter, Registry};

use crate::error::TelemetryError;

/// Filter used when neither `RUST_LOG` nor an explicit filter is given.
pub const DEFAULT_FILTER: &str = "info";

/// Picks the filter directive: `RUST_LOG` wins over `fallback`.
pub fn filter_directive(fallback: Option<&str>) -> String {
    std::env::var(EnvFilter::DEFAULT_ENV)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .or_else(|| fallback.map(str::to_string))
        .unwrap_or_else(|| DEFAULT_FILTER.to_string())
}

/// Installs the global subscriber and routes `log` records into it.
///
/// Can only succeed once per process.
pub fn init_tracing(filter: &str, json: bool) -> Result<(), TelemetryError> {
    let env_filter = EnvFilter::try_new(filter).map_err(|e| TelemetryError::Filter {
        filter: filter.to_string(),
        reason: e.to_string(),
    })?;

    tracing_log::LogTracer::init()?;

    let (json_layer, text_layer) = if json {
        (Some(fmt::layer().json().with_target(true)), None)
    } else {
        (None, Some(fmt::layer().with_target(true)))
    };

    let subscriber = Registry::default()
        .with(env_filter)
        .with(json_layer)
        .with(text_layer);
    tracing::subscriber::set_global_default(subscriber)?;

    log::info!("Tracing initialized with filter '{}'", filter);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    #[test]
    #[serial]
    fn test_filter_directive_prefers_env() {
        std::env::set_var("RUST_LOG", "semjobs=debug");
        assert_eq!(filter_directive(Some("warn")), "semjobs=debug");
        std::env::remove_var("RUST_LOG");
    }

    #[test]
    #[serial]
    fn test_filter_directive_fallbacks() {
        std::env::remove_var("RUST_LOG");
        assert_eq!(filter_directive(Some("warn")), "warn");
        assert_eq!(filter_directive(None), DEFAULT_FILTER);
    }

    #[test]
    fn test_invalid_filter_rejected() {
        let err = init_tracing("semjobs=[", false).unwrap_err();
        assert!(matches!(err, TelemetryError::Filter { .. }));
    }
}
