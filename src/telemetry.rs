//! Opt-in `tracing` setup for hosts embedding `covid-series`.
//!
//! Load, filter and view-building spans log at `debug`; duplicate rows
//! replaced during load log at `warn`. Hosts with their own subscriber can
//! ignore this module.

/// Filter used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "covid_series=info";

/// Installs a compact global subscriber (requires the `telemetry` feature).
///
/// Returns `false` when the feature is disabled or a global subscriber is
/// already installed.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_filter(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with an explicit fallback filter directive.
#[must_use]
pub fn init_tracing_with_filter(fallback_filter: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_filter));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_filter;
        false
    }
}
