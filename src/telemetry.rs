//! Opt-in tracing bootstrap for hosts embedding `chart-kit`.
//!
//! Library code only emits `tracing` events; nothing is printed until a
//! subscriber is installed, either through [`init_default_tracing`] or by the
//! host application itself.

/// Filter directive used when `RUST_LOG` is unset or unparsable.
pub const DEFAULT_FILTER_DIRECTIVE: &str = "info";

/// Installs a compact `tracing` fmt subscriber when the `telemetry` feature is enabled.
///
/// Returns `true` when this call installed the global subscriber, `false` when
/// the feature is disabled or a subscriber was already registered.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_default(DEFAULT_FILTER_DIRECTIVE)
}

/// Same as [`init_default_tracing`] with a caller-provided fallback directive
/// (for example `"chart_kit=trace"`).
#[must_use]
pub fn init_tracing_with_default(directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(directive));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = directive;
        false
    }
}
