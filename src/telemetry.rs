//! Telemetry helpers for applications embedding `chart-cairo`.
//!
//! Renderers never install a subscriber on their own. Every renderer emits
//! its primitive calls as `trace` events under the span it was built with, so
//! hosts can either call one of the helpers below or wire their own subscriber.
//!
//! Typical filters:
//! - `RUST_LOG=chart_cairo=info` for per-frame timings from the GTK view
//! - `RUST_LOG=chart_cairo=trace` for every forwarded drawing primitive

/// Directive used when `RUST_LOG` is unset.
pub const DEFAULT_FILTER: &str = "chart_cairo=info";

/// Initializes a compact `tracing` subscriber filtered by `RUST_LOG`, or by
/// [`DEFAULT_FILTER`] when the variable is unset.
///
/// Returns `false` when the `telemetry` feature is disabled or a global
/// subscriber was already installed by the host application.
#[must_use]
pub fn init_default_tracing() -> bool {
    init_tracing_with_fallback(DEFAULT_FILTER)
}

/// Same as [`init_default_tracing`] with a caller-chosen fallback directive.
#[must_use]
pub fn init_tracing_with_fallback(fallback_directive: &str) -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(fallback_directive));
        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        let _ = fallback_directive;
        false
    }
}
