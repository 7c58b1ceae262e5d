//! Telemetry helpers for applications embedding `chart-surface`.
//!
//! Every event is emitted under the `chart_surface` target, with module
//! paths below it:
//!
//! - `chart_surface::core::mode` logs mode transitions at `debug`.
//! - `chart_surface::api::layer_registry` logs layer registration and
//!   deferred construction at `debug`.
//! - `chart_surface::api::resize_controller` and `chart_surface::core::throttle`
//!   log each resize signal and throttle decision at `trace`.
//! - `chart_surface::api::resize_dispatcher` and `chart_surface::api::mode_controller`
//!   warn when a surface is busy or a mode change leaves the chart stale.
//!
//! `RUST_LOG=chart_surface=debug` shows mode and layer activity without the
//! per-signal noise; `RUST_LOG=chart_surface::api::resize_controller=trace`
//! follows a single resize handshake.

/// Initializes a default `tracing` subscriber when the `telemetry` feature is enabled.
///
/// Filtering honours `RUST_LOG` and defaults to `info`, which hides the
/// per-resize `trace` events.
/// Returns `false` when the feature is disabled or the host already set a
/// global subscriber.
#[must_use]
pub fn init_default_tracing() -> bool {
    #[cfg(feature = "telemetry")]
    {
        let filter = tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

        return tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .compact()
            .try_init()
            .is_ok();
    }

    #[cfg(not(feature = "telemetry"))]
    {
        false
    }
}
