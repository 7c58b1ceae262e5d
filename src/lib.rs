//! chart-surface: responsive, mode-aware extension layer for a charting base.
//!
//! A [`ChartSurface`] sizes itself from its container's computed style,
//! selects an active *mode* from an ordered list of predicates, re-evaluates
//! that mode on throttled window resizes and only constructs layers whose
//! mode whitelist admits the active mode.

pub mod api;
pub mod core;
pub mod error;
pub mod host;
pub mod render;
pub mod telemetry;

pub use api::{ChartDefinition, ChartSurface, SurfaceConfig, SurfaceEvent};
pub use error::{ChartError, ChartResult};
