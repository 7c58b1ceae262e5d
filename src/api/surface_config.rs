use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::core::ThrottleOptions;
use crate::error::{ChartError, ChartResult};

const DEFAULT_DIMENSION_PX: f64 = 200.0;
const DEFAULT_RESIZE_THROTTLE_MS: u64 = 60;

/// Surface bootstrap configuration.
///
/// Serializable so hosts can keep sizing and resize tuning next to their own
/// settings. Every field is optional in the serialized form.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SurfaceConfig {
    /// Width applied when the container's computed width is unusable.
    #[serde(default = "default_dimension_px")]
    pub default_width: f64,
    /// Height applied when the container's computed height is unusable.
    #[serde(default = "default_dimension_px")]
    pub default_height: f64,
    /// Minimum spacing between two resize-end cycles.
    #[serde(default = "default_resize_throttle_ms")]
    pub resize_throttle_ms: u64,
    #[serde(default = "default_true")]
    pub resize_throttle_leading: bool,
    #[serde(default = "default_true")]
    pub resize_throttle_trailing: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            default_width: default_dimension_px(),
            default_height: default_dimension_px(),
            resize_throttle_ms: default_resize_throttle_ms(),
            resize_throttle_leading: true,
            resize_throttle_trailing: true,
        }
    }
}

impl SurfaceConfig {
    #[must_use]
    pub fn with_default_size(mut self, width: f64, height: f64) -> Self {
        self.default_width = width;
        self.default_height = height;
        self
    }

    #[must_use]
    pub fn with_resize_throttle_ms(mut self, interval_ms: u64) -> Self {
        self.resize_throttle_ms = interval_ms;
        self
    }

    #[must_use]
    pub fn resize_interval(self) -> Duration {
        Duration::from_millis(self.resize_throttle_ms)
    }

    #[must_use]
    pub fn throttle_options(self) -> ThrottleOptions {
        ThrottleOptions {
            leading: self.resize_throttle_leading,
            trailing: self.resize_throttle_trailing,
        }
    }

    pub fn validate(self) -> ChartResult<Self> {
        for (name, value) in [
            ("default_width", self.default_width),
            ("default_height", self.default_height),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ChartError::InvalidConfig(format!(
                    "{name} must be finite and > 0"
                )));
            }
        }
        if self.resize_throttle_ms == 0 {
            return Err(ChartError::InvalidConfig(
                "resize_throttle_ms must be > 0".to_owned(),
            ));
        }
        Ok(self)
    }

    pub fn from_json_str(input: &str) -> ChartResult<Self> {
        let config: Self = serde_json::from_str(input).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to parse surface config json: {e}"))
        })?;
        config.validate()
    }

    pub fn to_json_pretty(self) -> ChartResult<String> {
        serde_json::to_string_pretty(&self).map_err(|e| {
            ChartError::InvalidConfig(format!("failed to serialize surface config: {e}"))
        })
    }
}

fn default_dimension_px() -> f64 {
    DEFAULT_DIMENSION_PX
}

fn default_resize_throttle_ms() -> u64 {
    DEFAULT_RESIZE_THROTTLE_MS
}

fn default_true() -> bool {
    true
}
