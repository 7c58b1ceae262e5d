use std::fmt;

use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

/// Box dimension tracked by a chart surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Dimension {
    Width,
    Height,
}

impl Dimension {
    /// Style property name used when reading computed style.
    #[must_use]
    pub fn property(self) -> &'static str {
        match self {
            Self::Width => "width",
            Self::Height => "height",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.property())
    }
}

/// Explicit dimension written onto an element.
///
/// Percentages are not interpreted here; they resolve through the element's
/// computed style like any other style value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Length {
    Px(OrderedFloat<f64>),
    Percent(OrderedFloat<f64>),
}

impl Length {
    #[must_use]
    pub fn px(value: f64) -> Self {
        Self::Px(OrderedFloat(value))
    }

    #[must_use]
    pub fn percent(value: f64) -> Self {
        Self::Percent(OrderedFloat(value))
    }

    /// Pixel magnitude when this length is absolute.
    #[must_use]
    pub fn as_px(self) -> Option<f64> {
        match self {
            Self::Px(value) => Some(value.into_inner()),
            Self::Percent(_) => None,
        }
    }
}

impl From<f64> for Length {
    fn from(value: f64) -> Self {
        Self::px(value)
    }
}

impl fmt::Display for Length {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Px(value) => write!(f, "{}px", value.into_inner()),
            Self::Percent(value) => write!(f, "{}%", value.into_inner()),
        }
    }
}

/// Snapshot handed to mode predicates while the active mode is evaluated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeContext {
    pub width: f64,
    pub height: f64,
    pub previous_mode: Option<String>,
}

impl ModeContext {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            previous_mode: None,
        }
    }

    #[must_use]
    pub fn with_previous_mode(mut self, mode: Option<&str>) -> Self {
        self.previous_mode = mode.map(str::to_owned);
        self
    }
}
