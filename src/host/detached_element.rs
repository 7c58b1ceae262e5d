use crate::core::{Dimension, Length};

use super::SurfaceElement;

/// In-memory element used by tests and headless hosts.
///
/// Layout follows block rules closely enough for sizing: an element without
/// an explicit width stretches to its parent's width, an element without an
/// explicit height has no content and computes to `0px`, and percentages
/// resolve against the parent box. Without a parent nothing resolves and the
/// computed value is `auto`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetachedElement {
    width: Option<Length>,
    height: Option<Length>,
    parent: Option<(f64, f64)>,
    writes: usize,
}

impl DetachedElement {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Element nested inside a parent box of the given pixel size.
    #[must_use]
    pub fn inside(parent_width: f64, parent_height: f64) -> Self {
        Self {
            parent: Some((parent_width, parent_height)),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_dimension(mut self, dimension: Dimension, value: Length) -> Self {
        *self.slot_mut(dimension) = Some(value);
        self
    }

    /// Simulates the host layout changing the parent box (window resize).
    pub fn set_parent_size(&mut self, width: f64, height: f64) {
        self.parent = Some((width, height));
    }

    /// Removes an explicit dimension so the element sizes from layout again.
    pub fn clear_dimension(&mut self, dimension: Dimension) {
        *self.slot_mut(dimension) = None;
    }

    #[must_use]
    pub fn explicit(&self, dimension: Dimension) -> Option<Length> {
        match dimension {
            Dimension::Width => self.width,
            Dimension::Height => self.height,
        }
    }

    /// Number of `set_dimension` writes the element has received.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes
    }

    fn slot_mut(&mut self, dimension: Dimension) -> &mut Option<Length> {
        match dimension {
            Dimension::Width => &mut self.width,
            Dimension::Height => &mut self.height,
        }
    }

    fn parent_extent(&self, dimension: Dimension) -> Option<f64> {
        self.parent.map(|(width, height)| match dimension {
            Dimension::Width => width,
            Dimension::Height => height,
        })
    }

    fn computed_px(&self, dimension: Dimension) -> Option<f64> {
        match self.explicit(dimension) {
            Some(Length::Px(value)) => Some(value.into_inner()),
            Some(Length::Percent(percent)) => self
                .parent_extent(dimension)
                .map(|extent| extent * percent.into_inner() / 100.0),
            None => match dimension {
                Dimension::Width => self.parent_extent(dimension),
                Dimension::Height => self.parent.map(|_| 0.0),
            },
        }
    }
}

impl SurfaceElement for DetachedElement {
    fn computed_style(&self, dimension: Dimension) -> Option<String> {
        Some(match self.computed_px(dimension) {
            Some(value) => format!("{value}px"),
            None => "auto".to_owned(),
        })
    }

    fn set_dimension(&mut self, dimension: Dimension, value: Length) {
        *self.slot_mut(dimension) = Some(value);
        self.writes += 1;
    }
}
