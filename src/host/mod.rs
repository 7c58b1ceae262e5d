//! Host-environment seams: computed style reads and attribute writes.
//!
//! The surface never talks to a real document directly. Hosts implement
//! [`SurfaceElement`] over whatever backs the chart container.

mod detached_element;
mod dimension;

pub use detached_element::DetachedElement;
pub use dimension::{StyleValue, measure, parse_style_value, resolve_dimension};

use crate::core::{Dimension, Length};

/// Container element a chart surface is mounted on.
pub trait SurfaceElement {
    /// Computed style value for `dimension`, as the host reports it
    /// (normally `"<n>px"`).
    fn computed_style(&self, dimension: Dimension) -> Option<String>;

    /// Writes an explicit dimension onto the element.
    fn set_dimension(&mut self, dimension: Dimension, value: Length);
}
