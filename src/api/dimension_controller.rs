use tracing::debug;

use crate::core::{Dimension, Length};
use crate::error::ChartResult;
use crate::host::{SurfaceElement, measure};
use crate::render::BaseChart;

use super::{ChartSurface, SurfaceEvent};

impl<B: BaseChart, E: SurfaceElement> ChartSurface<B, E> {
    /// Live width in pixels, re-read from the element's computed style.
    ///
    /// Returns `0.0` when the host cannot report a pixel width.
    #[must_use]
    pub fn width(&self) -> f64 {
        measure(&self.element, Dimension::Width).unwrap_or(0.0)
    }

    /// Live height in pixels, re-read from the element's computed style.
    #[must_use]
    pub fn height(&self) -> f64 {
        measure(&self.element, Dimension::Height).unwrap_or(0.0)
    }

    /// Width last set explicitly or captured from computed style.
    #[must_use]
    pub fn cached_width(&self) -> Length {
        self.width
    }

    #[must_use]
    pub fn cached_height(&self) -> Length {
        self.height
    }

    /// Sets an explicit width. Setting the current value is a no-op.
    ///
    /// On change the value is written onto the element, a
    /// [`SurfaceEvent::WidthChanged`] is emitted and the last drawn data (if
    /// any) is redrawn.
    pub fn set_width(&mut self, width: impl Into<Length>) -> ChartResult<&mut Self> {
        self.set_dimension(Dimension::Width, width.into())?;
        Ok(self)
    }

    /// Sets an explicit height. Same contract as [`Self::set_width`].
    pub fn set_height(&mut self, height: impl Into<Length>) -> ChartResult<&mut Self> {
        self.set_dimension(Dimension::Height, height.into())?;
        Ok(self)
    }

    fn set_dimension(&mut self, dimension: Dimension, value: Length) -> ChartResult<()> {
        let slot = match dimension {
            Dimension::Width => &mut self.width,
            Dimension::Height => &mut self.height,
        };
        let old = std::mem::replace(slot, value);
        if old == value {
            return Ok(());
        }

        self.element.set_dimension(dimension, value);
        debug!(%dimension, new = %value, old = %old, "dimension changed");

        let event = match dimension {
            Dimension::Width => SurfaceEvent::WidthChanged { new: value, old },
            Dimension::Height => SurfaceEvent::HeightChanged { new: value, old },
        };
        self.emit(&event);
        self.redraw()?;
        Ok(())
    }

    /// Re-reads both cached dimensions from computed style. Dimensions the
    /// host cannot report keep their cached value.
    pub(super) fn refresh_cached_dimensions(&mut self) {
        if let Some(width) = measure(&self.element, Dimension::Width) {
            self.width = Length::px(width);
        }
        if let Some(height) = measure(&self.element, Dimension::Height) {
            self.height = Length::px(height);
        }
    }
}
