use tracing::{debug, warn};

use crate::error::ChartResult;
use crate::host::SurfaceElement;
use crate::render::BaseChart;

use super::{ChartSurface, SurfaceEvent};

impl<B: BaseChart, E: SurfaceElement> ChartSurface<B, E> {
    /// Currently active mode, `None` when no predicate matched.
    #[must_use]
    pub fn mode(&self) -> Option<&str> {
        self.modes.current()
    }

    /// Declared mode names in evaluation order.
    pub fn mode_names(&self) -> impl Iterator<Item = &str> {
        self.modes.names()
    }

    /// Re-evaluates the mode predicates against the live container size.
    ///
    /// Only updates the active mode; the resize cycle is what reacts to a
    /// change. Must not be called from inside a mode-change handler.
    pub fn recompute_mode(&mut self) -> bool {
        let context = self.mode_context();
        self.modes.recompute(&context)
    }

    /// Reaction to a new active mode: refresh the cached size, construct
    /// layers deferred until this mode, redraw, then notify listeners.
    ///
    /// The mode is already committed when this runs, so listeners are
    /// notified even when layer construction or the redraw fails.
    pub(super) fn apply_mode_change(&mut self) -> ChartResult<()> {
        self.refresh_cached_dimensions();

        let result = self.rebuild_for_current_mode();
        if let Err(err) = &result {
            warn!(error = %err, mode = ?self.modes.current(), "mode change left chart stale");
        }

        let mode = self.modes.current().map(str::to_owned);
        self.emit(&SurfaceEvent::ModeChanged { mode });
        result
    }

    fn rebuild_for_current_mode(&mut self) -> ChartResult<()> {
        if let Some(mode) = self.modes.current() {
            let built = self.layers.materialize_for_mode(&mut self.base, mode)?;
            if built > 0 {
                debug!(mode, built, "constructed layers for new mode");
            }
        }
        self.redraw()?;
        Ok(())
    }
}
