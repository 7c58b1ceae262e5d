use std::time::Duration;

use tracing::trace;

use crate::core::{Length, Throttle};
use crate::error::ChartResult;
use crate::host::SurfaceElement;
use crate::render::BaseChart;

use super::{ChartSurface, ResizeListener, SurfaceEvent};

/// Two-phase resize handshake: a start capture armed between cycles and a
/// throttled end cycle.
#[derive(Debug)]
pub(super) struct ResizeState {
    start_armed: bool,
    captured: Option<(Length, Length)>,
    end_cycle: Throttle<()>,
}

impl ResizeState {
    pub(super) fn new(end_cycle: Throttle<()>) -> Self {
        Self {
            start_armed: true,
            captured: None,
            end_cycle,
        }
    }
}

impl<B: BaseChart, E: SurfaceElement> ChartSurface<B, E> {
    /// Entry point for a window resize signal observed at `now`.
    ///
    /// The first signal after a quiet period captures the cached size; the
    /// end cycle runs at most once per throttle interval.
    pub fn handle_window_resize(&mut self, now: Duration) -> ChartResult<()> {
        if self.resize.start_armed {
            self.begin_resize();
        }
        if self.resize.end_cycle.call(now, ()).is_some() {
            self.finish_resize()?;
        }
        Ok(())
    }

    /// Runs a pending trailing end cycle once its deadline is reached.
    pub fn poll_timers(&mut self, now: Duration) -> ChartResult<()> {
        if self.resize.end_cycle.poll(now).is_some() {
            self.finish_resize()?;
        }
        Ok(())
    }

    /// When the host should call [`Self::poll_timers`] next.
    #[must_use]
    pub fn next_timer_deadline(&self) -> Option<Duration> {
        self.resize.end_cycle.next_deadline()
    }

    /// Cached `(width, height)` captured when the last resize sequence began.
    #[must_use]
    pub fn resize_capture(&self) -> Option<(Length, Length)> {
        self.resize.captured
    }

    fn begin_resize(&mut self) {
        self.resize.start_armed = false;
        self.resize.captured = Some((self.width, self.height));
        trace!(width = %self.width, height = %self.height, "resize start");
        self.emit(&SurfaceEvent::ResizeStarted {
            width: self.width,
            height: self.height,
        });
    }

    fn finish_resize(&mut self) -> ChartResult<()> {
        trace!("resize end");
        self.emit(&SurfaceEvent::ResizeEnded);

        let result = if self.recompute_mode() {
            self.apply_mode_change()
        } else {
            Ok(())
        };

        self.resize.start_armed = true;
        result
    }
}

impl<B: BaseChart, E: SurfaceElement> ResizeListener for ChartSurface<B, E> {
    fn on_window_resize(&mut self, now: Duration) -> ChartResult<()> {
        self.handle_window_resize(now)
    }

    fn on_timer(&mut self, now: Duration) -> ChartResult<()> {
        self.poll_timers(now)
    }

    fn next_deadline(&self) -> Option<Duration> {
        self.next_timer_deadline()
    }
}
