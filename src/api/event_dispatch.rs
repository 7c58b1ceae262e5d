use crate::host::SurfaceElement;
use crate::render::BaseChart;

use super::{ChartSurface, ListenerId, SurfaceEvent};

impl<B: BaseChart, E: SurfaceElement> ChartSurface<B, E> {
    /// Subscribes `handler` to every surface event.
    ///
    /// Handlers observe events; they cannot reach back into the surface.
    pub fn on(&mut self, handler: impl FnMut(&SurfaceEvent) + 'static) -> ListenerId {
        self.events.subscribe(Box::new(handler))
    }

    /// Removes a handler. Returns `true` when it was subscribed.
    pub fn off(&mut self, id: ListenerId) -> bool {
        self.events.unsubscribe(id)
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.events.len()
    }

    pub(super) fn emit(&mut self, event: &SurfaceEvent) {
        self.events.emit(event);
    }
}
