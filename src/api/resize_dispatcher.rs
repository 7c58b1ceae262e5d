use std::cell::{Ref, RefCell, RefMut};
use std::rc::{Rc, Weak};
use std::time::Duration;

use indexmap::IndexMap;
use tracing::{trace, warn};

use crate::error::ChartResult;
use crate::host::SurfaceElement;
use crate::render::BaseChart;

use super::ChartSurface;

/// Receiver of window-level resize signals and timer ticks.
pub trait ResizeListener {
    fn on_window_resize(&mut self, now: Duration) -> ChartResult<()>;
    fn on_timer(&mut self, now: Duration) -> ChartResult<()>;
    fn next_deadline(&self) -> Option<Duration>;
}

type SharedListener = Rc<RefCell<dyn ResizeListener>>;

#[derive(Default)]
struct DispatcherState {
    next_id: u64,
    listeners: IndexMap<u64, Weak<RefCell<dyn ResizeListener>>>,
}

thread_local! {
    static GLOBAL_DISPATCHER: ResizeDispatcher = ResizeDispatcher::new();
}

/// Fan-out of window resize signals to every registered surface.
///
/// The host owns the real event source and timer: it forwards resize events
/// to [`ResizeDispatcher::dispatch_resize`] and schedules a timer for
/// [`ResizeDispatcher::next_deadline`] that calls [`ResizeDispatcher::advance`].
#[derive(Clone, Default)]
pub struct ResizeDispatcher {
    state: Rc<RefCell<DispatcherState>>,
}

impl ResizeDispatcher {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dispatcher shared by everything on the current thread.
    #[must_use]
    pub fn global() -> Self {
        GLOBAL_DISPATCHER.with(Clone::clone)
    }

    /// Registers `listener`; it stays registered until the returned guard is
    /// dropped or the listener itself is dropped.
    pub fn register<L>(&self, listener: &Rc<RefCell<L>>) -> ResizeRegistration
    where
        L: ResizeListener + 'static,
    {
        let shared: SharedListener = listener.clone();
        let mut state = self.state.borrow_mut();
        let id = state.next_id;
        state.next_id += 1;
        state.listeners.insert(id, Rc::downgrade(&shared));
        trace!(listener = id, "resize listener registered");
        ResizeRegistration {
            state: Rc::downgrade(&self.state),
            id,
        }
    }

    pub fn dispatch_resize(&self, now: Duration) {
        for (id, listener) in self.live_listeners() {
            let Ok(mut listener) = listener.try_borrow_mut() else {
                warn!(listener = id, "skipping re-entrant resize dispatch");
                continue;
            };
            if let Err(err) = listener.on_window_resize(now) {
                warn!(listener = id, error = %err, "resize listener failed");
            }
        }
    }

    /// Delivers a timer tick so pending trailing resize cycles can fire.
    pub fn advance(&self, now: Duration) {
        for (id, listener) in self.live_listeners() {
            let Ok(mut listener) = listener.try_borrow_mut() else {
                warn!(listener = id, "skipping re-entrant timer dispatch");
                continue;
            };
            if let Err(err) = listener.on_timer(now) {
                warn!(listener = id, error = %err, "resize timer listener failed");
            }
        }
    }

    /// Earliest pending deadline across registered listeners.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.live_listeners()
            .into_iter()
            .filter_map(|(_, listener)| {
                listener
                    .try_borrow()
                    .ok()
                    .and_then(|listener| listener.next_deadline())
            })
            .min()
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.live_listeners().len()
    }

    fn live_listeners(&self) -> Vec<(u64, SharedListener)> {
        let mut state = self.state.borrow_mut();
        state.listeners.retain(|_, listener| listener.strong_count() > 0);
        state
            .listeners
            .iter()
            .filter_map(|(id, listener)| listener.upgrade().map(|listener| (*id, listener)))
            .collect()
    }
}

/// Keeps a listener registered with a [`ResizeDispatcher`].
#[must_use = "dropping the registration deregisters the listener"]
#[derive(Debug)]
pub struct ResizeRegistration {
    state: Weak<RefCell<DispatcherState>>,
    id: u64,
}

impl Drop for ResizeRegistration {
    fn drop(&mut self) {
        if let Some(state) = self.state.upgrade() {
            if let Ok(mut state) = state.try_borrow_mut() {
                state.listeners.shift_remove(&self.id);
                trace!(listener = self.id, "resize listener deregistered");
            }
        }
    }
}

/// A surface registered with a resize dispatcher for its whole lifetime.
pub struct MountedSurface<B: BaseChart, E: SurfaceElement> {
    surface: Rc<RefCell<ChartSurface<B, E>>>,
    _registration: ResizeRegistration,
}

impl<B, E> MountedSurface<B, E>
where
    B: BaseChart + 'static,
    E: SurfaceElement + 'static,
{
    pub fn new(surface: ChartSurface<B, E>, dispatcher: &ResizeDispatcher) -> Self {
        let surface = Rc::new(RefCell::new(surface));
        let registration = dispatcher.register(&surface);
        Self {
            surface,
            _registration: registration,
        }
    }

    pub fn borrow(&self) -> Ref<'_, ChartSurface<B, E>> {
        self.surface.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, ChartSurface<B, E>> {
        self.surface.borrow_mut()
    }

    /// Deregisters from the dispatcher and hands the surface back.
    ///
    /// Returns `None` if another strong reference to the surface is alive.
    pub fn dispose(self) -> Option<ChartSurface<B, E>> {
        let Self {
            surface,
            _registration,
        } = self;
        drop(_registration);
        Rc::try_unwrap(surface).ok().map(RefCell::into_inner)
    }
}

impl<B, E> ChartSurface<B, E>
where
    B: BaseChart + 'static,
    E: SurfaceElement + 'static,
{
    /// Registers this surface with `dispatcher` for window resize signals.
    pub fn mount(self, dispatcher: &ResizeDispatcher) -> MountedSurface<B, E> {
        MountedSurface::new(self, dispatcher)
    }
}
