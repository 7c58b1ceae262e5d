use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::core::Length;

/// Notifications published by a chart surface.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SurfaceEvent {
    WidthChanged { new: Length, old: Length },
    HeightChanged { new: Length, old: Length },
    ModeChanged { mode: Option<String> },
    /// First resize signal after a quiet period, with the size cached before it.
    ResizeStarted { width: Length, height: Length },
    /// A throttled resize cycle is being processed.
    ResizeEnded,
}

impl SurfaceEvent {
    /// Stable event name, matching the channel names hosts subscribe to.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::WidthChanged { .. } => "change:width",
            Self::HeightChanged { .. } => "change:height",
            Self::ModeChanged { .. } => "mode:change",
            Self::ResizeStarted { .. } => "resize:start",
            Self::ResizeEnded => "resize:end",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

type Handler = Box<dyn FnMut(&SurfaceEvent)>;

/// Listener table; handlers run in subscription order.
#[derive(Default)]
pub(super) struct EventBus {
    next_id: u64,
    handlers: IndexMap<ListenerId, Handler>,
}

impl EventBus {
    pub(super) fn subscribe(&mut self, handler: Handler) -> ListenerId {
        let id = ListenerId(self.next_id);
        self.next_id += 1;
        self.handlers.insert(id, handler);
        id
    }

    pub(super) fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.handlers.shift_remove(&id).is_some()
    }

    pub(super) fn emit(&mut self, event: &SurfaceEvent) {
        for handler in self.handlers.values_mut() {
            handler(event);
        }
    }

    pub(super) fn len(&self) -> usize {
        self.handlers.len()
    }
}
