mod dimension_controller;
mod event_dispatch;
mod events;
mod layer_registry;
mod mode_controller;
mod resize_controller;
mod resize_dispatcher;
mod surface;
mod surface_config;

pub use events::{ListenerId, SurfaceEvent};
pub use layer_registry::{LayerRegistry, LayerSpec, ModeList, ModeScopedLayer};
pub use resize_dispatcher::{MountedSurface, ResizeDispatcher, ResizeListener, ResizeRegistration};
pub use surface::{ChartDefinition, ChartSurface};
pub use surface_config::SurfaceConfig;
