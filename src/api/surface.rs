use std::fmt;

use tracing::debug;

use crate::core::{Dimension, Length, ModeContext, ModeEvaluator, Throttle};
use crate::error::ChartResult;
use crate::host::{SurfaceElement, resolve_dimension};
use crate::render::BaseChart;

use super::events::EventBus;
use super::resize_controller::ResizeState;
use super::{LayerRegistry, LayerSpec, SurfaceConfig};

/// Declaration of a chart type: its modes and the layers it registers.
pub struct ChartDefinition<B: BaseChart> {
    pub(super) modes: ModeEvaluator<ModeContext>,
    pub(super) layers: Vec<LayerSpec<B>>,
}

impl<B: BaseChart> Default for ChartDefinition<B> {
    fn default() -> Self {
        Self {
            modes: ModeEvaluator::new(),
            layers: Vec::new(),
        }
    }
}

impl<B: BaseChart> ChartDefinition<B> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares a mode. Modes are evaluated in declaration order.
    #[must_use]
    pub fn with_mode(
        mut self,
        name: impl Into<String>,
        predicate: impl Fn(&ModeContext) -> bool + 'static,
    ) -> Self {
        self.modes.insert(name, predicate);
        self
    }

    #[must_use]
    pub fn with_modes(mut self, modes: ModeEvaluator<ModeContext>) -> Self {
        self.modes = modes;
        self
    }

    #[must_use]
    pub fn with_layer(mut self, layer: LayerSpec<B>) -> Self {
        self.layers.push(layer);
        self
    }
}

/// Responsive, mode-aware wrapper around a base chart.
///
/// `ChartSurface` owns the cached container size, the active mode, the
/// mode-scoped layer registry and the resize cycle state. Hosts feed it
/// window resize signals and timer ticks; it decides when layers are built
/// and when the base chart redraws.
pub struct ChartSurface<B: BaseChart, E: SurfaceElement> {
    pub(super) base: B,
    pub(super) element: E,
    pub(super) config: SurfaceConfig,
    pub(super) width: Length,
    pub(super) height: Length,
    pub(super) data: Option<Vec<B::Datum>>,
    pub(super) modes: ModeEvaluator<ModeContext>,
    pub(super) layers: LayerRegistry<B>,
    pub(super) events: EventBus,
    pub(super) resize: ResizeState,
}

impl<B: BaseChart, E: SurfaceElement> ChartSurface<B, E> {
    pub fn new(
        base: B,
        mut element: E,
        definition: ChartDefinition<B>,
        config: SurfaceConfig,
    ) -> ChartResult<Self> {
        let config = config.validate()?;
        let width = resolve_dimension(&mut element, Dimension::Width, config.default_width);
        let height = resolve_dimension(&mut element, Dimension::Height, config.default_height);

        let ChartDefinition { modes, layers } = definition;
        let mut surface = Self {
            base,
            element,
            config,
            width: Length::px(width),
            height: Length::px(height),
            data: None,
            modes,
            layers: LayerRegistry::default(),
            events: EventBus::default(),
            resize: ResizeState::new(Throttle::new(
                config.resize_interval(),
                config.throttle_options(),
            )),
        };
        surface.recompute_mode();

        for layer in layers {
            surface.register_layer(layer)?;
        }

        debug!(
            width,
            height,
            mode = surface.mode().unwrap_or("<none>"),
            layers = surface.layers.len(),
            "chart surface initialized"
        );
        Ok(surface)
    }

    /// Surface with no modes and no layers.
    pub fn plain(base: B, element: E) -> ChartResult<Self> {
        Self::new(base, element, ChartDefinition::new(), SurfaceConfig::default())
    }

    /// Stores `data` as the last drawn data and renders it.
    pub fn draw(&mut self, data: Vec<B::Datum>) -> ChartResult<()> {
        let data = self.data.insert(data);
        self.base.draw(data)
    }

    /// Redraws with the last drawn data. Does nothing before the first draw.
    pub fn redraw(&mut self) -> ChartResult<bool> {
        match self.data.as_deref() {
            Some(data) => {
                self.base.draw(data)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    #[must_use]
    pub fn data(&self) -> Option<&[B::Datum]> {
        self.data.as_deref()
    }

    /// Registers a mode-scoped layer; see [`LayerRegistry::register`].
    pub fn register_layer(
        &mut self,
        layer: LayerSpec<B>,
    ) -> ChartResult<Option<&super::ModeScopedLayer<B::Layer>>> {
        self.layers.register(&mut self.base, &self.modes, layer)
    }

    #[must_use]
    pub fn layers(&self) -> &LayerRegistry<B> {
        &self.layers
    }

    #[must_use]
    pub fn base(&self) -> &B {
        &self.base
    }

    pub fn base_mut(&mut self) -> &mut B {
        &mut self.base
    }

    #[must_use]
    pub fn element(&self) -> &E {
        &self.element
    }

    /// Mutable host element access, e.g. for hosts that restyle the
    /// container before dispatching a resize.
    pub fn element_mut(&mut self) -> &mut E {
        &mut self.element
    }

    #[must_use]
    pub fn config(&self) -> SurfaceConfig {
        self.config
    }

    pub(super) fn mode_context(&self) -> ModeContext {
        ModeContext::new(self.width(), self.height()).with_previous_mode(self.modes.current())
    }
}

impl<B: BaseChart, E: SurfaceElement> fmt::Debug for ChartSurface<B, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartSurface")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("mode", &self.modes.current())
            .field("layers", &self.layers.len())
            .field("has_data", &self.data.is_some())
            .finish_non_exhaustive()
    }
}
