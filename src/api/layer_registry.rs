use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::debug;

use crate::core::{ModeContext, ModeEvaluator};
use crate::error::{ChartError, ChartResult};
use crate::render::BaseChart;

/// Mode names a layer is restricted to.
pub type ModeList = SmallVec<[String; 4]>;

/// Full construction arguments of a layer, kept for deferred construction.
pub struct LayerSpec<B: BaseChart> {
    pub name: String,
    pub container: B::Container,
    pub recipe: B::Recipe,
    /// `None` means the layer belongs to every declared mode.
    pub modes: Option<ModeList>,
}

impl<B: BaseChart> LayerSpec<B> {
    #[must_use]
    pub fn new(name: impl Into<String>, container: B::Container, recipe: B::Recipe) -> Self {
        Self {
            name: name.into(),
            container,
            recipe,
            modes: None,
        }
    }

    #[must_use]
    pub fn with_modes<I, S>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.modes = Some(modes.into_iter().map(Into::into).collect());
        self
    }

    fn admits(&self, mode: Option<&str>) -> bool {
        match &self.modes {
            None => true,
            Some(modes) => mode.is_some_and(|mode| modes.iter().any(|m| m == mode)),
        }
    }
}

/// A constructed layer tagged with the modes it applies to.
#[derive(Debug, Clone, PartialEq)]
pub struct ModeScopedLayer<L> {
    pub handle: L,
    pub modes: ModeList,
}

/// Layer bookkeeping: stored specs, built layers and the mode → layer index.
pub struct LayerRegistry<B: BaseChart> {
    specs: IndexMap<String, LayerSpec<B>>,
    built: IndexMap<String, ModeScopedLayer<B::Layer>>,
    mode_layers: IndexMap<String, Vec<String>>,
}

impl<B: BaseChart> Default for LayerRegistry<B> {
    fn default() -> Self {
        Self {
            specs: IndexMap::new(),
            built: IndexMap::new(),
            mode_layers: IndexMap::new(),
        }
    }
}

impl<B: BaseChart> LayerRegistry<B> {
    /// Registers a layer and builds it when the active mode admits it.
    ///
    /// Returns `None` when the layer stays dormant in the active mode.
    pub fn register(
        &mut self,
        base: &mut B,
        modes: &ModeEvaluator<ModeContext>,
        spec: LayerSpec<B>,
    ) -> ChartResult<Option<&ModeScopedLayer<B::Layer>>> {
        if self.specs.contains_key(&spec.name) {
            return Err(ChartError::DuplicateLayer { name: spec.name });
        }
        let applicable = resolve_applicable_modes(&spec, modes)?;

        let name = spec.name.clone();
        let built = if spec.admits(modes.current()) {
            let handle = base.layer(&spec.name, &spec.container, &spec.recipe)?;
            Some(ModeScopedLayer {
                handle,
                modes: applicable.clone(),
            })
        } else {
            None
        };

        debug!(
            layer = %name,
            modes = ?applicable,
            built = built.is_some(),
            "register layer"
        );

        for mode in &applicable {
            self.mode_layers
                .entry(mode.clone())
                .or_default()
                .push(name.clone());
        }
        self.specs.insert(name.clone(), spec);

        match built {
            Some(layer) => {
                self.built.insert(name.clone(), layer);
                Ok(self.built.get(&name))
            }
            None => Ok(None),
        }
    }

    /// Builds every dormant layer whose whitelist contains `mode`, in
    /// registration order. Returns how many layers were built.
    ///
    /// Stops at the first construction error. Layers built before it stay
    /// built; the rest stay dormant and are retried on the next entry into
    /// a mode that admits them.
    pub fn materialize_for_mode(&mut self, base: &mut B, mode: &str) -> ChartResult<usize> {
        let pending: Vec<String> = self
            .specs
            .values()
            .filter(|spec| !self.built.contains_key(&spec.name) && spec.admits(Some(mode)))
            .map(|spec| spec.name.clone())
            .collect();

        for name in &pending {
            let Some(spec) = self.specs.get(name) else {
                continue;
            };
            let handle = base.layer(&spec.name, &spec.container, &spec.recipe)?;
            let modes = spec.modes.clone().unwrap_or_default();
            debug!(layer = %name, mode, "construct deferred layer");
            self.built
                .insert(name.clone(), ModeScopedLayer { handle, modes });
        }
        Ok(pending.len())
    }

    #[must_use]
    pub fn layer(&self, name: &str) -> Option<&ModeScopedLayer<B::Layer>> {
        self.built.get(name)
    }

    #[must_use]
    pub fn spec(&self, name: &str) -> Option<&LayerSpec<B>> {
        self.specs.get(name)
    }

    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.specs.contains_key(name)
    }

    #[must_use]
    pub fn is_built(&self, name: &str) -> bool {
        self.built.contains_key(name)
    }

    /// Layer names mapped to `mode`, in registration order.
    #[must_use]
    pub fn layer_names_for_mode(&self, mode: &str) -> &[String] {
        self.mode_layers
            .get(mode)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Registered layers that have not been constructed yet.
    pub fn dormant_layer_names(&self) -> impl Iterator<Item = &str> {
        self.specs
            .keys()
            .filter(|name| !self.built.contains_key(*name))
            .map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.specs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }
}

fn resolve_applicable_modes<B: BaseChart>(
    spec: &LayerSpec<B>,
    modes: &ModeEvaluator<ModeContext>,
) -> ChartResult<ModeList> {
    match &spec.modes {
        None => Ok(modes.names().map(str::to_owned).collect()),
        Some(declared) if declared.is_empty() => Err(ChartError::EmptyModeList {
            layer: spec.name.clone(),
        }),
        Some(declared) => {
            if let Some(unknown) = declared.iter().find(|mode| !modes.contains(mode)) {
                return Err(ChartError::UnknownMode {
                    layer: spec.name.clone(),
                    mode: unknown.clone(),
                });
            }
            Ok(declared.clone())
        }
    }
}
