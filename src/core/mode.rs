use std::fmt;

use indexmap::IndexMap;
use tracing::debug;

use super::ModeContext;

type ModePredicate<C> = Box<dyn Fn(&C) -> bool>;

/// Ordered table of named predicates with the currently selected mode.
///
/// Predicates are evaluated in declaration order and evaluation stops at the
/// first one returning `true`.
pub struct ModeEvaluator<C = ModeContext> {
    predicates: IndexMap<String, ModePredicate<C>>,
    current: Option<String>,
}

impl<C> ModeEvaluator<C> {
    #[must_use]
    pub fn new() -> Self {
        Self {
            predicates: IndexMap::new(),
            current: None,
        }
    }

    /// Declares a mode. Redeclaring a name replaces its predicate but keeps
    /// its original position.
    #[must_use]
    pub fn with_mode(
        mut self,
        name: impl Into<String>,
        predicate: impl Fn(&C) -> bool + 'static,
    ) -> Self {
        self.insert(name, predicate);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, predicate: impl Fn(&C) -> bool + 'static) {
        self.predicates.insert(name.into(), Box::new(predicate));
    }

    /// Re-evaluates the predicates and returns whether the active mode changed.
    pub fn recompute(&mut self, context: &C) -> bool {
        let selected = self
            .predicates
            .iter()
            .find(|(_, predicate)| predicate(context))
            .map(|(name, _)| name.clone());

        let changed = selected != self.current;
        if changed {
            debug!(
                from = self.current.as_deref().unwrap_or("<none>"),
                to = selected.as_deref().unwrap_or("<none>"),
                "active mode changed"
            );
        }
        self.current = selected;
        changed
    }

    #[must_use]
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.predicates.contains_key(name)
    }

    /// Mode names in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.predicates.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.predicates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }
}

impl<C> Default for ModeEvaluator<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> fmt::Debug for ModeEvaluator<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModeEvaluator")
            .field("modes", &self.predicates.keys().collect::<Vec<_>>())
            .field("current", &self.current)
            .finish()
    }
}
