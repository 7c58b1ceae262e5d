use std::marker::PhantomData;

use crate::error::ChartResult;
use crate::render::BaseChart;

/// Layer handle produced by [`NullBaseChart`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NullLayer {
    pub name: String,
    pub container: String,
    /// Construction order across the chart, starting at zero.
    pub ordinal: usize,
}

/// No-op base chart used by tests and headless surfaces.
///
/// It records which layers were constructed and how often `draw` ran so
/// callers can observe the surface's lifecycle decisions.
#[derive(Debug)]
pub struct NullBaseChart<D = f64> {
    pub built_layers: Vec<String>,
    pub draw_count: usize,
    pub last_draw_len: Option<usize>,
    datum: PhantomData<D>,
}

impl<D> Default for NullBaseChart<D> {
    fn default() -> Self {
        Self {
            built_layers: Vec::new(),
            draw_count: 0,
            last_draw_len: None,
            datum: PhantomData,
        }
    }
}

impl<D> BaseChart for NullBaseChart<D> {
    type Container = String;
    type Recipe = ();
    type Layer = NullLayer;
    type Datum = D;

    fn layer(&mut self, name: &str, container: &String, _recipe: &()) -> ChartResult<NullLayer> {
        let layer = NullLayer {
            name: name.to_owned(),
            container: container.clone(),
            ordinal: self.built_layers.len(),
        };
        self.built_layers.push(name.to_owned());
        Ok(layer)
    }

    fn draw(&mut self, data: &[D]) -> ChartResult<()> {
        self.draw_count += 1;
        self.last_draw_len = Some(data.len());
        Ok(())
    }
}
