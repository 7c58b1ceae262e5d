mod null_base_chart;

pub use null_base_chart::{NullBaseChart, NullLayer};

use crate::error::ChartResult;

/// Contract implemented by the charting base a surface augments.
///
/// The base owns layer construction and data-join rendering. The surface only
/// decides *when* layers are built and *when* a redraw happens.
pub trait BaseChart {
    /// Where a layer's nodes are inserted.
    type Container;
    /// Opaque construction recipe (data binding, insert/update hooks).
    type Recipe;
    /// Handle returned for a constructed layer.
    type Layer;
    /// Element type of the data sequence passed to `draw`.
    type Datum;

    fn layer(
        &mut self,
        name: &str,
        container: &Self::Container,
        recipe: &Self::Recipe,
    ) -> ChartResult<Self::Layer>;

    fn draw(&mut self, data: &[Self::Datum]) -> ChartResult<()>;
}
