use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

use chart_surface::api::{
    ChartDefinition, ChartSurface, LayerSpec, ResizeDispatcher, SurfaceConfig, SurfaceEvent,
};
use chart_surface::error::ChartResult;
use chart_surface::host::DetachedElement;
use chart_surface::render::BaseChart;

/// Square marker inserted for every datum.
#[derive(Debug, Clone, Copy)]
struct RectRecipe {
    size: f64,
    fill: &'static str,
    opacity: f64,
}

/// Tiny base chart that positions squares along a linear x scale.
struct RectChart {
    range_end: Rc<Cell<f64>>,
    layers: Vec<(String, RectRecipe)>,
}

impl BaseChart for RectChart {
    type Container = &'static str;
    type Recipe = RectRecipe;
    type Layer = String;
    type Datum = f64;

    fn layer(
        &mut self,
        name: &str,
        container: &&'static str,
        recipe: &RectRecipe,
    ) -> ChartResult<String> {
        println!("layer `{name}` inserted into {container}");
        self.layers.push((name.to_owned(), *recipe));
        Ok(name.to_owned())
    }

    fn draw(&mut self, data: &[f64]) -> ChartResult<()> {
        let min = data.iter().copied().fold(f64::INFINITY, f64::min);
        let max = data.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let span = (max - min).max(f64::EPSILON);
        let range_end = self.range_end.get();

        for (name, recipe) in &self.layers {
            let xs: Vec<String> = data
                .iter()
                .map(|value| format!("{:.0}", (value - min) / span * range_end))
                .collect();
            println!(
                "  {name}: {} x {}px {} squares (opacity {}) at x = [{}]",
                data.len(),
                recipe.size,
                recipe.fill,
                recipe.opacity,
                xs.join(", ")
            );
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _ = chart_surface::telemetry::init_default_tracing();

    let range_end = Rc::new(Cell::new(0.0));
    let base = RectChart {
        range_end: Rc::clone(&range_end),
        layers: Vec::new(),
    };

    let definition = ChartDefinition::new()
        .with_mode("mobile", |ctx| ctx.width <= 480.0)
        .with_mode("web", |_| true)
        .with_layer(LayerSpec::new(
            "boxes",
            "svg > g.boxes",
            RectRecipe {
                size: 10.0,
                fill: "blue",
                opacity: 0.5,
            },
        ))
        .with_layer(
            LayerSpec::new(
                "labels",
                "svg > g.labels",
                RectRecipe {
                    size: 4.0,
                    fill: "black",
                    opacity: 1.0,
                },
            )
            .with_modes(["web"]),
        );

    let mut chart = ChartSurface::new(
        base,
        DetachedElement::inside(800.0, 600.0),
        definition,
        SurfaceConfig::default(),
    )?;
    range_end.set(chart.width());

    let scale_range = Rc::clone(&range_end);
    chart.on(move |event| {
        if let SurfaceEvent::WidthChanged { new, .. } = event {
            if let Some(width) = new.as_px() {
                scale_range.set(width);
            }
        }
    });
    chart.on(|event| println!("event {}: {event:?}", event.name()));

    let data = vec![15.0, 20.0, 90.0, 110.0, 150.0, 200.0, 220.0, 340.0, 480.0];
    chart.set_width(500.0)?.set_height(100.0)?;
    chart.draw(data)?;

    println!("mode before resize: {:?}", chart.mode());

    let dispatcher = ResizeDispatcher::new();
    let mounted = chart.mount(&dispatcher);
    {
        let mut chart = mounted.borrow_mut();
        chart.element_mut().clear_dimension(chart_surface::core::Dimension::Width);
        chart.element_mut().set_parent_size(320.0, 600.0);
    }
    range_end.set(320.0);
    dispatcher.dispatch_resize(Duration::from_millis(16));
    if let Some(deadline) = dispatcher.next_deadline() {
        dispatcher.advance(deadline);
    }

    println!("mode after resize: {:?}", mounted.borrow().mode());
    Ok(())
}
