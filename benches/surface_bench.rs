use std::hint::black_box;
use std::time::Duration;

use chart_surface::api::{ChartDefinition, ChartSurface, LayerSpec, SurfaceConfig};
use chart_surface::core::{ModeContext, ModeEvaluator, Throttle, ThrottleOptions};
use chart_surface::host::DetachedElement;
use chart_surface::render::NullBaseChart;
use criterion::{Criterion, criterion_group, criterion_main};

fn breakpoint_modes() -> ModeEvaluator<ModeContext> {
    ModeEvaluator::new()
        .with_mode("mobile", |ctx: &ModeContext| ctx.width <= 480.0)
        .with_mode("tablet", |ctx: &ModeContext| ctx.width >= 481.0 && ctx.width <= 768.0)
        .with_mode("desktop", |ctx: &ModeContext| ctx.width >= 769.0 && ctx.width <= 1_440.0)
        .with_mode("wall", |ctx: &ModeContext| ctx.width > 1_440.0)
}

fn bench_mode_recompute(c: &mut Criterion) {
    let mut modes = breakpoint_modes();
    let widths = [320.0, 600.0, 1_024.0, 1_920.0];

    c.bench_function("mode_recompute_4_breakpoints", |b| {
        let mut index = 0usize;
        b.iter(|| {
            index = (index + 1) % widths.len();
            let context = ModeContext::new(black_box(widths[index]), 480.0);
            black_box(modes.recompute(&context))
        })
    });
}

fn bench_throttle_burst(c: &mut Criterion) {
    c.bench_function("throttle_burst_1k_calls", |b| {
        b.iter(|| {
            let mut state = Throttle::new(Duration::from_millis(60), ThrottleOptions::default());
            let mut executed = 0usize;
            for step in 0..1_000u64 {
                let now = Duration::from_millis(step * 4);
                if state.poll(now).is_some() {
                    executed += 1;
                }
                if state.call(now, black_box(step)).is_some() {
                    executed += 1;
                }
            }
            black_box(executed)
        })
    });
}

fn bench_resize_cycle_with_layers(c: &mut Criterion) {
    let mut definition = ChartDefinition::new().with_modes(breakpoint_modes());
    for index in 0..32 {
        let modes: &[&str] = match index % 3 {
            0 => &["mobile"],
            1 => &["tablet", "desktop"],
            _ => &["wall"],
        };
        definition = definition.with_layer(
            LayerSpec::new(format!("layer-{index}"), format!("g.layer-{index}"), ())
                .with_modes(modes.iter().copied()),
        );
    }
    let mut surface = ChartSurface::new(
        NullBaseChart::<f64>::default(),
        DetachedElement::inside(1_024.0, 768.0),
        definition,
        SurfaceConfig::default(),
    )
    .expect("surface init");
    surface.draw((0..2_000).map(f64::from).collect()).expect("draw");

    c.bench_function("resize_cycle_alternating_modes", |b| {
        let mut step = 0u64;
        b.iter(|| {
            step += 1;
            let width = if step % 2 == 0 { 400.0 } else { 1_600.0 };
            surface.element_mut().set_parent_size(width, 768.0);
            // Space signals past the throttle interval so every call runs a cycle.
            surface
                .handle_window_resize(Duration::from_millis(step * 100))
                .expect("resize cycle");
            black_box(surface.mode().is_some())
        })
    });
}

criterion_group!(
    benches,
    bench_mode_recompute,
    bench_throttle_burst,
    bench_resize_cycle_with_layers
);
criterion_main!(benches);
