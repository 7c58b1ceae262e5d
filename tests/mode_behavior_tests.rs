use std::cell::Cell;
use std::rc::Rc;

use chart_surface::api::{ChartDefinition, ChartSurface, SurfaceConfig};
use chart_surface::core::ModeContext;
use chart_surface::host::DetachedElement;
use chart_surface::render::NullBaseChart;

type Base = NullBaseChart<f64>;

fn counted(
    result: bool,
) -> (Rc<Cell<usize>>, impl Fn(&ModeContext) -> bool + 'static) {
    let counter = Rc::new(Cell::new(0));
    let calls = Rc::clone(&counter);
    (counter, move |_: &ModeContext| {
        calls.set(calls.get() + 1);
        result
    })
}

fn build(definition: ChartDefinition<Base>) -> ChartSurface<Base, DetachedElement> {
    ChartSurface::new(
        Base::default(),
        DetachedElement::new(),
        definition,
        SurfaceConfig::default(),
    )
    .expect("surface init")
}

#[test]
fn constructor_selects_first_true_mode() {
    let (other, other_fn) = counted(false);
    let (truth, truth_fn) = counted(true);
    let (not_truth, not_truth_fn) = counted(false);
    let chart = build(
        ChartDefinition::new()
            .with_mode("other", other_fn)
            .with_mode("truth", truth_fn)
            .with_mode("nottruth", not_truth_fn),
    );

    assert_eq!(chart.mode(), Some("truth"));
    assert_eq!(
        [other.get(), truth.get(), not_truth.get()],
        [1, 1, 0]
    );
}

#[test]
fn recompute_checks_modes_again() {
    let (calls, predicate) = counted(true);
    let mut chart = build(ChartDefinition::new().with_mode("mode", predicate));
    assert_eq!(calls.get(), 1);

    let changed = chart.recompute_mode();
    assert!(!changed);
    assert_eq!(calls.get(), 2);
}

#[test]
fn recompute_reports_flips_in_external_state() {
    let state = Rc::new(Cell::new(true));
    let on = Rc::clone(&state);
    let off = Rc::clone(&state);
    let mut chart = build(
        ChartDefinition::new()
            .with_mode("mode", move |_| on.get())
            .with_mode("anothermode", move |_| !off.get()),
    );

    assert!(!chart.recompute_mode());
    state.set(false);
    assert!(chart.recompute_mode());
    assert_eq!(chart.mode(), Some("anothermode"));
}

#[test]
fn recompute_does_not_notify_or_redraw() {
    let state = Rc::new(Cell::new(true));
    let flag = Rc::clone(&state);
    let mut chart = build(
        ChartDefinition::new()
            .with_mode("a", move |_| flag.get())
            .with_mode("b", |_| true),
    );
    let notified = Rc::new(Cell::new(0));
    let counter = Rc::clone(&notified);
    chart.on(move |_| counter.set(counter.get() + 1));
    chart.draw(vec![1.0]).expect("draw");

    state.set(false);
    assert!(chart.recompute_mode());
    assert_eq!(notified.get(), 0);
    assert_eq!(chart.base().draw_count, 1);
}

#[test]
fn predicates_see_live_size_and_previous_mode() {
    let seen = Rc::new(std::cell::RefCell::new(Vec::new()));
    let log = Rc::clone(&seen);
    let mut chart = ChartSurface::new(
        Base::default(),
        DetachedElement::inside(640.0, 480.0),
        ChartDefinition::new().with_mode("any", move |ctx: &ModeContext| {
            log.borrow_mut().push(ctx.clone());
            true
        }),
        SurfaceConfig::default(),
    )
    .expect("surface init");
    chart.recompute_mode();

    let seen = seen.borrow();
    assert_eq!(seen[0], ModeContext::new(640.0, 200.0));
    assert_eq!(
        seen[1],
        ModeContext::new(640.0, 200.0).with_previous_mode(Some("any"))
    );
}
