use std::time::Duration;

use chart_surface::core::{Throttle, ThrottleOptions};
use proptest::prelude::*;

/// Feeds calls at the given gaps, firing trailing calls exactly at their
/// deadlines, and returns `(time_ms, call_index)` for every execution.
fn simulate(interval_ms: u64, gaps_ms: &[u64]) -> Vec<(u64, usize)> {
    let mut state = Throttle::new(Duration::from_millis(interval_ms), ThrottleOptions::default());
    let mut executions = Vec::new();
    let mut now = 0u64;

    for (index, gap) in gaps_ms.iter().enumerate() {
        now += gap;
        if let Some(deadline) = state.next_deadline() {
            let deadline_ms = deadline.as_millis() as u64;
            if deadline_ms <= now {
                if let Some(fired) = state.poll(deadline) {
                    executions.push((deadline_ms, fired));
                }
            }
        }
        if let Some(run) = state.call(Duration::from_millis(now), index) {
            executions.push((now, run));
        }
    }

    if let Some(deadline) = state.next_deadline() {
        if let Some(fired) = state.poll(deadline) {
            executions.push((deadline.as_millis() as u64, fired));
        }
    }
    executions
}

proptest! {
    #[test]
    fn executions_are_spaced_by_at_least_the_interval(
        interval_ms in 1u64..200,
        gaps_ms in prop::collection::vec(0u64..150, 1..60)
    ) {
        let executions = simulate(interval_ms, &gaps_ms);
        for pair in executions.windows(2) {
            prop_assert!(pair[1].0 - pair[0].0 >= interval_ms);
        }
    }

    #[test]
    fn latest_call_always_executes_last(
        interval_ms in 1u64..200,
        gaps_ms in prop::collection::vec(0u64..150, 1..60)
    ) {
        let executions = simulate(interval_ms, &gaps_ms);
        let last = executions.last().expect("at least one execution");
        prop_assert_eq!(last.1, gaps_ms.len() - 1);
        prop_assert!(executions.len() <= gaps_ms.len());
    }

    #[test]
    fn execution_order_follows_call_order(
        interval_ms in 1u64..200,
        gaps_ms in prop::collection::vec(0u64..150, 1..60)
    ) {
        let executions = simulate(interval_ms, &gaps_ms);
        for pair in executions.windows(2) {
            prop_assert!(pair[0].1 < pair[1].1);
        }
    }
}
