use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::trace;

/// Edge behavior of a [`Throttle`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThrottleOptions {
    /// Execute immediately when a call opens a new window.
    pub leading: bool,
    /// Execute once more at the end of a window that received extra calls.
    pub trailing: bool,
}

impl Default for ThrottleOptions {
    fn default() -> Self {
        Self {
            leading: true,
            trailing: true,
        }
    }
}

/// Rate limiter state: at most one execution per `interval`.
///
/// Time is supplied by the host as a monotonic offset, so the throttle never
/// owns a timer. Hosts call [`Throttle::poll`] once [`Throttle::next_deadline`]
/// is reached.
#[derive(Debug, Clone)]
pub struct Throttle<A> {
    interval: Duration,
    options: ThrottleOptions,
    previous: Option<Duration>,
    deadline: Option<Duration>,
    pending: Option<A>,
}

impl<A> Throttle<A> {
    #[must_use]
    pub fn new(interval: Duration, options: ThrottleOptions) -> Self {
        Self {
            interval,
            options,
            previous: None,
            deadline: None,
            pending: None,
        }
    }

    #[must_use]
    pub fn interval(&self) -> Duration {
        self.interval
    }

    #[must_use]
    pub fn options(&self) -> ThrottleOptions {
        self.options
    }

    /// Records a call. Returns the arguments when they must run right away.
    pub fn call(&mut self, now: Duration, args: A) -> Option<A> {
        if self.previous.is_none() && !self.options.leading {
            self.previous = Some(now);
        }

        let remaining = self.previous.and_then(|previous| {
            self.interval
                .checked_sub(now.saturating_sub(previous))
                .filter(|remaining| !remaining.is_zero())
        });

        match remaining {
            None => {
                self.deadline = None;
                self.pending = None;
                self.previous = Some(now);
                trace!(now_ms = now.as_millis(), "throttle executes immediately");
                Some(args)
            }
            Some(remaining) if self.options.trailing => {
                self.pending = Some(args);
                if self.deadline.is_none() {
                    let deadline = now + remaining;
                    trace!(
                        deadline_ms = deadline.as_millis(),
                        "throttle schedules trailing call"
                    );
                    self.deadline = Some(deadline);
                }
                None
            }
            Some(_) => None,
        }
    }

    /// Fires the pending trailing call once its deadline has passed.
    pub fn poll(&mut self, now: Duration) -> Option<A> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }
        self.deadline = None;
        self.previous = self.options.leading.then_some(now);
        trace!(now_ms = now.as_millis(), "throttle fires trailing call");
        self.pending.take()
    }

    /// Drops any pending trailing call and resets the window.
    pub fn cancel(&mut self) {
        self.deadline = None;
        self.pending = None;
        self.previous = None;
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.deadline
    }

    #[must_use]
    pub fn has_pending(&self) -> bool {
        self.deadline.is_some()
    }
}

/// A callback wrapped by a [`Throttle`].
pub struct Throttled<A, F> {
    state: Throttle<A>,
    callback: F,
}

impl<A, R, F> Throttled<A, F>
where
    F: FnMut(A) -> R,
{
    #[must_use]
    pub fn new(callback: F, interval: Duration, options: ThrottleOptions) -> Self {
        Self {
            state: Throttle::new(interval, options),
            callback,
        }
    }

    pub fn call(&mut self, now: Duration, args: A) -> Option<R> {
        let args = self.state.call(now, args)?;
        Some((self.callback)(args))
    }

    pub fn poll(&mut self, now: Duration) -> Option<R> {
        let args = self.state.poll(now)?;
        Some((self.callback)(args))
    }

    pub fn cancel(&mut self) {
        self.state.cancel();
    }

    #[must_use]
    pub fn next_deadline(&self) -> Option<Duration> {
        self.state.next_deadline()
    }
}

/// Wraps `callback` so it runs at most once per `interval`.
#[must_use]
pub fn throttle<A, R, F>(
    callback: F,
    interval: Duration,
    options: ThrottleOptions,
) -> Throttled<A, F>
where
    F: FnMut(A) -> R,
{
    Throttled::new(callback, interval, options)
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::{Throttle, ThrottleOptions, throttle};

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    #[test]
    fn first_call_runs_on_leading_edge() {
        let mut state = Throttle::new(ms(60), ThrottleOptions::default());
        assert_eq!(state.call(ms(1_000), 1), Some(1));
        assert!(!state.has_pending());
    }

    #[test]
    fn burst_coalesces_into_one_trailing_call_with_latest_args() {
        let mut state = Throttle::new(ms(60), ThrottleOptions::default());
        assert_eq!(state.call(ms(1_000), 1), Some(1));
        assert_eq!(state.call(ms(1_010), 2), None);
        assert_eq!(state.call(ms(1_020), 3), None);
        assert_eq!(state.next_deadline(), Some(ms(1_060)));

        assert_eq!(state.poll(ms(1_059)), None);
        assert_eq!(state.poll(ms(1_060)), Some(3));
        assert_eq!(state.poll(ms(1_200)), None);
    }

    #[test]
    fn window_restarts_after_trailing_fire() {
        let mut state = Throttle::new(ms(60), ThrottleOptions::default());
        state.call(ms(0), 'a');
        state.call(ms(10), 'b');
        assert_eq!(state.poll(ms(60)), Some('b'));
        assert_eq!(state.call(ms(70), 'c'), None);
        assert_eq!(state.next_deadline(), Some(ms(120)));
    }

    #[test]
    fn elapsed_window_cancels_late_trailing_call() {
        let mut state = Throttle::new(ms(60), ThrottleOptions::default());
        state.call(ms(0), 1);
        state.call(ms(10), 2);
        assert_eq!(state.call(ms(90), 3), Some(3));
        assert!(!state.has_pending());
    }

    #[test]
    fn leading_disabled_defers_first_call() {
        let options = ThrottleOptions {
            leading: false,
            trailing: true,
        };
        let mut state = Throttle::new(ms(60), options);
        assert_eq!(state.call(ms(500), 1), None);
        assert_eq!(state.next_deadline(), Some(ms(560)));
        assert_eq!(state.poll(ms(560)), Some(1));
        assert_eq!(state.call(ms(900), 2), None);
    }

    #[test]
    fn trailing_disabled_drops_intermediate_calls() {
        let options = ThrottleOptions {
            leading: true,
            trailing: false,
        };
        let mut state = Throttle::new(ms(60), options);
        assert_eq!(state.call(ms(0), 1), Some(1));
        assert_eq!(state.call(ms(30), 2), None);
        assert!(!state.has_pending());
        assert_eq!(state.call(ms(60), 3), Some(3));
    }

    #[test]
    fn cancel_forgets_pending_call() {
        let mut state = Throttle::new(ms(60), ThrottleOptions::default());
        state.call(ms(0), 1);
        state.call(ms(5), 2);
        state.cancel();
        assert_eq!(state.poll(ms(100)), None);
        assert_eq!(state.call(ms(101), 3), Some(3));
    }

    #[test]
    fn throttled_wrapper_invokes_callback() {
        let mut seen = Vec::new();
        {
            let mut wrapped = throttle(
                |value: u32| seen.push(value),
                ms(60),
                ThrottleOptions::default(),
            );
            wrapped.call(ms(0), 1);
            wrapped.call(ms(1), 2);
            wrapped.call(ms(2), 3);
            wrapped.poll(ms(60));
        }
        assert_eq!(seen, vec![1, 3]);
    }
}
