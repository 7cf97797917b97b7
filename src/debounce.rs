//! Keystroke debouncing driven by an explicit clock.
//!
//! The GUI feeds every edit with `push` and calls `poll` once per frame. A
//! value only settles after `delay` has elapsed without another `push`.
//! Time is passed in rather than read, so tests control it precisely.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct Debouncer<T> {
    delay: Duration,
    settled: T,
    pending: Option<(T, Instant)>,
}

impl<T: Clone + PartialEq> Debouncer<T> {
    pub fn new(initial: T, delay: Duration) -> Self {
        Self {
            delay,
            settled: initial,
            pending: None,
        }
    }

    /// Records a new raw value, restarting the quiet period.
    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now));
    }

    /// Settles the pending value once the quiet period is over.
    ///
    /// Returns the new settled value only when it differs from the previous one.
    pub fn poll(&mut self, now: Instant) -> Option<&T> {
        let ready = matches!(&self.pending, Some((_, at)) if now.saturating_duration_since(*at) >= self.delay);
        if !ready {
            return None;
        }

        let (value, _) = self.pending.take()?;
        if value == self.settled {
            return None;
        }
        self.settled = value;
        Some(&self.settled)
    }

    /// The last settled value.
    pub fn value(&self) -> &T {
        &self.settled
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending value may settle.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .as_ref()
            .map(|(_, at)| self.delay.saturating_sub(now.saturating_duration_since(*at)))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }
}
