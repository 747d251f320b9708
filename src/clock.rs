//! Millisecond clock sources.
//!
//! Every timestamp the sequencer sees is an `i64` count of milliseconds from
//! an arbitrary epoch. Only ordering and differences matter.

use std::cell::Cell;
use std::time::Instant;

/// Milliseconds on the clock source's timeline.
pub type Millis = i64;

/// A monotonic, never decreasing millisecond timestamp source.
pub trait Clock {
    fn now_millis(&self) -> Millis;
}

/// Wall clock backed by [`Instant`], counting from construction.
pub struct MonotonicClock {
    start: Instant,
}

impl MonotonicClock {
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }
}

impl Default for MonotonicClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for MonotonicClock {
    fn now_millis(&self) -> Millis {
        self.start.elapsed().as_millis() as Millis
    }
}

/// Hand-driven clock for tests and offline runs.
///
/// Time only moves when [`ManualClock::advance`] or [`ManualClock::set`] is
/// called. `set` refuses to go backwards so the monotonic contract holds.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<Millis>,
}

impl ManualClock {
    pub fn new(start: Millis) -> Self {
        Self {
            now: Cell::new(start),
        }
    }

    pub fn advance(&self, millis: Millis) {
        self.now.set(self.now.get() + millis.max(0));
    }

    pub fn set(&self, now: Millis) {
        self.now.set(self.now.get().max(now));
    }
}

impl Clock for ManualClock {
    fn now_millis(&self) -> Millis {
        self.now.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manual_clock_never_goes_backwards() {
        let clock = ManualClock::new(100);
        clock.advance(50);
        assert_eq!(clock.now_millis(), 150);

        clock.set(20);
        assert_eq!(clock.now_millis(), 150);

        clock.advance(-10);
        assert_eq!(clock.now_millis(), 150);

        clock.set(400);
        assert_eq!(clock.now_millis(), 400);
    }

    #[test]
    fn monotonic_clock_starts_near_zero() {
        let clock = MonotonicClock::new();
        let first = clock.now_millis();
        let second = clock.now_millis();
        assert!(first >= 0);
        assert!(second >= first);
    }
}
