//! Beat - one looping timer per pad

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::clock::Millis;

/// Periodic timer bound to a single pad.
///
/// A beat is always scheduled, even when inactive. `active` only decides
/// whether a fire is audible and visible.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Beat {
    /// Whether fires produce a drum hit and LED flash
    pub active: bool,
    /// Milliseconds taken off the cycle length; larger is faster
    pub period: i64,
    /// Absolute time of the next fire
    pub next_fire: Millis,
}

impl Beat {
    pub const fn new() -> Self {
        Self {
            active: false,
            period: 0,
            next_fire: 0,
        }
    }

    /// True once the clock has reached the scheduled fire time
    #[inline]
    pub fn is_due(&self, now: Millis) -> bool {
        self.next_fire <= now
    }

    /// Gap to the following fire, never shorter than `min_interval`
    #[inline]
    pub fn interval(&self, cycle_ms: i64, min_interval: i64) -> i64 {
        (cycle_ms - self.period).max(min_interval)
    }

    /// Shift period and phase together by `delta`, then clamp.
    ///
    /// The next fire moves by the same amount as the period so an edit
    /// neither fires the beat right away nor stalls it.
    pub fn nudge(&mut self, delta: i64) {
        self.period += delta;
        self.next_fire += delta;
        self.normalize();
    }

    /// `active` iff `period > 0`; non-positive periods collapse to 0.
    pub fn normalize(&mut self) {
        if self.period > 0 {
            self.active = true;
        } else {
            self.active = false;
            self.period = 0;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_silent_and_due() {
        let beat = Beat::new();
        assert_eq!(beat, Beat::default());
        assert!(!beat.active);
        assert!(beat.is_due(0));
    }

    #[test]
    fn nudge_moves_period_and_phase() {
        let mut beat = Beat {
            active: true,
            period: 40,
            next_fire: 1_000,
        };
        beat.nudge(7);
        assert_eq!(beat.period, 47);
        assert_eq!(beat.next_fire, 1_007);
        assert!(beat.active);
    }

    #[test]
    fn nudge_through_zero_clamps_and_deactivates() {
        let mut beat = Beat {
            active: true,
            period: 3,
            next_fire: 500,
        };
        beat.nudge(-10);
        assert_eq!(beat.period, 0);
        assert_eq!(beat.next_fire, 490);
        assert!(!beat.active);
    }

    #[test]
    fn interval_is_clamped_for_long_periods() {
        let mut beat = Beat::new();
        beat.period = 250;
        assert_eq!(beat.interval(1_000, 1), 750);

        beat.period = 1_000;
        assert_eq!(beat.interval(1_000, 1), 1);

        beat.period = 5_000;
        assert_eq!(beat.interval(1_000, 5), 5);
    }
}
