//! Scheduler - advances every beat against the clock
//!
//! One [`Scheduler::poll`] per frame. Each due beat is rescheduled exactly
//! once per poll, so a beat that fell behind drains its backlog one tick per
//! frame instead of bursting.

use super::beat::Beat;
use crate::clock::Millis;

/// Index of one of the drum playback channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DrumSlot(pub usize);

impl DrumSlot {
    /// Pads below `split` play slot 0, the rest slot 1
    pub fn for_pad(pad: usize, split: usize) -> Self {
        if pad >= split {
            DrumSlot(1)
        } else {
            DrumSlot(0)
        }
    }

    pub fn index(self) -> usize {
        self.0
    }
}

/// An active beat that fired during a poll.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tick {
    /// Pad (and beat) index
    pub pad: usize,
    /// Drum channel the pad is routed to
    pub slot: DrumSlot,
    /// Scheduled time of this fire, before rescheduling
    pub due: Millis,
}

/// Owns the fixed set of beats, one per pad.
pub struct Scheduler {
    beats: Box<[Beat]>,
    /// Length of the loop a zero period produces
    cycle_ms: i64,
    /// Lower bound on the reschedule step
    min_interval: i64,
    /// First pad routed to drum slot 1
    split: usize,
}

impl Scheduler {
    pub fn new(num_pads: usize, split: usize, cycle_ms: i64, min_interval: i64) -> Self {
        Self {
            beats: vec![Beat::new(); num_pads].into_boxed_slice(),
            cycle_ms,
            min_interval,
            split,
        }
    }

    pub fn num_pads(&self) -> usize {
        self.beats.len()
    }

    pub fn beats(&self) -> &[Beat] {
        &self.beats
    }

    pub fn beat(&self, pad: usize) -> Option<&Beat> {
        self.beats.get(pad)
    }

    pub fn beat_mut(&mut self, pad: usize) -> Option<&mut Beat> {
        self.beats.get_mut(pad)
    }

    /// Advance all due beats and report the audible ones.
    ///
    /// Beats are visited in pad order, so `on_tick` sees fires in
    /// increasing pad index. Returns the number of ticks reported.
    pub fn poll<F: FnMut(Tick)>(&mut self, now: Millis, mut on_tick: F) -> usize {
        let mut fired = 0;

        for (pad, beat) in self.beats.iter_mut().enumerate() {
            if !beat.is_due(now) {
                continue;
            }

            let due = beat.next_fire;
            beat.next_fire += beat.interval(self.cycle_ms, self.min_interval);

            if beat.active {
                log::trace!("tick pad {} at {} (due {})", pad, now, due);
                on_tick(Tick {
                    pad,
                    slot: DrumSlot::for_pad(pad, self.split),
                    due,
                });
                fired += 1;
            }
        }

        fired
    }

    /// Back to power-on state: every beat silent and due at time zero
    pub fn reset(&mut self) {
        self.beats.fill(Beat::new());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scheduler() -> Scheduler {
        Scheduler::new(12, 6, 1_000, 1)
    }

    fn arm(scheduler: &mut Scheduler, pad: usize, period: i64, next_fire: Millis) {
        let beat = scheduler.beat_mut(pad).unwrap();
        beat.period = period;
        beat.next_fire = next_fire;
        beat.normalize();
    }

    #[test]
    fn inactive_beats_advance_silently() {
        let mut scheduler = scheduler();
        let fired = scheduler.poll(0, |_| panic!("no beat is active"));

        assert_eq!(fired, 0);
        for beat in scheduler.beats() {
            assert_eq!(beat.next_fire, 1_000);
        }
    }

    #[test]
    fn active_beat_fires_and_reschedules_from_due_time() {
        let mut scheduler = scheduler();
        arm(&mut scheduler, 2, 200, 100);

        let mut ticks = Vec::new();
        scheduler.poll(130, |tick| ticks.push(tick));

        assert_eq!(
            ticks,
            vec![Tick {
                pad: 2,
                slot: DrumSlot(0),
                due: 100
            }]
        );
        // advanced from the scheduled time, not from `now`
        assert_eq!(scheduler.beat(2).unwrap().next_fire, 900);
    }

    #[test]
    fn not_due_is_untouched() {
        let mut scheduler = scheduler();
        arm(&mut scheduler, 0, 10, 500);

        assert_eq!(scheduler.poll(499, |_| {}), 0);
        assert_eq!(scheduler.beat(0).unwrap().next_fire, 500);
    }

    #[test]
    fn overdue_beat_fires_once_per_poll() {
        let mut scheduler = scheduler();
        // interval of 100ms, ten intervals behind
        arm(&mut scheduler, 4, 900, 0);

        let mut count = 0;
        scheduler.poll(1_000, |_| count += 1);
        assert_eq!(count, 1);
        assert_eq!(scheduler.beat(4).unwrap().next_fire, 100);

        scheduler.poll(1_000, |_| count += 1);
        assert_eq!(count, 2);
        assert_eq!(scheduler.beat(4).unwrap().next_fire, 200);
    }

    #[test]
    fn long_gap_does_not_burst() {
        let mut scheduler = scheduler();
        arm(&mut scheduler, 0, 10, 0);

        let mut count = 0;
        scheduler.poll(500, |_| count += 1);
        assert_eq!(count, 1);
        assert_eq!(scheduler.beat(0).unwrap().next_fire, 990);
    }

    #[test]
    fn ticks_come_in_pad_order_with_slot_split() {
        let mut scheduler = scheduler();
        for pad in [11, 0, 6, 5] {
            arm(&mut scheduler, pad, 1, 0);
        }

        let mut ticks = Vec::new();
        scheduler.poll(0, |tick| ticks.push((tick.pad, tick.slot.index())));

        assert_eq!(ticks, vec![(0, 0), (5, 0), (6, 1), (11, 1)]);
    }

    #[test]
    fn toggling_active_keeps_phase() {
        let mut scheduler = scheduler();
        arm(&mut scheduler, 1, 500, 0);
        scheduler.poll(0, |_| {});
        assert_eq!(scheduler.beat(1).unwrap().next_fire, 500);

        scheduler.beat_mut(1).unwrap().active = false;
        scheduler.poll(500, |_| panic!("muted beat must not fire"));
        assert_eq!(scheduler.beat(1).unwrap().next_fire, 1_000);

        scheduler.beat_mut(1).unwrap().active = true;
        let mut fired = Vec::new();
        scheduler.poll(1_000, |tick| fired.push(tick.due));
        assert_eq!(fired, vec![1_000]);
    }

    #[test]
    fn period_past_cycle_still_moves_forward() {
        let mut scheduler = scheduler();
        arm(&mut scheduler, 3, 1_500, 10);

        scheduler.poll(10, |_| {});
        assert_eq!(scheduler.beat(3).unwrap().next_fire, 11);
    }

    #[test]
    fn reset_restores_power_on_state() {
        let mut scheduler = scheduler();
        arm(&mut scheduler, 7, 300, 42);
        scheduler.reset();
        assert!(scheduler.beats().iter().all(|b| *b == Beat::new()));
    }
}
