//! Per-pad loop sequencing.
//!
//! Every pad owns a [`Beat`], a free-running timer. Holding a pad binds its
//! beat to the encoder; turning the encoder shifts the beat's period (and
//! phase) until the pad is released. The [`Scheduler`] fires active beats on
//! each poll.
//!
//! # Example
//!
//! ```
//! use looptick::io::KeyEvent;
//! use looptick::sequencing::Sequencer;
//!
//! let mut seq = Sequencer::new(12, 6, 1_000, 1);
//!
//! seq.on_key_event(KeyEvent::press(0));
//! seq.on_encoder_changed(50);
//! seq.on_key_event(KeyEvent::release(0));
//!
//! let beat = *seq.scheduler().beat(0).unwrap();
//! assert_eq!(beat.period, 50);
//! assert!(beat.active);
//!
//! let mut pads = Vec::new();
//! seq.poll(beat.next_fire, |tick| pads.push(tick.pad));
//! assert_eq!(pads, vec![0]);
//! ```

pub mod beat;
pub mod encoder;
pub mod scheduler;
pub mod session;

pub use beat::Beat;
pub use encoder::{BeatEdit, EncoderChange, EncoderTracker};
pub use scheduler::{DrumSlot, Scheduler, Tick};
pub use session::EditState;

use crate::{clock::Millis, io::KeyEvent};

/// What a key event did to the edit session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyOutcome {
    /// Pad bound for editing; carries its current period
    Bound { pad: usize, period: i64 },
    /// Bound pad released
    Released { pad: usize },
    /// Event changed nothing (stale release, unknown key)
    Ignored,
}

/// Beats, edit session and encoder baseline, driven from one thread.
pub struct Sequencer {
    scheduler: Scheduler,
    session: EditState,
    encoder: EncoderTracker,
}

impl Sequencer {
    pub fn new(num_pads: usize, split: usize, cycle_ms: i64, min_interval: i64) -> Self {
        Self {
            scheduler: Scheduler::new(num_pads, split, cycle_ms, min_interval),
            session: EditState::Idle,
            encoder: EncoderTracker::default(),
        }
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn session(&self) -> EditState {
        self.session
    }

    pub fn encoder_value(&self) -> i64 {
        self.encoder.last()
    }

    /// Fire due beats; see [`Scheduler::poll`]
    pub fn poll<F: FnMut(Tick)>(&mut self, now: Millis, on_tick: F) -> usize {
        self.scheduler.poll(now, on_tick)
    }

    /// Feed the latest absolute encoder reading.
    ///
    /// Returns `None` when the reading did not move. While a pad is held the
    /// movement since the baseline is applied to its beat and the baseline
    /// follows, so consecutive turns add up incrementally.
    pub fn on_encoder_changed(&mut self, value: i64) -> Option<EncoderChange> {
        let value = self.encoder.update(value)?;

        let EditState::Editing { pad, baseline } = self.session else {
            return Some(EncoderChange { value, edit: None });
        };

        let delta = value - baseline;
        self.session = EditState::Editing {
            pad,
            baseline: value,
        };

        let edit = self.scheduler.beat_mut(pad).map(|beat| {
            beat.nudge(delta);
            BeatEdit {
                pad,
                delta,
                period: beat.period,
                active: beat.active,
            }
        });
        if let Some(edit) = &edit {
            log::debug!(
                "pad {} period {} ({:+}), active {}",
                edit.pad,
                edit.period,
                edit.delta,
                edit.active
            );
        }

        Some(EncoderChange { value, edit })
    }

    /// Apply a pad press or release to the edit session
    pub fn on_key_event(&mut self, event: KeyEvent) -> KeyOutcome {
        if event.key_number >= self.scheduler.num_pads() {
            log::warn!("ignoring event for unknown key {}", event.key_number);
            return KeyOutcome::Ignored;
        }

        let previous = self.session;
        self.session = previous.transition(event, self.encoder.last());

        match (previous, self.session) {
            (_, EditState::Editing { pad, .. }) if event.pressed => {
                if let Some(old) = previous.bound_pad().filter(|&old| old != pad) {
                    log::debug!("pad {} pressed while editing pad {}, rebinding", pad, old);
                }
                let period = self.scheduler.beat(pad).map_or(0, |beat| beat.period);
                log::debug!("editing pad {} (period {})", pad, period);
                KeyOutcome::Bound { pad, period }
            }
            (EditState::Editing { pad, .. }, EditState::Idle) => {
                log::debug!("released pad {}", pad);
                KeyOutcome::Released { pad }
            }
            _ => KeyOutcome::Ignored,
        }
    }

    /// Forget all programmed beats and any binding
    pub fn reset(&mut self) {
        self.scheduler.reset();
        self.session = EditState::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sequencer() -> Sequencer {
        Sequencer::new(12, 6, 1_000, 1)
    }

    #[test]
    fn encoder_while_idle_touches_no_beat() {
        let mut seq = sequencer();
        let before: Vec<Beat> = seq.scheduler().beats().to_vec();

        for value in [3, -8, 40, 41, 0] {
            let change = seq.on_encoder_changed(value).unwrap();
            assert_eq!(change.edit, None);
        }

        assert_eq!(seq.scheduler().beats(), &before[..]);
        assert_eq!(seq.encoder_value(), 0);
    }

    #[test]
    fn unchanged_reading_is_not_a_change() {
        let mut seq = sequencer();
        seq.on_key_event(KeyEvent::press(1));
        assert_eq!(seq.on_encoder_changed(0), None);
        assert_eq!(seq.scheduler().beat(1).unwrap().period, 0);
    }

    #[test]
    fn press_uses_current_reading_as_baseline() {
        let mut seq = sequencer();
        seq.on_encoder_changed(100);
        seq.on_key_event(KeyEvent::press(5));
        assert_eq!(
            seq.session(),
            EditState::Editing {
                pad: 5,
                baseline: 100
            }
        );

        let edit = seq.on_encoder_changed(112).unwrap().edit.unwrap();
        assert_eq!(edit.delta, 12);
        assert_eq!(edit.period, 12);
        assert!(edit.active);
    }

    #[test]
    fn deltas_are_incremental() {
        let mut seq = sequencer();
        seq.on_key_event(KeyEvent::press(0));
        seq.on_encoder_changed(10);
        seq.on_encoder_changed(15);
        seq.on_encoder_changed(13);

        let beat = seq.scheduler().beat(0).unwrap();
        assert_eq!(beat.period, 13);
        assert_eq!(beat.next_fire, 13);
    }

    #[test]
    fn clamp_holds_for_any_delta_sequence() {
        let mut seq = sequencer();
        seq.on_key_event(KeyEvent::press(9));

        let mut value = 0;
        for delta in [5, -3, -7, 12, -1, -40, 2, 0, 30, -30, 1] {
            value += delta;
            seq.on_encoder_changed(value);
            let beat = seq.scheduler().beat(9).unwrap();
            assert!(beat.period >= 0);
            assert_eq!(beat.active, beat.period > 0);
        }
    }

    #[test]
    fn balanced_edit_restores_beat() {
        let mut seq = sequencer();
        seq.on_key_event(KeyEvent::press(4));
        seq.on_encoder_changed(60);
        seq.on_key_event(KeyEvent::release(4));
        let before = *seq.scheduler().beat(4).unwrap();

        seq.on_key_event(KeyEvent::press(4));
        seq.on_encoder_changed(65);
        let shifted = *seq.scheduler().beat(4).unwrap();
        assert_eq!(shifted.period, before.period + 5);
        assert_eq!(shifted.next_fire, before.next_fire + 5);

        seq.on_encoder_changed(60);
        assert_eq!(*seq.scheduler().beat(4).unwrap(), before);
    }

    #[test]
    fn last_press_wins() {
        let mut seq = sequencer();
        assert_eq!(
            seq.on_key_event(KeyEvent::press(2)),
            KeyOutcome::Bound { pad: 2, period: 0 }
        );
        assert_eq!(
            seq.on_key_event(KeyEvent::press(7)),
            KeyOutcome::Bound { pad: 7, period: 0 }
        );

        seq.on_encoder_changed(20);
        assert_eq!(seq.scheduler().beat(2).unwrap().period, 0);
        assert_eq!(seq.scheduler().beat(7).unwrap().period, 20);

        // the first pad's release does not unbind the second
        assert_eq!(seq.on_key_event(KeyEvent::release(2)), KeyOutcome::Ignored);
        assert_eq!(seq.session().bound_pad(), Some(7));

        assert_eq!(
            seq.on_key_event(KeyEvent::release(7)),
            KeyOutcome::Released { pad: 7 }
        );
        assert_eq!(seq.session(), EditState::Idle);
    }

    #[test]
    fn unknown_key_is_ignored() {
        let mut seq = sequencer();
        assert_eq!(seq.on_key_event(KeyEvent::press(12)), KeyOutcome::Ignored);
        assert_eq!(seq.session(), EditState::Idle);
    }

    #[test]
    fn released_pad_keeps_looping() {
        let mut seq = sequencer();
        seq.on_key_event(KeyEvent::press(0));
        seq.on_encoder_changed(50);
        seq.on_key_event(KeyEvent::release(0));

        let beat = *seq.scheduler().beat(0).unwrap();
        assert_eq!(
            beat,
            Beat {
                active: true,
                period: 50,
                next_fire: 50
            }
        );

        let mut ticks = Vec::new();
        seq.poll(50, |tick| ticks.push(tick));
        assert_eq!(ticks.len(), 1);
        assert_eq!(ticks[0].slot, DrumSlot(0));
        assert_eq!(seq.scheduler().beat(0).unwrap().next_fire, 50 + 950);
    }
}
