//! Looper - one frame of the control loop
//!
//! A frame reads at most one key event, samples the clock, fires due beats,
//! applies encoder movement and the key event, then refreshes the display.
//! Everything runs on the caller's thread; the collaborators are borrowed
//! per frame so the same looper drives hardware, a terminal or a test.

use crate::{
    clock::{Clock, Millis},
    color::pad_color,
    config::LoopConfig,
    io::{DisplaySink, DrumPlayer, InputDevice},
    sequencing::{KeyOutcome, Sequencer},
};

/// Title shown above the text lines
pub const TITLE: &str = "LoopTic";

/// Display line showing the raw encoder reading
pub const ENCODER_LINE: usize = 1;
/// Display line showing the time of the last pad press
pub const TIME_LINE: usize = 2;
/// Display line showing the edited beat's period
pub const BEAT_LINE: usize = 3;

/// What happened during one frame.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameReport {
    pub now: Millis,
    /// Active beats that fired
    pub ticks: usize,
    pub encoder_moved: bool,
    pub key: Option<KeyOutcome>,
}

pub struct Looper {
    sequencer: Sequencer,
    num_pads: usize,
}

impl Looper {
    pub fn new(config: &LoopConfig) -> Self {
        Self {
            sequencer: Sequencer::new(
                config.num_pads,
                config.split,
                config.cycle_ms,
                config.min_interval_ms,
            ),
            num_pads: config.num_pads,
        }
    }

    pub fn sequencer(&self) -> &Sequencer {
        &self.sequencer
    }

    pub fn sequencer_mut(&mut self) -> &mut Sequencer {
        &mut self.sequencer
    }

    /// Run a single frame
    pub fn frame<C, I, P, D>(
        &mut self,
        clock: &C,
        input: &mut I,
        drums: &mut P,
        display: &mut D,
    ) -> FrameReport
    where
        C: Clock + ?Sized,
        I: InputDevice + ?Sized,
        P: DrumPlayer + ?Sized,
        D: DisplaySink + ?Sized,
    {
        let key_event = input.poll_key_event();
        let now = clock.now_millis();
        let num_pads = self.num_pads;

        let ticks = self.sequencer.poll(now, |tick| {
            display.set_led(tick.pad, pad_color(tick.pad, num_pads));
            drums.play(tick.slot, true);
        });

        let encoder = input.encoder_value();
        let mut encoder_moved = false;
        if let Some(change) = self.sequencer.on_encoder_changed(encoder) {
            encoder_moved = true;
            display.set_text_line(ENCODER_LINE, format!("Encoder: {}", change.value));
            if let Some(edit) = change.edit {
                display.set_text_line(BEAT_LINE, format!("Beat {}", edit.period));
            }
        }

        let key = key_event.map(|event| {
            let outcome = self.sequencer.on_key_event(event);
            if let KeyOutcome::Bound { period, .. } = outcome {
                display.set_text_line(TIME_LINE, format!("Time {}", now));
                display.set_text_line(BEAT_LINE, format!("Beat {}", period));
            }
            outcome
        });

        display.show();
        // LEDs only flash for the frame they fired in
        display.clear_leds();

        FrameReport {
            now,
            ticks,
            encoder_moved,
            key,
        }
    }
}
