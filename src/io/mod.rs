// Purpose - the narrow seams between the sequencer and the device around it

pub mod events;

pub use events::{KeyEvent, KeyEventSource};

use crate::{color::Rgb, sequencing::DrumSlot};

/// Pads and encoder, read without blocking.
pub trait InputDevice {
    /// Next queued key event, if any
    fn poll_key_event(&mut self) -> Option<KeyEvent>;

    /// Absolute encoder position
    fn encoder_value(&self) -> i64;
}

/// Input device fed from a key event queue and a software encoder.
pub struct QueuedInput<S: KeyEventSource> {
    events: S,
    encoder: i64,
}

impl<S: KeyEventSource> QueuedInput<S> {
    pub fn new(events: S) -> Self {
        Self { events, encoder: 0 }
    }

    pub fn events_mut(&mut self) -> &mut S {
        &mut self.events
    }

    /// Move the encoder by `steps` detents
    pub fn turn(&mut self, steps: i64) {
        self.encoder += steps;
    }

    pub fn set_encoder(&mut self, value: i64) {
        self.encoder = value;
    }
}

impl<S: KeyEventSource> InputDevice for QueuedInput<S> {
    fn poll_key_event(&mut self) -> Option<KeyEvent> {
        self.events.pop()
    }

    fn encoder_value(&self) -> i64 {
        self.encoder
    }
}

/// Starts drum playback.
pub trait DrumPlayer {
    /// `pressed` starts the slot's sample; a release does nothing for one-shots
    fn play(&mut self, slot: DrumSlot, pressed: bool);
}

/// Pad LEDs and the text display.
pub trait DisplaySink {
    fn set_led(&mut self, pad: usize, color: Rgb);

    fn clear_leds(&mut self);

    fn set_text_line(&mut self, line: usize, text: String);

    /// Push pending changes to the device
    fn show(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::VecDeque;

    #[test]
    fn queued_input_yields_one_event_per_poll() {
        let mut input = QueuedInput::new(VecDeque::new());
        input.events_mut().push_back(KeyEvent::press(1));
        input.events_mut().push_back(KeyEvent::release(1));

        assert_eq!(input.poll_key_event(), Some(KeyEvent::press(1)));
        assert_eq!(input.poll_key_event(), Some(KeyEvent::release(1)));
        assert_eq!(input.poll_key_event(), None);
    }

    #[test]
    fn encoder_turns_accumulate() {
        let mut input = QueuedInput::new(VecDeque::new());
        input.turn(3);
        input.turn(-5);
        assert_eq!(input.encoder_value(), -2);

        input.set_encoder(40);
        assert_eq!(input.encoder_value(), 40);
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn ring_buffer_is_an_event_source() {
        let (mut tx, rx) = rtrb::RingBuffer::new(4);
        tx.push(KeyEvent::press(6)).unwrap();

        let mut input = QueuedInput::new(rx);
        assert_eq!(input.poll_key_event(), Some(KeyEvent::press(6)));
        assert_eq!(input.poll_key_event(), None);
    }
}
