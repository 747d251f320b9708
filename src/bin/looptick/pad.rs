//! Keyboard stand-in for the pad grid and encoder.
//!
//! Pads are laid out like the hardware, three columns by four rows:
//!
//! ```text
//!   1 2 3
//!   q w e
//!   a s d
//!   z x c
//! ```
//!
//! Terminals that report key releases get real hold-to-edit. Elsewhere a
//! keypress toggles the hold and `Space` lets go.

use std::collections::VecDeque;

use crossterm::event::{KeyCode, KeyEvent as TermKey, KeyEventKind};
use looptick::{
    io::{InputDevice, KeyEvent, QueuedInput},
    sequencing::DrumSlot,
};

/// Key per pad, in pad order
pub const PAD_KEYS: [char; 12] = ['1', '2', '3', 'q', 'w', 'e', 'a', 's', 'd', 'z', 'x', 'c'];

/// Requests that are not pad or encoder input
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PadAction {
    None,
    Quit,
    ToggleMute(DrumSlot),
    /// Clear every beat back to power-on state
    Reset,
}

pub struct TerminalPad {
    input: QueuedInput<VecDeque<KeyEvent>>,
    /// Whether the terminal sends release events
    release_events: bool,
    /// Pad currently held down
    held: Option<usize>,
    num_pads: usize,
}

impl TerminalPad {
    pub fn new(num_pads: usize, release_events: bool) -> Self {
        Self {
            input: QueuedInput::new(VecDeque::new()),
            release_events,
            held: None,
            num_pads,
        }
    }

    pub fn release_events(&self) -> bool {
        self.release_events
    }

    /// Forget the held pad; the sequencer has already dropped its binding
    pub fn reset(&mut self) {
        self.held = None;
    }

    fn pad_for(&self, code: KeyCode) -> Option<usize> {
        let KeyCode::Char(c) = code else {
            return None;
        };
        PAD_KEYS
            .iter()
            .position(|&key| key == c.to_ascii_lowercase())
            .filter(|&pad| pad < self.num_pads)
    }

    fn press(&mut self, pad: usize) {
        self.held = Some(pad);
        self.input.events_mut().push_back(KeyEvent::press(pad));
    }

    fn release(&mut self, pad: usize) {
        if self.held == Some(pad) {
            self.held = None;
        }
        self.input.events_mut().push_back(KeyEvent::release(pad));
    }

    /// Translate one terminal key event
    pub fn handle_key(&mut self, key: TermKey) -> PadAction {
        if let Some(pad) = self.pad_for(key.code) {
            match (key.kind, self.release_events) {
                (KeyEventKind::Press, true) => self.press(pad),
                (KeyEventKind::Release, true) => self.release(pad),
                (KeyEventKind::Press, false) => match self.held {
                    Some(held) if held == pad => self.release(pad),
                    Some(held) => {
                        self.release(held);
                        self.press(pad);
                    }
                    None => self.press(pad),
                },
                // auto-repeat while held
                _ => {}
            }
            return PadAction::None;
        }

        if key.kind == KeyEventKind::Release {
            return PadAction::None;
        }

        match key.code {
            KeyCode::Esc => return PadAction::Quit,
            KeyCode::Up | KeyCode::Right | KeyCode::Char('+') | KeyCode::Char('=') => {
                self.input.turn(1)
            }
            KeyCode::Down | KeyCode::Left | KeyCode::Char('-') | KeyCode::Char('_') => {
                self.input.turn(-1)
            }
            KeyCode::PageUp => self.input.turn(10),
            KeyCode::PageDown => self.input.turn(-10),
            KeyCode::Char(' ') => {
                if let Some(pad) = self.held {
                    self.release(pad);
                }
            }
            KeyCode::Char('m') => return PadAction::ToggleMute(DrumSlot(0)),
            KeyCode::Char('n') => return PadAction::ToggleMute(DrumSlot(1)),
            KeyCode::Backspace => return PadAction::Reset,
            _ => {}
        }
        PadAction::None
    }
}

impl InputDevice for TerminalPad {
    fn poll_key_event(&mut self) -> Option<KeyEvent> {
        self.input.poll_key_event()
    }

    fn encoder_value(&self) -> i64 {
        self.input.encoder_value()
    }
}
