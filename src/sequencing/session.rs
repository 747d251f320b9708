//! Edit session state machine
//!
//! Which beat the encoder is bound to. A pad press binds its beat and
//! captures the encoder baseline; releasing that pad unbinds it.

use crate::io::KeyEvent;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EditState {
    /// No pad held, encoder turns edit nothing
    #[default]
    Idle,
    /// Pad `pad` held; `baseline` is the encoder reading deltas are taken from
    Editing { pad: usize, baseline: i64 },
}

impl EditState {
    /// Next state for a key event, given the encoder reading at that moment.
    ///
    /// Pressing another pad while one is held rebinds to the new pad. A
    /// release only counts for the bound pad.
    pub fn transition(self, event: KeyEvent, encoder: i64) -> EditState {
        match (self, event.pressed) {
            (_, true) => EditState::Editing {
                pad: event.key_number,
                baseline: encoder,
            },
            (EditState::Editing { pad, .. }, false) if pad == event.key_number => EditState::Idle,
            (state, false) => state,
        }
    }

    pub fn bound_pad(&self) -> Option<usize> {
        match self {
            EditState::Idle => None,
            EditState::Editing { pad, .. } => Some(*pad),
        }
    }
}
