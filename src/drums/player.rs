//! KitPlayer - the sequencer's handle on the drum kit

use rtrb::Producer;

use super::{DrumMessage, DRUM_SLOTS};
use crate::{io::DrumPlayer, sequencing::DrumSlot};

/// Sends drum triggers to the audio thread and tracks slot state.
pub struct KitPlayer {
    tx: Producer<DrumMessage>,
    /// Pressed state of the most recent `play` per slot
    lit: [bool; DRUM_SLOTS],
    /// Muted slots keep their lit state but make no sound
    muted: [bool; DRUM_SLOTS],
    /// Triggers lost to a full ring buffer
    dropped: u64,
}

impl KitPlayer {
    pub fn new(tx: Producer<DrumMessage>) -> Self {
        Self {
            tx,
            lit: [false; DRUM_SLOTS],
            muted: [false; DRUM_SLOTS],
            dropped: 0,
        }
    }

    pub fn is_lit(&self, slot: DrumSlot) -> bool {
        self.lit.get(slot.index()).copied().unwrap_or(false)
    }

    pub fn is_muted(&self, slot: DrumSlot) -> bool {
        self.muted.get(slot.index()).copied().unwrap_or(false)
    }

    pub fn set_muted(&mut self, slot: DrumSlot, muted: bool) {
        if let Some(flag) = self.muted.get_mut(slot.index()) {
            *flag = muted;
        }
    }

    pub fn toggle_mute(&mut self, slot: DrumSlot) {
        let muted = self.is_muted(slot);
        self.set_muted(slot, !muted);
    }

    pub fn dropped(&self) -> u64 {
        self.dropped
    }

    /// Cut every sounding voice
    pub fn silence(&mut self) {
        if self.tx.push(DrumMessage::Silence).is_err() {
            self.dropped += 1;
        }
    }
}

impl DrumPlayer for KitPlayer {
    fn play(&mut self, slot: DrumSlot, pressed: bool) {
        let index = slot.index();
        let Some(lit) = self.lit.get_mut(index) else {
            log::warn!("no drum in slot {}", index);
            return;
        };
        *lit = pressed;

        // one-shots ignore releases
        if !pressed || self.muted[index] {
            return;
        }

        if self.tx.push(DrumMessage::Trigger { slot: index }).is_err() {
            self.dropped += 1;
            log::warn!("drum queue full, dropped trigger for slot {}", index);
        }
    }
}
