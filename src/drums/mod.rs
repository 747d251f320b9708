//! The drum kit behind the sequencer's ticks.
//!
//! Two slots, each holding a one-shot sample: slot 0 the kick, slot 1 the
//! open hat. Samples load from WAV files; a missing file can be replaced by
//! a synthesized voice so the loop always has something to play.
//!
//! The control thread talks to the audio thread through a [`KitPlayer`]
//! that pushes [`DrumMessage`]s into a ring buffer drained by the
//! [`DrumMixer`].

pub mod mixer;
#[cfg(feature = "rtrb")]
pub mod player;
pub mod sample;
pub mod synth;

pub use mixer::{DrumMessage, DrumMixer, DrumReceiver};
#[cfg(feature = "rtrb")]
pub use player::KitPlayer;
pub use sample::{load_wav, Sample};

use crate::{config::SampleConfig, error::SampleError};

/// Number of drum playback channels
pub const DRUM_SLOTS: usize = 2;

/// The samples for every slot.
#[derive(Debug, Clone)]
pub struct DrumKit {
    slots: [Sample; DRUM_SLOTS],
}

impl DrumKit {
    pub fn new(low: Sample, high: Sample) -> Self {
        Self { slots: [low, high] }
    }

    /// Kit made only of synthesized voices
    pub fn synthesized(sample_rate: u32) -> Self {
        Self::new(synth::for_slot(0, sample_rate), synth::for_slot(1, sample_rate))
    }

    /// Load every slot's WAV file named in `config`.
    ///
    /// With `synth_fallback` set a slot that fails to load gets a voice
    /// rendered at `sample_rate` instead; otherwise the first failure is
    /// returned.
    pub fn load(config: &SampleConfig, sample_rate: u32) -> Result<Self, SampleError> {
        let low = Self::load_slot(config, 0, sample_rate)?;
        let high = Self::load_slot(config, 1, sample_rate)?;
        Ok(Self::new(low, high))
    }

    fn load_slot(config: &SampleConfig, slot: usize, sample_rate: u32) -> Result<Sample, SampleError> {
        match load_wav(&config.path(slot)) {
            Ok(sample) => Ok(sample),
            Err(err) if config.synth_fallback => {
                log::warn!("drum slot {}: {}; using synthesized voice", slot, err);
                Ok(synth::for_slot(slot, sample_rate))
            }
            Err(err) => Err(err),
        }
    }

    pub fn sample(&self, slot: usize) -> Option<&Sample> {
        self.slots.get(slot)
    }

    pub fn into_samples(self) -> [Sample; DRUM_SLOTS] {
        self.slots
    }
}
