//! DrumMixer - renders the kit on the audio thread
//!
//! One voice per drum slot. A trigger restarts that slot's voice from the
//! top, so rapid ticks on the same slot cut each other off instead of
//! stacking.

#[cfg(feature = "rtrb")]
use rtrb::Consumer;

use super::{sample::Sample, DrumKit};

/// Messages from the control thread to the mixer.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum DrumMessage {
    /// Start the slot's sample from the beginning
    Trigger { slot: usize },
    /// Stop every voice
    Silence,
}

pub trait DrumReceiver {
    fn pop(&mut self) -> Option<DrumMessage>;
}

#[cfg(feature = "rtrb")]
impl DrumReceiver for Consumer<DrumMessage> {
    fn pop(&mut self) -> Option<DrumMessage> {
        Consumer::pop(self).ok()
    }
}

/// Playback head over one sample
struct Voice {
    sample: Sample,
    /// Fractional read position in source frames
    position: f64,
    /// Source frames advanced per output frame
    step: f64,
    playing: bool,
}

impl Voice {
    fn new(sample: Sample, output_rate: f32) -> Self {
        let step = sample.sample_rate as f64 / output_rate as f64;
        Self {
            sample,
            position: 0.0,
            step,
            playing: false,
        }
    }

    fn trigger(&mut self) {
        self.position = 0.0;
        self.playing = true;
    }

    /// Add this voice into `out`, linearly interpolating between frames
    fn mix_into(&mut self, out: &mut [f32]) {
        if !self.playing {
            return;
        }

        let data = &self.sample.data;
        for slot in out.iter_mut() {
            let index = self.position as usize;
            if index >= data.len() {
                self.playing = false;
                break;
            }
            let frac = (self.position - index as f64) as f32;
            let current = data[index];
            let next = data.get(index + 1).copied().unwrap_or(0.0);
            *slot += current + (next - current) * frac;
            self.position += self.step;
        }
    }
}

pub struct DrumMixer {
    voices: Vec<Voice>,
    volume: f32,
}

impl DrumMixer {
    pub fn new(kit: DrumKit, output_rate: f32, volume: f32) -> Self {
        Self {
            voices: kit
                .into_samples()
                .into_iter()
                .map(|sample| Voice::new(sample, output_rate))
                .collect(),
            volume,
        }
    }

    pub fn handle(&mut self, message: DrumMessage) {
        match message {
            DrumMessage::Trigger { slot } => match self.voices.get_mut(slot) {
                Some(voice) => voice.trigger(),
                None => log::warn!("trigger for missing drum slot {}", slot),
            },
            DrumMessage::Silence => {
                for voice in &mut self.voices {
                    voice.playing = false;
                }
            }
        }
    }

    /// Apply every pending message
    pub fn drain<R: DrumReceiver>(&mut self, receiver: &mut R) {
        while let Some(message) = receiver.pop() {
            self.handle(message);
        }
    }

    pub fn is_playing(&self, slot: usize) -> bool {
        self.voices.get(slot).is_some_and(|voice| voice.playing)
    }

    /// Overwrite `out` with the mono drum mix
    pub fn render(&mut self, out: &mut [f32]) {
        out.fill(0.0);
        for voice in &mut self.voices {
            voice.mix_into(out);
        }
        for sample in out.iter_mut() {
            *sample = (*sample * self.volume).clamp(-1.0, 1.0);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kit() -> DrumKit {
        DrumKit::new(
            Sample::new("a", vec![1.0, 0.5, 0.25], 48_000),
            Sample::new("b", vec![-0.5; 8], 24_000),
        )
    }

    #[test]
    fn silent_until_triggered() {
        let mut mixer = DrumMixer::new(kit(), 48_000.0, 1.0);
        let mut out = vec![1.0; 4];
        mixer.render(&mut out);
        assert_eq!(out, vec![0.0; 4]);
    }

    #[test]
    fn one_shot_plays_once() {
        let mut mixer = DrumMixer::new(kit(), 48_000.0, 1.0);
        mixer.handle(DrumMessage::Trigger { slot: 0 });

        let mut out = vec![0.0; 5];
        mixer.render(&mut out);
        assert_eq!(out, vec![1.0, 0.5, 0.25, 0.0, 0.0]);
        assert!(!mixer.is_playing(0));
    }

    #[test]
    fn retrigger_restarts_voice() {
        let mut mixer = DrumMixer::new(kit(), 48_000.0, 1.0);
        mixer.handle(DrumMessage::Trigger { slot: 0 });
        let mut out = vec![0.0; 2];
        mixer.render(&mut out);

        mixer.handle(DrumMessage::Trigger { slot: 0 });
        mixer.render(&mut out);
        assert_eq!(out, vec![1.0, 0.5]);
    }

    #[test]
    fn lower_rate_sample_is_stretched() {
        let mut mixer = DrumMixer::new(kit(), 48_000.0, 1.0);
        mixer.handle(DrumMessage::Trigger { slot: 1 });

        let mut out = vec![0.0; 20];
        mixer.render(&mut out);
        let sounding = out.iter().filter(|s| **s != 0.0).count();
        assert_eq!(sounding, 16);
    }

    #[test]
    fn mix_is_scaled_and_clipped() {
        let kit = DrumKit::new(
            Sample::new("loud", vec![0.9], 48_000),
            Sample::new("loud", vec![0.9], 48_000),
        );
        let mut mixer = DrumMixer::new(kit, 48_000.0, 0.5);
        mixer.handle(DrumMessage::Trigger { slot: 0 });
        mixer.handle(DrumMessage::Trigger { slot: 1 });
        let mut out = vec![0.0; 1];
        mixer.render(&mut out);
        assert!((out[0] - 0.9).abs() < 1e-6);

        let mut mixer = DrumMixer::new(
            DrumKit::new(
                Sample::new("loud", vec![0.9], 48_000),
                Sample::new("loud", vec![0.9], 48_000),
            ),
            48_000.0,
            1.0,
        );
        mixer.handle(DrumMessage::Trigger { slot: 0 });
        mixer.handle(DrumMessage::Trigger { slot: 1 });
        mixer.render(&mut out);
        assert_eq!(out[0], 1.0);
    }

    #[test]
    fn silence_stops_everything() {
        let mut mixer = DrumMixer::new(kit(), 48_000.0, 1.0);
        mixer.handle(DrumMessage::Trigger { slot: 0 });
        mixer.handle(DrumMessage::Trigger { slot: 1 });
        mixer.handle(DrumMessage::Silence);
        assert!(!mixer.is_playing(0));
        assert!(!mixer.is_playing(1));
    }

    #[cfg(feature = "rtrb")]
    #[test]
    fn drains_ring_buffer() {
        let (mut tx, mut rx) = rtrb::RingBuffer::new(8);
        tx.push(DrumMessage::Trigger { slot: 1 }).unwrap();
        tx.push(DrumMessage::Trigger { slot: 7 }).unwrap();

        let mut mixer = DrumMixer::new(kit(), 48_000.0, 1.0);
        mixer.drain(&mut rx);
        assert!(mixer.is_playing(1));
        assert!(!mixer.is_playing(0));
    }
}
