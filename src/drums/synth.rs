//! Synthesized stand-ins for the drum samples.
//!
//! When a sample file is missing the kit renders these once at startup, so
//! playback always works on plain sample buffers.
//!
//! Kick: sine body whose pitch drops from ~150 Hz to ~50 Hz, punchy
//! envelope with no sustain, low-passed to stay round.
//!
//! Open hat: white noise with a longer envelope that rings on a small
//! sustain, high-passed to remove the body and gently low-passed on top.

use std::f32::consts::TAU;

use super::sample::Sample;

/// Linear ADSR shape evaluated at `t` seconds for a gate held `gate` seconds.
#[derive(Debug, Clone, Copy)]
struct Adsr {
    attack: f32,
    decay: f32,
    sustain: f32,
    release: f32,
}

impl Adsr {
    fn held_level(&self, t: f32) -> f32 {
        if t < self.attack {
            t / self.attack
        } else if t < self.attack + self.decay {
            1.0 - (1.0 - self.sustain) * (t - self.attack) / self.decay
        } else {
            self.sustain
        }
    }

    fn level(&self, t: f32, gate: f32) -> f32 {
        if t < gate {
            return self.held_level(t);
        }
        // release ramps from wherever the gate left the level
        let start = self.held_level(gate);
        (start * (1.0 - (t - gate) / self.release)).max(0.0)
    }
}

/// One-pole low-pass, the building block for both filter directions.
struct OnePole {
    alpha: f32,
    state: f32,
}

impl OnePole {
    fn new(cutoff: f32, sample_rate: f32) -> Self {
        let cutoff = cutoff.min(sample_rate * 0.45);
        Self {
            alpha: 1.0 - (-TAU * cutoff / sample_rate).exp(),
            state: 0.0,
        }
    }

    fn lowpass(&mut self, x: f32) -> f32 {
        self.state += self.alpha * (x - self.state);
        self.state
    }

    fn highpass(&mut self, x: f32) -> f32 {
        x - self.lowpass(x)
    }
}

/// Deterministic white noise (xorshift32)
struct Noise(u32);

impl Noise {
    fn next(&mut self) -> f32 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.0 = x;
        (x as f32 / u32::MAX as f32) * 2.0 - 1.0
    }
}

/// Scale so the loudest point sits at `peak`
fn normalize(data: &mut [f32], peak: f32) {
    let max = data.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
    if max > 0.0 {
        let gain = peak / max;
        data.iter_mut().for_each(|x| *x *= gain);
    }
}

pub fn kick(sample_rate: u32) -> Sample {
    let sr = sample_rate as f32;
    let env = Adsr {
        attack: 0.001,
        decay: 0.15,
        sustain: 0.0,
        release: 0.05,
    };
    let gate = 0.16;
    let frames = ((gate + env.release) * sr) as usize;

    let mut filter = OnePole::new(200.0, sr);
    let mut phase = 0.0f32;
    let mut data = Vec::with_capacity(frames);

    for n in 0..frames {
        let t = n as f32 / sr;
        let freq = 50.0 + 100.0 * (-t / 0.03).exp();
        phase = (phase + TAU * freq / sr) % TAU;
        data.push(filter.lowpass(phase.sin() * env.level(t, gate)));
    }

    normalize(&mut data, 0.9);
    Sample::new("synth kick", data, sample_rate)
}

pub fn open_hat(sample_rate: u32) -> Sample {
    let sr = sample_rate as f32;
    let env = Adsr {
        attack: 0.001,
        decay: 0.15,
        sustain: 0.2,
        release: 0.25,
    };
    let gate = 0.12;
    let frames = ((gate + env.release) * sr) as usize;

    let mut noise = Noise(0x9E37_79B9);
    let mut highpass = OnePole::new(7_000.0, sr);
    let mut lowpass = OnePole::new(12_000.0, sr);
    let mut data = Vec::with_capacity(frames);

    for n in 0..frames {
        let t = n as f32 / sr;
        let x = noise.next() * env.level(t, gate);
        data.push(lowpass.lowpass(highpass.highpass(x)));
    }

    normalize(&mut data, 0.6);
    Sample::new("synth open hat", data, sample_rate)
}

/// Stand-in voice for a drum slot: slot 0 kick, anything else open hat
pub fn for_slot(slot: usize, sample_rate: u32) -> Sample {
    match slot {
        0 => kick(sample_rate),
        _ => open_hat(sample_rate),
    }
}
