//! Audio output - the drum mixer on a cpal stream

use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use rtrb::{Consumer, Producer, RingBuffer};

use looptick::{
    config::LoopConfig,
    drums::{DrumKit, DrumMessage, DrumMixer, DRUM_SLOTS},
    MAX_BLOCK_SIZE,
};

/// Pending drum triggers the control loop may queue
const TRIGGER_CAPACITY: usize = 64;
/// Samples kept for the oscilloscope
const SCOPE_BUFFER_SIZE: usize = 1024;

/// Running output stream; audio stops when this is dropped
pub struct AudioOutput {
    _stream: cpal::Stream,
    pub sample_rate: u32,
}

/// Open the default output device and start mixing the kit.
///
/// Returns the stream handle, the trigger sender for the kit player and the
/// receiving end of the oscilloscope feed.
pub fn start(config: &LoopConfig) -> EyreResult<(AudioOutput, Producer<DrumMessage>, Scope)> {
    let host = cpal::default_host();
    let device = host
        .default_output_device()
        .ok_or_else(|| eyre!("no default output device available"))?;
    let stream_config = device
        .default_output_config()
        .wrap_err("failed to fetch default output config")?;

    let sample_rate = stream_config.sample_rate().0;
    let channels = stream_config.channels() as usize;

    let kit = DrumKit::load(&config.samples, sample_rate).wrap_err("failed to load drum samples")?;
    for slot in 0..DRUM_SLOTS {
        if let Some(sample) = kit.sample(slot) {
            log::info!("slot {}: {} ({:.2}s)", slot, sample.name, sample.duration());
        }
    }

    let (trigger_tx, mut trigger_rx) = RingBuffer::<DrumMessage>::new(TRIGGER_CAPACITY);
    let (mut scope_tx, scope_rx) = RingBuffer::<f32>::new(SCOPE_BUFFER_SIZE * 4);

    let mut mixer = DrumMixer::new(kit, sample_rate as f32, config.audio.volume);
    let mut render_buf = vec![0.0f32; MAX_BLOCK_SIZE];

    let stream = device
        .build_output_stream(
            &stream_config.into(),
            move |data: &mut [f32], _| {
                mixer.drain(&mut trigger_rx);

                let total_frames = data.len() / channels;
                let mut frames_written = 0;

                while frames_written < total_frames {
                    let frames_to_render = (total_frames - frames_written).min(MAX_BLOCK_SIZE);
                    let block = &mut render_buf[..frames_to_render];
                    mixer.render(block);

                    // Copy to output (mono to all channels)
                    let out_off = frames_written * channels;
                    for (i, &s) in block.iter().enumerate() {
                        for ch in 0..channels {
                            data[out_off + i * channels + ch] = s;
                        }
                        // the scope can miss samples, the device can't
                        let _ = scope_tx.push(s);
                    }

                    frames_written += frames_to_render;
                }
            },
            |err| log::error!("audio stream error: {}", err),
            None,
        )
        .wrap_err("failed to build output stream")?;

    stream.play().wrap_err("failed to start output stream")?;
    log::info!("audio running at {} Hz, {} channel(s)", sample_rate, channels);

    Ok((
        AudioOutput {
            _stream: stream,
            sample_rate,
        },
        trigger_tx,
        Scope::new(scope_rx),
    ))
}

/// Rolling window of the most recent output samples
pub struct Scope {
    rx: Consumer<f32>,
    buffer: Vec<f32>,
}

impl Scope {
    fn new(rx: Consumer<f32>) -> Self {
        Self {
            rx,
            buffer: vec![0.0; SCOPE_BUFFER_SIZE],
        }
    }

    /// Pull everything the audio thread produced, keeping the newest window
    pub fn poll(&mut self) {
        let mut received = false;
        while let Ok(sample) = self.rx.pop() {
            self.buffer.push(sample);
            received = true;
        }

        if received && self.buffer.len() > SCOPE_BUFFER_SIZE {
            let excess = self.buffer.len() - SCOPE_BUFFER_SIZE;
            self.buffer.drain(0..excess);
        }
    }

    pub fn samples(&self) -> &[f32] {
        &self.buffer
    }
}
