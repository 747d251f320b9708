//! One-shot drum samples decoded from WAV files.

use std::path::Path;

use hound::{SampleFormat, WavReader};

use crate::error::SampleError;

/// Mono audio at its native rate, normalized to -1.0..=1.0.
#[derive(Debug, Clone)]
pub struct Sample {
    pub name: String,
    pub data: Vec<f32>,
    pub sample_rate: u32,
}

impl Sample {
    pub fn new(name: impl Into<String>, data: Vec<f32>, sample_rate: u32) -> Self {
        Self {
            name: name.into(),
            data,
            sample_rate,
        }
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Length in seconds
    pub fn duration(&self) -> f32 {
        self.data.len() as f32 / self.sample_rate.max(1) as f32
    }
}

/// Decode a WAV file, averaging all channels down to mono.
///
/// Integer files of any bit depth and 32-bit float files are accepted.
pub fn load_wav(path: &Path) -> Result<Sample, SampleError> {
    let decode_err = |source| SampleError::Decode {
        path: path.to_path_buf(),
        source,
    };

    let reader = WavReader::open(path).map_err(decode_err)?;
    let spec = reader.spec();
    let channels = spec.channels.max(1) as usize;

    let interleaved: Vec<f32> = match spec.sample_format {
        SampleFormat::Float => reader
            .into_samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(decode_err)?,
        SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample.clamp(1, 32) - 1)) as f32;
            reader
                .into_samples::<i32>()
                .map(|s| s.map(|s| s as f32 / scale))
                .collect::<Result<_, _>>()
                .map_err(decode_err)?
        }
    };

    let data: Vec<f32> = interleaved
        .chunks(channels)
        .map(|frame| frame.iter().sum::<f32>() / frame.len() as f32)
        .collect();

    if data.is_empty() {
        return Err(SampleError::Empty(path.to_path_buf()));
    }

    log::info!(
        "loaded {:?}: {} frames at {} Hz, {} channel(s)",
        path,
        data.len(),
        spec.sample_rate,
        channels
    );

    Ok(Sample {
        name: path
            .file_name()
            .unwrap_or_default()
            .to_string_lossy()
            .to_string(),
        data,
        sample_rate: spec.sample_rate,
    })
}
