//! Loop configuration
//!
//! Everything has a default matching the 12-key pad: keys 0-5 play the
//! first drum, keys 6-11 the second, and a zero period loops once a second.

use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_NUM_PADS: usize = 12;
pub const DEFAULT_CYCLE_MS: i64 = 1_000;

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(from = "LoopConfigFile"))]
#[derive(Debug, Clone, PartialEq)]
pub struct LoopConfig {
    /// Number of pads, one beat each
    pub num_pads: usize,
    /// First pad routed to drum slot 1
    pub split: usize,
    /// Loop length of a beat with zero period
    pub cycle_ms: i64,
    /// Shortest gap between two fires of one beat
    pub min_interval_ms: i64,
    /// How long a fired pad stays lit on screen
    pub led_hold_ms: u64,
    pub samples: SampleConfig,
    pub audio: AudioConfig,
}

/// On-disk form of [`LoopConfig`]. A missing `split` follows `num_pads`.
#[cfg(feature = "serde")]
#[derive(Deserialize)]
#[serde(default)]
struct LoopConfigFile {
    num_pads: usize,
    split: Option<usize>,
    cycle_ms: i64,
    min_interval_ms: i64,
    led_hold_ms: u64,
    samples: SampleConfig,
    audio: AudioConfig,
}

#[cfg(feature = "serde")]
impl Default for LoopConfigFile {
    fn default() -> Self {
        let config = LoopConfig::default();
        Self {
            num_pads: config.num_pads,
            split: None,
            cycle_ms: config.cycle_ms,
            min_interval_ms: config.min_interval_ms,
            led_hold_ms: config.led_hold_ms,
            samples: config.samples,
            audio: config.audio,
        }
    }
}

#[cfg(feature = "serde")]
impl From<LoopConfigFile> for LoopConfig {
    fn from(file: LoopConfigFile) -> Self {
        Self {
            num_pads: file.num_pads,
            split: file.split.unwrap_or(file.num_pads / 2),
            cycle_ms: file.cycle_ms,
            min_interval_ms: file.min_interval_ms,
            led_hold_ms: file.led_hold_ms,
            samples: file.samples,
            audio: file.audio,
        }
    }
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct SampleConfig {
    /// Directory the sample files are resolved against
    pub dir: PathBuf,
    /// WAV file per drum slot
    pub files: [String; 2],
    /// Synthesize a stand-in when a file is missing or unreadable
    pub synth_fallback: bool,
}

#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct AudioConfig {
    /// Master gain applied to the drum mix
    pub volume: f32,
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            num_pads: DEFAULT_NUM_PADS,
            split: DEFAULT_NUM_PADS / 2,
            cycle_ms: DEFAULT_CYCLE_MS,
            min_interval_ms: 1,
            led_hold_ms: 80,
            samples: SampleConfig::default(),
            audio: AudioConfig::default(),
        }
    }
}

impl Default for SampleConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("samples"),
            files: ["00_kick02.wav".to_string(), "02_ho02.wav".to_string()],
            synth_fallback: true,
        }
    }
}

impl Default for AudioConfig {
    fn default() -> Self {
        Self { volume: 0.8 }
    }
}

impl SampleConfig {
    /// Full path of the sample for `slot`
    pub fn path(&self, slot: usize) -> PathBuf {
        self.dir.join(&self.files[slot])
    }
}

impl LoopConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the pad count; the split follows at half
    pub fn num_pads(mut self, num_pads: usize) -> Self {
        self.num_pads = num_pads;
        self.split = num_pads / 2;
        self
    }

    pub fn split(mut self, split: usize) -> Self {
        self.split = split;
        self
    }

    pub fn cycle_ms(mut self, cycle_ms: i64) -> Self {
        self.cycle_ms = cycle_ms;
        self
    }

    pub fn min_interval_ms(mut self, min_interval_ms: i64) -> Self {
        self.min_interval_ms = min_interval_ms;
        self
    }

    pub fn led_hold_ms(mut self, led_hold_ms: u64) -> Self {
        self.led_hold_ms = led_hold_ms;
        self
    }

    pub fn sample_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.samples.dir = dir.into();
        self
    }

    pub fn synth_fallback(mut self, enabled: bool) -> Self {
        self.samples.synth_fallback = enabled;
        self
    }

    pub fn volume(mut self, volume: f32) -> Self {
        self.audio.volume = volume;
        self
    }

    /// Reject values the sequencer cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_pads == 0 {
            return Err(ConfigError::Invalid("num_pads must be at least 1".into()));
        }
        if self.split > self.num_pads {
            return Err(ConfigError::Invalid(format!(
                "split {} is past the last pad ({} pads)",
                self.split, self.num_pads
            )));
        }
        if self.cycle_ms <= 0 {
            return Err(ConfigError::Invalid("cycle_ms must be positive".into()));
        }
        if self.min_interval_ms < 1 {
            return Err(ConfigError::Invalid("min_interval_ms must be at least 1".into()));
        }
        if !(0.0..=4.0).contains(&self.audio.volume) {
            return Err(ConfigError::Invalid(format!(
                "volume {} outside 0.0..=4.0",
                self.audio.volume
            )));
        }
        Ok(())
    }
}

#[cfg(feature = "serde")]
impl LoopConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: LoopConfig = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }
}
