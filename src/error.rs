use std::path::PathBuf;

use thiserror::Error;

/// Failures loading a drum sample.
#[derive(Error, Debug)]
pub enum SampleError {
    #[error("failed to read sample {path:?}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },
    #[error("sample {0:?} contains no audio")]
    Empty(PathBuf),
}

/// Failures reading or validating a [`LoopConfig`](crate::config::LoopConfig).
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[cfg(feature = "serde")]
    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid config: {0}")]
    Invalid(String),
}
