pub mod clock;
pub mod color;
pub mod config;
pub mod drums; // Sample kit and audio-thread mixer
pub mod error;
pub mod io;
pub mod runtime;
pub mod sequencing; // Per-pad beats and the tick scheduler

pub use config::LoopConfig;
pub use error::{ConfigError, SampleError};

pub const MAX_BLOCK_SIZE: usize = 2048;
