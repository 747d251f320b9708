//! Runtime for driving the sequencer frame by frame.
//!
//! The [`Looper`] owns the beats and edit session; the device around it is
//! passed in as collaborators on every frame.
//!
//! # Example
//!
//! ```ignore
//! use looptick::{clock::MonotonicClock, config::LoopConfig, runtime::Looper};
//!
//! let mut looper = Looper::new(&LoopConfig::default());
//! let clock = MonotonicClock::new();
//! loop {
//!     looper.frame(&clock, &mut pads, &mut drums, &mut display);
//! }
//! ```

mod looper;

pub use looper::{FrameReport, Looper, BEAT_LINE, ENCODER_LINE, TIME_LINE, TITLE};
