//! Encoder tracking
//!
//! The encoder reports an absolute position. Only changes matter: the
//! tracker remembers the last reading and yields a value when it moves.

/// Last seen encoder position.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncoderTracker {
    last: i64,
}

impl EncoderTracker {
    pub fn new(initial: i64) -> Self {
        Self { last: initial }
    }

    pub fn last(&self) -> i64 {
        self.last
    }

    /// Record `value`, returning it if it differs from the previous reading
    pub fn update(&mut self, value: i64) -> Option<i64> {
        if value == self.last {
            return None;
        }
        self.last = value;
        Some(value)
    }
}

/// A bound beat changed because the encoder turned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BeatEdit {
    pub pad: usize,
    /// Encoder steps since the previous reading
    pub delta: i64,
    /// Period after clamping
    pub period: i64,
    pub active: bool,
}

/// Outcome of a changed encoder reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncoderChange {
    pub value: i64,
    /// Present only when a pad was held
    pub edit: Option<BeatEdit>,
}
