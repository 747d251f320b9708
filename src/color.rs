//! Pad LED colors.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// 8-bit RGB triple as sent to a pad LED.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl Rgb {
    pub const OFF: Rgb = Rgb(0, 0, 0);

    pub fn is_off(self) -> bool {
        self == Self::OFF
    }
}

/// Map a wheel position to a fully saturated color.
///
/// The wheel goes red → green → blue → red over 0..=255, in three linear
/// segments of 85 steps.
pub fn colorwheel(pos: u8) -> Rgb {
    let pos = pos as u16;
    if pos < 85 {
        Rgb((255 - pos * 3) as u8, (pos * 3) as u8, 0)
    } else if pos < 170 {
        let pos = pos - 85;
        Rgb(0, (255 - pos * 3) as u8, (pos * 3) as u8)
    } else {
        let pos = pos - 170;
        Rgb((pos * 3) as u8, 0, (255 - pos * 3) as u8)
    }
}

/// Hue for a pad, evenly spaced around the wheel across `num_pads` keys.
pub fn pad_color(pad: usize, num_pads: usize) -> Rgb {
    let step = 255 / num_pads.max(1);
    colorwheel((step * pad).min(255) as u8)
}
