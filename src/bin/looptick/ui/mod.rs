//! TUI module for looptick
//!
//! Plays the part of the pad's LEDs and text display, plus an oscilloscope
//! of the drum output.

mod grid;
mod status;
mod waveform;

use std::time::{Duration, Instant};

use looptick::{
    color::Rgb,
    io::DisplaySink,
    runtime::TITLE,
    sequencing::{Beat, DrumSlot},
};
use ratatui::{
    layout::{Constraint, Direction, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Frame,
};

use grid::render_grid;
use status::render_status;
use waveform::render_waveform;

/// Lines on the device display below the title
pub const TEXT_LINES: usize = 4;

/// Screen-side display sink.
///
/// The loop clears LEDs every frame, which on a terminal redrawn at 60 fps
/// would hide most flashes. Each lit LED is therefore held for `hold`
/// after it was set.
pub struct PadDisplay {
    flashes: Vec<Option<(Rgb, Instant)>>,
    lines: [String; TEXT_LINES],
    hold: Duration,
}

impl PadDisplay {
    pub fn new(num_pads: usize, hold: Duration) -> Self {
        Self {
            flashes: vec![None; num_pads],
            lines: Default::default(),
            hold,
        }
    }

    /// Color a pad shows right now
    pub fn led(&self, pad: usize) -> Rgb {
        match self.flashes.get(pad).copied().flatten() {
            Some((color, lit_at)) if lit_at.elapsed() < self.hold => color,
            _ => Rgb::OFF,
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl DisplaySink for PadDisplay {
    fn set_led(&mut self, pad: usize, color: Rgb) {
        if let Some(flash) = self.flashes.get_mut(pad) {
            *flash = Some((color, Instant::now()));
        }
    }

    fn clear_leds(&mut self) {
        let hold = self.hold;
        for flash in &mut self.flashes {
            if flash.is_some_and(|(_, lit_at)| lit_at.elapsed() >= hold) {
                *flash = None;
            }
        }
    }

    fn set_text_line(&mut self, line: usize, text: String) {
        if let Some(slot) = self.lines.get_mut(line) {
            *slot = text;
        }
    }
}

/// Everything one redraw needs
pub struct View<'a> {
    pub display: &'a PadDisplay,
    pub beats: &'a [Beat],
    pub editing: Option<usize>,
    pub split: usize,
    pub muted: [bool; 2],
    pub dropped: u64,
    pub scope: &'a [f32],
    pub sample_rate: u32,
    pub release_events: bool,
}

impl View<'_> {
    fn is_muted(&self, pad: usize) -> bool {
        self.muted[DrumSlot::for_pad(pad, self.split).index()]
    }
}

fn rgb(color: Rgb) -> Color {
    Color::Rgb(color.0, color.1, color.2)
}

/// Render the whole screen
pub fn render(frame: &mut Frame, view: &View) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TEXT_LINES as u16 + 3), // Device display
            Constraint::Min(12),                       // Pad grid
            Constraint::Length(8),                     // Waveform
            Constraint::Length(1),                     // Help bar
        ])
        .split(frame.area());

    render_status(frame, chunks[0], TITLE, view);
    render_grid(frame, chunks[1], view);
    render_waveform(frame, chunks[2], view.scope);

    let hold_hint = if view.release_events {
        "hold pad"
    } else {
        "pad toggles hold, [Space] let go"
    };
    let help = Paragraph::new(format!(
        " [1-3 q-e a-d z-c] {}  [Up/Down] encoder  [PgUp/PgDn] x10  [M/N] mute  [Bksp] reset  [Esc] quit",
        hold_hint
    ))
    .style(Style::default().fg(Color::DarkGray));
    frame.render_widget(help, chunks[3]);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flash_outlives_frame_clear_until_hold_expires() {
        let mut display = PadDisplay::new(12, Duration::from_secs(60));
        display.set_led(3, Rgb(1, 2, 3));
        display.clear_leds();
        assert_eq!(display.led(3), Rgb(1, 2, 3));

        let mut display = PadDisplay::new(12, Duration::ZERO);
        display.set_led(3, Rgb(1, 2, 3));
        display.clear_leds();
        assert_eq!(display.led(3), Rgb::OFF);
    }

    #[test]
    fn text_lines_outside_display_are_dropped() {
        let mut display = PadDisplay::new(12, Duration::ZERO);
        display.set_text_line(1, "Encoder: 4".into());
        display.set_text_line(9, "nowhere".into());
        assert_eq!(display.lines()[1], "Encoder: 4");
        assert!(display.lines().iter().all(|line| line != "nowhere"));
    }
}
