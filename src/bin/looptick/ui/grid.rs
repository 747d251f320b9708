//! Pad grid widget - LEDs, key labels and per-beat state

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::{rgb, View};
use crate::pad::PAD_KEYS;

const COLUMNS: usize = 3;

/// Render the pads as a grid of boxes, three per row like the hardware
pub fn render_grid(frame: &mut Frame, area: Rect, view: &View) {
    let num_pads = view.beats.len();
    let rows = num_pads.div_ceil(COLUMNS);
    if rows == 0 {
        return;
    }

    let row_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints(vec![Constraint::Ratio(1, rows as u32); rows])
        .split(area);

    for (row, row_area) in row_areas.iter().enumerate() {
        let cells = Layout::default()
            .direction(Direction::Horizontal)
            .constraints(vec![Constraint::Ratio(1, COLUMNS as u32); COLUMNS])
            .split(*row_area);

        for (col, cell) in cells.iter().enumerate() {
            let pad = row * COLUMNS + col;
            if pad < num_pads {
                render_pad(frame, *cell, view, pad);
            }
        }
    }
}

fn render_pad(frame: &mut Frame, area: Rect, view: &View, pad: usize) {
    let beat = &view.beats[pad];
    let led = view.display.led(pad);
    let editing = view.editing == Some(pad);

    let border_style = if editing {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else if beat.active {
        Style::default().fg(Color::White)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    let key = PAD_KEYS
        .get(pad)
        .map(|k| format!(" [{}] ", k.to_ascii_uppercase()))
        .unwrap_or_default();
    let block = Block::default()
        .title(format!(" {} {}", pad, key))
        .borders(Borders::ALL)
        .border_style(border_style);

    let body_style = if led.is_off() {
        Style::default()
    } else {
        Style::default().bg(rgb(led)).fg(Color::Black)
    };

    let state = if view.is_muted(pad) && beat.active {
        Span::styled("muted", Style::default().fg(Color::Red))
    } else if beat.active {
        Span::styled("on", Style::default().fg(Color::Green))
    } else {
        Span::styled("off", Style::default().fg(Color::DarkGray))
    };

    let lines = vec![
        Line::from(vec![Span::raw(format!("beat {:>4}  ", beat.period)), state]),
        Line::from(Span::styled(
            format!("next {}", beat.next_fire),
            Style::default().fg(Color::DarkGray),
        )),
    ];

    let paragraph = Paragraph::new(lines).block(block).style(body_style);
    frame.render_widget(paragraph, area);
}
