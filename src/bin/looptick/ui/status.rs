//! Device display widget - the pad's text lines plus kit state

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::View;

/// Audio statistics for display
struct AudioStats {
    peak: f32,
    rms: f32,
}

impl AudioStats {
    fn from_buffer(buffer: &[f32]) -> Self {
        if buffer.is_empty() {
            return Self { peak: 0.0, rms: 0.0 };
        }
        let peak = buffer.iter().fold(0.0f32, |acc, &x| acc.max(x.abs()));
        let rms = (buffer.iter().map(|&x| x * x).sum::<f32>() / buffer.len() as f32).sqrt();
        Self { peak, rms }
    }
}

/// Render the title, the text lines and a kit summary line
pub fn render_status(frame: &mut Frame, area: Rect, title: &str, view: &View) {
    let block = Block::default()
        .title(format!(" {} ", title))
        .borders(Borders::ALL);

    let mut lines: Vec<Line> = view
        .display
        .lines()
        .iter()
        .map(|text| Line::from(Span::styled(text.clone(), Style::default().fg(Color::Cyan))))
        .collect();

    let stats = AudioStats::from_buffer(view.scope);
    let mute_label = |muted: bool| if muted { "muted" } else { "live" };
    let mut kit = vec![
        Span::styled(
            format!("kick {}  hat {}  ", mute_label(view.muted[0]), mute_label(view.muted[1])),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("{:.1}kHz  ", view.sample_rate as f32 / 1000.0),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("Peak: {:.2}  RMS: {:.2}", stats.peak, stats.rms),
            Style::default().fg(Color::Magenta),
        ),
    ];
    if view.dropped > 0 {
        kit.push(Span::styled(
            format!("  dropped {}", view.dropped),
            Style::default().fg(Color::Red),
        ));
    }
    lines.push(Line::from(kit));

    let paragraph = Paragraph::new(lines).block(block);
    frame.render_widget(paragraph, area);
}
