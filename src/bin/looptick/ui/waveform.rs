//! Output oscilloscope widget

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Plot the latest drum output samples
pub fn render_waveform(frame: &mut Frame, area: Rect, samples: &[f32]) {
    let block = Block::default().title(" Output ").borders(Borders::ALL);

    let len = samples.len().max(1) as f64;
    let data: Vec<(f64, f64)> = samples
        .iter()
        .enumerate()
        .map(|(i, &sample)| (i as f64 / len, sample as f64))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let axis_style = Style::default().fg(Color::DarkGray);
    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(Axis::default().bounds([0.0, 1.0]).style(axis_style))
        .y_axis(Axis::default().bounds([-1.0, 1.0]).style(axis_style));

    frame.render_widget(chart, area);
}
