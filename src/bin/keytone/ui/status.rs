//! Status bar - note, pitch, device format, ring fill and stream counters

use keytone::sequencing::note_name;
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Gauge, Paragraph},
    Frame,
};

use super::UiState;

/// Render the status bar: one line of text plus the ring fill gauge.
pub fn render_status(frame: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default()
        .title(format!(" keytone - {} ", state.device_name))
        .borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(1), Constraint::Length(1)])
        .split(inner);

    let sample_rate_khz = state.settings.sample_rate as f32 / 1000.0;

    let line = Line::from(vec![
        Span::styled(
            format!(" {:<4}", note_name(state.note)),
            Style::default().fg(Color::Cyan),
        ),
        Span::styled(
            format!("{:>8.2} Hz  ", state.frequency),
            Style::default().fg(Color::White),
        ),
        Span::styled(
            format!("octave {}  ", state.octave),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!(
                "{:.1}kHz {}ch {}f/period  ",
                sample_rate_khz, state.settings.channels, state.settings.period_frames
            ),
            Style::default().fg(Color::DarkGray),
        ),
        Span::styled(
            format!("underruns: {}  ", state.stats.underruns),
            Style::default().fg(if state.stats.underruns > 0 {
                Color::Red
            } else {
                Color::Green
            }),
        ),
        Span::styled(
            format!("skipped: {}", state.stats.skipped_cycles),
            Style::default().fg(Color::Yellow),
        ),
    ]);
    frame.render_widget(Paragraph::new(line), rows[0]);

    let gauge = Gauge::default()
        .gauge_style(Style::default().fg(Color::Magenta))
        .ratio(state.fill_ratio())
        .label(format!(
            "{}/{} samples  {:.1} ms",
            state.buffered,
            state.capacity,
            state.latency_ms()
        ));
    frame.render_widget(gauge, rows[1]);
}
