//! Oscilloscope of what the device actually played
//!
//! The trace starts at the first rising zero crossing in the older half of
//! the tap, then shows half the tap from there. A steady tone therefore sits
//! still on screen instead of scrolling by one callback per frame. Silence
//! and underrun gaps have no crossing and are drawn free-running.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};

/// Start of the displayed window, if the scope found an edge to lock onto.
pub fn trigger_offset(scope: &[f32]) -> Option<usize> {
    scope
        .windows(2)
        .take(scope.len() / 2)
        .position(|pair| pair[0] < 0.0 && pair[1] >= 0.0)
        .map(|i| i + 1)
}

/// Decimated `(index, sample)` points for a window `width` cells wide.
/// A braille cell is 2 dots across; more points than that never show.
fn points(window: &[f32], width: u16) -> Vec<(f64, f64)> {
    let step = window.len().div_ceil(width.max(1) as usize * 2).max(1);
    (0..window.len())
        .step_by(step)
        .map(|i| (i as f64, window[i] as f64))
        .collect()
}

pub fn render_waveform(frame: &mut Frame, area: Rect, scope: &[f32]) {
    let span = scope.len() / 2;
    let trigger = trigger_offset(scope);
    let start = trigger.unwrap_or(scope.len() - span);
    let window = &scope[start..start + span];

    let title = if trigger.is_some() {
        " Output  trig ↑0 "
    } else {
        " Output  free "
    };
    let data = points(window, area.width);

    let trace = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&data);

    let chart = Chart::new(vec![trace])
        .block(Block::default().title(title).borders(Borders::ALL))
        .x_axis(
            Axis::default()
                .bounds([0.0, span.max(1) as f64])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-1.0, 1.0])
                .labels(vec!["-1", "0", "1"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locks_onto_rising_edge() {
        let scope = [0.5, -0.5, -0.2, 0.3, 0.8, -0.1, 0.0, 0.4];
        assert_eq!(trigger_offset(&scope), Some(3));
    }

    #[test]
    fn falling_edges_and_silence_do_not_trigger() {
        assert_eq!(trigger_offset(&[0.9, 0.5, -0.5, -0.9]), None);
        assert_eq!(trigger_offset(&[0.0; 64]), None);
    }

    #[test]
    fn edge_in_newer_half_is_ignored() {
        // a window starting there would run off the end of the tap
        let scope = [0.1, 0.2, 0.3, 0.4, 0.5, -0.5, 0.5, 0.1];
        assert_eq!(trigger_offset(&scope), None);
    }

    #[test]
    fn points_are_decimated_to_the_cell_width() {
        let window = vec![0.25f32; 1000];
        let data = points(&window, 50);
        assert_eq!(data.len(), 100);
        assert_eq!(data[1], (10.0, 0.25));
    }
}
