//! TUI module for keytone
//!
//! Draws the playing note, the keyboard, and what the audio device is
//! actually receiving. Rendering happens on the control thread between
//! producer cycles, so nothing here may block for long.

mod piano;
mod spectrum;
pub mod state;
mod status;
mod waveform;

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

pub use spectrum::SpectrumAnalyzer;
pub use state::UiState;

use piano::render_piano;
use spectrum::render_spectrum;
use status::render_status;
use waveform::render_waveform;

/// Render one full frame
pub fn render(frame: &mut Frame, state: &UiState, scope: &[f32], spectrum: &SpectrumAnalyzer) {
    let area = frame.area();

    // Main layout: status, keys, scope + spectrum
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4), // Status line + fill gauge
            Constraint::Length(5), // Keyboard
            Constraint::Min(8),    // Scope and spectrum
        ])
        .split(area);

    render_status(frame, chunks[0], state);
    render_piano(frame, chunks[1], state);

    let bottom = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(chunks[2]);

    render_waveform(frame, bottom[0], scope);
    render_spectrum(frame, bottom[1], spectrum);
}
