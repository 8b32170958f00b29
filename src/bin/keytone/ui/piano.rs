//! On-screen keyboard - one octave plus the top C, with the sounding key lit

use keytone::sequencing::notes::{note, note_name};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::UiState;
use crate::keymap::PIANO_KEYS;

/// Black keys within an octave, as semitone offsets
const BLACK_KEYS: [u8; 5] = [1, 3, 6, 8, 10];

pub fn render_piano(frame: &mut Frame, area: Rect, state: &UiState) {
    let block = Block::default()
        .title(format!(" Keys (octave {}) ", state.octave))
        .borders(Borders::ALL);

    let mut names = Vec::with_capacity(PIANO_KEYS.len());
    let mut keys = Vec::with_capacity(PIANO_KEYS.len());

    for &(key, offset) in PIANO_KEYS.iter() {
        let key_note = note(state.octave, offset);
        let is_black = BLACK_KEYS.contains(&(offset % 12));
        let is_lit = key_note == Some(state.note);

        let style = match (is_lit, is_black) {
            (true, _) => Style::default()
                .fg(Color::Black)
                .bg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
            (false, true) => Style::default().fg(Color::White).bg(Color::DarkGray),
            (false, false) => Style::default().fg(Color::Black).bg(Color::Gray),
        };

        let name = key_note.map_or_else(|| "-".to_string(), note_name);
        names.push(Span::styled(format!("{:^5}", name), style));
        keys.push(Span::styled(
            format!("{:^5}", key.to_ascii_uppercase()),
            style,
        ));
    }

    let help = Line::from(Span::styled(
        " [Z/X] Octave  [R] Reset buffer  [Q] Quit",
        Style::default().fg(Color::DarkGray),
    ));

    let paragraph = Paragraph::new(vec![Line::from(names), Line::from(keys), help]).block(block);
    frame.render_widget(paragraph, area);
}
