//! Computer keyboard to note mapping
//!
//! The home row plays white keys and the row above plays the black keys
//! between them, like a piano laid over a QWERTY layout:
//!
//!   w e   t y u
//!  a s d f g h j k
//!  C D E F G A B C
//!
//! `z` and `x` move the whole layout down and up an octave.

use keytone::sequencing::notes::{note, MAX_NOTE};

/// Lowest and highest octave the layout can be shifted to.
pub const MIN_OCTAVE: u8 = 0;
pub const MAX_OCTAVE: u8 = 8;

/// Piano keys in order, with their offset in semitones from the layout's C.
pub const PIANO_KEYS: [(char, u8); 13] = [
    ('a', 0),
    ('w', 1),
    ('s', 2),
    ('e', 3),
    ('d', 4),
    ('f', 5),
    ('t', 6),
    ('g', 7),
    ('y', 8),
    ('h', 9),
    ('u', 10),
    ('j', 11),
    ('k', 12),
];

/// What a key press asks for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyAction {
    Note(u8),
    OctaveDown,
    OctaveUp,
    Reset,
    Quit,
}

/// Semitone offset for a piano key, if it is one.
pub fn offset_for(key: char) -> Option<u8> {
    let key = key.to_ascii_lowercase();
    PIANO_KEYS
        .iter()
        .find(|(k, _)| *k == key)
        .map(|&(_, offset)| offset)
}

/// Resolve a character against the layout currently based at `octave`.
pub fn action_for(key: char, octave: u8) -> Option<KeyAction> {
    match key {
        'q' | 'Q' => Some(KeyAction::Quit),
        'z' | 'Z' => Some(KeyAction::OctaveDown),
        'x' | 'X' => Some(KeyAction::OctaveUp),
        'r' | 'R' => Some(KeyAction::Reset),
        _ => offset_for(key)
            .and_then(|offset| note(octave, offset))
            .filter(|&n| n <= MAX_NOTE)
            .map(KeyAction::Note),
    }
}
