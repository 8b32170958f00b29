/*
Note Numbering
==============

Notes are plain integer indices counted in semitones from C0:

    note = 12 * octave + semitone

where semitone: C=0, C#=1, D=2, D#=3, E=4, F=5, F#=6, G=7, G#=8, A=9, A#=10, B=11

Pitch is equal-tempered and anchored so that note 9 (A0, the lowest key of a
piano) sounds at 27.5 Hz:

    frequency = 27.5 * 2^((note - 9) / 12)

which puts A4 (note 57) at the usual 440 Hz reference.

Example usage:
  note_to_freq(A0)           // 27.5
  note_to_freq(A1)           // 55.0
  note(4, 9)                 // Some(57)
  note_name(61)              // "C#5"
*/

/// Frequency of note 9 (A0).
pub const A0_FREQ: f32 = 27.5;

/// Semitone names, sharps only.
pub const NOTE_NAMES: [&str; 12] = [
    "C", "C#", "D", "D#", "E", "F", "F#", "G", "G#", "A", "A#", "B",
];

pub const C0: u8 = 0;
pub const A0: u8 = 9;
pub const C1: u8 = 12;
pub const A1: u8 = 21;
pub const C2: u8 = 24;
pub const A2: u8 = 33;
pub const C3: u8 = 36;
pub const A3: u8 = 45;
pub const C4: u8 = 48; // Middle C
pub const A4: u8 = 57; // 440 Hz reference
pub const C5: u8 = 60;
pub const A5: u8 = 69;
pub const C6: u8 = 72;
pub const A6: u8 = 81;
pub const C7: u8 = 84;
pub const A7: u8 = 93;
pub const C8: u8 = 96;
pub const A8: u8 = 105;

/// Highest note with a name in the table (B8).
pub const MAX_NOTE: u8 = 107;

/// Build a note index from an octave and a semitone offset.
///
/// The offset may run past 11 into the next octave. Returns `None` when the
/// index does not fit in a `u8` (octave 22 and up).
#[inline]
pub const fn note(octave: u8, semitone: u8) -> Option<u8> {
    match octave.checked_mul(12) {
        Some(base) => base.checked_add(semitone),
        None => None,
    }
}

/// Equal-tempered frequency in Hz for a note index.
#[inline]
pub fn note_to_freq(note: u8) -> f32 {
    A0_FREQ * 2.0_f32.powf((note as f32 - A0 as f32) / 12.0)
}

/// Octave of a note index.
#[inline]
pub const fn octave_of(note: u8) -> u8 {
    note / 12
}

/// Semitone within the octave (0 = C).
#[inline]
pub const fn semitone_of(note: u8) -> u8 {
    note % 12
}

/// Scientific pitch name, e.g. `"A4"` or `"F#2"`.
pub fn note_name(note: u8) -> String {
    format!(
        "{}{}",
        NOTE_NAMES[semitone_of(note) as usize],
        octave_of(note)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a0_is_27_5() {
        assert_eq!(note_to_freq(9), 27.5);
        assert_eq!(note_to_freq(A0), 27.5);
    }

    #[test]
    fn one_octave_up_doubles() {
        assert_eq!(note_to_freq(21), 55.0);
        assert_eq!(note_to_freq(A1), 55.0);
    }

    #[test]
    fn a4_is_440() {
        assert!((note_to_freq(A4) - 440.0).abs() < 1e-3);
    }

    #[test]
    fn strictly_increasing() {
        for n in 0..MAX_NOTE {
            assert!(note_to_freq(n + 1) > note_to_freq(n), "note {n}");
        }
    }

    #[test]
    fn octaves_are_12_apart() {
        assert_eq!(C5 - C4, 12);
        assert_eq!(A4 - A3, 12);
        assert_eq!(note(4, 0), Some(C4));
        assert_eq!(note(4, 9), Some(A4));
        assert_eq!(note(4, 12), Some(C5));
    }

    #[test]
    fn names() {
        assert_eq!(note_name(A0), "A0");
        assert_eq!(note_name(C4), "C4");
        assert_eq!(note_name(42), "F#2");
        assert_eq!(note_name(MAX_NOTE), "B8");
    }

    #[test]
    fn note_index_overflow_is_none() {
        assert_eq!(note(21, 3), Some(255));
        assert_eq!(note(21, 4), None);
        assert_eq!(note(22, 0), None);
        assert_eq!(note(u8::MAX, 0), None);
    }
}
