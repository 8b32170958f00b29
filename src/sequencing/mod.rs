//! Note numbering and pitch mapping.

pub mod notes;

pub use notes::{note_name, note_to_freq};
