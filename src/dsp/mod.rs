//! Sample generation primitives.
//!
//! Allocation-free and realtime-safe. The producer owns its oscillator
//! exclusively, so nothing here needs synchronization.

/// Sine oscillator driven by absolute phase time.
pub mod oscillator;

pub use oscillator::SineOscillator;
