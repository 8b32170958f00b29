pub mod dsp; // Sample generation
pub mod error;
pub mod sequencing; // Note numbering and pitch
pub mod stream; // Ring buffer shared between the control and audio threads

pub use error::{Error, Result};
pub use stream::{Consumer, Producer, PumpOutcome, StatsSnapshot, StreamSettings, ToneEngine};

/// Number of device periods the ring buffer holds.
pub const DEFAULT_BUFFER_PERIODS: usize = 8;
/// Period size used when the device does not report one.
pub const DEFAULT_PERIOD_FRAMES: usize = 512;
