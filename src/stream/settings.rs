//! Stream geometry: how big a period is and how many of them the ring holds.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    error::{Error, Result},
    DEFAULT_BUFFER_PERIODS, DEFAULT_PERIOD_FRAMES,
};

/// Device-facing configuration for one tone stream.
///
/// # Example
/// ```
/// use keytone::StreamSettings;
///
/// let settings = StreamSettings::new(48_000, 2).with_period_frames(256);
/// assert_eq!(settings.period_samples(), 512);
/// assert_eq!(settings.ring_capacity(), 8 * 512);
/// ```
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StreamSettings {
    /// Device sample rate in Hz
    pub sample_rate: u32,
    /// Interleaved output channels; every channel gets the same value
    pub channels: usize,
    /// Frames generated per producer cycle
    pub period_frames: usize,
    /// Ring capacity in periods
    pub buffer_periods: usize,
}

impl StreamSettings {
    pub fn new(sample_rate: u32, channels: usize) -> Self {
        Self {
            sample_rate,
            channels,
            period_frames: DEFAULT_PERIOD_FRAMES,
            buffer_periods: DEFAULT_BUFFER_PERIODS,
        }
    }

    pub fn with_period_frames(mut self, frames: usize) -> Self {
        self.period_frames = frames;
        self
    }

    pub fn with_buffer_periods(mut self, periods: usize) -> Self {
        self.buffer_periods = periods;
        self
    }

    /// Samples (not frames) in one period.
    pub fn period_samples(&self) -> usize {
        self.period_frames * self.channels
    }

    pub fn ring_capacity(&self) -> usize {
        self.buffer_periods * self.period_samples()
    }

    /// Reject geometry the producer could never make progress with.
    pub fn validate(&self) -> Result<()> {
        if self.sample_rate == 0 {
            return Err(Error::InvalidSettings("sample rate must be non-zero".into()));
        }
        if self.channels == 0 {
            return Err(Error::InvalidSettings("channel count must be non-zero".into()));
        }
        if self.period_frames == 0 {
            return Err(Error::InvalidSettings("period size must be non-zero".into()));
        }
        // One slot is always held back, so a single-period ring never
        // accepts a period.
        if self.buffer_periods < 2 {
            return Err(Error::InvalidSettings(format!(
                "ring must hold at least 2 periods, got {}",
                self.buffer_periods
            )));
        }
        Ok(())
    }
}
