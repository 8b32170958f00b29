//! Counters shared by the producer and the audio callback.
//!
//! Plain relaxed atomics: each counter is independent and only read for
//! display and tests.

use std::sync::atomic::{AtomicU64, Ordering};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Debug, Default)]
pub struct StreamStats {
    underruns: AtomicU64,
    skipped_cycles: AtomicU64,
    frames_produced: AtomicU64,
    frames_consumed: AtomicU64,
}

/// Point-in-time copy of [`StreamStats`].
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsSnapshot {
    /// Callbacks that found too few samples and played silence
    pub underruns: u64,
    /// Producer cycles skipped because a period did not fit
    pub skipped_cycles: u64,
    pub frames_produced: u64,
    pub frames_consumed: u64,
}

impl StreamStats {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn record_underrun(&self) {
        self.underruns.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn record_skip(&self) {
        self.skipped_cycles.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn add_produced(&self, frames: usize) {
        self.frames_produced
            .fetch_add(frames as u64, Ordering::Relaxed);
    }

    #[inline]
    pub fn add_consumed(&self, frames: usize) {
        self.frames_consumed
            .fetch_add(frames as u64, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            underruns: self.underruns.load(Ordering::Relaxed),
            skipped_cycles: self.skipped_cycles.load(Ordering::Relaxed),
            frames_produced: self.frames_produced.load(Ordering::Relaxed),
            frames_consumed: self.frames_consumed.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn snapshot_reflects_counts() {
        let stats = StreamStats::new();
        stats.record_underrun();
        stats.record_skip();
        stats.record_skip();
        stats.add_produced(512);
        stats.add_consumed(256);
        stats.add_consumed(256);

        assert_eq!(
            stats.snapshot(),
            StatsSnapshot {
                underruns: 1,
                skipped_cycles: 2,
                frames_produced: 512,
                frames_consumed: 512,
            }
        );
    }
}
