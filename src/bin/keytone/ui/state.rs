//! Snapshot of everything the UI draws, built fresh each frame on the
//! control thread.

use keytone::{StatsSnapshot, StreamSettings};

pub struct UiState<'a> {
    /// Output device name
    pub device_name: &'a str,
    pub settings: &'a StreamSettings,
    /// Note index currently sounding
    pub note: u8,
    /// Oscillator frequency in Hz
    pub frequency: f32,
    /// Octave the piano layout is based at
    pub octave: u8,
    /// Samples waiting in the ring
    pub buffered: usize,
    /// Ring capacity in samples
    pub capacity: usize,
    pub stats: StatsSnapshot,
}

impl UiState<'_> {
    /// Ring fill level in 0.0..=1.0
    pub fn fill_ratio(&self) -> f64 {
        if self.capacity == 0 {
            return 0.0;
        }
        (self.buffered as f64 / self.capacity as f64).clamp(0.0, 1.0)
    }

    /// Buffered audio in milliseconds
    pub fn latency_ms(&self) -> f64 {
        let frames = self.buffered / self.settings.channels.max(1);
        frames as f64 * 1000.0 / self.settings.sample_rate.max(1) as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_and_latency() {
        let settings = StreamSettings::new(48_000, 2);
        let state = UiState {
            device_name: "test",
            settings: &settings,
            note: 57,
            frequency: 440.0,
            octave: 4,
            buffered: 4_800,
            capacity: 9_600,
            stats: StatsSnapshot::default(),
        };
        assert_eq!(state.fill_ratio(), 0.5);
        assert_eq!(state.latency_ms(), 50.0);
    }
}
