//! Producer - control-thread side of the stream
//!
//! `pump` is called once per iteration of whatever loop owns the control
//! thread (the TUI loop in the binary). It never waits: if a full period does
//! not fit, the cycle is dropped and the next iteration looks again.

use std::sync::Arc;

use tracing::{debug, trace, warn};

use super::{shared::SharedRing, stats::StreamStats, StreamSettings};
use crate::{dsp::SineOscillator, error::Result};

/// Result of one producer cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PumpOutcome {
    /// One period of this many frames was written
    Produced(usize),
    /// Not enough room; nothing generated, nothing written
    Skipped,
}

/// Generates the tone and writes it into the shared ring, one period per call.
pub struct Producer {
    ring: Arc<SharedRing>,
    stats: Arc<StreamStats>,
    oscillator: SineOscillator,
    settings: StreamSettings,
    /// Interleaved scratch for one period, allocated once
    period: Vec<f32>,
}

impl Producer {
    pub(crate) fn new(
        ring: Arc<SharedRing>,
        stats: Arc<StreamStats>,
        oscillator: SineOscillator,
        settings: StreamSettings,
    ) -> Self {
        Self {
            ring,
            stats,
            oscillator,
            settings,
            period: vec![0.0; settings.period_samples()],
        }
    }

    /// Run one producer cycle.
    ///
    /// Proceeds only when the free space is strictly greater than one period
    /// of samples. The period is rendered into scratch first so the lock is
    /// held for the copy alone.
    ///
    /// A [`CapacityExceeded`](crate::Error::CapacityExceeded) from the locked
    /// write is returned to the caller and counted as a skipped cycle. The
    /// ring is left as it was and the oscillator is rewound, so the next
    /// period continues the waveform without a jump.
    pub fn pump(&mut self) -> Result<PumpOutcome> {
        let needed = self.period.len();
        let free = self.ring.free();
        if free <= needed {
            self.stats.record_skip();
            trace!(free, needed, "producer cycle skipped");
            return Ok(PumpOutcome::Skipped);
        }

        match self.write_period() {
            Ok(frames) => {
                self.stats.add_produced(frames);
                Ok(PumpOutcome::Produced(frames))
            }
            Err(err) => {
                self.stats.record_skip();
                warn!(%err, "period rejected under lock");
                Err(err)
            }
        }
    }

    /// Render one period and write it under the lock.
    fn write_period(&mut self) -> Result<usize> {
        let start = self.oscillator.phase_time();
        self.oscillator
            .render_frames(&mut self.period, self.settings.channels);

        if let Err(err) = self.ring.write(&self.period, true) {
            self.oscillator.set_phase_time(start);
            return Err(err);
        }
        Ok(self.settings.period_frames)
    }

    /// Pump until a cycle is skipped, filling the ring as far as whole
    /// periods allow. Returns the number of frames written.
    pub fn prime(&mut self) -> Result<usize> {
        let mut frames = 0;
        while let PumpOutcome::Produced(n) = self.pump()? {
            frames += n;
        }
        debug!(frames, buffered = self.ring.available(), "ring primed");
        Ok(frames)
    }

    /// Clear the ring.
    ///
    /// The audio stream must be paused (or not yet started) while this runs.
    pub fn reset(&mut self) {
        self.ring.reset();
        debug!("ring reset");
    }

    pub fn set_note(&mut self, note: u8) {
        self.oscillator.set_note(note);
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.oscillator.set_frequency(frequency);
    }

    pub fn frequency(&self) -> f32 {
        self.oscillator.frequency()
    }

    pub fn oscillator(&self) -> &SineOscillator {
        &self.oscillator
    }

    pub fn settings(&self) -> &StreamSettings {
        &self.settings
    }

    pub fn ring(&self) -> &Arc<SharedRing> {
        &self.ring
    }

    pub fn stats(&self) -> &Arc<StreamStats> {
        &self.stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::Error, stream::ToneEngine};

    fn small_engine() -> ToneEngine {
        // 4 frames x 2 channels, ring of 4 periods = 32 samples
        let settings = StreamSettings::new(8_000, 2)
            .with_period_frames(4)
            .with_buffer_periods(4);
        ToneEngine::new(settings).unwrap()
    }

    #[test]
    fn produces_one_period_per_pump() {
        let (mut producer, _consumer) = small_engine().split();
        assert_eq!(producer.pump().unwrap(), PumpOutcome::Produced(4));
        assert_eq!(producer.ring().available(), 8);
        assert_eq!(producer.stats().snapshot().frames_produced, 4);
    }

    #[test]
    fn skips_when_free_equals_period() {
        let (mut producer, _consumer) = small_engine().split();
        // 32 slots: three periods leave 8 free, which is not > 8
        for _ in 0..3 {
            assert!(matches!(producer.pump().unwrap(), PumpOutcome::Produced(_)));
        }
        assert_eq!(producer.ring().free(), 8);
        assert_eq!(producer.pump().unwrap(), PumpOutcome::Skipped);
        assert_eq!(producer.ring().available(), 24);
        assert_eq!(producer.stats().snapshot().skipped_cycles, 1);
    }

    #[test]
    fn skip_does_not_advance_oscillator() {
        let (mut producer, _consumer) = small_engine().split();
        producer.prime().unwrap();
        let phase = producer.oscillator().phase_time();
        assert_eq!(producer.pump().unwrap(), PumpOutcome::Skipped);
        assert_eq!(producer.oscillator().phase_time(), phase);
    }

    #[test]
    fn prime_fills_whole_periods() {
        let (mut producer, _consumer) = small_engine().split();
        assert_eq!(producer.prime().unwrap(), 12);
        assert_eq!(producer.ring().available(), 24);
    }

    #[test]
    fn frames_are_duplicated_across_channels() {
        let (mut producer, _consumer) = small_engine().split();
        producer.set_frequency(1_000.0);
        producer.pump().unwrap();

        let mut reference = SineOscillator::with_frequency(8_000.0, 1_000.0);
        let mut out = [0.0f32; 8];
        producer.ring().read(&mut out, true).unwrap();
        for frame in out.chunks_exact(2) {
            let expected = reference.next_sample();
            assert_eq!(frame, &[expected, expected]);
        }
    }

    #[test]
    fn reset_empties_ring() {
        let (mut producer, _consumer) = small_engine().split();
        producer.prime().unwrap();
        producer.reset();
        assert_eq!(producer.ring().available(), 0);
        assert_eq!(producer.pump().unwrap(), PumpOutcome::Produced(4));
    }

    #[test]
    fn rejected_period_rewinds_the_oscillator() {
        let (mut producer, _consumer) = small_engine().split();
        producer.pump().unwrap();
        let before = producer.oscillator().phase_time();

        // Another writer got there between the free check and the lock
        producer.ring().write(&[0.5; 20], true).unwrap();
        assert!(matches!(
            producer.write_period(),
            Err(Error::CapacityExceeded { requested: 8, free: 4 })
        ));
        assert_eq!(producer.oscillator().phase_time(), before);
        assert_eq!(producer.ring().available(), 28);

        // After draining, the next period picks up exactly where the last
        // accepted one stopped
        let mut drained = [0.0f32; 28];
        producer.ring().read(&mut drained, true).unwrap();
        producer.pump().unwrap();
        let mut out = [0.0f32; 8];
        producer.ring().read(&mut out, true).unwrap();

        let mut reference = SineOscillator::with_frequency(8_000.0, producer.frequency());
        let mut expected = [0.0f32; 16];
        reference.render_frames(&mut expected, 2);
        assert_eq!(&out, &expected[8..]);
    }
}
