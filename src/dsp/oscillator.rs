/*
Sine Oscillator
===============

The tone is a single sine wave evaluated against absolute time rather than an
accumulated phase:

    sample(t) = sin(2π · f · t)

`t` (phase_time) starts at zero and advances by one sample period after every
generated sample, so the k-th sample of a constant-frequency run is

    sin(2π · f · k / sample_rate)

Changing the frequency does not touch `t`. The waveform therefore jumps to
wherever the new frequency would have been at that instant, which produces an
audible click on note changes. Nothing smooths this over.

Example usage:
  let mut osc = SineOscillator::new(48_000.0);
  osc.set_note(A4);                 // 440 Hz
  let s = osc.next_sample();        // one value per frame
*/

use std::f64::consts::TAU;

use crate::sequencing::notes::note_to_freq;

/// Stateful sine generator, advanced once per output frame.
#[derive(Debug, Clone)]
pub struct SineOscillator {
    /// Current pitch in Hz
    frequency: f64,
    /// Seconds of audio generated so far
    phase_time: f64,
    /// 1 / sample_rate
    sample_period: f64,
}

impl SineOscillator {
    /// Create an oscillator at A4 (440 Hz) with phase at zero.
    pub fn new(sample_rate: f32) -> Self {
        Self::with_frequency(sample_rate, 440.0)
    }

    pub fn with_frequency(sample_rate: f32, frequency: f32) -> Self {
        Self {
            frequency: frequency as f64,
            phase_time: 0.0,
            sample_period: 1.0 / sample_rate as f64,
        }
    }

    /// Produce the sample at the current time, then step time forward.
    #[inline]
    pub fn next_sample(&mut self) -> f32 {
        let sample = (TAU * self.frequency * self.phase_time).sin();
        self.phase_time += self.sample_period;
        sample as f32
    }

    /// Fill `out` with consecutive samples.
    pub fn render(&mut self, out: &mut [f32]) {
        for sample in out.iter_mut() {
            *sample = self.next_sample();
        }
    }

    /// Fill interleaved frames, duplicating each generated value across all
    /// `channels` of its frame. A trailing partial frame is left untouched.
    pub fn render_frames(&mut self, out: &mut [f32], channels: usize) {
        if channels == 0 {
            return;
        }
        for frame in out.chunks_exact_mut(channels) {
            frame.fill(self.next_sample());
        }
    }

    pub fn set_frequency(&mut self, frequency: f32) {
        self.frequency = frequency as f64;
    }

    /// Retune to a note index (see [`note_to_freq`]).
    pub fn set_note(&mut self, note: u8) {
        self.set_frequency(note_to_freq(note));
    }

    pub fn frequency(&self) -> f32 {
        self.frequency as f32
    }

    pub fn phase_time(&self) -> f64 {
        self.phase_time
    }

    /// Move the oscillator to an earlier (or later) point in time, e.g. to
    /// take back samples that were rendered but never played.
    pub fn set_phase_time(&mut self, phase_time: f64) {
        self.phase_time = phase_time;
    }

    pub fn sample_rate(&self) -> f32 {
        (1.0 / self.sample_period) as f32
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencing::notes::A4;

    #[test]
    fn first_sample_is_zero() {
        let mut osc = SineOscillator::new(48_000.0);
        assert_eq!(osc.next_sample(), 0.0);
    }

    #[test]
    fn kth_sample_matches_closed_form() {
        let sample_rate = 48_000.0f32;
        let freq = 440.0f32;
        let mut osc = SineOscillator::with_frequency(sample_rate, freq);

        for k in 0..1_000 {
            let expected = (TAU * freq as f64 * k as f64 / sample_rate as f64).sin() as f32;
            let actual = osc.next_sample();
            assert!(
                (actual - expected).abs() < 1e-5,
                "sample {k}: expected {expected}, got {actual}"
            );
        }
    }

    #[test]
    fn phase_time_advances_one_period_per_sample() {
        let mut osc = SineOscillator::new(44_100.0);
        let mut buf = [0.0f32; 441];
        osc.render(&mut buf);
        assert!((osc.phase_time() - 0.01).abs() < 1e-9);
    }

    #[test]
    fn frequency_change_keeps_time() {
        let mut osc = SineOscillator::new(48_000.0);
        let mut buf = [0.0f32; 100];
        osc.render(&mut buf);
        let before = osc.phase_time();

        osc.set_frequency(880.0);
        assert_eq!(osc.phase_time(), before);
        assert_eq!(osc.frequency(), 880.0);
    }

    #[test]
    fn set_note_uses_note_table() {
        let mut osc = SineOscillator::new(48_000.0);
        osc.set_note(9);
        assert_eq!(osc.frequency(), 27.5);
        osc.set_note(A4);
        assert!((osc.frequency() - 440.0).abs() < 1e-3);
    }

    #[test]
    fn frames_duplicate_one_value_per_channel() {
        let mut osc = SineOscillator::with_frequency(8_000.0, 1_000.0);
        let mut reference = osc.clone();
        let mut frames = [0.0f32; 12];
        osc.render_frames(&mut frames, 2);

        for frame in frames.chunks_exact(2) {
            let expected = reference.next_sample();
            assert_eq!(frame[0], expected);
            assert_eq!(frame[1], expected);
        }
        // one oscillator step per frame, not per sample
        assert_eq!(osc.phase_time(), reference.phase_time());
    }
}
