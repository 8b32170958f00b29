//! Spectrum analyzer widget
//!
//! FFT of the scope buffer on log-spaced display bins, plus the strongest
//! bin over the whole half-spectrum as a rough pitch readout.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    symbols,
    widgets::{Axis, Block, Borders, Chart, Dataset, GraphType},
    Frame,
};
use rustfft::{num_complex::Complex, Fft, FftPlanner};
use std::sync::Arc;

/// Number of frequency bins to display
const SPECTRUM_BINS: usize = 64;
/// Lowest displayed frequency; A0 sits just above it
const MIN_FREQ: f32 = 20.0;

pub struct SpectrumAnalyzer {
    /// Hann window coefficients
    window: Vec<f32>,
    /// Frequency values for each display bin (Hz)
    freq_bins: Vec<f64>,
    /// FFT bin indices corresponding to each display bin
    bin_indices: Vec<usize>,
    fft: Arc<dyn Fft<f32>>,
    scratch: Vec<Complex<f32>>,
    /// (frequency_hz, magnitude_db)
    spectrum: Vec<(f64, f64)>,
    /// Hz per FFT bin
    resolution: f64,
    /// Centre of the loudest FFT bin, if anything is above the floor
    peak_hz: Option<f64>,
}

impl SpectrumAnalyzer {
    /// `buffer_len` is the FFT size and must match the buffers passed to
    /// [`update`](Self::update).
    pub fn new(buffer_len: usize, sample_rate: f32) -> Self {
        let mut planner = FftPlanner::new();
        let fft = planner.plan_fft_forward(buffer_len);

        // Hann window - reduces spectral leakage
        let window: Vec<f32> = (0..buffer_len)
            .map(|i| {
                if buffer_len > 1 {
                    let denom = (buffer_len - 1) as f32;
                    0.5 * (1.0 - (std::f32::consts::TAU * i as f32 / denom).cos())
                } else {
                    1.0
                }
            })
            .collect();

        let max_freq = (sample_rate / 2.0).min(20_000.0).max(1.0);
        let min_freq = MIN_FREQ.min(max_freq);
        let ratio = (max_freq / min_freq) as f64;
        let half = (buffer_len / 2).max(1);

        let mut freq_bins = Vec::with_capacity(SPECTRUM_BINS);
        let mut bin_indices = Vec::with_capacity(SPECTRUM_BINS);
        for i in 0..SPECTRUM_BINS {
            let t = i as f64 / (SPECTRUM_BINS - 1) as f64;
            let freq = min_freq as f64 * ratio.powf(t);
            let index = ((freq * buffer_len as f64 / sample_rate as f64).round() as usize)
                .min(half - 1);
            freq_bins.push(freq);
            bin_indices.push(index);
        }

        let spectrum = freq_bins.iter().map(|&f| (f, -120.0)).collect();

        Self {
            window,
            freq_bins,
            bin_indices,
            fft,
            scratch: vec![Complex::new(0.0, 0.0); buffer_len],
            spectrum,
            resolution: sample_rate as f64 / buffer_len.max(1) as f64,
            peak_hz: None,
        }
    }

    /// Recompute from a buffer of exactly the FFT size; other lengths are
    /// ignored.
    pub fn update(&mut self, buffer: &[f32]) {
        if buffer.len() != self.window.len() {
            return;
        }

        for ((slot, &sample), &w) in self.scratch.iter_mut().zip(buffer).zip(&self.window) {
            *slot = Complex::new(sample * w, 0.0);
        }
        self.fft.process(&mut self.scratch);

        let half = (self.scratch.len() / 2).max(1);
        let power = |bin: Complex<f32>| (bin.re * bin.re + bin.im * bin.im).max(1e-12);

        for ((freq, magnitude_db), (&hz, &idx)) in self
            .spectrum
            .iter_mut()
            .zip(self.freq_bins.iter().zip(&self.bin_indices))
        {
            *freq = hz;
            *magnitude_db = 10.0 * (power(self.scratch[idx]) as f64).log10();
        }

        // skip DC
        self.peak_hz = self.scratch[1..half]
            .iter()
            .enumerate()
            .map(|(i, &bin)| (i + 1, power(bin)))
            .filter(|&(_, p)| p > 1e-6)
            .max_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, _)| i as f64 * self.resolution);
    }

    pub fn data(&self) -> &[(f64, f64)] {
        &self.spectrum
    }

    pub fn peak_hz(&self) -> Option<f64> {
        self.peak_hz
    }

    /// Width of one FFT bin in Hz
    pub fn resolution(&self) -> f64 {
        self.resolution
    }
}

/// Render the spectrum analyzer widget
pub fn render_spectrum(frame: &mut Frame, area: Rect, analyzer: &SpectrumAnalyzer) {
    let title = match analyzer.peak_hz() {
        Some(hz) => format!(" Spectrum  peak ≈ {:.0} Hz (±{:.0}) ", hz, analyzer.resolution() / 2.0),
        None => " Spectrum  silent ".to_string(),
    };
    let block = Block::default().title(title).borders(Borders::ALL);

    // Plot against log10(frequency) so the bins spread evenly
    let points: Vec<(f64, f64)> = analyzer
        .data()
        .iter()
        .map(|&(hz, db)| (hz.log10(), db))
        .collect();

    let dataset = Dataset::default()
        .marker(symbols::Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Green))
        .data(&points);

    let min_x = points.first().map(|p| p.0).unwrap_or(0.0);
    let max_x = points.last().map(|p| p.0).unwrap_or(1.0).max(min_x + 1e-3);
    let max_db = points.iter().map(|&(_, db)| db).fold(-100.0, f64::max);

    let chart = Chart::new(vec![dataset])
        .block(block)
        .x_axis(
            Axis::default()
                .bounds([min_x, max_x])
                .labels(vec!["20", "200", "2k", "20k"])
                .style(Style::default().fg(Color::DarkGray)),
        )
        .y_axis(
            Axis::default()
                .bounds([-100.0, max_db.max(0.0) + 10.0])
                .labels(vec!["-100", "-60", "-20", "0"])
                .style(Style::default().fg(Color::DarkGray)),
        );

    frame.render_widget(chart, area);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_the_tone() {
        let sample_rate = 48_000.0;
        let len = 2048;
        let mut analyzer = SpectrumAnalyzer::new(len, sample_rate);
        let freq = 440.0f32;
        let buffer: Vec<f32> = (0..len)
            .map(|k| (std::f32::consts::TAU * freq * k as f32 / sample_rate).sin())
            .collect();

        analyzer.update(&buffer);
        let peak = analyzer.peak_hz().unwrap();
        assert!((peak - 440.0).abs() <= analyzer.resolution(), "peak at {peak}");
    }

    #[test]
    fn silence_has_no_peak() {
        let mut analyzer = SpectrumAnalyzer::new(1024, 48_000.0);
        analyzer.update(&[0.0; 1024]);
        assert_eq!(analyzer.peak_hz(), None);
    }

    #[test]
    fn wrong_length_is_ignored() {
        let mut analyzer = SpectrumAnalyzer::new(1024, 48_000.0);
        analyzer.update(&[0.5; 10]);
        assert!(analyzer.data().iter().all(|&(_, db)| db == -120.0));
    }
}
