//! Tone streaming between the control thread and the audio callback.
//!
//! A [`ToneEngine`] is built once by whoever owns startup and then split into
//! its two halves:
//!
//! - [`Producer`] stays on the control thread and is pumped once per loop
//!   iteration.
//! - [`Consumer`] moves into the audio backend's output callback.
//!
//! Both halves hold an `Arc` to the same [`SharedRing`] and [`StreamStats`];
//! there is no global state. Shutdown order matters: stop the backend (drop
//! the stream that owns the consumer) before the producer side goes away.
//!
//! # Example
//!
//! ```
//! use keytone::{sequencing::notes::A4, PumpOutcome, StreamSettings, ToneEngine};
//!
//! let settings = StreamSettings::new(48_000, 2).with_period_frames(128);
//! let (mut producer, consumer) = ToneEngine::new(settings)?.with_note(A4).split();
//!
//! assert_eq!(producer.pump()?, PumpOutcome::Produced(128));
//!
//! let mut device_buffer = [0.0f32; 64 * 2];
//! assert_eq!(consumer.render(&mut device_buffer), 64);
//! # Ok::<(), keytone::Error>(())
//! ```

mod consumer;
mod producer;
pub mod ring;
mod settings;
mod shared;
mod stats;

use std::sync::Arc;

use tracing::debug;

pub use consumer::Consumer;
pub use producer::{Producer, PumpOutcome};
pub use ring::RingBuffer;
pub use settings::StreamSettings;
pub use shared::SharedRing;
pub use stats::{StatsSnapshot, StreamStats};

use crate::{dsp::SineOscillator, error::Result, sequencing::notes::{note_to_freq, A4}};

/// Everything one tone stream needs, before it is split across threads.
pub struct ToneEngine {
    settings: StreamSettings,
    ring: Arc<SharedRing>,
    stats: Arc<StreamStats>,
    oscillator: SineOscillator,
}

impl ToneEngine {
    /// Validate `settings` and allocate the ring. The tone starts at A4.
    pub fn new(settings: StreamSettings) -> Result<Self> {
        settings.validate()?;
        let ring = SharedRing::new(settings.ring_capacity())?;
        let oscillator =
            SineOscillator::with_frequency(settings.sample_rate as f32, note_to_freq(A4));

        debug!(
            sample_rate = settings.sample_rate,
            channels = settings.channels,
            period_frames = settings.period_frames,
            capacity = ring.capacity(),
            "tone engine created"
        );

        Ok(Self {
            settings,
            ring: Arc::new(ring),
            stats: Arc::new(StreamStats::new()),
            oscillator,
        })
    }

    /// Start on a different note.
    pub fn with_note(mut self, note: u8) -> Self {
        self.oscillator.set_note(note);
        self
    }

    pub fn settings(&self) -> &StreamSettings {
        &self.settings
    }

    pub fn stats(&self) -> &Arc<StreamStats> {
        &self.stats
    }

    /// Hand out the control-thread and audio-thread halves.
    pub fn split(self) -> (Producer, Consumer) {
        let consumer = Consumer::new(
            Arc::clone(&self.ring),
            Arc::clone(&self.stats),
            self.settings.channels,
        );
        let producer = Producer::new(self.ring, self.stats, self.oscillator, self.settings);
        (producer, consumer)
    }
}
