//! Consumer - audio-callback side of the stream
//!
//! Runs on the backend's real-time thread. It never allocates, never
//! generates, never logs, and holds the ring lock only while copying.
//!
//! Underrun policy: a request is served either completely or not at all. When
//! fewer samples are buffered than the callback asked for, nothing is taken
//! from the ring, the whole output block is filled with silence, and the
//! underrun counter goes up. Partial reads would splice a fragment of tone
//! against silence mid-block, and the samples left behind play on the next
//! callback either way.

use std::sync::Arc;

use cpal::FromSample;

use super::{shared::SharedRing, stats::StreamStats};

/// Drains the shared ring into device output buffers.
pub struct Consumer {
    ring: Arc<SharedRing>,
    stats: Arc<StreamStats>,
    channels: usize,
}

impl Consumer {
    pub(crate) fn new(ring: Arc<SharedRing>, stats: Arc<StreamStats>, channels: usize) -> Self {
        Self {
            ring,
            stats,
            channels,
        }
    }

    /// Fill one interleaved device buffer.
    ///
    /// `out` is only borrowed for this call. Returns the number of frames
    /// taken from the ring, which is zero on underrun.
    pub fn render(&self, out: &mut [f32]) -> usize {
        let requested = out.len();
        if self.ring.available() >= requested && self.ring.read(out, true).is_ok() {
            let frames = requested / self.channels;
            self.stats.add_consumed(frames);
            return frames;
        }

        out.fill(0.0);
        self.stats.record_underrun();
        0
    }

    /// Fill a device buffer of any sample format cpal can convert from f32.
    ///
    /// Samples are read into `scratch` and converted from there, so the
    /// caller preallocates it once. Buffers larger than `scratch` are served
    /// in several whole-frame blocks, each following the underrun policy on
    /// its own. Returns the total number of frames taken from the ring.
    pub fn render_as<T>(&self, out: &mut [T], scratch: &mut [f32]) -> usize
    where
        T: FromSample<f32>,
    {
        self.render_as_with(out, scratch, |_| {})
    }

    /// Like [`render_as`](Self::render_as), also handing every f32 block to
    /// `tap` after it has been converted into `out`.
    pub fn render_as_with<T, F>(&self, out: &mut [T], scratch: &mut [f32], mut tap: F) -> usize
    where
        T: FromSample<f32>,
        F: FnMut(&[f32]),
    {
        let block_len = scratch.len() - scratch.len() % self.channels;
        if block_len == 0 {
            for sample in out.iter_mut() {
                *sample = T::from_sample_(0.0);
            }
            self.stats.record_underrun();
            return 0;
        }

        let mut frames = 0;
        for chunk in out.chunks_mut(block_len) {
            let block = &mut scratch[..chunk.len()];
            frames += self.render(block);
            for (dst, &sample) in chunk.iter_mut().zip(block.iter()) {
                *dst = T::from_sample_(sample);
            }
            tap(block);
        }
        frames
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn ring(&self) -> &Arc<SharedRing> {
        &self.ring
    }

    pub fn stats(&self) -> &Arc<StreamStats> {
        &self.stats
    }
}
