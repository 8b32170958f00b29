//! The one lock both threads share.
//!
//! Every access to the [`RingBuffer`] goes through a single [`Mutex`]. The
//! unread count is also mirrored into an atomic, written while the lock is
//! held, so each side can do its capacity check before deciding to lock at
//! all:
//!
//! - the producer reads `free` and only locks if a whole period fits
//! - the consumer reads `available` and only locks if the request is covered
//!
//! The value either side sees is a lower bound for what it cares about. While
//! the producer is between its check and its lock, the consumer can only drain
//! samples, which frees more space. While the consumer is between its check
//! and its lock, the producer can only add samples. With one producer and one
//! consumer a passed check therefore still holds once the lock is taken.

use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Mutex, MutexGuard, PoisonError,
};

use super::ring::RingBuffer;
use crate::error::Result;

/// Ring buffer behind a mutex, plus a lock-free mirror of its count.
#[derive(Debug)]
pub struct SharedRing {
    ring: Mutex<RingBuffer>,
    available: AtomicUsize,
    capacity: usize,
}

impl SharedRing {
    pub fn new(capacity: usize) -> Result<Self> {
        let ring = RingBuffer::new(capacity)?;
        Ok(Self {
            ring: Mutex::new(ring),
            available: AtomicUsize::new(0),
            capacity,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Unread samples as of the last completed read or write.
    #[inline]
    pub fn available(&self) -> usize {
        self.available.load(Ordering::Acquire)
    }

    /// `capacity - available`, same staleness as [`available`](Self::available).
    #[inline]
    pub fn free(&self) -> usize {
        self.capacity - self.available()
    }

    /// Locked [`RingBuffer::write`].
    pub fn write(&self, samples: &[f32], advance: bool) -> Result<()> {
        let mut ring = self.lock();
        let result = ring.write(samples, advance);
        self.available.store(ring.len(), Ordering::Release);
        result
    }

    /// Locked [`RingBuffer::read`].
    pub fn read(&self, dst: &mut [f32], advance: bool) -> Result<()> {
        let mut ring = self.lock();
        let result = ring.read(dst, advance);
        self.available.store(ring.len(), Ordering::Release);
        result
    }

    /// Locked [`RingBuffer::reset`].
    ///
    /// The caller must make sure neither side is mid-operation, i.e. the
    /// audio stream is paused or not yet started.
    pub fn reset(&self) {
        let mut ring = self.lock();
        ring.reset();
        self.available.store(0, Ordering::Release);
    }

    /// Run `f` against the ring while holding the lock.
    ///
    /// The count mirror is refreshed afterwards.
    pub fn with_ring<R>(&self, f: impl FnOnce(&mut RingBuffer) -> R) -> R {
        let mut ring = self.lock();
        let out = f(&mut ring);
        self.available.store(ring.len(), Ordering::Release);
        out
    }

    // A panic while holding the lock can only happen between complete
    // operations, so a poisoned ring is still consistent.
    fn lock(&self) -> MutexGuard<'_, RingBuffer> {
        self.ring.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
