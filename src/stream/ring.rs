/*
Ring Buffer
===========

Fixed-capacity circular sample store. Both cursors point at the slot that was
touched *last*, so every operation starts one slot ahead of its cursor:

    write: cursor += 1, wrap, store    (repeat per sample)
    read:  cursor += 1, wrap, load, zero the slot

    capacity 8, after write([a, b, c]) from a fresh buffer:

      index:  0   1   2   3   4   5   6   7
              .   a   b   c   .   .   .   .
              ^r          ^w                 count = 3

`count` is tracked as its own field. Cursor distance alone reads the same for
"empty" and "full", and the one-slot guard below is what keeps the two apart
in practice:

    write(samples) requires   free > samples.len()      (strict)
    read(dst)      requires   count >= dst.len()

so at most `capacity - 1` samples are ever stored. A producer that asks for
exactly the remaining space is turned away and tries again on its next cycle.

Consumed slots are overwritten with 0.0 so a stale read can only ever return
silence.
*/

use crate::error::{Error, Result};

/// Circular buffer of `f32` samples with an explicit unread count.
///
/// Not synchronized; see [`SharedRing`](super::SharedRing) for the locked
/// wrapper the producer and consumer share.
#[derive(Debug, Clone)]
pub struct RingBuffer {
    storage: Box<[f32]>,
    write_cursor: usize,
    read_cursor: usize,
    count: usize,
}

impl RingBuffer {
    /// Allocate `capacity` zeroed slots.
    pub fn new(capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(Error::InvalidSettings(
                "ring buffer capacity must be non-zero".into(),
            ));
        }
        Ok(Self {
            storage: vec![0.0; capacity].into_boxed_slice(),
            write_cursor: 0,
            read_cursor: 0,
            count: 0,
        })
    }

    /// Copy `samples` in after the write cursor.
    ///
    /// Rejected unless strictly more than `samples.len()` slots are free.
    /// With `advance == false` the slots are overwritten but the write cursor
    /// and count stay where they were, so the data is invisible to readers.
    pub fn write(&mut self, samples: &[f32], advance: bool) -> Result<()> {
        let free = self.free();
        if free <= samples.len() {
            return Err(Error::CapacityExceeded {
                requested: samples.len(),
                free,
            });
        }

        let capacity = self.storage.len();
        let mut cursor = self.write_cursor;
        for &sample in samples {
            cursor += 1;
            if cursor == capacity {
                cursor = 0;
            }
            self.storage[cursor] = sample;
        }

        if advance {
            self.write_cursor = cursor;
            self.count += samples.len();
        }
        Ok(())
    }

    /// Copy `dst.len()` samples out from after the read cursor, zeroing each
    /// slot as it is consumed.
    ///
    /// Rejected, leaving `dst` untouched, when fewer than `dst.len()` samples
    /// are stored.
    pub fn read(&mut self, dst: &mut [f32], advance: bool) -> Result<()> {
        if self.count < dst.len() {
            return Err(Error::Underrun {
                requested: dst.len(),
                available: self.count,
            });
        }

        let capacity = self.storage.len();
        let mut cursor = self.read_cursor;
        for out in dst.iter_mut() {
            cursor += 1;
            if cursor == capacity {
                cursor = 0;
            }
            *out = self.storage[cursor];
            self.storage[cursor] = 0.0;
        }

        if advance {
            self.read_cursor = cursor;
            self.count -= dst.len();
        }
        Ok(())
    }

    /// Zero all storage and rewind both cursors.
    pub fn reset(&mut self) {
        self.storage.fill(0.0);
        self.write_cursor = 0;
        self.read_cursor = 0;
        self.count = 0;
    }

    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Number of unread samples.
    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// `capacity - count`. A write must be strictly smaller than this.
    pub fn free(&self) -> usize {
        self.storage.len() - self.count
    }

    pub fn write_cursor(&self) -> usize {
        self.write_cursor
    }

    pub fn read_cursor(&self) -> usize {
        self.read_cursor
    }

    /// Raw view of the backing slots, in index order.
    pub fn storage(&self) -> &[f32] {
        &self.storage
    }
}
