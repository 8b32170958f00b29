//! Benchmarks for the tone stream.
//!
//! Run with: cargo bench
//!
//! The consumer path runs inside the device callback and has to finish well
//! inside one period. Reference deadlines at 48kHz:
//!   - 64 frames  = 1.33ms
//!   - 128 frames = 2.67ms
//!   - 256 frames = 5.33ms
//!   - 512 frames = 10.67ms
//!
//! Benchmark groups:
//!   - stream/ring       Unlocked ring buffer write and read
//!   - stream/engine     Producer pump and consumer render through the lock

use criterion::{criterion_group, criterion_main};

mod stream;

/// Common period sizes, in frames.
pub const PERIOD_SIZES: &[usize] = &[64, 128, 256, 512];

criterion_group!(benches, stream::bench_ring, stream::bench_engine);
criterion_main!(benches);
