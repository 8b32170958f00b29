//! Benchmarks for the bare ring buffer.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keytone::stream::RingBuffer;

use crate::PERIOD_SIZES;

pub fn bench_ring(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream/ring");

    for &frames in PERIOD_SIZES {
        // stereo interleaved, ring of 8 periods
        let samples = frames * 2;
        let mut ring = RingBuffer::new(samples * 8).unwrap();
        let block = vec![0.25f32; samples];
        let mut out = vec![0.0f32; samples];

        // Write followed by read keeps the count steady and walks the
        // cursors around the whole ring.
        group.bench_with_input(BenchmarkId::new("write_read", frames), &frames, |b, _| {
            b.iter(|| {
                ring.write(black_box(&block), true).unwrap();
                ring.read(black_box(&mut out), true).unwrap();
            })
        });
    }

    group.finish();
}
