//! Benchmarks for producer and consumer going through the shared lock.

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use keytone::{StreamSettings, ToneEngine};

use crate::PERIOD_SIZES;

pub fn bench_engine(c: &mut Criterion) {
    let mut group = c.benchmark_group("stream/engine");

    for &frames in PERIOD_SIZES {
        let settings = StreamSettings::new(48_000, 2).with_period_frames(frames);
        let (mut producer, consumer) = ToneEngine::new(settings).unwrap().split();
        let mut out = vec![0.0f32; frames * 2];

        // One period generated and written, one callback of the same size
        // drained. Includes sin() for every frame.
        group.bench_with_input(BenchmarkId::new("pump_render", frames), &frames, |b, _| {
            b.iter(|| {
                producer.pump().unwrap();
                consumer.render(black_box(&mut out));
            })
        });

        // Callback cost alone, with the ring kept topped up outside the
        // timed section.
        group.bench_with_input(BenchmarkId::new("render", frames), &frames, |b, _| {
            b.iter_batched(
                || {
                    producer.prime().unwrap();
                },
                |_| consumer.render(black_box(&mut out)),
                criterion::BatchSize::SmallInput,
            )
        });
    }

    group.finish();
}
