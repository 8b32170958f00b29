//! Benchmarks for the ring buffer and both stream halves.

mod engine;
mod ring;

pub use engine::bench_engine;
pub use ring::bench_ring;
