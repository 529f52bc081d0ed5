//! Benchmarks for the performance engine.
//!
//! Run with: cargo bench
//!
//! Every key event is handled on the input thread before the next one is
//! read, so the per-event cost bounds how quickly a chord reaches the
//! synthesizer.
//!
//! Benchmark groups:
//!   - engine/events  Press/release streams across both manuals
//!   - engine/sync    Full keymap snapshots of varying density

use criterion::{criterion_group, criterion_main};

mod engine;

/// Keys held down at once in the chord benchmarks.
pub const CHORD_SIZES: &[usize] = &[1, 4, 10, 24];

criterion_group!(benches, engine::bench_events, engine::bench_sync);
criterion_main!(benches);
