use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use klaviatur::engine::KeyVector;
use klaviatur::{InputEvent, Manual, NoteEvent, PerformanceEngine};

use super::chord_codes;
use crate::CHORD_SIZES;

pub fn bench_sync(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/sync");
    let mut sink: Vec<(Manual, NoteEvent)> = Vec::with_capacity(64);
    let empty = InputEvent::KeymapSync(KeyVector::empty());

    for &size in CHORD_SIZES {
        let held = InputEvent::KeymapSync(KeyVector::from_codes(chord_codes(size)));

        // === TOGGLE ===
        // every held key pressed then released by alternating snapshots
        let mut engine = PerformanceEngine::default();
        group.bench_with_input(BenchmarkId::new("toggle", size), &size, |b, _| {
            b.iter(|| {
                sink.clear();
                black_box(engine.process(black_box(&held), &mut sink));
                black_box(engine.process(black_box(&empty), &mut sink));
            })
        });

        // === STEADY ===
        // snapshot matching the current state, nothing sent
        let mut engine = PerformanceEngine::default();
        engine.process(&held, &mut sink);
        group.bench_with_input(BenchmarkId::new("steady", size), &size, |b, _| {
            b.iter(|| black_box(engine.process(black_box(&held), &mut sink)))
        });
    }

    group.finish();
}
