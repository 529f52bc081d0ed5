use std::hint::black_box;

use criterion::{BenchmarkId, Criterion};
use klaviatur::engine::{KeyInput, KeySymbol, Modifiers};
use klaviatur::{InputEvent, Manual, NoteEvent, PerformanceEngine, PhysicalCode};

use super::chord_codes;
use crate::CHORD_SIZES;

pub fn bench_events(c: &mut Criterion) {
    let mut group = c.benchmark_group("engine/events");
    let mut sink: Vec<(Manual, NoteEvent)> = Vec::with_capacity(64);

    for &size in CHORD_SIZES {
        let codes = chord_codes(size);
        let presses: Vec<InputEvent> = codes
            .iter()
            .map(|&code| InputEvent::KeyPress(KeyInput::plain(code)))
            .collect();
        let releases: Vec<InputEvent> = codes
            .iter()
            .map(|&code| InputEvent::KeyRelease(KeyInput::plain(code)))
            .collect();

        // === CHORD ===
        // press every key then release it again
        let mut engine = PerformanceEngine::default();
        group.bench_with_input(BenchmarkId::new("chord", size), &size, |b, _| {
            b.iter(|| {
                sink.clear();
                for event in presses.iter().chain(releases.iter()) {
                    black_box(engine.process(black_box(event), &mut sink));
                }
            })
        });

        // === AUTO-REPEAT ===
        // held keys reported again, all absorbed by the sounding state
        let mut engine = PerformanceEngine::default();
        for event in &presses {
            engine.process(event, &mut sink);
        }
        group.bench_with_input(BenchmarkId::new("repeat", size), &size, |b, _| {
            b.iter(|| {
                sink.clear();
                for event in &presses {
                    black_box(engine.process(black_box(event), &mut sink));
                }
            })
        });
    }

    // === CONTROL ===
    // velocity up and down, no notes sent
    let mut engine = PerformanceEngine::default();
    let f3 = InputEvent::KeyPress(KeyInput::new(
        PhysicalCode(69),
        KeySymbol::Function(3),
        Modifiers::NONE,
    ));
    let f4 = InputEvent::KeyPress(KeyInput::new(
        PhysicalCode(70),
        KeySymbol::Function(4),
        Modifiers::NONE,
    ));
    group.bench_function("control", |b| {
        b.iter(|| {
            black_box(engine.process(black_box(&f3), &mut sink));
            black_box(engine.process(black_box(&f4), &mut sink));
        })
    });

    group.finish();
}
