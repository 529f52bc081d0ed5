//! Benchmarks for engine event processing.

mod events;
mod sync;

pub use events::bench_events;
pub use sync::bench_sync;

use klaviatur::{KeyLayout, LogicalKey, PhysicalCode};

/// Physical codes of the first `count` keys, spread across both manuals
pub fn chord_codes(count: usize) -> Vec<PhysicalCode> {
    let layout = KeyLayout::default();
    LogicalKey::all()
        .step_by(2)
        .filter_map(|key| layout.physical(key))
        .take(count)
        .collect()
}
