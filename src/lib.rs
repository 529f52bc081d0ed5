pub mod engine; // Event processing: notes, controls, keymap sync
pub mod error;
pub mod keyboard;
pub mod layout; // Physical codes, logical keys and the note cycle
pub mod output; // Note sinks and the MIDI transport
pub mod performance;
pub mod translate;

pub use engine::{EngineConfig, InputEvent, Outcome, PerformanceEngine, Snapshot};
pub use error::{Error, Result};
pub use keyboard::KeyboardState;
pub use layout::{HostKeyTable, KeyLayout, LogicalKey, Manual, NoteSlot, PhysicalCode};
pub use output::{NoteEvent, NoteSink};
pub use performance::{Direction, PerformanceState};
