// Purpose: where note events go once the engine has decided to send them

#[cfg(feature = "midi-io")]
pub mod midi;

#[cfg(feature = "midi-io")]
pub use midi::MidiOutputs;

#[cfg(feature = "rtrb")]
use rtrb::Producer;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tracing::info;
#[cfg(feature = "rtrb")]
use tracing::warn;

use crate::layout::Manual;

const NOTE_ON_STATUS: u8 = 0x90;
const NOTE_OFF_STATUS: u8 = 0x80;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NoteEvent {
    NoteOn { channel: u8, note: u8, velocity: u8 },
    NoteOff { channel: u8, note: u8, velocity: u8 },
}

impl NoteEvent {
    pub fn new(on: bool, channel: u8, note: u8, velocity: u8) -> Self {
        if on {
            NoteEvent::NoteOn {
                channel,
                note,
                velocity,
            }
        } else {
            NoteEvent::NoteOff {
                channel,
                note,
                velocity,
            }
        }
    }

    pub fn is_on(&self) -> bool {
        matches!(self, NoteEvent::NoteOn { .. })
    }

    pub fn channel(&self) -> u8 {
        match *self {
            NoteEvent::NoteOn { channel, .. } | NoteEvent::NoteOff { channel, .. } => channel,
        }
    }

    pub fn note(&self) -> u8 {
        match *self {
            NoteEvent::NoteOn { note, .. } | NoteEvent::NoteOff { note, .. } => note,
        }
    }

    pub fn velocity(&self) -> u8 {
        match *self {
            NoteEvent::NoteOn { velocity, .. } | NoteEvent::NoteOff { velocity, .. } => velocity,
        }
    }

    /// Raw MIDI 1.0 channel voice message
    pub fn to_bytes(&self) -> [u8; 3] {
        let status = if self.is_on() {
            NOTE_ON_STATUS
        } else {
            NOTE_OFF_STATUS
        };
        [
            status | (self.channel() & 0x0F),
            self.note() & 0x7F,
            self.velocity() & 0x7F,
        ]
    }
}

/// Destination for note events, one logical port per manual.
///
/// Sending is fire-and-forget: implementations deal with their own
/// failures and never report back to the engine.
pub trait NoteSink {
    fn emit(&mut self, manual: Manual, event: NoteEvent);
}

impl<S: NoteSink + ?Sized> NoteSink for &mut S {
    fn emit(&mut self, manual: Manual, event: NoteEvent) {
        (**self).emit(manual, event)
    }
}

/// Records every event, mostly useful in tests
impl NoteSink for Vec<(Manual, NoteEvent)> {
    fn emit(&mut self, manual: Manual, event: NoteEvent) {
        self.push((manual, event));
    }
}

#[cfg(feature = "rtrb")]
impl NoteSink for Producer<(Manual, NoteEvent)> {
    fn emit(&mut self, manual: Manual, event: NoteEvent) {
        if self.push((manual, event)).is_err() {
            warn!(manual = manual.name(), ?event, "note queue full, event dropped");
        }
    }
}

/// Logs events instead of sending them anywhere
#[derive(Debug, Default, Clone, Copy)]
pub struct TraceSink;

impl NoteSink for TraceSink {
    fn emit(&mut self, manual: Manual, event: NoteEvent) {
        info!(
            manual = manual.name(),
            on = event.is_on(),
            channel = event.channel(),
            note = event.note(),
            velocity = event.velocity(),
            "note"
        );
    }
}
