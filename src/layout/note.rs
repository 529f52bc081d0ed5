/*
Note Cycle
==========

Each manual repeats a 14-slot pattern that follows the two physical key
rows: one slot per key column, alternating between the bottom row (white
keys) and the row above it (black keys).

  G  G#  A  A#  B  B#  C  C#  D  D#  E  E#  F  F#

A real keyboard has no black key between B and C or between E and F, but
the computer keyboard has a key in those columns anyway. Those two slots
(B# and E#) are kept as explicit duplicates: they sound the pitch of the
key they alias (C and F) and are never drawn as keys of their own.

Offsets are measured from C, so the G..B that lead into the cycle sit
below the base note:

  slot    G  G# A  A# B  B# C  C# D  D# E  E# F  F#
  offset -5 -4 -3 -2 -1  0  0  1  2  3  4  5  5  6

The pitch class (`note_value`) is the offset reduced modulo 12, which maps
the 12 distinct slots one-to-one onto semitones 0..11.
*/

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of slots in one repetition of the note cycle.
pub const CYCLE_LEN: usize = 14;

/// One slot of the note cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NoteSlot {
    G,
    GSharp,
    A,
    ASharp,
    B,
    /// Duplicate of `C`
    BSharp,
    C,
    CSharp,
    D,
    DSharp,
    E,
    /// Duplicate of `F`
    ESharp,
    F,
    FSharp,
}

/// The cycle in slot order, paired with each slot's offset from C.
const CYCLE: [(NoteSlot, i32); CYCLE_LEN] = [
    (NoteSlot::G, -5),
    (NoteSlot::GSharp, -4),
    (NoteSlot::A, -3),
    (NoteSlot::ASharp, -2),
    (NoteSlot::B, -1),
    (NoteSlot::BSharp, 0),
    (NoteSlot::C, 0),
    (NoteSlot::CSharp, 1),
    (NoteSlot::D, 2),
    (NoteSlot::DSharp, 3),
    (NoteSlot::E, 4),
    (NoteSlot::ESharp, 5),
    (NoteSlot::F, 5),
    (NoteSlot::FSharp, 6),
];

impl NoteSlot {
    /// Slot at a position in the cycle (wraps every 14 slots)
    pub fn from_cycle_index(position: usize) -> Self {
        CYCLE[position % CYCLE_LEN].0
    }

    /// Position of this slot inside the cycle
    pub fn cycle_index(self) -> usize {
        self as usize
    }

    /// Semitone offset from the C of the same cycle repetition
    pub fn offset(self) -> i32 {
        CYCLE[self.cycle_index()].1
    }

    /// Pitch class in 0..11 (C = 0)
    pub fn note_value(self) -> u8 {
        self.offset().rem_euclid(12) as u8
    }

    /// Even slots sit on the bottom row and are white keys
    pub fn is_white(self) -> bool {
        self.cycle_index() % 2 == 0
    }

    /// Slots that only exist to fill a key column
    pub fn is_duplicate(self) -> bool {
        matches!(self, NoteSlot::BSharp | NoteSlot::ESharp)
    }

    pub fn name(self) -> &'static str {
        match self {
            NoteSlot::G => "G",
            NoteSlot::GSharp => "G#",
            NoteSlot::A => "A",
            NoteSlot::ASharp => "A#",
            NoteSlot::B => "B",
            NoteSlot::BSharp => "B#",
            NoteSlot::C => "C",
            NoteSlot::CSharp => "C#",
            NoteSlot::D => "D",
            NoteSlot::DSharp => "D#",
            NoteSlot::E => "E",
            NoteSlot::ESharp => "E#",
            NoteSlot::F => "F",
            NoteSlot::FSharp => "F#",
        }
    }
}
