//! Input events as delivered by the host, one at a time and in order.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::layout::{PhysicalCode, CODE_SPACE};

/// Modifier keys held during a key event
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Modifiers {
    pub shift: bool,
    pub control: bool,
    pub alt: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        shift: false,
        control: false,
        alt: false,
    };
    pub const SHIFT: Modifiers = Modifiers {
        shift: true,
        ..Modifiers::NONE
    };
    pub const CONTROL: Modifiers = Modifiers {
        control: true,
        ..Modifiers::NONE
    };
    pub const ALT: Modifiers = Modifiers {
        alt: true,
        ..Modifiers::NONE
    };

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Control or alt turn a press into a control event
    pub fn selects_voice(&self) -> bool {
        self.control || self.alt
    }
}

/// What the host's keymap says the key means, independent of where it is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum KeySymbol {
    Escape,
    /// Function key F1..F12
    Function(u8),
    /// Digit 0..9
    Digit(u8),
    /// Plus, also keypad add
    Plus,
    /// Minus, also keypad subtract
    Minus,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct KeyInput {
    pub code: PhysicalCode,
    pub symbol: KeySymbol,
    pub modifiers: Modifiers,
}

impl KeyInput {
    pub fn new(code: PhysicalCode, symbol: KeySymbol, modifiers: Modifiers) -> Self {
        Self {
            code,
            symbol,
            modifiers,
        }
    }

    /// A plain key with no particular meaning to the keymap
    pub fn plain(code: PhysicalCode) -> Self {
        Self::new(code, KeySymbol::Other, Modifiers::NONE)
    }
}

/// Snapshot of every physical key's down state, one bit per code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyVector([u8; CODE_SPACE / 8]);

impl KeyVector {
    /// All keys up
    pub fn empty() -> Self {
        Self([0; CODE_SPACE / 8])
    }

    /// Wrap a raw host key vector (bit `code % 8` of byte `code / 8`)
    pub fn from_bytes(bytes: [u8; CODE_SPACE / 8]) -> Self {
        Self(bytes)
    }

    pub fn from_codes(codes: impl IntoIterator<Item = PhysicalCode>) -> Self {
        let mut vector = Self::empty();
        for code in codes {
            vector.set(code, true);
        }
        vector
    }

    pub fn set(&mut self, code: PhysicalCode, down: bool) {
        let byte = &mut self.0[code.0 as usize / 8];
        let bit = 1 << (code.0 % 8);
        if down {
            *byte |= bit;
        } else {
            *byte &= !bit;
        }
    }

    pub fn is_down(&self, code: PhysicalCode) -> bool {
        self.0[code.0 as usize / 8] & (1 << (code.0 % 8)) != 0
    }
}

impl Default for KeyVector {
    fn default() -> Self {
        Self::empty()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputEvent {
    KeyPress(KeyInput),
    KeyRelease(KeyInput),
    /// Full snapshot, sent when discrete presses/releases may have been missed
    KeymapSync(KeyVector),
    /// The host wants the program to close
    CloseRequest,
}
