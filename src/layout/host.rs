//! Host key tables - which physical key code sits at each logical position.
//!
//! The codes are host specific. The table shipped here uses X11/evdev
//! keycodes, commented with their XKB key names, and labels as printed on
//! a US keyboard.

use super::{LogicalKey, PhysicalCode, GAP, NUM_KEYS, UPPER_START};

/// A single host assignment of a physical code to a logical key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HostKey {
    pub code: PhysicalCode,
    pub key: LogicalKey,
    /// Printable label for rendering
    pub label: char,
}

/// Ordered list of host key assignments
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostKeyTable {
    entries: Vec<HostKey>,
}

/// Lower manual, left to right: bottom row keys alternate with home row keys
const EVDEV_LOWER: [(u8, char); GAP as usize] = [
    (94, '<'), // LSGT
    (38, 'a'), // AC01
    (52, 'z'), // AB01
    (39, 's'), // AC02
    (53, 'x'), // AB02
    (40, 'd'), // AC03
    (54, 'c'), // AB03
    (41, 'f'), // AC04
    (55, 'v'), // AB04
    (42, 'g'), // AC05
    (56, 'b'), // AB05
    (43, 'h'), // AC06
    (57, 'n'), // AB06
    (44, 'j'), // AC07
    (58, 'm'), // AB07
    (45, 'k'), // AC08
    (59, ','), // AB08
    (46, 'l'), // AC09
    (60, '.'), // AB09
    (47, ';'), // AC10
    (61, '/'), // AB10
    (48, '\''), // AC11
    (62, '⇧'), // RTSH
    (51, '\\'), // BKSL
    (36, '⏎'), // RTRN
];

/// Upper manual, left to right: top letter row alternates with number row
const EVDEV_UPPER: [(u8, char); NUM_KEYS - UPPER_START as usize] = [
    (23, '⇥'), // TAB
    (10, '1'), // AE01
    (24, 'q'), // AD01
    (11, '2'), // AE02
    (25, 'w'), // AD02
    (12, '3'), // AE03
    (26, 'e'), // AD03
    (13, '4'), // AE04
    (27, 'r'), // AD04
    (14, '5'), // AE05
    (28, 't'), // AD05
    (15, '6'), // AE06
    (29, 'y'), // AD06
    (16, '7'), // AE07
    (30, 'u'), // AD07
    (17, '8'), // AE08
    (31, 'i'), // AD08
    (18, '9'), // AE09
    (32, 'o'), // AD09
    (19, '0'), // AE10
    (33, 'p'), // AD10
    (20, '-'), // AE11
    (34, '['), // AD11
    (21, '='), // AE12
    (35, ']'), // AD12
    (22, '⌫'), // BKSP
];

impl HostKeyTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// X11/evdev keycodes for the two-row layout
    pub fn evdev() -> Self {
        let lower = EVDEV_LOWER.iter().zip(0u8..);
        let upper = EVDEV_UPPER.iter().zip(UPPER_START..);
        lower
            .chain(upper)
            .filter_map(|(&(code, label), index)| {
                LogicalKey::new(index).map(|key| HostKey {
                    code: PhysicalCode(code),
                    key,
                    label,
                })
            })
            .collect()
    }

    pub fn push(&mut self, code: PhysicalCode, key: LogicalKey, label: char) {
        self.entries.push(HostKey { code, key, label });
    }

    pub fn entries(&self) -> &[HostKey] {
        &self.entries
    }

    /// Code of the first entry whose label matches
    pub fn code_for_label(&self, label: char) -> Option<PhysicalCode> {
        self.entries
            .iter()
            .find(|entry| entry.label == label)
            .map(|entry| entry.code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<HostKey> for HostKeyTable {
    fn from_iter<I: IntoIterator<Item = HostKey>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
