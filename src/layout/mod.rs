// Purpose: key layout - which physical key plays which logical key, and
// which note each logical key stands for

pub mod host;
pub mod note;

pub use host::{HostKey, HostKeyTable};
pub use note::NoteSlot;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Number of logical key slots, both manuals plus the gap between them
pub const NUM_KEYS: usize = 52;

/// First logical index of the upper manual
pub const UPPER_START: u8 = 26;

/// Unused slot between the manuals, kept so both rows line up
pub const GAP: u8 = 25;

/// Size of the host key code space
pub const CODE_SPACE: usize = 256;

/// One of the two independently controlled keyboard voices
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Manual {
    Lower,
    Upper,
}

impl Manual {
    pub const ALL: [Manual; 2] = [Manual::Lower, Manual::Upper];

    /// Array index for per-manual storage
    pub fn index(self) -> usize {
        match self {
            Manual::Lower => 0,
            Manual::Upper => 1,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Manual::Lower => "lower",
            Manual::Upper => "upper",
        }
    }

    /// Number of playable keys on this manual
    pub fn key_count(self) -> u8 {
        match self {
            Manual::Lower => GAP,
            Manual::Upper => NUM_KEYS as u8 - UPPER_START,
        }
    }

    fn first_index(self) -> u8 {
        match self {
            Manual::Lower => 0,
            Manual::Upper => UPPER_START,
        }
    }

    /// Playable keys of this manual, lowest first
    pub fn keys(self) -> impl Iterator<Item = LogicalKey> {
        let first = self.first_index();
        (first..first + self.key_count()).map(LogicalKey)
    }
}

/// Opaque key code delivered by the host input subsystem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct PhysicalCode(pub u8);

/// Position in the playable key sequence.
///
/// Indices `0..25` are the lower manual, `26..52` the upper manual. The
/// gap at 25 is never a valid key, so every `LogicalKey` is playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LogicalKey(u8);

impl LogicalKey {
    pub const fn new(index: u8) -> Option<Self> {
        if (index as usize) < NUM_KEYS && index != GAP {
            Some(Self(index))
        } else {
            None
        }
    }

    /// All playable keys in increasing index order
    pub fn all() -> impl Iterator<Item = LogicalKey> {
        Manual::Lower.keys().chain(Manual::Upper.keys())
    }

    pub fn index(self) -> u8 {
        self.0
    }

    pub fn manual(self) -> Manual {
        if self.0 < UPPER_START {
            Manual::Lower
        } else {
            Manual::Upper
        }
    }

    /// Index relative to the first key of the manual
    pub fn manual_index(self) -> u8 {
        self.0 - self.manual().first_index()
    }

    /// How many whole note cycles precede this key within its manual
    pub fn octave_repeat(self) -> u8 {
        self.manual_index() / note::CYCLE_LEN as u8
    }

    pub fn slot(self) -> NoteSlot {
        NoteSlot::from_cycle_index(self.manual_index() as usize)
    }
}

/// Bidirectional mapping between physical key codes and logical keys.
///
/// Both directions are kept in step so that a code resolves to at most one
/// key and a key is reachable from at most one code.
#[derive(Debug, Clone)]
pub struct KeyLayout {
    by_code: [Option<LogicalKey>; CODE_SPACE],
    by_key: [Option<PhysicalCode>; NUM_KEYS],
    labels: [char; NUM_KEYS],
}

impl KeyLayout {
    pub fn new(table: &HostKeyTable) -> Self {
        let mut layout = Self {
            by_code: [None; CODE_SPACE],
            by_key: [None; NUM_KEYS],
            labels: [' '; NUM_KEYS],
        };
        layout.rebuild(table);
        layout
    }

    /// Replace the whole mapping with `table`.
    ///
    /// Later entries win over earlier ones when the table maps a code or a
    /// key twice. Rebuilding from the same table yields the same layout.
    pub fn rebuild(&mut self, table: &HostKeyTable) {
        self.by_code = [None; CODE_SPACE];
        self.by_key = [None; NUM_KEYS];
        self.labels = [' '; NUM_KEYS];
        for entry in table.entries() {
            self.assign(entry);
        }
    }

    fn assign(&mut self, entry: &HostKey) {
        let code = entry.code.0 as usize;
        let key = entry.key.index() as usize;

        if let Some(previous) = self.by_code[code].take() {
            self.by_key[previous.index() as usize] = None;
            self.labels[previous.index() as usize] = ' ';
        }
        if let Some(previous) = self.by_key[key].take() {
            self.by_code[previous.0 as usize] = None;
        }

        self.by_code[code] = Some(entry.key);
        self.by_key[key] = Some(entry.code);
        self.labels[key] = entry.label;
    }

    pub fn logical(&self, code: PhysicalCode) -> Option<LogicalKey> {
        self.by_code[code.0 as usize]
    }

    pub fn physical(&self, key: LogicalKey) -> Option<PhysicalCode> {
        self.by_key[key.index() as usize]
    }

    /// Printable label of the key, blank when unmapped
    pub fn label(&self, key: LogicalKey) -> char {
        self.labels[key.index() as usize]
    }

    /// Mapped keys with their codes, in increasing logical order
    pub fn mapped(&self) -> impl Iterator<Item = (LogicalKey, PhysicalCode)> + '_ {
        LogicalKey::all().filter_map(|key| self.physical(key).map(|code| (key, code)))
    }
}

impl Default for KeyLayout {
    fn default() -> Self {
        Self::new(&HostKeyTable::evdev())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(index: u8) -> LogicalKey {
        LogicalKey::new(index).unwrap()
    }

    #[test]
    fn gap_and_out_of_range_are_not_keys() {
        assert!(LogicalKey::new(GAP).is_none());
        assert!(LogicalKey::new(NUM_KEYS as u8).is_none());
        assert!(LogicalKey::new(0).is_some());
        assert!(LogicalKey::new(51).is_some());
    }

    #[test]
    fn manual_membership_follows_index() {
        assert_eq!(key(0).manual(), Manual::Lower);
        assert_eq!(key(24).manual(), Manual::Lower);
        assert_eq!(key(26).manual(), Manual::Upper);
        assert_eq!(key(51).manual(), Manual::Upper);
        assert_eq!(Manual::Lower.keys().count(), 25);
        assert_eq!(Manual::Upper.keys().count(), 26);
        assert_eq!(LogicalKey::all().count(), 51);
    }

    #[test]
    fn slots_follow_the_cycle_per_manual() {
        assert_eq!(key(0).slot(), NoteSlot::G);
        assert_eq!(key(6).slot(), NoteSlot::C);
        assert_eq!(key(14).slot(), NoteSlot::G);
        assert_eq!(key(14).octave_repeat(), 1);
        assert_eq!(key(26).slot(), NoteSlot::G);
        assert_eq!(key(32).slot(), NoteSlot::C);
        assert_eq!(key(51).slot(), NoteSlot::ESharp);
    }

    #[test]
    fn evdev_layout_maps_both_directions() {
        let layout = KeyLayout::default();
        // AB03 ("c" on a US keyboard) is the lower manual's C
        assert_eq!(layout.logical(PhysicalCode(54)), Some(key(6)));
        assert_eq!(layout.physical(key(6)), Some(PhysicalCode(54)));
        assert_eq!(layout.label(key(6)), 'c');
        // Escape is not a note key
        assert_eq!(layout.logical(PhysicalCode(9)), None);
        assert_eq!(layout.mapped().count(), 51);
    }

    #[test]
    fn last_write_wins_on_inconsistent_table() {
        let mut table = HostKeyTable::new();
        table.push(PhysicalCode(10), key(0), 'a');
        table.push(PhysicalCode(11), key(0), 'b');
        table.push(PhysicalCode(11), key(1), 'c');
        let layout = KeyLayout::new(&table);

        assert_eq!(layout.logical(PhysicalCode(10)), None);
        assert_eq!(layout.physical(key(0)), None);
        assert_eq!(layout.logical(PhysicalCode(11)), Some(key(1)));
        assert_eq!(layout.physical(key(1)), Some(PhysicalCode(11)));
        assert_eq!(layout.label(key(1)), 'c');
    }

    #[test]
    fn rebuild_is_idempotent() {
        let table = HostKeyTable::evdev();
        let mut layout = KeyLayout::new(&table);
        let before: Vec<_> = layout.mapped().collect();
        layout.rebuild(&table);
        layout.rebuild(&table);
        let after: Vec<_> = layout.mapped().collect();
        assert_eq!(before, after);
    }

    #[test]
    fn rebuild_drops_stale_codes() {
        let mut layout = KeyLayout::default();
        let mut table = HostKeyTable::new();
        table.push(PhysicalCode(200), key(6), 'x');
        layout.rebuild(&table);

        assert_eq!(layout.logical(PhysicalCode(54)), None);
        assert_eq!(layout.logical(PhysicalCode(200)), Some(key(6)));
        assert_eq!(layout.mapped().count(), 1);
    }
}
