// Purpose: logical key -> semitones, and semitones + base note -> MIDI note

use crate::layout::LogicalKey;

/// Highest representable MIDI note number
pub const MAX_NOTE: i32 = 127;

/// Semitone offset of a key from its voice's base note.
///
/// The manual-relative index splits into whole note cycles (12 semitones
/// each) and a slot inside the cycle. Offsets never decrease as the index
/// grows within a manual.
pub fn to_semitone_offset(key: LogicalKey) -> i32 {
    key.octave_repeat() as i32 * 12 + key.slot().offset()
}

/// Absolute MIDI note, or `None` when it falls outside 0..=127
pub fn absolute_note(base_note: i32, offset: i32) -> Option<u8> {
    let note = base_note + offset;
    if (0..=MAX_NOTE).contains(&note) {
        Some(note as u8)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::Manual;

    fn key(index: u8) -> LogicalKey {
        LogicalKey::new(index).unwrap()
    }

    #[test]
    fn manual_c_is_the_base_note() {
        assert_eq!(to_semitone_offset(key(6)), 0);
        assert_eq!(to_semitone_offset(key(32)), 0);
    }

    #[test]
    fn outer_keys_follow_the_cycle() {
        // lower manual's leading G
        assert_eq!(to_semitone_offset(key(0)), -5);
        // lower manual's last key is the second E
        assert_eq!(to_semitone_offset(key(24)), 16);
        // upper manual's trailing key is the second E#
        assert_eq!(to_semitone_offset(key(51)), 17);
    }

    #[test]
    fn second_cycle_is_an_octave_up() {
        assert_eq!(to_semitone_offset(key(20)), to_semitone_offset(key(6)) + 12);
    }

    #[test]
    fn offsets_never_decrease_within_a_manual() {
        for manual in Manual::ALL {
            let offsets: Vec<i32> = manual.keys().map(to_semitone_offset).collect();
            assert!(offsets.windows(2).all(|w| w[0] <= w[1]), "{:?}", offsets);
        }
    }

    #[test]
    fn absolute_note_bounds() {
        assert_eq!(absolute_note(48, 0), Some(48));
        assert_eq!(absolute_note(0, -5), None);
        assert_eq!(absolute_note(113, 17), None);
        assert_eq!(absolute_note(110, 17), Some(127));
    }
}
