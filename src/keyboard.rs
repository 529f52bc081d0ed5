use crate::layout::{LogicalKey, Manual};

/// Which logical keys are currently sounding.
///
/// One machine word per manual, one bit per manual-relative key index.
/// This is what has actually been sent, so it decides whether a press or
/// release is a real transition.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyboardState {
    words: [u32; 2],
}

impl KeyboardState {
    pub fn new() -> Self {
        Self::default()
    }

    fn locate(key: LogicalKey) -> (usize, u32) {
        (key.manual().index(), 1 << key.manual_index())
    }

    pub fn is_sounding(&self, key: LogicalKey) -> bool {
        let (word, bit) = Self::locate(key);
        self.words[word] & bit != 0
    }

    pub fn set_sounding(&mut self, key: LogicalKey, sounding: bool) {
        let (word, bit) = Self::locate(key);
        if sounding {
            self.words[word] |= bit;
        } else {
            self.words[word] &= !bit;
        }
    }

    /// Sounding keys in increasing index order
    pub fn sounding(&self) -> impl Iterator<Item = LogicalKey> + '_ {
        LogicalKey::all().filter(|&key| self.is_sounding(key))
    }

    pub fn count(&self, manual: Manual) -> u32 {
        self.words[manual.index()].count_ones()
    }

    pub fn is_silent(&self) -> bool {
        self.words == [0, 0]
    }

    pub fn clear(&mut self) {
        self.words = [0, 0];
    }
}
