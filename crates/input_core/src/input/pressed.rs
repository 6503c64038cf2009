// crates/input_core/src/input/pressed.rs
use std::collections::HashSet;

use input_shared::RawCode;

/// Which raw codes are physically down right now, regardless of what they feed.
/// Only used for polling; dispatch never consults it.
#[derive(Debug, Default, Clone)]
pub struct PressedCodes {
    codes: HashSet<RawCode>,
}

impl PressedCodes {
    pub fn press(&mut self, code: RawCode) {
        self.codes.insert(code);
    }

    pub fn release(&mut self, code: RawCode) {
        self.codes.remove(&code);
    }

    pub fn is_pressed(&self, code: RawCode) -> bool {
        self.codes.contains(&code)
    }

    pub fn iter(&self) -> impl Iterator<Item = RawCode> + '_ {
        self.codes.iter().copied()
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn press_is_a_set() {
        let mut pressed = PressedCodes::default();
        pressed.press(87);
        pressed.press(87);
        pressed.press(32);

        assert_eq!(pressed.len(), 2);
        assert!(pressed.is_pressed(87));

        pressed.release(87);
        pressed.release(87);
        assert!(!pressed.is_pressed(87));
        assert_eq!(pressed.iter().collect::<Vec<_>>(), vec![32]);

        pressed.release(32);
        assert!(pressed.is_empty());
    }
}
