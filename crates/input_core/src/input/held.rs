// crates/input_core/src/input/held.rs

use input_shared::{RawCode, SourceClass};

/// Codes currently held for one source class, in the order they went down.
/// Held codes are re-fired every tick, so iteration order must be stable.
#[derive(Debug, Default, Clone)]
pub struct HeldCodes {
    active: Vec<RawCode>,
}

impl HeldCodes {
    /// `idle -> held`. Starting an already-held code is a no-op.
    pub fn start(&mut self, code: RawCode) -> bool {
        if self.active.contains(&code) {
            return false;
        }
        self.active.push(code);
        true
    }

    /// `held -> idle`. Ending a code that is not held is a no-op.
    pub fn end(&mut self, code: RawCode) -> bool {
        let before = self.active.len();
        self.active.retain(|&c| c != code);
        self.active.len() != before
    }

    pub fn contains(&self, code: RawCode) -> bool {
        self.active.contains(&code)
    }

    pub fn codes(&self) -> &[RawCode] {
        &self.active
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }
}

/// One [`HeldCodes`] per source class, so a held key and a held touch slot
/// are tracked independently.
#[derive(Debug, Default, Clone)]
pub struct HeldEventTracker {
    classes: [HeldCodes; 4],
}

impl HeldEventTracker {
    pub fn start(&mut self, class: SourceClass, code: RawCode) -> bool {
        self.classes[class.index()].start(code)
    }

    pub fn end(&mut self, class: SourceClass, code: RawCode) -> bool {
        self.classes[class.index()].end(code)
    }

    pub fn held(&self, class: SourceClass) -> &HeldCodes {
        &self.classes[class.index()]
    }

    pub fn is_held(&self, class: SourceClass, code: RawCode) -> bool {
        self.held(class).contains(code)
    }

    /// Every held code, in re-fire order: source classes in `SourceClass::ALL`
    /// order, then insertion order within a class.
    pub fn snapshot(&self) -> Vec<(SourceClass, RawCode)> {
        SourceClass::ALL
            .iter()
            .flat_map(|&class| self.held(class).codes().iter().map(move |&code| (class, code)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.iter().all(HeldCodes::is_empty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_and_end_are_idempotent() {
        let mut held = HeldCodes::default();

        assert!(held.start(87));
        assert!(!held.start(87));
        assert_eq!(held.codes(), &[87]);

        assert!(held.end(87));
        assert!(!held.end(87));
        assert!(held.is_empty());
    }

    #[test]
    fn keeps_insertion_order() {
        let mut held = HeldCodes::default();
        held.start(83);
        held.start(65);
        held.start(87);
        held.end(65);
        held.start(65);

        assert_eq!(held.codes(), &[83, 87, 65]);
    }

    #[test]
    fn classes_are_tracked_independently() {
        let mut tracker = HeldEventTracker::default();
        tracker.start(SourceClass::Touch, 100_100);
        tracker.start(SourceClass::Keyboard, 87);

        assert!(tracker.is_held(SourceClass::Touch, 100_100));
        assert!(!tracker.is_held(SourceClass::Keyboard, 100_100));

        tracker.end(SourceClass::Keyboard, 100_100);
        assert!(tracker.is_held(SourceClass::Touch, 100_100));

        assert_eq!(
            tracker.snapshot(),
            vec![(SourceClass::Keyboard, 87), (SourceClass::Touch, 100_100)]
        );
    }
}
