//! Modifier key definitions and state tracking
//!
//! Maps DOM `KeyboardEvent.key` names onto the two modifiers the gate
//! watches and tracks whether each is currently held.

/// DOM key names used by the gate
pub mod names {
    /// Command key on macOS, Windows key elsewhere
    pub const META: &str = "Meta";
    /// Shift key
    pub const SHIFT: &str = "Shift";
}

/// Which of the gate's two modifiers a key maps to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierKey {
    /// The configurable primary modifier (Meta by default)
    Primary,
    /// Shift
    Shift,
}

impl ModifierKey {
    /// Classify a DOM key name against the configured primary key
    pub fn classify(key: &str, primary_key: &str) -> Option<Self> {
        if key == primary_key {
            Some(Self::Primary)
        } else if key == names::SHIFT {
            Some(Self::Shift)
        } else {
            None
        }
    }
}

/// Tracks which of the two modifier keys are currently pressed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ModifierState {
    /// Primary modifier is held
    pub primary: bool,
    /// Shift is held
    pub shift: bool,
}

impl ModifierState {
    /// Record a press or release of one modifier
    pub fn set(&mut self, key: ModifierKey, pressed: bool) {
        match key {
            ModifierKey::Primary => self.primary = pressed,
            ModifierKey::Shift => self.shift = pressed,
        }
    }

    /// Both modifiers held
    pub fn is_armed(&self) -> bool {
        self.primary && self.shift
    }

    /// Check if all modifiers are released
    pub fn is_empty(&self) -> bool {
        !self.primary && !self.shift
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_state() {
        let state = ModifierState::default();
        assert!(state.is_empty());
        assert!(!state.is_armed());
    }

    #[test]
    fn test_single_modifier_not_armed() {
        let state = ModifierState {
            primary: true,
            shift: false,
        };
        assert!(!state.is_empty());
        assert!(!state.is_armed());

        let state = ModifierState {
            primary: false,
            shift: true,
        };
        assert!(!state.is_armed());
    }

    #[test]
    fn test_both_modifiers_armed() {
        let mut state = ModifierState::default();
        state.set(ModifierKey::Primary, true);
        state.set(ModifierKey::Shift, true);
        assert!(state.is_armed());

        state.set(ModifierKey::Shift, false);
        assert!(!state.is_armed());
    }

    #[test]
    fn test_classify_respects_primary_key() {
        assert_eq!(
            ModifierKey::classify("Meta", names::META),
            Some(ModifierKey::Primary)
        );
        assert_eq!(
            ModifierKey::classify("Control", "Control"),
            Some(ModifierKey::Primary)
        );
        assert_eq!(ModifierKey::classify("Meta", "Control"), None);
        assert_eq!(
            ModifierKey::classify("Shift", names::META),
            Some(ModifierKey::Shift)
        );
        assert_eq!(ModifierKey::classify("a", names::META), None);
    }
}
