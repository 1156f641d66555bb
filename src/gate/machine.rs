//! Modifier gate
//!
//! Consumes raw key transitions and derives the `armed` condition. The
//! gate is a pure function of the latest key events: no timers, no
//! debounce.

use tracing::{debug, info};

use super::keys::{ModifierKey, ModifierState};

/// Outcome of feeding one event to the gate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GateTransition {
    /// Gate went from disarmed to armed
    Armed,
    /// Gate went from armed to disarmed
    Disarmed,
    /// Armed state did not change
    Unchanged,
}

/// Derives `armed` from the primary and shift key states
#[derive(Debug, Clone)]
pub struct ModifierGate {
    primary_key: String,
    release_on_blur: bool,
    modifiers: ModifierState,
}

impl ModifierGate {
    /// Create a gate watching `primary_key` + Shift
    pub fn new(primary_key: impl Into<String>, release_on_blur: bool) -> Self {
        Self {
            primary_key: primary_key.into(),
            release_on_blur,
            modifiers: ModifierState::default(),
        }
    }

    /// Both modifiers currently held
    pub fn is_armed(&self) -> bool {
        self.modifiers.is_armed()
    }

    /// Current modifier flags
    pub fn modifiers(&self) -> ModifierState {
        self.modifiers
    }

    /// Handle a key-down event
    pub fn key_down(&mut self, key: &str) -> GateTransition {
        self.update(key, true)
    }

    /// Handle a key-up event
    pub fn key_up(&mut self, key: &str) -> GateTransition {
        self.update(key, false)
    }

    /// Handle the host window losing focus
    ///
    /// Key-up events are not delivered while unfocused, so without a reset
    /// a modifier released elsewhere stays "pressed" here.
    pub fn focus_lost(&mut self) -> GateTransition {
        if !self.release_on_blur {
            debug!("focus lost, keeping modifier state");
            return GateTransition::Unchanged;
        }

        if self.modifiers.is_empty() {
            return GateTransition::Unchanged;
        }

        let was_armed = self.is_armed();
        debug!(released = ?self.modifiers, "focus lost, modifiers released");
        self.modifiers = ModifierState::default();
        Self::edge(was_armed, false)
    }

    fn update(&mut self, key: &str, pressed: bool) -> GateTransition {
        let Some(modifier) = ModifierKey::classify(key, &self.primary_key) else {
            return GateTransition::Unchanged;
        };

        let was_armed = self.is_armed();
        self.modifiers.set(modifier, pressed);

        let transition = Self::edge(was_armed, self.is_armed());
        if transition != GateTransition::Unchanged {
            info!(?modifier, pressed, ?transition, "gate transition");
        }
        transition
    }

    fn edge(was_armed: bool, is_armed: bool) -> GateTransition {
        match (was_armed, is_armed) {
            (false, true) => GateTransition::Armed,
            (true, false) => GateTransition::Disarmed,
            _ => GateTransition::Unchanged,
        }
    }
}
