//! Modifier gate
//!
//! Tracks the primary modifier and Shift and arms the inspector while both
//! are held.

mod keys;
mod machine;

pub use keys::names;
pub use machine::{GateTransition, ModifierGate};
