//! Raw input events observed by the host

use serde::{Deserialize, Serialize};

/// An input event forwarded from the host page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InputEvent {
    /// `keydown` with the DOM key name
    KeyDown { key: String },

    /// `keyup` with the DOM key name
    KeyUp { key: String },

    /// `mousemove` in viewport coordinates
    PointerMove { x: f64, y: f64 },

    /// `mouseout` at document level
    PointerLeave,

    /// Click on the overlay panel
    OverlayClick,

    /// Host window lost focus (`blur`)
    FocusLost,
}

impl InputEvent {
    pub fn key_down(key: impl Into<String>) -> Self {
        Self::KeyDown { key: key.into() }
    }

    pub fn key_up(key: impl Into<String>) -> Self {
        Self::KeyUp { key: key.into() }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_deserialization() {
        let event: InputEvent = serde_json::from_str(r#"{"type":"key_down","key":"Meta"}"#).unwrap();
        assert_eq!(event, InputEvent::key_down("Meta"));

        let event: InputEvent =
            serde_json::from_str(r#"{"type":"pointer_move","x":12.5,"y":40}"#).unwrap();
        assert_eq!(event, InputEvent::PointerMove { x: 12.5, y: 40.0 });

        let event: InputEvent = serde_json::from_str(r#"{"type":"focus_lost"}"#).unwrap();
        assert_eq!(event, InputEvent::FocusLost);
    }
}
