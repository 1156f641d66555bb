//! Events module for inspector effects
//!
//! Every DOM mutation or clipboard outcome the inspector produces is
//! published as an `InspectorEvent` so hosts can mirror it onto the page.

use serde::{Deserialize, Serialize};

use crate::dom::ElementId;
use crate::inspector::Placement;

/// Events emitted by the inspector while handling input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum InspectorEvent {
    /// Both modifiers are held
    Armed,

    /// A modifier was released (overlay stays visible)
    Disarmed,

    /// Overlay panel became visible for the first time
    OverlayShown,

    /// Highlight marker applied to an element
    Highlighted { element: ElementId },

    /// Highlight marker removed from an element
    HighlightCleared { element: ElementId },

    /// Overlay content and position were updated
    OverlayUpdated { text: String, placement: Placement },

    /// Overlay text was written to the clipboard
    CopySucceeded {
        /// Number of characters copied
        chars: usize,
    },

    /// Clipboard write was rejected (diagnostic only)
    CopyFailed { error: String },

    /// Copy acknowledgement became visible
    NotificationShown,

    /// Copy acknowledgement timed out
    NotificationHidden,

    /// Host replaced the document
    DocumentLoaded {
        /// Number of elements in the new document
        elements: usize,
    },
}

impl std::fmt::Display for InspectorEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InspectorEvent::Armed => write!(f, "ARMED"),
            InspectorEvent::Disarmed => write!(f, "DISARMED"),
            InspectorEvent::OverlayShown => write!(f, "OVERLAY_SHOWN"),
            InspectorEvent::Highlighted { element } => write!(f, "HIGHLIGHTED ({})", element),
            InspectorEvent::HighlightCleared { element } => {
                write!(f, "HIGHLIGHT_CLEARED ({})", element)
            }
            InspectorEvent::OverlayUpdated { text, placement } => {
                write!(
                    f,
                    "OVERLAY_UPDATED ({} chars, {})",
                    text.chars().count(),
                    placement.corner
                )
            }
            InspectorEvent::CopySucceeded { chars } => write!(f, "COPY_SUCCEEDED ({} chars)", chars),
            InspectorEvent::CopyFailed { error } => write!(f, "COPY_FAILED ({})", error),
            InspectorEvent::NotificationShown => write!(f, "NOTIFICATION_SHOWN"),
            InspectorEvent::NotificationHidden => write!(f, "NOTIFICATION_HIDDEN"),
            InspectorEvent::DocumentLoaded { elements } => {
                write!(f, "DOCUMENT_LOADED ({} elements)", elements)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inspector::Corner;

    #[test]
    fn test_event_serialization() {
        let event = InspectorEvent::Highlighted {
            element: ElementId(7),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert_eq!(json, r#"{"type":"highlighted","element":7}"#);
    }

    #[test]
    fn test_overlay_event_serialization() {
        let event = InspectorEvent::OverlayUpdated {
            text: "hello".into(),
            placement: Placement::at(Corner::BottomLeft),
        };
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("overlay_updated"));
        assert!(json.contains("bottom_left"));
        assert_eq!(event.to_string(), "OVERLAY_UPDATED (5 chars, bottom-left)");
    }

    #[test]
    fn test_event_deserialization() {
        let json = r#"{"type":"copy_failed","error":"denied"}"#;
        let event: InspectorEvent = serde_json::from_str(json).unwrap();
        assert_eq!(
            event,
            InspectorEvent::CopyFailed {
                error: "denied".into()
            }
        );
    }
}
