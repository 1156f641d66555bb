//! Hover inspector
//!
//! While the modifier gate is armed, pointer moves resolve the element under
//! the cursor, highlight it and show its text in the overlay. In the copier
//! variant a click on the overlay copies the text and shows a short
//! acknowledgement.

mod controller;
mod highlight;
mod input;
mod notification;
mod overlay;
mod tracker;

pub use controller::{Command, Inspector, InspectorOptions, InspectorSnapshot};
pub use highlight::HIGHLIGHT_CLASS;
pub use input::InputEvent;
pub use notification::NOTIFICATION_TEXT;
pub use overlay::{Corner, Placement, OVERLAY_ELEMENT_ID};
