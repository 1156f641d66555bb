//! Overlay presenter
//!
//! Holds the text panel's content and decides which corner it anchors to.
//! The panel is measured after every content update because its size
//! depends on the text.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::dom::{Rect, Size};

/// Distance from the viewport edges to the anchored overlay
pub const CORNER_INSET_PX: f64 = 10.0;

/// Element id the host gives the overlay node
pub const OVERLAY_ELEMENT_ID: &str = "mouse-text-overlay";

const FONT_SIZE_PX: f64 = 18.0;
const PADDING_PX: f64 = 5.0;
const CHAR_ADVANCE: f64 = 0.6;
const LINE_HEIGHT: f64 = 1.2;

/// Screen corner the overlay is anchored to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Corner {
    #[default]
    TopLeft,
    BottomLeft,
}

impl std::fmt::Display for Corner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Corner::TopLeft => write!(f, "top-left"),
            Corner::BottomLeft => write!(f, "bottom-left"),
        }
    }
}

/// Fixed-position offsets for the overlay; `None` means `auto`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub corner: Corner,
    pub top: Option<f64>,
    pub bottom: Option<f64>,
    pub left: f64,
}

impl Placement {
    pub fn at(corner: Corner) -> Self {
        match corner {
            Corner::TopLeft => Self {
                corner,
                top: Some(CORNER_INSET_PX),
                bottom: None,
                left: CORNER_INSET_PX,
            },
            Corner::BottomLeft => Self {
                corner,
                top: None,
                bottom: Some(CORNER_INSET_PX),
                left: CORNER_INSET_PX,
            },
        }
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::at(Corner::TopLeft)
    }
}

/// Pick the corner that keeps the overlay off the hovered element
///
/// A top-left overlay would cover the element when the element starts
/// inside the overlay's box, so the overlay moves to the bottom-left.
pub fn choose_corner(target: Rect, overlay: Size) -> Corner {
    if target.top < overlay.height && target.left < overlay.width {
        Corner::BottomLeft
    } else {
        Corner::TopLeft
    }
}

/// Rendered size of the overlay for `text` inside `viewport`
///
/// Shrink-to-fit box: lines wrap at the viewport width minus both insets.
pub fn measure(text: &str, viewport: Size) -> Size {
    let char_width = FONT_SIZE_PX * CHAR_ADVANCE;
    let line_height = FONT_SIZE_PX * LINE_HEIGHT;
    let wrap_width = (viewport.width - 2.0 * CORNER_INSET_PX - 2.0 * PADDING_PX).max(char_width);
    let chars_per_line = ((wrap_width / char_width).floor() as usize).max(1);

    if text.is_empty() {
        return Size::new(2.0 * PADDING_PX, 2.0 * PADDING_PX);
    }

    let mut lines = 0usize;
    let mut longest = 0usize;
    for line in text.split('\n') {
        let chars = line.chars().count();
        lines += chars.div_ceil(chars_per_line).max(1);
        longest = longest.max(chars.min(chars_per_line));
    }

    Size::new(
        longest as f64 * char_width + 2.0 * PADDING_PX,
        lines as f64 * line_height + 2.0 * PADDING_PX,
    )
}

/// The singleton text panel
#[derive(Debug, Clone, Default)]
pub struct OverlayPanel {
    text: String,
    visible: bool,
    placement: Placement,
}

impl OverlayPanel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn placement(&self) -> Placement {
        self.placement
    }

    /// Make the panel visible; returns true only the first time
    pub fn show(&mut self) -> bool {
        !std::mem::replace(&mut self.visible, true)
    }

    /// On-screen box of the panel, `None` while hidden
    pub fn bounds(&self, viewport: Size) -> Option<Rect> {
        if !self.visible {
            return None;
        }

        let size = measure(&self.text, viewport);
        let top = match (self.placement.top, self.placement.bottom) {
            (Some(top), _) => top,
            (None, Some(bottom)) => viewport.height - bottom - size.height,
            (None, None) => CORNER_INSET_PX,
        };
        Some(Rect::new(top, self.placement.left, size.width, size.height))
    }

    /// The panel is painted above the page, so it takes the pointer first
    pub fn contains(&self, x: f64, y: f64, viewport: Size) -> bool {
        self.bounds(viewport).is_some_and(|rect| rect.contains(x, y))
    }

    /// Replace the content and re-anchor against the hovered element
    pub fn present(&mut self, text: String, target: Rect, viewport: Size) -> Placement {
        self.text = text;
        let size = measure(&self.text, viewport);
        self.placement = Placement::at(choose_corner(target, size));
        debug!(
            width = size.width,
            height = size.height,
            corner = %self.placement.corner,
            "overlay presented"
        );
        self.placement
    }
}
