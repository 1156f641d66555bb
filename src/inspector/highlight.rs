//! Highlight manager
//!
//! Keeps the highlight class on at most one element. The manager only
//! remembers a handle; the document owns the element.

use tracing::debug;

use crate::dom::{Document, ElementId};

/// Class applied to the hovered element
pub const HIGHLIGHT_CLASS: &str = "highlighted-element";

/// What a highlight call changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct HighlightChange {
    pub cleared: Option<ElementId>,
    pub applied: Option<ElementId>,
}

#[derive(Debug, Clone, Default)]
pub struct HighlightManager {
    current: Option<ElementId>,
}

impl HighlightManager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<ElementId> {
        self.current
    }

    /// Move the marker to `element`
    ///
    /// Re-highlighting the current element changes nothing.
    pub fn highlight(&mut self, document: &mut Document, element: ElementId) -> HighlightChange {
        if self.current == Some(element) && document.has_class(element, HIGHLIGHT_CLASS) {
            return HighlightChange::default();
        }

        let cleared = match self.current.take() {
            Some(previous) if previous != element => {
                document.remove_class(previous, HIGHLIGHT_CLASS);
                Some(previous)
            }
            _ => None,
        };

        if !document.add_class(element, HIGHLIGHT_CLASS) {
            debug!(%element, "highlight target no longer in document");
            return HighlightChange {
                cleared,
                applied: None,
            };
        }
        self.current = Some(element);

        HighlightChange {
            cleared,
            applied: Some(element),
        }
    }

    /// Remove the marker from the current element, if any
    pub fn clear(&mut self, document: &mut Document) -> Option<ElementId> {
        let previous = self.current.take()?;
        document.remove_class(previous, HIGHLIGHT_CLASS);
        Some(previous)
    }

    /// Drop the record without touching a document that is being replaced
    pub fn forget(&mut self) -> Option<ElementId> {
        self.current.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dom::sample_document;

    fn marked(document: &Document) -> Vec<ElementId> {
        document.elements_with_class(HIGHLIGHT_CLASS).collect()
    }

    #[test]
    fn test_highlight_moves_marker() {
        let mut doc = sample_document();
        let mut manager = HighlightManager::new();

        let change = manager.highlight(&mut doc, ElementId(2));
        assert_eq!(change.applied, Some(ElementId(2)));
        assert_eq!(change.cleared, None);
        assert_eq!(marked(&doc), vec![ElementId(2)]);

        let change = manager.highlight(&mut doc, ElementId(3));
        assert_eq!(change.cleared, Some(ElementId(2)));
        assert_eq!(change.applied, Some(ElementId(3)));
        assert_eq!(marked(&doc), vec![ElementId(3)]);
        assert_eq!(manager.current(), Some(ElementId(3)));
    }

    #[test]
    fn test_highlight_same_element_is_idempotent() {
        let mut doc = sample_document();
        let mut manager = HighlightManager::new();
        manager.highlight(&mut doc, ElementId(1));

        assert_eq!(manager.highlight(&mut doc, ElementId(1)), HighlightChange::default());
        assert_eq!(marked(&doc), vec![ElementId(1)]);
    }

    #[test]
    fn test_clear_removes_marker() {
        let mut doc = sample_document();
        let mut manager = HighlightManager::new();
        manager.highlight(&mut doc, ElementId(4));

        assert_eq!(manager.clear(&mut doc), Some(ElementId(4)));
        assert!(marked(&doc).is_empty());
        assert_eq!(manager.current(), None);
        assert_eq!(manager.clear(&mut doc), None);
    }

    #[test]
    fn test_unknown_element_not_recorded() {
        let mut doc = sample_document();
        let mut manager = HighlightManager::new();
        manager.highlight(&mut doc, ElementId(1));

        let change = manager.highlight(&mut doc, ElementId(99));
        assert_eq!(change.cleared, Some(ElementId(1)));
        assert_eq!(change.applied, None);
        assert_eq!(manager.current(), None);
        assert!(marked(&doc).is_empty());
    }
}
