//! Element arena built from a host layout snapshot
//!
//! Elements are stored flat in pre-order, so an element's index is also its
//! paint order. Handles (`ElementId`) are plain indices and carry no
//! ownership; a handle from a replaced document is simply rejected.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use tracing::trace;

use super::geometry::{Rect, Size};

/// Opaque handle to an element in the current document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ElementId(pub usize);

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Layout snapshot uploaded by the host
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentSnapshot {
    pub viewport: Size,
    pub root: ElementSpec,
}

/// One element of a layout snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementSpec {
    pub tag: String,
    /// Text directly inside this element, excluding children
    ///
    /// Own text is always placed before the children's text in
    /// `Document::text_content`, so text that follows a child node in the
    /// page cannot be expressed; hosts should wrap it in its own element.
    #[serde(default)]
    pub text: String,
    pub rect: Rect,
    #[serde(default)]
    pub z_index: i32,
    #[serde(default)]
    pub children: Vec<ElementSpec>,
}

/// Errors produced while building a document
#[derive(Debug, thiserror::Error)]
pub enum DocumentError {
    #[error("viewport must have a positive finite size, got {width}x{height}")]
    InvalidViewport { width: f64, height: f64 },

    #[error("element <{tag}> at paint order {index} has malformed geometry")]
    InvalidRect { tag: String, index: usize },
}

#[derive(Debug, Clone)]
struct Element {
    tag: String,
    text: String,
    rect: Rect,
    z_index: i32,
    children: Vec<ElementId>,
    classes: BTreeSet<String>,
}

/// The host page as the inspector sees it
#[derive(Debug, Clone)]
pub struct Document {
    viewport: Size,
    elements: Vec<Element>,
}

impl Document {
    /// A document with no elements; every hit-test misses
    pub fn empty(viewport: Size) -> Self {
        Self {
            viewport,
            elements: Vec::new(),
        }
    }

    /// Flatten a snapshot into the arena, validating geometry
    pub fn from_snapshot(snapshot: DocumentSnapshot) -> Result<Self, DocumentError> {
        let Size { width, height } = snapshot.viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(DocumentError::InvalidViewport { width, height });
        }

        let mut document = Self::empty(snapshot.viewport);
        document.insert(snapshot.root)?;
        Ok(document)
    }

    fn insert(&mut self, spec: ElementSpec) -> Result<ElementId, DocumentError> {
        let id = ElementId(self.elements.len());
        if !spec.rect.is_well_formed() {
            return Err(DocumentError::InvalidRect {
                tag: spec.tag,
                index: id.0,
            });
        }

        self.elements.push(Element {
            tag: spec.tag,
            text: spec.text,
            rect: spec.rect,
            z_index: spec.z_index,
            children: Vec::with_capacity(spec.children.len()),
            classes: BTreeSet::new(),
        });

        for child in spec.children {
            let child_id = self.insert(child)?;
            self.elements[id.0].children.push(child_id);
        }

        Ok(id)
    }

    pub fn viewport(&self) -> Size {
        self.viewport
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn tag(&self, id: ElementId) -> Option<&str> {
        self.elements.get(id.0).map(|e| e.tag.as_str())
    }

    /// Topmost element at viewport coordinates
    ///
    /// Highest z-index wins; among equal z-index the later-painted element
    /// wins. Points outside the viewport resolve to nothing.
    pub fn element_from_point(&self, x: f64, y: f64) -> Option<ElementId> {
        let viewport = Rect::new(0.0, 0.0, self.viewport.width, self.viewport.height);
        if !viewport.contains(x, y) {
            trace!(x, y, "point outside viewport");
            return None;
        }

        self.elements
            .iter()
            .enumerate()
            .filter(|(_, e)| e.rect.contains(x, y))
            .max_by_key(|(index, e)| (e.z_index, *index))
            .map(|(index, _)| ElementId(index))
    }

    /// Concatenated text of the element and its descendants, in document order
    pub fn text_content(&self, id: ElementId) -> Option<String> {
        self.elements.get(id.0)?;

        let mut text = String::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            let element = &self.elements[next.0];
            text.push_str(&element.text);
            stack.extend(element.children.iter().rev().copied());
        }
        Some(text)
    }

    pub fn bounding_rect(&self, id: ElementId) -> Option<Rect> {
        self.elements.get(id.0).map(|e| e.rect)
    }

    /// Add a class; returns false for unknown handles
    pub fn add_class(&mut self, id: ElementId, class: &str) -> bool {
        match self.elements.get_mut(id.0) {
            Some(element) => {
                element.classes.insert(class.to_string());
                true
            }
            None => false,
        }
    }

    /// Remove a class; returns false for unknown handles
    pub fn remove_class(&mut self, id: ElementId, class: &str) -> bool {
        match self.elements.get_mut(id.0) {
            Some(element) => {
                element.classes.remove(class);
                true
            }
            None => false,
        }
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements
            .get(id.0)
            .is_some_and(|e| e.classes.contains(class))
    }

    /// Elements currently carrying `class`
    pub fn elements_with_class<'a>(&'a self, class: &'a str) -> impl Iterator<Item = ElementId> + 'a {
        self.elements
            .iter()
            .enumerate()
            .filter(move |(_, e)| e.classes.contains(class))
            .map(|(index, _)| ElementId(index))
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    fn spec(tag: &str, text: &str, rect: Rect, children: Vec<ElementSpec>) -> ElementSpec {
        ElementSpec {
            tag: tag.to_string(),
            text: text.to_string(),
            rect,
            z_index: 0,
            children,
        }
    }

    /// body (0) > header (1) > h1 (2); body > p (3); body > div.modal (4, z=10)
    pub(crate) fn sample_document() -> Document {
        let mut modal = spec("div", "modal text", Rect::new(300.0, 300.0, 200.0, 100.0), vec![]);
        modal.z_index = 10;

        let snapshot = DocumentSnapshot {
            viewport: Size::new(1024.0, 768.0),
            root: spec(
                "body",
                "",
                Rect::new(0.0, 0.0, 1024.0, 768.0),
                vec![
                    spec(
                        "header",
                        " Site ",
                        Rect::new(0.0, 0.0, 1024.0, 80.0),
                        vec![spec("h1", "Title", Rect::new(5.0, 5.0, 200.0, 40.0), vec![])],
                    ),
                    spec("p", "  paragraph body  ", Rect::new(200.0, 200.0, 400.0, 300.0), vec![]),
                    modal,
                ],
            ),
        };
        Document::from_snapshot(snapshot).unwrap()
    }

    #[test]
    fn test_flattened_in_paint_order() {
        let doc = sample_document();
        assert_eq!(doc.len(), 5);
        assert_eq!(doc.tag(ElementId(0)), Some("body"));
        assert_eq!(doc.tag(ElementId(2)), Some("h1"));
        assert_eq!(doc.tag(ElementId(4)), Some("div"));
    }

    #[test]
    fn test_hit_test_prefers_later_paint_order() {
        let doc = sample_document();
        assert_eq!(doc.element_from_point(10.0, 10.0), Some(ElementId(2)));
        assert_eq!(doc.element_from_point(500.0, 50.0), Some(ElementId(1)));
        assert_eq!(doc.element_from_point(900.0, 700.0), Some(ElementId(0)));
    }

    #[test]
    fn test_hit_test_prefers_higher_z_index() {
        let doc = sample_document();
        // Inside both p and the modal; modal has z-index 10
        assert_eq!(doc.element_from_point(350.0, 350.0), Some(ElementId(4)));
        assert_eq!(doc.element_from_point(250.0, 250.0), Some(ElementId(3)));
    }

    #[test]
    fn test_hit_test_outside_viewport() {
        let doc = sample_document();
        assert_eq!(doc.element_from_point(-1.0, 10.0), None);
        assert_eq!(doc.element_from_point(10.0, 768.0), None);
        assert_eq!(Document::empty(Size::new(10.0, 10.0)).element_from_point(1.0, 1.0), None);
    }

    #[test]
    fn test_text_content_includes_descendants() {
        let doc = sample_document();
        assert_eq!(doc.text_content(ElementId(1)).as_deref(), Some(" Site Title"));
        assert_eq!(
            doc.text_content(ElementId(0)).as_deref(),
            Some(" Site Title  paragraph body  modal text")
        );
        assert_eq!(doc.text_content(ElementId(99)), None);
    }

    #[test]
    fn test_class_toggle() {
        let mut doc = sample_document();
        assert!(doc.add_class(ElementId(3), "marked"));
        assert!(doc.add_class(ElementId(3), "marked"));
        assert!(doc.has_class(ElementId(3), "marked"));
        assert_eq!(doc.elements_with_class("marked").collect::<Vec<_>>(), vec![ElementId(3)]);

        assert!(doc.remove_class(ElementId(3), "marked"));
        assert!(!doc.has_class(ElementId(3), "marked"));
        assert!(!doc.add_class(ElementId(42), "marked"));
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "viewport": {"width": 800, "height": 600},
            "root": {
                "tag": "body",
                "rect": {"top": 0, "left": 0, "width": 800, "height": 600},
                "children": [
                    {"tag": "span", "text": "hi", "rect": {"top": 1, "left": 1, "width": 10, "height": 10}, "z_index": 3}
                ]
            }
        }"#;
        let snapshot: DocumentSnapshot = serde_json::from_str(json).unwrap();
        let doc = Document::from_snapshot(snapshot).unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.element_from_point(5.0, 5.0), Some(ElementId(1)));
    }

    #[test]
    fn test_rejects_bad_geometry() {
        let bad_viewport = DocumentSnapshot {
            viewport: Size::new(0.0, 600.0),
            root: spec("body", "", Rect::default(), vec![]),
        };
        assert!(matches!(
            Document::from_snapshot(bad_viewport),
            Err(DocumentError::InvalidViewport { .. })
        ));

        let bad_rect = DocumentSnapshot {
            viewport: Size::new(800.0, 600.0),
            root: spec(
                "body",
                "",
                Rect::new(0.0, 0.0, 800.0, 600.0),
                vec![spec("img", "", Rect::new(0.0, 0.0, -4.0, 1.0), vec![])],
            ),
        };
        assert!(matches!(
            Document::from_snapshot(bad_rect),
            Err(DocumentError::InvalidRect { index: 1, .. })
        ));
    }
}
