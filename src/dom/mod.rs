//! Host document model
//!
//! An arena of elements with hit-testing, text extraction and class
//! toggling, built from a layout snapshot the host uploads.

mod document;
mod geometry;

pub use document::{Document, DocumentSnapshot, ElementId, ElementSpec};
pub use geometry::{Rect, Size};

#[cfg(test)]
pub(crate) use document::tests::sample_document;
