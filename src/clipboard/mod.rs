//! Clipboard backends
//!
//! The inspector writes through `ClipboardBackend` so the system clipboard
//! can be swapped for a recording backend in tests. Writes are blocking and
//! are always dispatched off the control loop.

mod system;

pub use system::SystemClipboard;

/// Errors from a clipboard write
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard rejected write: {0}")]
    Rejected(String),

    #[error("clipboard task failed: {0}")]
    Task(String),
}

/// A destination for copied overlay text
pub trait ClipboardBackend: Send + Sync + 'static {
    /// Replace the clipboard contents with `text`
    fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
