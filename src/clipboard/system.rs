//! System clipboard via arboard

use std::sync::Mutex;

use tracing::debug;

use super::{ClipboardBackend, ClipboardError};

/// The desktop clipboard
///
/// The arboard handle is opened on first use and kept alive afterwards; on
/// X11 the copied text is only served while the handle exists.
#[derive(Default)]
pub struct SystemClipboard {
    handle: Mutex<Option<arboard::Clipboard>>,
}

impl SystemClipboard {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ClipboardBackend for SystemClipboard {
    fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
        let mut guard = self
            .handle
            .lock()
            .map_err(|_| ClipboardError::Unavailable("clipboard lock poisoned".into()))?;

        if guard.is_none() {
            let clipboard = arboard::Clipboard::new()
                .map_err(|e| ClipboardError::Unavailable(e.to_string()))?;
            debug!("system clipboard opened");
            *guard = Some(clipboard);
        }

        let clipboard = guard
            .as_mut()
            .ok_or_else(|| ClipboardError::Unavailable("clipboard not opened".into()))?;

        clipboard
            .set_text(text.to_owned())
            .map_err(|e| ClipboardError::Rejected(e.to_string()))
    }
}

impl std::fmt::Debug for SystemClipboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SystemClipboard").finish_non_exhaustive()
    }
}
