//! Inspector controller
//!
//! Owns all inspector state and processes one command queue. Every handler
//! runs to completion before the next command is taken, so there is no
//! reentrancy. Clipboard writes and the notification timer run as separate
//! tasks and report back through the same queue.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, info, trace, warn};

use crate::clipboard::{ClipboardBackend, ClipboardError};
use crate::config::{Config, Variant, NOTIFICATION_DURATION};
use crate::dom::{Document, ElementId, Size};
use crate::events::InspectorEvent;
use crate::gate::{GateTransition, ModifierGate};

use super::highlight::HighlightManager;
use super::input::InputEvent;
use super::notification::Notification;
use super::overlay::{OverlayPanel, Placement};
use super::tracker::extract_text;

/// Work items for the control loop
#[derive(Debug)]
pub enum Command {
    /// Input forwarded by the host
    Input(InputEvent),
    /// Replace the current document
    LoadDocument(Document),
    /// A clipboard write finished; carries the copied char count
    ClipboardWritten(Result<usize, ClipboardError>),
    /// The notification timer for `generation` fired
    NotificationExpired { generation: u64 },
}

/// Tunables the controller runs with
#[derive(Debug, Clone)]
pub struct InspectorOptions {
    pub variant: Variant,
    pub primary_key: String,
    pub release_on_blur: bool,
    pub notification_duration: Duration,
}

impl From<&Config> for InspectorOptions {
    fn from(config: &Config) -> Self {
        Self {
            variant: config.variant,
            primary_key: config.primary_key.clone(),
            release_on_blur: config.release_on_blur,
            notification_duration: NOTIFICATION_DURATION,
        }
    }
}

/// Point-in-time view of the inspector, published after every command
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InspectorSnapshot {
    pub armed: bool,
    pub overlay_visible: bool,
    pub overlay_text: String,
    pub placement: Placement,
    pub highlighted: Option<ElementId>,
    pub notification_visible: bool,
    pub document_elements: usize,
}

/// The hover inspector
pub struct Inspector {
    options: InspectorOptions,
    gate: ModifierGate,
    document: Document,
    highlight: HighlightManager,
    overlay: OverlayPanel,
    notification: Notification,
    clipboard: Arc<dyn ClipboardBackend>,
    /// Loopback into our own queue for task completions
    command_tx: mpsc::Sender<Command>,
    event_tx: broadcast::Sender<InspectorEvent>,
    status_tx: watch::Sender<InspectorSnapshot>,
}

impl Inspector {
    /// Create an inspector with an empty document
    pub fn new(
        options: InspectorOptions,
        clipboard: Arc<dyn ClipboardBackend>,
        command_tx: mpsc::Sender<Command>,
        event_tx: broadcast::Sender<InspectorEvent>,
    ) -> Self {
        let gate = ModifierGate::new(options.primary_key.clone(), options.release_on_blur);
        let (status_tx, _) = watch::channel(InspectorSnapshot::default());
        Self {
            options,
            gate,
            document: Document::empty(Size::default()),
            highlight: HighlightManager::new(),
            overlay: OverlayPanel::new(),
            notification: Notification::new(),
            clipboard,
            command_tx,
            event_tx,
            status_tx,
        }
    }

    /// Receiver that always holds the latest snapshot
    pub fn status(&self) -> watch::Receiver<InspectorSnapshot> {
        self.status_tx.subscribe()
    }

    pub fn snapshot(&self) -> InspectorSnapshot {
        InspectorSnapshot {
            armed: self.gate.is_armed(),
            overlay_visible: self.overlay.is_visible(),
            overlay_text: self.overlay.text().to_string(),
            placement: self.overlay.placement(),
            highlighted: self.highlight.current(),
            notification_visible: self.notification.is_visible(),
            document_elements: self.document.len(),
        }
    }

    /// Run the control loop until the queue closes
    pub async fn run(&mut self, mut command_rx: mpsc::Receiver<Command>) {
        info!(variant = %self.options.variant, "inspector started");

        while let Some(command) = command_rx.recv().await {
            self.handle(command);
        }

        info!("inspector stopped");
    }

    /// Apply one command and publish the resulting snapshot
    pub fn handle(&mut self, command: Command) {
        match command {
            Command::Input(event) => self.handle_input(event),
            Command::LoadDocument(document) => self.load_document(document),
            Command::ClipboardWritten(result) => self.clipboard_written(result),
            Command::NotificationExpired { generation } => {
                if self.notification.expire(generation) {
                    self.emit(InspectorEvent::NotificationHidden);
                }
            }
        }

        self.status_tx.send_replace(self.snapshot());
    }

    fn handle_input(&mut self, event: InputEvent) {
        trace!(?event, "input");
        match event {
            InputEvent::KeyDown { key } => {
                let transition = self.gate.key_down(&key);
                self.apply_gate(transition);
            }
            InputEvent::KeyUp { key } => {
                let transition = self.gate.key_up(&key);
                self.apply_gate(transition);
            }
            InputEvent::FocusLost => {
                let transition = self.gate.focus_lost();
                self.apply_gate(transition);
            }
            InputEvent::PointerMove { x, y } => self.track_pointer(x, y),
            InputEvent::PointerLeave => self.pointer_left(),
            InputEvent::OverlayClick => self.copy_overlay(),
        }
    }

    fn apply_gate(&mut self, transition: GateTransition) {
        match transition {
            GateTransition::Armed => {
                self.emit(InspectorEvent::Armed);
                if self.overlay.show() {
                    self.emit(InspectorEvent::OverlayShown);
                }
            }
            // Overlay keeps its last content on screen
            GateTransition::Disarmed => self.emit(InspectorEvent::Disarmed),
            GateTransition::Unchanged => {}
        }
    }

    fn track_pointer(&mut self, x: f64, y: f64) {
        if !self.gate.is_armed() {
            return;
        }

        // The overlay sits above the page; hovering it keeps its text and
        // placement and moves the marker off the page element.
        if self.overlay.contains(x, y, self.document.viewport()) {
            trace!(x, y, "pointer over overlay");
            if let Some(cleared) = self.highlight.clear(&mut self.document) {
                self.emit(InspectorEvent::HighlightCleared { element: cleared });
            }
            return;
        }

        let Some(element) = self.document.element_from_point(x, y) else {
            trace!(x, y, "no element under pointer");
            return;
        };

        let raw = self.document.text_content(element).unwrap_or_default();
        let text = extract_text(&raw, self.options.variant.max_chars());

        let change = self.highlight.highlight(&mut self.document, element);
        if let Some(cleared) = change.cleared {
            self.emit(InspectorEvent::HighlightCleared { element: cleared });
        }
        if let Some(applied) = change.applied {
            self.emit(InspectorEvent::Highlighted { element: applied });
        }

        let rect = self.document.bounding_rect(element).unwrap_or_default();
        let placement = self.overlay.present(text, rect, self.document.viewport());
        debug!(
            %element,
            tag = self.document.tag(element).unwrap_or_default(),
            x,
            y,
            corner = %placement.corner,
            "tracked element"
        );

        self.emit(InspectorEvent::OverlayUpdated {
            text: self.overlay.text().to_string(),
            placement,
        });
    }

    fn pointer_left(&mut self) {
        if let Some(cleared) = self.highlight.clear(&mut self.document) {
            debug!(element = %cleared, "pointer left document");
            self.emit(InspectorEvent::HighlightCleared { element: cleared });
        }
    }

    fn load_document(&mut self, document: Document) {
        if let Some(stale) = self.highlight.forget() {
            debug!(element = %stale, "dropping highlight from replaced document");
        }

        let elements = document.len();
        self.document = document;
        info!(elements, "document loaded");
        self.emit(InspectorEvent::DocumentLoaded { elements });
    }

    fn copy_overlay(&mut self) {
        if !self.options.variant.copies_on_click() {
            debug!(variant = %self.options.variant, "overlay click ignored");
            return;
        }

        let text = self.overlay.text().to_string();
        if text.is_empty() {
            debug!("overlay empty, nothing to copy");
            return;
        }

        let chars = text.chars().count();
        let clipboard = Arc::clone(&self.clipboard);
        let command_tx = self.command_tx.clone();
        debug!(chars, "writing overlay text to clipboard");

        tokio::spawn(async move {
            let result = tokio::task::spawn_blocking(move || clipboard.write_text(&text))
                .await
                .unwrap_or_else(|e| Err(ClipboardError::Task(e.to_string())))
                .map(|()| chars);

            if command_tx
                .send(Command::ClipboardWritten(result))
                .await
                .is_err()
            {
                warn!("clipboard result dropped - inspector stopped?");
            }
        });
    }

    fn clipboard_written(&mut self, result: Result<usize, ClipboardError>) {
        match result {
            Ok(chars) => {
                info!(chars, "overlay text copied");
                self.emit(InspectorEvent::CopySucceeded { chars });
                if self
                    .notification
                    .show(self.options.notification_duration, &self.command_tx)
                {
                    self.emit(InspectorEvent::NotificationShown);
                }
            }
            Err(e) => {
                warn!(error = %e, "clipboard write failed");
                self.emit(InspectorEvent::CopyFailed {
                    error: e.to_string(),
                });
            }
        }
    }

    fn emit(&self, event: InspectorEvent) {
        debug!(%event, "emitting event");
        let _ = self.event_tx.send(event);
    }
}
