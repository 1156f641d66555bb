//! IPC message protocol definitions
//!
//! All messages are JSON-encoded, prefixed with a 4-byte little-endian length.

use serde::{Deserialize, Serialize};

use crate::dom::DocumentSnapshot;
use crate::events::InspectorEvent;
use crate::inspector::{InputEvent, InspectorSnapshot, HIGHLIGHT_CLASS};

/// Largest frame either side may send
pub const MAX_FRAME_LEN: usize = 1024 * 1024;

/// Requests from a host to the daemon
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Request {
    /// Request current inspector status
    GetStatus,

    /// Replace the page layout the inspector hit-tests against
    LoadDocument { document: DocumentSnapshot },

    /// Forward one input event
    Input { event: InputEvent },

    /// Ping to check connectivity
    Ping,

    /// Subscribe to inspector event notifications
    Subscribe,
}

/// Messages from daemon to host
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Response {
    /// Current inspector status
    Status(DaemonStatus),

    /// Request was queued for the inspector
    Accepted,

    /// Pong response to ping
    Pong,

    /// Subscription confirmed
    Subscribed,

    /// Pushed to subscribed clients for every inspector event
    Event { event: InspectorEvent },

    /// Error response
    Error { code: String, message: String },
}

impl Response {
    pub fn error(code: &str, message: impl Into<String>) -> Self {
        Response::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

/// Names the host must use when mirroring effects onto the page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HostBindings {
    pub overlay_element_id: String,
    pub highlight_class: String,
    pub notification_text: String,
}

impl Default for HostBindings {
    fn default() -> Self {
        Self {
            overlay_element_id: crate::inspector::OVERLAY_ELEMENT_ID.to_string(),
            highlight_class: HIGHLIGHT_CLASS.to_string(),
            notification_text: crate::inspector::NOTIFICATION_TEXT.to_string(),
        }
    }
}

/// Full daemon status snapshot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DaemonStatus {
    /// Daemon version
    pub version: String,

    /// Active variant name
    pub variant: String,

    /// Uptime in seconds
    pub uptime_secs: u64,

    pub bindings: HostBindings,

    /// Inspector state
    pub inspector: InspectorSnapshot,
}

impl DaemonStatus {
    pub fn new(variant: impl Into<String>, uptime_secs: u64, inspector: InspectorSnapshot) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            variant: variant.into(),
            uptime_secs,
            bindings: HostBindings::default(),
            inspector,
        }
    }
}
