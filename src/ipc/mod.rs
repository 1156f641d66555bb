//! IPC module for host-daemon communication

mod protocol;
mod server;

pub use server::{InspectorLink, Server};
