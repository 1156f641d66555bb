//! Daemon lifecycle

mod shutdown;

pub use shutdown::{ShutdownReason, ShutdownSignal};
