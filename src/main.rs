//! hover-inspectord: Background daemon behind the hover text inspector
//!
//! A host page bridge uploads a layout snapshot and streams raw input. The
//! daemon provides:
//! - A modifier gate (primary modifier + Shift) that arms tracking
//! - Hit-testing, highlight and overlay placement for the hovered element
//! - Click-to-copy of the overlay text with a timed acknowledgement
//! - IPC over a Unix socket for input, status queries and effect streaming

mod clipboard;
mod config;
mod dom;
mod events;
mod gate;
mod inspector;
mod ipc;
mod lifecycle;

use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::{broadcast, mpsc};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use crate::clipboard::SystemClipboard;
use crate::config::Config;
use crate::events::InspectorEvent;
use crate::inspector::{Inspector, InspectorOptions};
use crate::ipc::{InspectorLink, Server};
use crate::lifecycle::{ShutdownReason, ShutdownSignal};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "hover-inspectord starting"
    );

    // Load configuration
    let config = Config::load().context("failed to load configuration")?;
    config
        .ensure_dirs()
        .context("failed to create data directory")?;
    info!(
        socket_path = ?config.socket_path,
        variant = %config.variant,
        primary_key = %config.primary_key,
        "configuration loaded"
    );

    // Register signal handlers before anything can block
    let mut shutdown = ShutdownSignal::new().context("failed to register signal handlers")?;

    // Host requests and task completions -> inspector
    let (command_tx, command_rx) = mpsc::channel(256);
    // Inspector -> subscribed hosts
    let (event_tx, _event_rx) = broadcast::channel::<InspectorEvent>(256);

    let mut inspector = Inspector::new(
        InspectorOptions::from(&config),
        Arc::new(SystemClipboard::new()),
        command_tx.clone(),
        event_tx.clone(),
    );

    let server = Server::new(
        &config.socket_path,
        InspectorLink {
            command_tx,
            event_tx,
            status_rx: inspector.status(),
            variant: config.variant,
        },
    )
    .context("failed to start IPC server")?;

    info!("daemon initialized, entering main loop");

    // Main event loop
    tokio::select! {
        // Run the inspector (processes host input)
        _ = inspector.run(command_rx) => {
            info!("inspector exited");
        }

        // Run the IPC server (accepts host connections)
        result = server.run() => {
            if let Err(e) = result {
                error!(?e, "IPC server error");
            }
        }

        // Wait for shutdown signal
        reason = shutdown.wait() => {
            let signal = match reason {
                ShutdownReason::Terminate => "SIGTERM",
                ShutdownReason::Interrupt => "SIGINT",
            };
            info!(signal, "shutdown signal received");
        }
    }

    // Cleanup
    info!("shutting down...");

    server.shutdown().await;

    info!("hover-inspectord stopped");

    Ok(())
}
