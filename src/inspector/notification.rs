//! Copy acknowledgement with a single-shot hide timer
//!
//! Showing while already visible cancels the pending timer and schedules a
//! fresh one. Each schedule bumps a generation so an expiry that was already
//! queued before the cancel is recognised as stale and ignored.

use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{sleep_until, Instant};
use tracing::{debug, warn};

use super::controller::Command;

/// Message shown by the host in the notification node
pub const NOTIFICATION_TEXT: &str = "Copied to clipboard";

#[derive(Debug, Default)]
pub struct Notification {
    visible: bool,
    generation: u64,
    timer: Option<JoinHandle<()>>,
}

impl Notification {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    /// Show and (re)start the hide timer
    ///
    /// Returns true when the notification was hidden before this call.
    /// Must be called from within a tokio runtime.
    pub fn show(&mut self, duration: Duration, command_tx: &mpsc::Sender<Command>) -> bool {
        self.cancel();
        self.generation += 1;

        let generation = self.generation;
        let deadline = Instant::now() + duration;
        let command_tx = command_tx.clone();
        self.timer = Some(tokio::spawn(async move {
            sleep_until(deadline).await;
            if command_tx
                .send(Command::NotificationExpired { generation })
                .await
                .is_err()
            {
                warn!(generation, "notification expiry dropped - inspector stopped?");
            }
        }));

        debug!(generation, ?duration, "notification timer scheduled");
        !std::mem::replace(&mut self.visible, true)
    }

    /// Hide if `generation` is the latest schedule; returns true if hidden now
    pub fn expire(&mut self, generation: u64) -> bool {
        if generation != self.generation {
            debug!(generation, current = self.generation, "stale notification expiry");
            return false;
        }
        self.timer = None;
        std::mem::replace(&mut self.visible, false)
    }

    fn cancel(&mut self) {
        if let Some(timer) = self.timer.take() {
            timer.abort();
        }
    }
}

impl Drop for Notification {
    fn drop(&mut self) {
        self.cancel();
    }
}
