//! Unix domain socket server for IPC
//!
//! Hosts load documents and forward input through request-response frames.
//! Subscribed clients additionally receive every inspector event as a push
//! frame on the same connection.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

use anyhow::{Context, Result};
use tokio::io::{AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::unix::OwnedReadHalf;
use tokio::net::{UnixListener, UnixStream};
use tokio::sync::{broadcast, mpsc, watch};
use tracing::{debug, error, info, warn};

use crate::config::Variant;
use crate::dom::Document;
use crate::events::InspectorEvent;
use crate::inspector::{Command, InspectorSnapshot};

use super::protocol::{DaemonStatus, Request, Response, MAX_FRAME_LEN};

/// Channels connecting the server to the inspector's control loop
#[derive(Clone)]
pub struct InspectorLink {
    pub command_tx: mpsc::Sender<Command>,
    pub event_tx: broadcast::Sender<InspectorEvent>,
    pub status_rx: watch::Receiver<InspectorSnapshot>,
    pub variant: Variant,
}

/// Shared server state
struct ServerState {
    link: InspectorLink,
    start_time: Instant,
}

/// A decoded frame from the client, or the reason it could not be decoded
enum Incoming {
    Request(Request),
    Malformed(String),
}

/// IPC Server handling client connections
pub struct Server {
    socket_path: PathBuf,
    listener: Option<UnixListener>,
    state: Arc<ServerState>,
    shutdown_tx: broadcast::Sender<()>,
}

impl Server {
    /// Create a new IPC server bound to `socket_path`
    pub fn new(socket_path: &Path, link: InspectorLink) -> Result<Self> {
        // Ensure parent directory exists
        if let Some(parent) = socket_path.parent() {
            std::fs::create_dir_all(parent).context("failed to create socket directory")?;
        }

        // Remove stale socket if it exists
        if socket_path.exists() {
            std::fs::remove_file(socket_path).context("failed to remove stale socket")?;
        }

        let listener = UnixListener::bind(socket_path).context("failed to bind Unix socket")?;

        // Set socket permissions to owner-only (0600)
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            std::fs::set_permissions(socket_path, std::fs::Permissions::from_mode(0o600))?;
        }

        let (shutdown_tx, _) = broadcast::channel(1);

        info!(?socket_path, "IPC server listening");

        Ok(Self {
            socket_path: socket_path.to_owned(),
            listener: Some(listener),
            state: Arc::new(ServerState {
                link,
                start_time: Instant::now(),
            }),
            shutdown_tx,
        })
    }

    /// Run the server, accepting connections
    pub async fn run(&self) -> Result<()> {
        let listener = self.listener.as_ref().context("server not initialized")?;

        loop {
            match listener.accept().await {
                Ok((stream, _addr)) => {
                    debug!("client connected");
                    let state = Arc::clone(&self.state);
                    let mut shutdown_rx = self.shutdown_tx.subscribe();

                    tokio::spawn(async move {
                        tokio::select! {
                            result = Self::handle_client(stream, state) => {
                                if let Err(e) = result {
                                    warn!(?e, "client handler error");
                                }
                            }
                            _ = shutdown_rx.recv() => {
                                debug!("client handler shutting down");
                            }
                        }
                    });
                }
                Err(e) => {
                    error!(?e, "accept error");
                }
            }
        }
    }

    /// Handle a single client connection
    async fn handle_client(stream: UnixStream, state: Arc<ServerState>) -> Result<()> {
        let (reader, mut writer) = stream.into_split();

        // Reads are not cancel-safe, so they run in their own task and the
        // writer side selects over decoded frames and event pushes.
        let (incoming_tx, mut incoming_rx) = mpsc::channel(16);
        let reader_task = tokio::spawn(Self::read_frames(reader, incoming_tx));

        let mut events: Option<broadcast::Receiver<InspectorEvent>> = None;

        let result = loop {
            tokio::select! {
                incoming = incoming_rx.recv() => {
                    let response = match incoming {
                        Some(Incoming::Request(request)) => {
                            debug!(?request, "received request");
                            if matches!(request, Request::Subscribe) && events.is_none() {
                                events = Some(state.link.event_tx.subscribe());
                                debug!("client subscribed to notifications");
                            }
                            Self::process_request(request, &state).await
                        }
                        Some(Incoming::Malformed(message)) => {
                            warn!(%message, "malformed request");
                            Response::error("bad_request", message)
                        }
                        None => break Ok(()),
                    };
                    if let Err(e) = Self::send_message(&mut writer, &response).await {
                        break Err(e);
                    }
                }
                event = next_event(&mut events) => {
                    match event {
                        Ok(event) => {
                            let push = Response::Event { event };
                            if let Err(e) = Self::send_message(&mut writer, &push).await {
                                break Err(e);
                            }
                        }
                        Err(broadcast::error::RecvError::Lagged(n)) => {
                            warn!(skipped = n, "subscriber lagged");
                        }
                        Err(broadcast::error::RecvError::Closed) => {
                            events = None;
                        }
                    }
                }
            }
        };

        reader_task.abort();
        result
    }

    /// Decode length-prefixed frames until EOF or an oversized frame
    async fn read_frames(mut reader: OwnedReadHalf, incoming_tx: mpsc::Sender<Incoming>) -> Result<()> {
        let mut len_buf = [0u8; 4];

        loop {
            // Read message length (4-byte little-endian)
            match reader.read_exact(&mut len_buf).await {
                Ok(_) => {}
                Err(e) if e.kind() == std::io::ErrorKind::UnexpectedEof => {
                    debug!("client disconnected");
                    return Ok(());
                }
                Err(e) => return Err(e.into()),
            }

            let len = u32::from_le_bytes(len_buf) as usize;
            if len > MAX_FRAME_LEN {
                warn!(len, "message too large, disconnecting");
                return Ok(());
            }

            // Read message body
            let mut msg_buf = vec![0u8; len];
            reader.read_exact(&mut msg_buf).await?;

            let incoming = match serde_json::from_slice::<Request>(&msg_buf) {
                Ok(request) => Incoming::Request(request),
                Err(e) => Incoming::Malformed(e.to_string()),
            };

            if incoming_tx.send(incoming).await.is_err() {
                return Ok(());
            }
        }
    }

    /// Send a length-prefixed JSON message
    async fn send_message<W, T>(writer: &mut W, msg: &T) -> Result<()>
    where
        W: AsyncWrite + Unpin,
        T: serde::Serialize,
    {
        let msg_bytes = serde_json::to_vec(msg)?;
        let msg_len = (msg_bytes.len() as u32).to_le_bytes();

        writer.write_all(&msg_len).await?;
        writer.write_all(&msg_bytes).await?;

        Ok(())
    }

    /// Process a request and return a response
    async fn process_request(request: Request, state: &ServerState) -> Response {
        match request {
            Request::Ping => Response::Pong,

            Request::GetStatus => {
                let snapshot = state.link.status_rx.borrow().clone();
                Response::Status(DaemonStatus::new(
                    state.link.variant.to_string(),
                    state.start_time.elapsed().as_secs(),
                    snapshot,
                ))
            }

            Request::LoadDocument { document } => match Document::from_snapshot(document) {
                Ok(document) => Self::forward(state, Command::LoadDocument(document)).await,
                Err(e) => {
                    warn!(error = %e, "rejected document");
                    Response::error("invalid_document", e.to_string())
                }
            },

            Request::Input { event } => Self::forward(state, Command::Input(event)).await,

            Request::Subscribe => Response::Subscribed,
        }
    }

    async fn forward(state: &ServerState, command: Command) -> Response {
        match state.link.command_tx.send(command).await {
            Ok(()) => Response::Accepted,
            Err(_) => Response::error("unavailable", "inspector is not running"),
        }
    }

    /// Gracefully shutdown the server
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(());

        // Remove socket file
        if self.socket_path.exists() {
            if let Err(e) = std::fs::remove_file(&self.socket_path) {
                warn!(?e, "failed to remove socket file");
            }
        }

        info!("IPC server shutdown complete");
    }
}

/// Next event for a subscribed client; never resolves when unsubscribed
async fn next_event(
    events: &mut Option<broadcast::Receiver<InspectorEvent>>,
) -> Result<InspectorEvent, broadcast::error::RecvError> {
    match events {
        Some(rx) => rx.recv().await,
        None => std::future::pending().await,
    }
}
