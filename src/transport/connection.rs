//! WebSocket connection and event loop.
//!
//! One connection per browser. A tokio task owns the socket and
//! multiplexes two inputs: outgoing commands from the Rust API and
//! incoming messages from the remote end. Responses are matched to
//! their command by numeric id; unsolicited events are traced and
//! dropped.

// ============================================================================
// Imports
// ============================================================================

use std::sync::Arc;
use std::time::Duration;

use futures_util::stream::SplitSink;
use futures_util::{SinkExt, StreamExt};
use parking_lot::Mutex;
use rustc_hash::FxHashMap;
use serde_json::{from_str, to_string};
use tokio::net::TcpStream;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tokio_tungstenite::tungstenite::Message;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, connect_async};
use tracing::{debug, error, trace, warn};

use crate::error::{Error, Result};
use crate::identifiers::CommandId;
use crate::protocol::{Command, Event, Request, Response};

// ============================================================================
// Constants
// ============================================================================

/// Default timeout for command execution.
const DEFAULT_COMMAND_TIMEOUT: Duration = Duration::from_secs(30);

/// Maximum pending requests before rejecting new ones.
const MAX_PENDING_REQUESTS: usize = 64;

// ============================================================================
// Types
// ============================================================================

/// The underlying socket type.
type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Map of command ids to response channels.
type CorrelationMap = FxHashMap<CommandId, oneshot::Sender<Result<Response>>>;

// ============================================================================
// ConnectionCommand
// ============================================================================

/// Internal commands for the event loop.
enum ConnectionCommand {
    /// Send a request and wait for response.
    Send {
        request: Request,
        response_tx: oneshot::Sender<Result<Response>>,
    },
    /// Remove a timed-out correlation entry.
    RemoveCorrelation(CommandId),
    /// Shutdown the connection.
    Shutdown,
}

// ============================================================================
// Connection
// ============================================================================

/// WebSocket connection to the browser's BiDi endpoint.
///
/// Cheap to clone; all clones share the same socket and event loop.
/// All operations are non-blocking.
pub struct Connection {
    /// Channel for sending commands to the event loop.
    command_tx: mpsc::UnboundedSender<ConnectionCommand>,
    /// Correlation map (shared with the event loop).
    correlation: Arc<Mutex<CorrelationMap>>,
}

impl Clone for Connection {
    fn clone(&self) -> Self {
        Self {
            command_tx: self.command_tx.clone(),
            correlation: Arc::clone(&self.correlation),
        }
    }
}

impl Connection {
    /// Connects to a BiDi WebSocket endpoint.
    ///
    /// Spawns the event loop task internally.
    ///
    /// # Errors
    ///
    /// Returns [`Error::WebSocket`] if the endpoint does not accept.
    pub async fn connect(ws_url: &str) -> Result<Self> {
        let (ws_stream, _response) = connect_async(ws_url).await?;
        debug!(url = %ws_url, "WebSocket connected");

        Ok(Self::from_stream(ws_stream))
    }

    /// Creates a connection from an established WebSocket stream.
    fn from_stream(ws_stream: WsStream) -> Self {
        let (command_tx, command_rx) = mpsc::unbounded_channel();
        let correlation = Arc::new(Mutex::new(CorrelationMap::default()));

        tokio::spawn(Self::run_event_loop(
            ws_stream,
            command_rx,
            Arc::clone(&correlation),
        ));

        Self {
            command_tx,
            correlation,
        }
    }

    /// Sends a command and returns the success result, with the default
    /// timeout.
    ///
    /// # Errors
    ///
    /// - [`Error::ConnectionClosed`] if the connection is gone
    /// - [`Error::RequestTimeout`] if no response arrives in time
    /// - [`Error::WebDriver`] if the remote end reports an error
    pub async fn execute(&self, command: Command) -> Result<serde_json::Value> {
        self.execute_with_timeout(command, DEFAULT_COMMAND_TIMEOUT)
            .await
    }

    /// Sends a command with a custom timeout and returns the success
    /// result.
    pub async fn execute_with_timeout(
        &self,
        command: Command,
        request_timeout: Duration,
    ) -> Result<serde_json::Value> {
        let response = self
            .send_with_timeout(Request::new(command), request_timeout)
            .await?;
        response.into_result()
    }

    /// Sends a request and waits for the raw response.
    pub async fn send_with_timeout(
        &self,
        request: Request,
        request_timeout: Duration,
    ) -> Result<Response> {
        let command_id = request.id;

        // Check pending request limit
        {
            let correlation = self.correlation.lock();
            if correlation.len() >= MAX_PENDING_REQUESTS {
                warn!(
                    pending = correlation.len(),
                    max = MAX_PENDING_REQUESTS,
                    "Too many pending requests"
                );
                return Err(Error::protocol(format!(
                    "Too many pending requests: {}/{}",
                    correlation.len(),
                    MAX_PENDING_REQUESTS
                )));
            }
        }

        let (response_tx, response_rx) = oneshot::channel();

        self.command_tx
            .send(ConnectionCommand::Send {
                request,
                response_tx,
            })
            .map_err(|_| Error::ConnectionClosed)?;

        match timeout(request_timeout, response_rx).await {
            Ok(Ok(result)) => result,
            Ok(Err(_)) => Err(Error::ConnectionClosed),
            Err(_) => {
                // Timeout - clean up correlation entry
                let _ = self
                    .command_tx
                    .send(ConnectionCommand::RemoveCorrelation(command_id));

                Err(Error::request_timeout(
                    command_id,
                    request_timeout.as_millis() as u64,
                ))
            }
        }
    }

    /// Returns the number of pending requests.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.correlation.lock().len()
    }

    /// Shuts down the connection gracefully.
    ///
    /// Must be called explicitly; dropping a clone does not close the
    /// socket for the others.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(ConnectionCommand::Shutdown);
    }

    /// Event loop that handles WebSocket I/O.
    async fn run_event_loop(
        ws_stream: WsStream,
        mut command_rx: mpsc::UnboundedReceiver<ConnectionCommand>,
        correlation: Arc<Mutex<CorrelationMap>>,
    ) {
        let (mut ws_write, mut ws_read) = ws_stream.split();

        loop {
            tokio::select! {
                // Incoming messages from the remote end
                message = ws_read.next() => {
                    match message {
                        Some(Ok(Message::Text(text))) => {
                            Self::handle_incoming_message(&text, &correlation);
                        }

                        Some(Ok(Message::Close(_))) => {
                            debug!("WebSocket closed by remote");
                            break;
                        }

                        Some(Err(e)) => {
                            error!(error = %e, "WebSocket error");
                            break;
                        }

                        None => {
                            debug!("WebSocket stream ended");
                            break;
                        }

                        // Ignore Binary, Ping, Pong
                        _ => {}
                    }
                }

                // Commands from the Rust API
                command = command_rx.recv() => {
                    match command {
                        Some(ConnectionCommand::Send { request, response_tx }) => {
                            Self::handle_send_command(
                                request,
                                response_tx,
                                &mut ws_write,
                                &correlation,
                            ).await;
                        }

                        Some(ConnectionCommand::RemoveCorrelation(command_id)) => {
                            correlation.lock().remove(&command_id);
                            debug!(%command_id, "Removed timed-out correlation");
                        }

                        Some(ConnectionCommand::Shutdown) => {
                            debug!("Shutdown command received");
                            let _ = ws_write.close().await;
                            break;
                        }

                        None => {
                            debug!("Command channel closed");
                            break;
                        }
                    }
                }
            }
        }

        // Fail all pending requests on shutdown
        Self::fail_pending_requests(&correlation);

        debug!("Event loop terminated");
    }

    /// Handles an incoming text message from the remote end.
    fn handle_incoming_message(text: &str, correlation: &Arc<Mutex<CorrelationMap>>) {
        // Responses carry an id and a success/error type
        if let Ok(response) = from_str::<Response>(text) {
            let tx = correlation.lock().remove(&response.id);

            if let Some(tx) = tx {
                let _ = tx.send(Ok(response));
            } else {
                warn!(id = %response.id, "Response for unknown command");
            }

            return;
        }

        // Unsolicited events are not subscribed to; trace and drop
        if let Ok(event) = from_str::<Event>(text) {
            trace!(method = %event.method, "Ignoring event");
            return;
        }

        warn!(text = %text, "Failed to parse incoming message");
    }

    /// Handles a send command from the Rust API.
    async fn handle_send_command(
        request: Request,
        response_tx: oneshot::Sender<Result<Response>>,
        ws_write: &mut SplitSink<WsStream, Message>,
        correlation: &Arc<Mutex<CorrelationMap>>,
    ) {
        let command_id = request.id;

        let json = match to_string(&request) {
            Ok(j) => j,
            Err(e) => {
                let _ = response_tx.send(Err(Error::Json(e)));
                return;
            }
        };

        // Store correlation before sending
        correlation.lock().insert(command_id, response_tx);

        if let Err(e) = ws_write.send(Message::Text(json.into())).await
            && let Some(tx) = correlation.lock().remove(&command_id)
        {
            let _ = tx.send(Err(Error::connection(e.to_string())));
        }

        trace!(%command_id, "Request sent");
    }

    /// Fails all pending requests with ConnectionClosed error.
    fn fail_pending_requests(correlation: &Arc<Mutex<CorrelationMap>>) {
        let pending: Vec<_> = correlation.lock().drain().collect();
        let count = pending.len();

        for (_, tx) in pending {
            let _ = tx.send(Err(Error::ConnectionClosed));
        }

        if count > 0 {
            debug!(count, "Failed pending requests on shutdown");
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constants() {
        assert_eq!(DEFAULT_COMMAND_TIMEOUT.as_secs(), 30);
        assert_eq!(MAX_PENDING_REQUESTS, 64);
    }

    #[test]
    fn test_response_routing_resolves_pending_request() {
        let correlation: Arc<Mutex<CorrelationMap>> = Arc::new(Mutex::new(Default::default()));
        let (tx, mut rx) = oneshot::channel();
        let id = CommandId::next();
        correlation.lock().insert(id, tx);

        let text = format!(r#"{{"type":"success","id":{},"result":{{}}}}"#, id.get());
        Connection::handle_incoming_message(&text, &correlation);

        let response = rx.try_recv().expect("resolved").expect("ok");
        assert!(response.is_success());
        assert!(correlation.lock().is_empty());
    }

    #[test]
    fn test_event_message_leaves_correlation_untouched() {
        let correlation: Arc<Mutex<CorrelationMap>> = Arc::new(Mutex::new(Default::default()));
        let (tx, mut rx) = oneshot::channel();
        let id = CommandId::next();
        correlation.lock().insert(id, tx);

        let text = r#"{"type":"event","method":"log.entryAdded","params":{}}"#;
        Connection::handle_incoming_message(text, &correlation);

        assert!(rx.try_recv().is_err());
        assert_eq!(correlation.lock().len(), 1);
    }

    #[test]
    fn test_fail_pending_requests_drains_map() {
        let correlation: Arc<Mutex<CorrelationMap>> = Arc::new(Mutex::new(Default::default()));
        let (tx, mut rx) = oneshot::channel();
        correlation.lock().insert(CommandId::next(), tx);

        Connection::fail_pending_requests(&correlation);

        assert!(correlation.lock().is_empty());
        let result = rx.try_recv().expect("resolved");
        assert!(matches!(result, Err(Error::ConnectionClosed)));
    }
}
