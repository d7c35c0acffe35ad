/**
 * Websocket Upgrade Handler and Connection Actor
 *
 * `GET /ws` upgrades the HTTP connection and hands the socket to
 * `run_connection`, which splits it into:
 *
 * - a writer task that owns the sink and drains the per-connection
 *   mpsc queue (anything holding a `ConnectionHandle` can enqueue)
 * - a forwarder task that copies broadcast presence events into that
 *   same queue, so every socket sees presence traffic whether or not
 *   it has joined
 * - the reader loop, which parses client frames and feeds them to the
 *   session state machine
 *
 * Unparseable frames are logged and skipped; only a transport error or
 * a close frame ends the connection.
 */

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::Response,
};
use futures_util::{stream::SplitSink, SinkExt, StreamExt};
use tokio::sync::{broadcast, mpsc};

use crate::backend::presence::ConnectionHandle;
use crate::backend::server::state::AppState;
use crate::backend::ws::protocol::{ClientEvent, ServerEvent};
use crate::backend::ws::session::ChatSession;

/// GET /ws - upgrade to the chat protocol
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<AppState>,
) -> Response {
    ws.on_upgrade(move |socket| run_connection(socket, state))
}

/// Drive one socket for its whole lifetime
async fn run_connection(socket: WebSocket, state: AppState) {
    let (ws_sender, mut ws_receiver) = socket.split();
    let (tx, rx) = mpsc::unbounded_channel::<ServerEvent>();

    let handle = ConnectionHandle::new(tx.clone());
    let connection_id = handle.id();
    let mut session = ChatSession::new(
        state.registry.clone(),
        state.broadcaster.clone(),
        state.messages.clone(),
        state.profiles.clone(),
        handle,
    );

    tracing::info!("Websocket connected: {}", connection_id);

    // Writer task: owns the sink, serializes queued events
    let writer_handle = tokio::spawn(writer_task(ws_sender, rx));

    // Forwarder task: presence broadcasts go to every socket
    let events = state.broadcaster.subscribe();
    let forward_tx = tx.clone();
    let forwarder_handle = tokio::spawn(forward_broadcasts(events, forward_tx));

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientEvent>(&text) {
                Ok(event) => session.handle_event(event).await,
                Err(e) => {
                    tracing::debug!(
                        "Dropping unparseable frame on {}: {} ({})",
                        connection_id,
                        text.chars().take(100).collect::<String>(),
                        e
                    );
                }
            },
            Ok(Message::Ping(_)) | Ok(Message::Pong(_)) => {
                // Axum answers pings for us
            }
            Ok(Message::Binary(_)) => {
                tracing::debug!("Ignoring binary frame on {}", connection_id);
            }
            Ok(Message::Close(frame)) => {
                tracing::info!("Client closed {}: {:?}", connection_id, frame);
                break;
            }
            Err(e) => {
                tracing::warn!("Websocket error on {}: {}", connection_id, e);
                break;
            }
        }
    }

    session.on_disconnect().await;

    writer_handle.abort();
    forwarder_handle.abort();

    tracing::info!("Websocket disconnected: {}", connection_id);
}

/// Writer task: receives events from the mpsc queue and sends them as
/// JSON text frames
async fn writer_task(
    mut ws_sender: SplitSink<WebSocket, Message>,
    mut rx: mpsc::UnboundedReceiver<ServerEvent>,
) {
    while let Some(event) = rx.recv().await {
        let payload = match serde_json::to_string(&event) {
            Ok(payload) => payload,
            Err(e) => {
                tracing::error!("Failed to serialize server event: {}", e);
                continue;
            }
        };

        if ws_sender.send(Message::Text(payload.into())).await.is_err() {
            // Sink broken, the reader loop will notice shortly
            break;
        }
    }
}

/// Copy broadcast events into this connection's queue
async fn forward_broadcasts(
    mut events: broadcast::Receiver<ServerEvent>,
    tx: mpsc::UnboundedSender<ServerEvent>,
) {
    loop {
        match events.recv().await {
            Ok(event) => {
                if tx.send(event).is_err() {
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                // Skipped deltas are fine, the next online-users
                // snapshot resynchronizes the client
                tracing::warn!("Broadcast forwarder lagged, skipped {} events", skipped);
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
