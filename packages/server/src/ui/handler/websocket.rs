//! WebSocket handler: live room snapshots for players and spectators.

use std::sync::Arc;

use axum::{
    extract::{
        Path, Query, State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::IntoResponse,
};
use futures_util::{sink::SinkExt, stream::StreamExt};
use serde::Deserialize;
use tokio::sync::mpsc;

use super::ApiError;
use crate::{
    domain::{RoomId, SubscriptionId},
    ui::state::AppState,
};

/// Query parameters for WebSocket connection
#[derive(Debug, Deserialize)]
pub struct WatchQuery {
    /// Only used for logging; watching a room does not join it.
    pub identity: Option<String>,
}

pub async fn websocket_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
    Path(room_id): Path<String>,
    Query(query): Query<WatchQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let room_id = RoomId::try_from(room_id)?;
    let watcher = query.identity.unwrap_or_else(|| "anonymous".to_string());

    // Create a channel for this watcher to receive room snapshots.
    // The subscription queues the current snapshot, so it is the first frame sent.
    let (tx, rx) = mpsc::unbounded_channel();
    let subscription = state.watch_room_usecase.subscribe(&room_id, tx).await?;

    tracing::info!(
        "'{}' is watching room '{}' (subscription {})",
        watcher,
        room_id,
        subscription
    );

    Ok(ws.on_upgrade(move |socket| handle_socket(socket, state, room_id, subscription, rx, watcher)))
}

/// Spawns a task that forwards pushed snapshots from the rx channel to the WebSocket sender.
///
/// The task ends when the room closes (all senders dropped) or the socket fails.
///
/// # Arguments
///
/// * `rx` - Channel receiver for room snapshots
/// * `sender` - WebSocket sink to send messages to this watcher
///
/// # Returns
///
/// A `JoinHandle` for the spawned task
fn pusher_loop(
    mut rx: mpsc::UnboundedReceiver<String>,
    mut sender: futures_util::stream::SplitSink<WebSocket, Message>,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if sender.send(Message::Text(msg.into())).await.is_err() {
                return;
            }
        }
        // 部屋が閉じられた
        let _ = sender.send(Message::Close(None)).await;
    })
}

async fn handle_socket(
    socket: WebSocket,
    state: Arc<AppState>,
    room_id: RoomId,
    subscription: SubscriptionId,
    rx: mpsc::UnboundedReceiver<String>,
    watcher: String,
) {
    let (sender, mut receiver) = socket.split();

    let watcher_clone = watcher.clone();

    // Watchers are read-only: incoming frames are only read to notice the close.
    let mut recv_task = tokio::spawn(async move {
        while let Some(msg) = receiver.next().await {
            let msg = match msg {
                Ok(msg) => msg,
                Err(e) => {
                    tracing::error!("WebSocket error: {}", e);
                    break;
                }
            };

            match msg {
                Message::Text(text) => {
                    tracing::debug!("Ignoring text from watcher '{}': {}", watcher_clone, text);
                }
                Message::Ping(_) => {
                    tracing::debug!("Received ping");
                    // Ping/pong is handled automatically by the WebSocket protocol
                }
                Message::Close(_) => {
                    tracing::info!("Watcher '{}' requested close", watcher_clone);
                    break;
                }
                _ => {}
            }
        }
    });

    let mut send_task = pusher_loop(rx, sender);

    // If any one of the tasks completes, abort the other
    tokio::select! {
        _ = &mut recv_task => send_task.abort(),
        _ = &mut send_task => recv_task.abort(),
    };

    state
        .watch_room_usecase
        .unsubscribe(&room_id, subscription)
        .await;
    tracing::info!("'{}' stopped watching room '{}'", watcher, room_id);
}
