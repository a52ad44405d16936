//! Room state push interface.
//!
//! Clients that watch a room receive a fresh snapshot after every change.
//! The concrete transport lives in the infrastructure layer.

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::mpsc;

use super::{Room, RoomId};

/// Outbound channel of one subscriber (serialized messages).
pub type PusherChannel = mpsc::UnboundedSender<String>;

/// Handle identifying one subscription to a room.
pub type SubscriptionId = u64;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PushError {
    #[error("Failed to serialize room snapshot: {0}")]
    Serialization(String),
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait RoomPusher: Send + Sync {
    /// Register `sender` as a watcher of `room` and send it the current snapshot.
    async fn subscribe(
        &self,
        room: &Room,
        sender: PusherChannel,
    ) -> Result<SubscriptionId, PushError>;

    async fn unsubscribe(&self, room_id: &RoomId, subscription: SubscriptionId);

    /// Send the current snapshot of `room` to all of its watchers.
    ///
    /// Returns the number of watchers reached.
    async fn publish(&self, room: &Room) -> Result<usize, PushError>;

    /// Drop every watcher of a room that no longer exists.
    async fn close_room(&self, room_id: &RoomId);
}
