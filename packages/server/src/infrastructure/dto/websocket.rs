//! WebSocket message DTOs.

use serde::{Deserialize, Serialize};

use super::http::RoomSnapshotDto;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageType {
    RoomState,
    RoomClosed,
}

/// Pushed on subscribe and after every change of the room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomStateMessage {
    pub r#type: MessageType,
    pub room: RoomSnapshotDto,
}

/// Pushed once when the room is removed from the registry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomClosedMessage {
    pub r#type: MessageType,
    pub room_id: String,
}
