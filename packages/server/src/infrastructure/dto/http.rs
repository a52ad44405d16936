//! HTTP API DTOs.

use serde::{Deserialize, Serialize};

use crate::domain::{ErrorKind, RequestKind, Role, Stone};

// ========================================
// Requests
// ========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    pub name: String,
    pub creator: String,
}

/// Body of join, leave and reset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IdentityRequest {
    pub identity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceStoneRequest {
    pub identity: String,
    pub row: i32,
    pub col: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeRequestRequest {
    pub identity: String,
    /// `"undo"` or `"swap"`
    pub kind: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequestRequest {
    pub approved: bool,
}

// ========================================
// Responses
// ========================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AckResponse {
    pub ok: bool,
    pub message: String,
}

impl AckResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            ok: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomResponse {
    pub ok: bool,
    pub room_id: String,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JoinRoomResponse {
    pub ok: bool,
    pub role: Role,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LeaveRoomResponse {
    pub ok: bool,
    pub forfeit_winner: Option<Stone>,
    pub room_removed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaceStoneResponse {
    pub ok: bool,
    pub stone: Stone,
    pub winner: Option<Stone>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MakeRequestResponse {
    pub ok: bool,
    pub kind: RequestKind,
    /// True when the request took effect without waiting for consent.
    pub executed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolveRequestResponse {
    pub ok: bool,
    pub kind: RequestKind,
    pub approved: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub ok: bool,
    pub error: ErrorBody,
}

/// Room list entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSummaryDto {
    pub id: String,
    pub name: String,
    pub black: Option<String>,
    pub white: Option<String>,
    pub spectators: usize,
    pub created_at: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveDto {
    pub row: usize,
    pub col: usize,
    pub stone: Stone,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingRequestDto {
    pub kind: RequestKind,
    pub requester: String,
}

/// Full room state, served by the detail endpoint and pushed to watchers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomSnapshotDto {
    pub id: String,
    pub name: String,
    pub created_at: String,
    pub board_size: usize,
    /// One string per row, `.` empty, `B` black, `W` white.
    pub board: Vec<String>,
    pub black: Option<String>,
    pub white: Option<String>,
    pub spectators: Vec<String>,
    pub current_turn: Stone,
    pub winner: Option<Stone>,
    pub started: bool,
    pub history: Vec<MoveDto>,
    pub last_move: Option<MoveDto>,
    pub pending_request: Option<PendingRequestDto>,
}
