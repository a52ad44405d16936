//! Conversion logic between domain entities and DTOs.

use renju_shared::time::timestamp_to_rfc3339;

use crate::domain::{Identity, Move, PendingRequest, Room, Stone};
use crate::infrastructure::dto::{
    http::{MoveDto, PendingRequestDto, RoomSnapshotDto, RoomSummaryDto},
    websocket::{MessageType, RoomStateMessage},
};

fn seat_name(room: &Room, seat: Stone) -> Option<String> {
    room.player(seat).map(|identity| identity.as_str().to_string())
}

impl From<&Move> for MoveDto {
    fn from(model: &Move) -> Self {
        Self {
            row: model.row,
            col: model.col,
            stone: model.stone,
        }
    }
}

impl From<&PendingRequest> for PendingRequestDto {
    fn from(model: &PendingRequest) -> Self {
        Self {
            kind: model.kind,
            requester: model.requester.as_str().to_string(),
        }
    }
}

impl From<&Room> for RoomSummaryDto {
    fn from(room: &Room) -> Self {
        Self {
            id: room.id.as_str().to_string(),
            name: room.name.as_str().to_string(),
            black: seat_name(room, Stone::Black),
            white: seat_name(room, Stone::White),
            spectators: room.spectators().len(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
        }
    }
}

impl From<&Room> for RoomSnapshotDto {
    fn from(room: &Room) -> Self {
        let game = room.game();
        Self {
            id: room.id.as_str().to_string(),
            name: room.name.as_str().to_string(),
            created_at: timestamp_to_rfc3339(room.created_at.value()),
            board_size: game.size(),
            board: game.rows(),
            black: seat_name(room, Stone::Black),
            white: seat_name(room, Stone::White),
            spectators: room
                .spectators()
                .iter()
                .map(Identity::as_str)
                .map(str::to_string)
                .collect(),
            current_turn: game.current_turn(),
            winner: game.winner(),
            started: game.has_started(),
            history: game.history().iter().map(MoveDto::from).collect(),
            last_move: game.last_move().map(MoveDto::from),
            pending_request: room.pending_request().map(PendingRequestDto::from),
        }
    }
}

impl From<&Room> for RoomStateMessage {
    fn from(room: &Room) -> Self {
        Self {
            r#type: MessageType::RoomState,
            room: room.into(),
        }
    }
}
