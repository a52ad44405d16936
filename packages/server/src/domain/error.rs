//! Domain error types.
//!
//! Errors are plain values: every rejected operation leaves the state it was
//! applied to untouched, so callers only need to report the failure.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::value_object::RequestKind;

/// Stable, machine-readable error code shared by every error of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorKind {
    InvalidPosition,
    OccupiedCell,
    GameOver,
    ForbiddenMove,
    NotYourTurn,
    GameNotReady,
    RequestPending,
    RequestAlreadyPending,
    NoPendingRequest,
    UnknownRequestKind,
    NoHistory,
    RoomNotFound,
    NotAPlayer,
    GameAlreadyStarted,
    InvalidInput,
    Internal,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::InvalidPosition => "InvalidPosition",
            ErrorKind::OccupiedCell => "OccupiedCell",
            ErrorKind::GameOver => "GameOver",
            ErrorKind::ForbiddenMove => "ForbiddenMove",
            ErrorKind::NotYourTurn => "NotYourTurn",
            ErrorKind::GameNotReady => "GameNotReady",
            ErrorKind::RequestPending => "RequestPending",
            ErrorKind::RequestAlreadyPending => "RequestAlreadyPending",
            ErrorKind::NoPendingRequest => "NoPendingRequest",
            ErrorKind::UnknownRequestKind => "UnknownRequestKind",
            ErrorKind::NoHistory => "NoHistory",
            ErrorKind::RoomNotFound => "RoomNotFound",
            ErrorKind::NotAPlayer => "NotAPlayer",
            ErrorKind::GameAlreadyStarted => "GameAlreadyStarted",
            ErrorKind::InvalidInput => "InvalidInput",
            ErrorKind::Internal => "Internal",
        }
    }
}

/// Board-legality errors raised by the game engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("Position ({row}, {col}) is outside the board")]
    InvalidPosition { row: i32, col: i32 },

    #[error("Position ({row}, {col}) is already taken")]
    OccupiedCell { row: usize, col: usize },

    #[error("Game already finished")]
    GameOver,

    #[error("Forbidden move (3-3): black may not make two open threes at once")]
    ForbiddenMove,

    #[error("No moves to undo")]
    NoHistory,
}

impl GameError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            GameError::InvalidPosition { .. } => ErrorKind::InvalidPosition,
            GameError::OccupiedCell { .. } => ErrorKind::OccupiedCell,
            GameError::GameOver => ErrorKind::GameOver,
            GameError::ForbiddenMove => ErrorKind::ForbiddenMove,
            GameError::NoHistory => ErrorKind::NoHistory,
        }
    }
}

/// Errors raised by a room when authorizing an action.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomError {
    #[error("It is not your turn")]
    NotYourTurn,

    #[error("Waiting for an opponent to take the other seat")]
    GameNotReady,

    #[error("Gameplay is paused while a {0} request is pending")]
    RequestPending(RequestKind),

    #[error("A {0} request is already pending")]
    RequestAlreadyPending(RequestKind),

    #[error("There is no pending request")]
    NoPendingRequest,

    #[error("Only seated players may do this")]
    NotAPlayer,

    #[error("Seats can only be swapped before the first move")]
    GameAlreadyStarted,

    #[error(transparent)]
    Game(#[from] GameError),
}

impl RoomError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RoomError::NotYourTurn => ErrorKind::NotYourTurn,
            RoomError::GameNotReady => ErrorKind::GameNotReady,
            RoomError::RequestPending(_) => ErrorKind::RequestPending,
            RoomError::RequestAlreadyPending(_) => ErrorKind::RequestAlreadyPending,
            RoomError::NoPendingRequest => ErrorKind::NoPendingRequest,
            RoomError::NotAPlayer => ErrorKind::NotAPlayer,
            RoomError::GameAlreadyStarted => ErrorKind::GameAlreadyStarted,
            RoomError::Game(e) => e.kind(),
        }
    }
}

/// Validation errors of value objects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    #[error("Invalid identity '{0}'")]
    InvalidIdentity(String),

    #[error("Invalid room name '{0}'")]
    InvalidRoomName(String),

    #[error("Invalid room id")]
    InvalidRoomId,

    #[error("Unknown request kind '{0}'")]
    UnknownRequestKind(String),
}

impl ValueError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ValueError::UnknownRequestKind(_) => ErrorKind::UnknownRequestKind,
            _ => ErrorKind::InvalidInput,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_error_forwards_game_error_kind() {
        // テスト項目: RoomError::Game は内側の GameError の種別を返す
        // given (前提条件):
        let error: RoomError = GameError::ForbiddenMove.into();

        // then (期待する結果):
        assert_eq!(error.kind(), ErrorKind::ForbiddenMove);
        assert_eq!(error.to_string(), GameError::ForbiddenMove.to_string());
    }

    #[test]
    fn test_error_kind_serializes_as_code() {
        // テスト項目: ErrorKind はコード文字列としてシリアライズされる
        // when (操作):
        let json = serde_json::to_string(&ErrorKind::RequestAlreadyPending).unwrap();

        // then (期待する結果):
        assert_eq!(json, "\"RequestAlreadyPending\"");
        assert_eq!(ErrorKind::RequestAlreadyPending.as_str(), "RequestAlreadyPending");
    }
}
