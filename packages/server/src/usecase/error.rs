//! Use-case error types.

use thiserror::Error;

use crate::domain::{ErrorKind, PushError, RoomError, RoomId};

/// Error of any use case that acts on an existing room.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoomActionError {
    /// The room does not exist, or was removed while the request was in flight.
    #[error("Room '{0}' not found")]
    RoomNotFound(RoomId),

    #[error(transparent)]
    Room(#[from] RoomError),

    #[error(transparent)]
    Push(#[from] PushError),
}

impl RoomActionError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RoomActionError::RoomNotFound(_) => ErrorKind::RoomNotFound,
            RoomActionError::Room(e) => e.kind(),
            RoomActionError::Push(_) => ErrorKind::Internal,
        }
    }
}
