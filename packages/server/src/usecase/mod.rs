//! UseCase layer: one struct per operation exposed by the server.
//!
//! Every use case resolves the room through the registry, then performs the
//! whole operation while holding that room's lock, so operations on one room
//! are applied one at a time in arrival order.

mod cancel_request;
mod create_room;
mod error;
mod get_room_detail;
mod join_room;
mod leave_room;
mod list_rooms;
mod make_request;
mod place_stone;
mod reset_game;
mod resolve_request;
mod watch_room;

pub use cancel_request::CancelRequestUseCase;
pub use create_room::{CreateRoomUseCase, CreatedRoom};
pub use error::RoomActionError;
pub use get_room_detail::GetRoomDetailUseCase;
pub use join_room::JoinRoomUseCase;
pub use leave_room::{LeaveOutcome, LeaveRoomUseCase};
pub use list_rooms::ListRoomsUseCase;
pub use make_request::MakeRequestUseCase;
pub use place_stone::{PlaceStoneUseCase, PlacedStone};
pub use reset_game::ResetGameUseCase;
pub use resolve_request::ResolveRequestUseCase;
pub use watch_room::WatchRoomUseCase;

use tokio::sync::OwnedMutexGuard;

use crate::domain::{Room, RoomId, RoomPusher, RoomRepository};

/// Resolve a room id and lock the room.
///
/// A registry miss, or a room the registry dropped while we waited for its
/// lock, is [`RoomActionError::RoomNotFound`].
async fn lock_room(
    repository: &dyn RoomRepository,
    room_id: &RoomId,
) -> Result<OwnedMutexGuard<Room>, RoomActionError> {
    let Some(shared) = repository.get(room_id).await else {
        tracing::debug!("Room '{}' not found", room_id);
        return Err(RoomActionError::RoomNotFound(room_id.clone()));
    };

    let room = shared.lock_owned().await;
    if room.is_closed() {
        tracing::debug!("Room '{}' was removed while waiting for its lock", room_id);
        return Err(RoomActionError::RoomNotFound(room_id.clone()));
    }
    Ok(room)
}

/// Push the new state of `room` to its watchers.
///
/// Called with the room lock held so watchers see updates in order.
/// A failed push never fails the operation that caused it.
async fn notify(pusher: &dyn RoomPusher, room: &Room) {
    if let Err(e) = pusher.publish(room).await {
        tracing::warn!("Failed to push state of room '{}': {}", room.id, e);
    }
}
