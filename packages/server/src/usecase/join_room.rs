//! UseCase: 部屋への参加（再接続を含む）

use std::sync::Arc;

use crate::domain::{Identity, Role, RoomId, RoomPusher, RoomRepository};

use super::{RoomActionError, lock_room, notify};

/// 部屋参加のユースケース
pub struct JoinRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    pusher: Arc<dyn RoomPusher>,
}

impl JoinRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, pusher: Arc<dyn RoomPusher>) -> Self {
        Self { repository, pusher }
    }

    /// Join a room and return the assigned role.
    ///
    /// Joining again with an identity already in the room is a reconnect:
    /// the current role is returned and nothing changes.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        identity: Identity,
    ) -> Result<Role, RoomActionError> {
        let mut room = lock_room(self.repository.as_ref(), room_id).await?;

        if let Some(role) = room.role_of(&identity) {
            tracing::info!("'{}' reconnected to room '{}' as {}", identity, room_id, role);
            return Ok(role);
        }

        let role = room.join(identity.clone());
        tracing::info!("'{}' joined room '{}' as {}", identity, room_id, role);
        notify(self.pusher.as_ref(), &room).await;

        Ok(role)
    }
}
