//! UseCase: 部屋の詳細取得

use std::sync::Arc;

use crate::domain::{Room, RoomId, RoomRepository};

use super::{RoomActionError, lock_room};

/// 部屋詳細取得のユースケース
pub struct GetRoomDetailUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl GetRoomDetailUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Consistent snapshot of one room.
    pub async fn execute(&self, room_id: &RoomId) -> Result<Room, RoomActionError> {
        let room = lock_room(self.repository.as_ref(), room_id).await?;
        Ok(Room::clone(&room))
    }
}
