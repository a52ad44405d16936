//! UseCase: 部屋の作成

use std::sync::Arc;

use renju_shared::time::Clock;

use crate::domain::{
    Identity, Role, Room, RoomId, RoomIdFactory, RoomName, RoomRepository, Timestamp,
};

/// A freshly registered room and the creator's seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatedRoom {
    pub room_id: RoomId,
    pub role: Role,
}

/// 部屋作成のユースケース
pub struct CreateRoomUseCase {
    /// Repository（データアクセス層の抽象化）
    repository: Arc<dyn RoomRepository>,
    clock: Arc<dyn Clock>,
    /// Side length of the board of every room created here.
    board_size: usize,
}

impl CreateRoomUseCase {
    pub fn new(
        repository: Arc<dyn RoomRepository>,
        clock: Arc<dyn Clock>,
        board_size: usize,
    ) -> Self {
        Self {
            repository,
            clock,
            board_size,
        }
    }

    /// Create a room with `creator` seated as black and register it.
    pub async fn execute(&self, name: RoomName, creator: Identity) -> CreatedRoom {
        let room_id = RoomIdFactory::generate();
        let room = Room::new(
            room_id.clone(),
            name,
            creator,
            Timestamp::new(self.clock.now_millis()),
            self.board_size,
        );
        self.repository.insert(room).await;

        tracing::info!("Room '{}' created", room_id);
        CreatedRoom {
            room_id,
            role: Role::Black,
        }
    }
}
