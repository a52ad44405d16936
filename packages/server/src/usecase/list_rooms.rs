//! UseCase: 部屋一覧の取得

use std::sync::Arc;

use crate::domain::{Room, RoomRepository};

/// 部屋一覧取得のユースケース
pub struct ListRoomsUseCase {
    repository: Arc<dyn RoomRepository>,
}

impl ListRoomsUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>) -> Self {
        Self { repository }
    }

    /// Snapshot of every live room, oldest first.
    pub async fn execute(&self) -> Vec<Room> {
        let mut rooms = self.repository.list().await;
        rooms.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.id.as_str().cmp(b.id.as_str()))
        });
        rooms
    }
}
