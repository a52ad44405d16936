//! UseCase: 保留中のリクエストへの回答（承認・拒否）

use std::sync::Arc;

use crate::domain::{Resolution, RoomError, RoomId, RoomPusher, RoomRepository};

use super::{RoomActionError, lock_room, notify};

/// リクエスト回答のユースケース
pub struct ResolveRequestUseCase {
    repository: Arc<dyn RoomRepository>,
    pusher: Arc<dyn RoomPusher>,
}

impl ResolveRequestUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, pusher: Arc<dyn RoomPusher>) -> Self {
        Self { repository, pusher }
    }

    /// Approve or deny the pending request.
    ///
    /// An approved undo takes back the last stone; an approved swap
    /// exchanges the seats and restarts the game.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        approved: bool,
    ) -> Result<Resolution, RoomActionError> {
        let mut room = lock_room(self.repository.as_ref(), room_id).await?;

        let result = room.resolve_request(approved);
        // リクエストは失敗時も解除されている
        if !matches!(result, Err(RoomError::NoPendingRequest)) {
            notify(self.pusher.as_ref(), &room).await;
        }

        let resolution = result.inspect_err(|e| {
            tracing::debug!("Room '{}': resolving request failed: {}", room_id, e);
        })?;
        tracing::info!(
            "Room '{}': {} request by '{}' {}",
            room_id,
            resolution.request.kind,
            resolution.request.requester,
            if approved { "approved" } else { "denied" }
        );

        Ok(resolution)
    }
}
