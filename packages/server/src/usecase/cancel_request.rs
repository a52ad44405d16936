//! UseCase: 保留中のリクエストの取り下げ

use std::sync::Arc;

use crate::domain::{PendingRequest, RoomId, RoomPusher, RoomRepository};

use super::{RoomActionError, lock_room, notify};

/// リクエスト取り下げのユースケース
pub struct CancelRequestUseCase {
    repository: Arc<dyn RoomRepository>,
    pusher: Arc<dyn RoomPusher>,
}

impl CancelRequestUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, pusher: Arc<dyn RoomPusher>) -> Self {
        Self { repository, pusher }
    }

    /// Withdraw the pending request, whoever made it.
    ///
    /// Returns the withdrawn request; `None` when there was nothing to cancel.
    pub async fn execute(
        &self,
        room_id: &RoomId,
    ) -> Result<Option<PendingRequest>, RoomActionError> {
        let mut room = lock_room(self.repository.as_ref(), room_id).await?;

        let cancelled = room.cancel_request();
        if let Some(request) = &cancelled {
            tracing::info!(
                "Room '{}': {} request by '{}' cancelled",
                room_id,
                request.kind,
                request.requester
            );
            notify(self.pusher.as_ref(), &room).await;
        }

        Ok(cancelled)
    }
}
