//! UseCase: 部屋の状態の購読

use std::sync::Arc;

use crate::domain::{PusherChannel, RoomId, RoomPusher, RoomRepository, SubscriptionId};

use super::{RoomActionError, lock_room};

/// 部屋の状態購読のユースケース
///
/// 購読しても部屋には参加しません（席・観戦者は変化しない）。
pub struct WatchRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    pusher: Arc<dyn RoomPusher>,
}

impl WatchRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, pusher: Arc<dyn RoomPusher>) -> Self {
        Self { repository, pusher }
    }

    /// Start pushing the state of a room to `sender`, beginning with the
    /// current snapshot.
    pub async fn subscribe(
        &self,
        room_id: &RoomId,
        sender: PusherChannel,
    ) -> Result<SubscriptionId, RoomActionError> {
        // 部屋のロック中に登録し、初回スナップショットが後続の更新より先に届くようにする
        let room = lock_room(self.repository.as_ref(), room_id).await?;

        let subscription = self.pusher.subscribe(&room, sender).await?;
        tracing::debug!("Room '{}': subscription {} started", room_id, subscription);
        Ok(subscription)
    }

    pub async fn unsubscribe(&self, room_id: &RoomId, subscription: SubscriptionId) {
        self.pusher.unsubscribe(room_id, subscription).await;
    }
}
