//! UseCase: 対局のリセット

use std::sync::Arc;

use crate::domain::{Identity, RoomError, RoomId, RoomPusher, RoomRepository};

use super::{RoomActionError, lock_room, notify};

/// 対局リセットのユースケース
pub struct ResetGameUseCase {
    repository: Arc<dyn RoomRepository>,
    pusher: Arc<dyn RoomPusher>,
}

impl ResetGameUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, pusher: Arc<dyn RoomPusher>) -> Self {
        Self { repository, pusher }
    }

    /// Clear the board and any pending request. Seated players only.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        identity: &Identity,
    ) -> Result<(), RoomActionError> {
        let mut room = lock_room(self.repository.as_ref(), room_id).await?;

        if room.seat_of(identity).is_none() {
            tracing::debug!(
                "Room '{}': reset by '{}' rejected: not a player",
                room_id,
                identity
            );
            return Err(RoomError::NotAPlayer.into());
        }

        room.reset_game();
        tracing::info!("Room '{}': game reset by '{}'", room_id, identity);
        notify(self.pusher.as_ref(), &room).await;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        domain::{RequestKind, RoomRepository, Stone},
        usecase::test_support::{identity, quiet_pusher, repository_with_players},
    };

    #[tokio::test]
    async fn test_player_can_reset_game() {
        // テスト項目: プレイヤーがリセットすると盤面と保留中のリクエストがクリアされる
        // given (前提条件):
        let (repository, room_id) = repository_with_players().await;
        {
            let room = repository.get(&room_id).await.unwrap();
            let mut room = room.lock().await;
            room.place_stone(&identity("alice"), 7, 7).unwrap();
            room.make_request(identity("bob"), RequestKind::Undo)
                .unwrap();
        }
        let usecase = ResetGameUseCase::new(repository.clone(), quiet_pusher());

        // when (操作):
        let result = usecase.execute(&room_id, &identity("bob")).await;

        // then (期待する結果):
        assert_eq!(result, Ok(()));
        let room = repository.get(&room_id).await.unwrap();
        let room = room.lock().await;
        assert!(!room.game().has_started());
        assert_eq!(room.game().current_turn(), Stone::Black);
        assert_eq!(room.pending_request(), None);
    }

    #[tokio::test]
    async fn test_spectator_cannot_reset_game() {
        // テスト項目: 観戦者はリセットできない
        // given (前提条件):
        let (repository, room_id) = repository_with_players().await;
        {
            let room = repository.get(&room_id).await.unwrap();
            let mut room = room.lock().await;
            room.join(identity("carol"));
            room.place_stone(&identity("alice"), 7, 7).unwrap();
        }
        let usecase = ResetGameUseCase::new(repository.clone(), quiet_pusher());

        // when (操作):
        let result = usecase.execute(&room_id, &identity("carol")).await;

        // then (期待する結果):
        assert_eq!(result, Err(RoomActionError::Room(RoomError::NotAPlayer)));
        let room = repository.get(&room_id).await.unwrap();
        assert!(room.lock().await.game().has_started());
    }
}
