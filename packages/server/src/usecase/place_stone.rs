//! UseCase: 着手
//!
//! ## テスト実装の作業記録
//!
//! ### 何をテストしているか
//! - PlaceStoneUseCase::execute() メソッド
//! - 手番・着席状況・保留リクエストによる着手の認可
//!
//! ### どのような状況を想定しているか
//! - 正常系：手番のプレイヤーによる着手、勝利
//! - 異常系：手番でない、相手がいない、盤外、禁じ手

use std::sync::Arc;

use crate::domain::{Identity, RoomId, RoomPusher, RoomRepository, Stone};

use super::{RoomActionError, lock_room, notify};

/// A stone that was successfully placed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlacedStone {
    pub stone: Stone,
    /// Set when this stone won the game.
    pub winner: Option<Stone>,
}

/// 着手のユースケース
pub struct PlaceStoneUseCase {
    repository: Arc<dyn RoomRepository>,
    pusher: Arc<dyn RoomPusher>,
}

impl PlaceStoneUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, pusher: Arc<dyn RoomPusher>) -> Self {
        Self { repository, pusher }
    }

    pub async fn execute(
        &self,
        room_id: &RoomId,
        identity: &Identity,
        row: i32,
        col: i32,
    ) -> Result<PlacedStone, RoomActionError> {
        let mut room = lock_room(self.repository.as_ref(), room_id).await?;

        let stone = room.place_stone(identity, row, col).inspect_err(|e| {
            tracing::debug!(
                "Room '{}': move ({}, {}) by '{}' rejected: {}",
                room_id,
                row,
                col,
                identity,
                e
            );
        })?;

        let winner = room.game().winner();
        if let Some(winner) = winner {
            tracing::info!("Room '{}': {} wins", room_id, winner);
        }
        notify(self.pusher.as_ref(), &room).await;

        Ok(PlacedStone { stone, winner })
    }
}
