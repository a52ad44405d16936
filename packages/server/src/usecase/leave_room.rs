//! UseCase: 部屋からの退出
//!
//! 対局中にプレイヤーが退出した場合は残ったプレイヤーの不戦勝とし、
//! 部屋が空になった場合はレジストリから削除します。

use std::sync::Arc;

use crate::domain::{Identity, Role, RoomId, RoomPusher, RoomRepository, Stone};

use super::{RoomActionError, lock_room, notify};

/// Result of leaving a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LeaveOutcome {
    /// Role held before leaving; `None` if the identity was not in the room.
    pub role: Option<Role>,
    pub forfeit_winner: Option<Stone>,
    /// Whether the room was empty afterwards and got removed.
    pub room_removed: bool,
}

/// 部屋退出のユースケース
pub struct LeaveRoomUseCase {
    repository: Arc<dyn RoomRepository>,
    pusher: Arc<dyn RoomPusher>,
}

impl LeaveRoomUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, pusher: Arc<dyn RoomPusher>) -> Self {
        Self { repository, pusher }
    }

    pub async fn execute(
        &self,
        room_id: &RoomId,
        identity: &Identity,
    ) -> Result<LeaveOutcome, RoomActionError> {
        let (departure, now_empty) = {
            let mut room = lock_room(self.repository.as_ref(), room_id).await?;
            let departure = room.leave(identity);
            if departure.role.is_some() {
                notify(self.pusher.as_ref(), &room).await;
            }
            (departure, room.is_empty())
        };

        if let Some(role) = departure.role {
            tracing::info!("'{}' ({}) left room '{}'", identity, role, room_id);
        }
        if let Some(winner) = departure.forfeit_winner {
            tracing::info!("Room '{}': {} wins by forfeit", room_id, winner);
        }
        if departure.request_dropped {
            tracing::info!("Room '{}': pending request dropped", room_id);
        }

        // 部屋のロックを解放してからレジストリのロックを取得する
        let room_removed = now_empty && self.repository.remove_if_empty(room_id).await;
        if room_removed {
            self.pusher.close_room(room_id).await;
            tracing::info!("Room '{}' is empty and was removed", room_id);
        }

        Ok(LeaveOutcome {
            role: departure.role,
            forfeit_winner: departure.forfeit_winner,
            room_removed,
        })
    }
}
