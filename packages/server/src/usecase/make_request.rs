//! UseCase: 合意が必要な操作（待った・席の交代）のリクエスト

use std::sync::Arc;

use crate::domain::{
    Identity, RequestKind, RequestOutcome, Room, RoomError, RoomId, RoomPusher, RoomRepository,
};

use super::{RoomActionError, lock_room, notify};

/// リクエスト送信のユースケース
pub struct MakeRequestUseCase {
    repository: Arc<dyn RoomRepository>,
    pusher: Arc<dyn RoomPusher>,
}

impl MakeRequestUseCase {
    pub fn new(repository: Arc<dyn RoomRepository>, pusher: Arc<dyn RoomPusher>) -> Self {
        Self { repository, pusher }
    }

    /// Ask the opponent to agree to an undo or a seat swap.
    ///
    /// Only seated players may ask, and seats can only be swapped before
    /// the first move. A swap with nobody in the other seat happens at once.
    pub async fn execute(
        &self,
        room_id: &RoomId,
        requester: Identity,
        kind: RequestKind,
    ) -> Result<RequestOutcome, RoomActionError> {
        let mut room = lock_room(self.repository.as_ref(), room_id).await?;

        let outcome = Self::check_requester(&room, &requester, kind)
            .and_then(|()| room.make_request(requester.clone(), kind))
            .inspect_err(|e| {
                tracing::debug!(
                    "Room '{}': {} request by '{}' rejected: {}",
                    room_id,
                    kind,
                    requester,
                    e
                );
            })?;
        match outcome {
            RequestOutcome::Pending => {
                tracing::info!("Room '{}': '{}' requested {}", room_id, requester, kind)
            }
            RequestOutcome::Executed => {
                tracing::info!("Room '{}': '{}' swapped seats alone", room_id, requester)
            }
        }
        notify(self.pusher.as_ref(), &room).await;

        Ok(outcome)
    }

    /// Checks made before the room's own request rules.
    fn check_requester(
        room: &Room,
        requester: &Identity,
        kind: RequestKind,
    ) -> Result<(), RoomError> {
        if room.seat_of(requester).is_none() {
            return Err(RoomError::NotAPlayer);
        }
        if let Some(pending) = room.pending_request() {
            return Err(RoomError::RequestAlreadyPending(pending.kind));
        }
        if kind == RequestKind::Swap && room.game().has_started() {
            return Err(RoomError::GameAlreadyStarted);
        }
        Ok(())
    }
}
