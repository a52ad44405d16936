//! WebSocket を使った RoomPusher 実装
//!
//! ## 責務
//!
//! - 部屋ごとの購読者 (WebSocket 接続) の `UnboundedSender` を管理
//! - 部屋のスナップショットを JSON にして購読者へ送信
//!
//! ## 設計ノート
//!
//! WebSocket の生成は UI 層（`ui/handler/websocket.rs`）で行われます。
//! この実装は生成された `UnboundedSender` を受け取り、メッセージ送信に使用します。
//!
//! 購読者の集合は部屋ごとに別の `Mutex` で保護します。全体の `RwLock` は部屋の
//! 追加・削除の時だけ書き込みロックされ、publish は読み込みロックで部屋の集合を
//! 取り出した後に解放するため、別の部屋への配信を待たせません。

use std::{
    collections::HashMap,
    sync::{
        Arc,
        atomic::{AtomicU64, Ordering},
    },
};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::{
    domain::{PushError, PusherChannel, Room, RoomId, RoomPusher, SubscriptionId},
    infrastructure::dto::websocket::{MessageType, RoomClosedMessage, RoomStateMessage},
};

/// Subscribers of one room: subscription id → sender
type Watchers = Arc<Mutex<HashMap<SubscriptionId, PusherChannel>>>;

/// WebSocket を使った RoomPusher 実装
pub struct WebSocketRoomPusher {
    /// Key: room id, Value: that room's subscribers
    rooms: RwLock<HashMap<RoomId, Watchers>>,
    next_subscription: AtomicU64,
}

impl Default for WebSocketRoomPusher {
    fn default() -> Self {
        Self::new()
    }
}

impl WebSocketRoomPusher {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
            next_subscription: AtomicU64::new(1),
        }
    }

    fn encode(room: &Room) -> Result<String, PushError> {
        serde_json::to_string(&RoomStateMessage::from(room))
            .map_err(|e| PushError::Serialization(e.to_string()))
    }

    async fn watchers_of(&self, room_id: &RoomId) -> Option<Watchers> {
        self.rooms.read().await.get(room_id).cloned()
    }
}

#[async_trait]
impl RoomPusher for WebSocketRoomPusher {
    async fn subscribe(
        &self,
        room: &Room,
        sender: PusherChannel,
    ) -> Result<SubscriptionId, PushError> {
        let snapshot = Self::encode(room)?;
        let subscription = self.next_subscription.fetch_add(1, Ordering::Relaxed);

        // 受信側が既に閉じていても登録は行う（次の publish で掃除される）
        let _ = sender.send(snapshot);

        // 書き込みロック中に登録し、同時の unsubscribe による集合の削除と競合させない
        let mut rooms = self.rooms.write().await;
        rooms
            .entry(room.id.clone())
            .or_default()
            .lock()
            .await
            .insert(subscription, sender);
        tracing::debug!(
            "Subscription {} registered for room '{}'",
            subscription,
            room.id
        );

        Ok(subscription)
    }

    async fn unsubscribe(&self, room_id: &RoomId, subscription: SubscriptionId) {
        let mut rooms = self.rooms.write().await;
        let Some(watchers) = rooms.get(room_id) else {
            return;
        };

        let now_empty = {
            let mut watchers = watchers.lock().await;
            watchers.remove(&subscription);
            watchers.is_empty()
        };
        if now_empty {
            rooms.remove(room_id);
        }
        tracing::debug!(
            "Subscription {} unregistered from room '{}'",
            subscription,
            room_id
        );
    }

    async fn publish(&self, room: &Room) -> Result<usize, PushError> {
        let Some(watchers) = self.watchers_of(&room.id).await else {
            return Ok(0);
        };

        let snapshot = Self::encode(room)?;

        // ブロードキャストでは一部の送信失敗を許容し、切断済みの購読者を取り除く
        let mut watchers = watchers.lock().await;
        watchers.retain(|subscription, sender| match sender.send(snapshot.clone()) {
            Ok(()) => true,
            Err(_) => {
                tracing::warn!(
                    "Subscription {} of room '{}' is closed, dropping it",
                    subscription,
                    room.id
                );
                false
            }
        });

        Ok(watchers.len())
    }

    async fn close_room(&self, room_id: &RoomId) {
        let Some(watchers) = self.rooms.write().await.remove(room_id) else {
            return;
        };
        let watchers = std::mem::take(&mut *watchers.lock().await);

        let closed = RoomClosedMessage {
            r#type: MessageType::RoomClosed,
            room_id: room_id.as_str().to_string(),
        };
        if let Ok(json) = serde_json::to_string(&closed) {
            for sender in watchers.values() {
                let _ = sender.send(json.clone());
            }
        }
        // sender を drop すると購読者側の送信ループが終了する
        tracing::debug!(
            "Closed {} subscription(s) of room '{}'",
            watchers.len(),
            room_id
        );
    }
}
