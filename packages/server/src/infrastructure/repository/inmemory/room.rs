//! InMemory Room Repository 実装
//!
//! ドメイン層が定義する RoomRepository trait の具体的な実装。
//! HashMap をインメモリ DB として使用します。
//!
//! ## ロックの粒度
//!
//! - レジストリ全体の `RwLock`: 部屋の作成・削除・一覧のみを保護
//! - 部屋ごとの `Mutex`: ゲーム状態・席・観戦者・保留リクエストを一体で保護
//!
//! ロックは常に「レジストリ → 部屋」の順に取得します。部屋のロックを保持したまま
//! レジストリのロックを取得することはありません。

use std::{collections::HashMap, sync::Arc};

use async_trait::async_trait;
use tokio::sync::{Mutex, RwLock};

use crate::domain::{Room, RoomId, RoomRepository, SharedRoom};

/// インメモリ Room Repository 実装
pub struct InMemoryRoomRepository {
    rooms: RwLock<HashMap<RoomId, SharedRoom>>,
}

impl Default for InMemoryRoomRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryRoomRepository {
    pub fn new() -> Self {
        Self {
            rooms: RwLock::new(HashMap::new()),
        }
    }
}

#[async_trait]
impl RoomRepository for InMemoryRoomRepository {
    async fn insert(&self, room: Room) -> SharedRoom {
        let room_id = room.id.clone();
        let shared = Arc::new(Mutex::new(room));
        self.rooms.write().await.insert(room_id, shared.clone());
        shared
    }

    async fn get(&self, room_id: &RoomId) -> Option<SharedRoom> {
        self.rooms.read().await.get(room_id).cloned()
    }

    async fn remove(&self, room_id: &RoomId) -> bool {
        let Some(shared) = self.rooms.write().await.remove(room_id) else {
            return false;
        };
        shared.lock().await.close();
        true
    }

    async fn remove_if_empty(&self, room_id: &RoomId) -> bool {
        let mut rooms = self.rooms.write().await;
        let Some(shared) = rooms.get(room_id).cloned() else {
            return false;
        };

        // New lookups are blocked by the write lock. A caller that resolved
        // the handle earlier finds the room closed once it gets the room lock.
        let mut room = shared.lock().await;
        if !room.is_empty() {
            return false;
        }
        room.close();
        rooms.remove(room_id);
        true
    }

    async fn list(&self) -> Vec<Room> {
        // レジストリのロックは部屋のロックを待つ前に解放する
        let handles: Vec<SharedRoom> = self.rooms.read().await.values().cloned().collect();

        let mut snapshot = Vec::with_capacity(handles.len());
        for handle in handles {
            let room = handle.lock().await;
            if !room.is_closed() {
                snapshot.push(room.clone());
            }
        }
        snapshot
    }

    async fn count(&self) -> usize {
        self.rooms.read().await.len()
    }
}
