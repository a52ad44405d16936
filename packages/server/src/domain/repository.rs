//! Room registry trait.
//!
//! The domain defines the storage interface it needs; the infrastructure
//! layer supplies the implementation (dependency inversion).

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use super::{Room, RoomId};

/// A registered room behind its own lock.
///
/// Holding the lock serializes every operation on that room; unrelated
/// rooms never wait on each other.
pub type SharedRoom = Arc<Mutex<Room>>;

/// Registry of live rooms, keyed by [`RoomId`].
#[async_trait]
pub trait RoomRepository: Send + Sync {
    /// Register a new room and return its shared handle.
    async fn insert(&self, room: Room) -> SharedRoom;

    /// Look up a room; `None` if it does not exist (or was already removed).
    async fn get(&self, room_id: &RoomId) -> Option<SharedRoom>;

    /// Unregister a room. Returns whether it was present.
    async fn remove(&self, room_id: &RoomId) -> bool;

    /// Unregister a room only if nobody is left in it.
    ///
    /// Emptiness is re-checked while the registry is locked so that a
    /// concurrent join cannot be lost.
    async fn remove_if_empty(&self, room_id: &RoomId) -> bool;

    /// Snapshot of every registered room. Order is unspecified.
    async fn list(&self) -> Vec<Room>;

    /// Number of registered rooms.
    async fn count(&self) -> usize;
}
