//! Factories for domain identifiers.

use uuid::Uuid;

use super::value_object::RoomId;

/// Allocates fresh room identifiers.
pub struct RoomIdFactory;

impl RoomIdFactory {
    /// Generate a new random (UUID v4) room id.
    pub fn generate() -> RoomId {
        RoomId(Uuid::new_v4().to_string())
    }
}
