//! Domain layer: game rules, rooms and the interfaces the use cases need.

pub mod entity;
pub mod error;
pub mod factory;
pub mod pusher;
pub mod repository;
pub mod value_object;

pub use entity::{
    DEFAULT_BOARD_SIZE, Departure, GameEngine, Move, PendingRequest, RequestOutcome, Resolution,
    Room,
};
pub use error::{ErrorKind, GameError, RoomError, ValueError};
pub use factory::RoomIdFactory;
pub use pusher::{PushError, PusherChannel, RoomPusher, SubscriptionId};
pub use repository::{RoomRepository, SharedRoom};
pub use value_object::{Identity, RequestKind, Role, RoomId, RoomName, Stone, Timestamp};

#[cfg(test)]
pub use pusher::MockRoomPusher;
