//! Domain entities.

pub mod game;
pub mod room;

pub use game::{DEFAULT_BOARD_SIZE, GameEngine, Move};
pub use room::{Departure, PendingRequest, RequestOutcome, Resolution, Room};
