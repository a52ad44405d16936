//! In-memory registry. Rooms live for the lifetime of the process only.

mod room;

pub use room::InMemoryRoomRepository;
