//! Room-based Renju game server library.
//!
//! Players create and join rooms over an HTTP API, play Renju with the
//! black-only double-open-three restriction, and negotiate undo / seat swap
//! requests. Every room change is pushed to its WebSocket watchers.

// layers
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;
