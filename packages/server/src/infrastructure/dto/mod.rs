//! Data Transfer Objects (DTOs) for the Renju room server.
//!
//! DTOs are organized by protocol:
//! - `http`: HTTP API request and response DTOs
//! - `websocket`: messages pushed to room watchers

pub mod conversion;
pub mod http;
pub mod websocket;
