//! Utilities shared between the Renju room server and its tooling.

pub mod logger;
pub mod time;
