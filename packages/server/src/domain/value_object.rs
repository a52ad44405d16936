//! Value objects of the Renju room domain.
//!
//! Each wrapper validates its input on construction so that the rest of the
//! domain can rely on well-formed identifiers and names.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use super::error::ValueError;

/// Maximum length of a player identity (in characters).
pub const MAX_IDENTITY_LENGTH: usize = 32;

/// Maximum length of a room name (in characters).
pub const MAX_ROOM_NAME_LENGTH: usize = 64;

/// Opaque, globally unique room identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RoomId(pub(super) String);

impl RoomId {
    pub fn new(value: String) -> Result<Self, ValueError> {
        if value.trim().is_empty() {
            return Err(ValueError::InvalidRoomId);
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for RoomId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for RoomId {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Display name of a room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomName(String);

impl RoomName {
    /// Surrounding whitespace is trimmed before validation.
    pub fn new(value: String) -> Result<Self, ValueError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_ROOM_NAME_LENGTH {
            return Err(ValueError::InvalidRoomName(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for RoomName {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Identity of a participant (player or spectator).
///
/// Identities are supplied by the client; the same identity submitted twice
/// is treated as the same participant (reconnect).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity(String);

impl Identity {
    pub fn new(value: String) -> Result<Self, ValueError> {
        let trimmed = value.trim();
        if trimmed.is_empty() || trimmed.chars().count() > MAX_IDENTITY_LENGTH {
            return Err(ValueError::InvalidIdentity(value));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for Identity {
    type Error = ValueError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Unix timestamp in milliseconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

/// Stone color. Also names the two player seats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stone {
    Black,
    White,
}

impl Stone {
    pub fn opponent(self) -> Self {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
        }
    }

    /// Single-character board notation.
    pub fn symbol(self) -> char {
        match self {
            Stone::Black => 'B',
            Stone::White => 'W',
        }
    }
}

impl fmt::Display for Stone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stone::Black => f.write_str("black"),
            Stone::White => f.write_str("white"),
        }
    }
}

/// Role of a participant inside a room.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Black,
    White,
    Spectator,
}

impl Role {
    /// The seat held by this role, if any.
    pub fn seat(self) -> Option<Stone> {
        match self {
            Role::Black => Some(Stone::Black),
            Role::White => Some(Stone::White),
            Role::Spectator => None,
        }
    }
}

impl From<Stone> for Role {
    fn from(stone: Stone) -> Self {
        match stone {
            Stone::Black => Role::Black,
            Stone::White => Role::White,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Black => f.write_str("black"),
            Role::White => f.write_str("white"),
            Role::Spectator => f.write_str("spectator"),
        }
    }
}

/// Kind of an action that needs the opponent's consent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RequestKind {
    Undo,
    Swap,
}

impl FromStr for RequestKind {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "undo" => Ok(RequestKind::Undo),
            "swap" => Ok(RequestKind::Swap),
            _ => Err(ValueError::UnknownRequestKind(s.to_string())),
        }
    }
}

impl fmt::Display for RequestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RequestKind::Undo => f.write_str("undo"),
            RequestKind::Swap => f.write_str("swap"),
        }
    }
}
