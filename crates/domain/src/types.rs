// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The kind of a room, which determines its default capacity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    /// One guest.
    Single,
    /// Two guests.
    Double,
    /// Three guests.
    Triple,
}

impl RoomType {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Double => "double",
            Self::Triple => "triple",
        }
    }

    /// Returns the human-readable label.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Single => "Single room",
            Self::Double => "Double room",
            Self::Triple => "Triple room",
        }
    }

    /// The capacity a room of this type gets when none is given.
    #[must_use]
    pub const fn default_capacity(&self) -> u16 {
        match self {
            Self::Single => 1,
            Self::Double => 2,
            Self::Triple => 3,
        }
    }

    /// Parses a room type from its string representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `single`, `double` or `triple`.
    pub fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "single" => Ok(Self::Single),
            "double" => Ok(Self::Double),
            "triple" => Ok(Self::Triple),
            _ => Err(DomainError::InvalidRoomType(s.to_string())),
        }
    }
}

impl FromStr for RoomType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A hotel room.
///
/// `room_id` is `None` until the room has been persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub room_id: Option<i64>,
    /// The room number shown on the door (unique).
    pub number: u32,
    pub floor: u16,
    pub room_type: RoomType,
    /// Maximum number of concurrent stays.
    pub capacity: u16,
    /// Price of one night, two decimal places.
    pub daily_rate: Decimal,
    pub phone_number: String,
    /// Inactive rooms are excluded from availability reporting.
    pub is_active: bool,
    pub description: String,
}

impl Room {
    /// Creates an active room without a persisted `room_id`.
    ///
    /// # Arguments
    ///
    /// * `number` - The room number
    /// * `floor` - The floor the room is on
    /// * `room_type` - The room type
    /// * `capacity` - Explicit capacity; derived from `room_type` when absent or zero
    /// * `daily_rate` - The nightly rate
    /// * `phone_number` - The in-room phone number
    #[must_use]
    pub fn new(
        number: u32,
        floor: u16,
        room_type: RoomType,
        capacity: Option<u16>,
        daily_rate: Decimal,
        phone_number: String,
    ) -> Self {
        Self {
            room_id: None,
            number,
            floor,
            room_type,
            capacity: resolve_capacity(room_type, capacity),
            daily_rate,
            phone_number,
            is_active: true,
            description: String::new(),
        }
    }
}

/// Resolves a requested capacity against the room type's default.
///
/// Zero counts as "not set".
#[must_use]
pub fn resolve_capacity(room_type: RoomType, requested: Option<u16>) -> u16 {
    match requested {
        Some(capacity) if capacity > 0 => capacity,
        _ => room_type.default_capacity(),
    }
}

/// A hotel client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    pub client_id: Option<i64>,
    /// Passport number (unique).
    pub passport_number: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

impl Client {
    /// Creates a client without a persisted `client_id`.
    ///
    /// Optional contact fields start empty.
    #[must_use]
    pub const fn new(
        passport_number: String,
        last_name: String,
        first_name: String,
        city: String,
    ) -> Self {
        Self {
            client_id: None,
            passport_number,
            last_name,
            first_name,
            middle_name: String::new(),
            city,
            phone: String::new(),
            email: String::new(),
            notes: String::new(),
        }
    }

    /// Last, first and middle name joined by single spaces, skipping empty parts.
    #[must_use]
    pub fn full_name(&self) -> String {
        join_name_parts(&self.last_name, &self.first_name, &self.middle_name)
    }
}

pub(crate) fn join_name_parts(last: &str, first: &str, middle: &str) -> String {
    [last, first, middle]
        .iter()
        .map(|part| part.trim())
        .filter(|part| !part.is_empty())
        .collect::<Vec<&str>>()
        .join(" ")
}
