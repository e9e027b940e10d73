// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hotel_ledger_domain::{Room, RoomType};
use tracing::debug;

use crate::data_models::{RoomRow, convert_rows};
use crate::diesel_schema::rooms;
use crate::error::PersistenceError;

/// Optional filters for listing rooms. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoomFilter {
    pub room_type: Option<RoomType>,
    pub floor: Option<u16>,
    pub is_active: Option<bool>,
}

/// Retrieves a room by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
/// Returns `Ok(None)` if the room does not exist.
pub fn get_room(conn: &mut SqliteConnection, room_id: i64) -> Result<Option<Room>, PersistenceError> {
    debug!(room_id, "Looking up room");

    let row: Option<RoomRow> = rooms::table
        .filter(rooms::room_id.eq(room_id))
        .select(RoomRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Room::try_from).transpose()
}

/// Lists rooms matching `filter`, ordered by room number.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_rooms(
    conn: &mut SqliteConnection,
    filter: &RoomFilter,
) -> Result<Vec<Room>, PersistenceError> {
    let mut query = rooms::table
        .select(RoomRow::as_select())
        .order(rooms::number.asc())
        .into_boxed();

    if let Some(room_type) = filter.room_type {
        query = query.filter(rooms::room_type.eq(room_type.as_str()));
    }
    if let Some(floor) = filter.floor {
        query = query.filter(rooms::floor.eq(i32::from(floor)));
    }
    if let Some(is_active) = filter.is_active {
        query = query.filter(rooms::is_active.eq(i32::from(is_active)));
    }

    let rows: Vec<RoomRow> = query.load(conn)?;
    convert_rows(rows)
}

/// Resolves a room number to its ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn find_room_id_by_number(
    conn: &mut SqliteConnection,
    number: u32,
) -> Result<Option<i64>, PersistenceError> {
    let Ok(number) = i32::try_from(number) else {
        return Ok(None);
    };

    Ok(rooms::table
        .filter(rooms::number.eq(number))
        .select(rooms::room_id)
        .first::<i64>(conn)
        .optional()?)
}
