// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hotel_ledger_domain::Room;
use tracing::info;

use super::{require_affected, require_id};
use crate::backend::PersistenceBackend;
use crate::data_models::encode_money;
use crate::diesel_schema::rooms;
use crate::error::PersistenceError;

fn room_number(room: &Room) -> Result<i32, PersistenceError> {
    i32::try_from(room.number)
        .map_err(|_| PersistenceError::Other(format!("Room number {} is too large", room.number)))
}

/// Inserts a room and returns its ID.
///
/// # Errors
///
/// Returns `UniqueViolation` if the room number is taken, or another
/// error if the insert fails.
pub fn create_room(conn: &mut SqliteConnection, room: &Room) -> Result<i64, PersistenceError> {
    info!(
        number = room.number,
        floor = room.floor,
        room_type = room.room_type.as_str(),
        capacity = room.capacity,
        "Creating room"
    );

    diesel::insert_into(rooms::table)
        .values((
            rooms::number.eq(room_number(room)?),
            rooms::floor.eq(i32::from(room.floor)),
            rooms::room_type.eq(room.room_type.as_str()),
            rooms::capacity.eq(i32::from(room.capacity)),
            rooms::daily_rate.eq(encode_money(room.daily_rate)),
            rooms::phone_number.eq(&room.phone_number),
            rooms::is_active.eq(i32::from(room.is_active)),
            rooms::description.eq(&room.description),
        ))
        .execute(conn)?;

    let room_id: i64 = conn.get_last_insert_rowid()?;
    info!(room_id, "Room created");
    Ok(room_id)
}

/// Overwrites every column of a stored room.
///
/// # Errors
///
/// Returns `NotFound` if the room does not exist, `UniqueViolation` if the
/// new number is taken, or another error if the update fails.
pub fn update_room(conn: &mut SqliteConnection, room: &Room) -> Result<(), PersistenceError> {
    let room_id: i64 = require_id(room.room_id, "Room")?;
    info!(room_id, number = room.number, "Updating room");

    let rows: usize = diesel::update(rooms::table.filter(rooms::room_id.eq(room_id)))
        .set((
            rooms::number.eq(room_number(room)?),
            rooms::floor.eq(i32::from(room.floor)),
            rooms::room_type.eq(room.room_type.as_str()),
            rooms::capacity.eq(i32::from(room.capacity)),
            rooms::daily_rate.eq(encode_money(room.daily_rate)),
            rooms::phone_number.eq(&room.phone_number),
            rooms::is_active.eq(i32::from(room.is_active)),
            rooms::description.eq(&room.description),
        ))
        .execute(conn)?;

    require_affected(rows, "Room", room_id)
}

/// Deletes a room together with its stays.
///
/// # Errors
///
/// Returns `NotFound` if the room does not exist, or another error if the
/// delete fails.
pub fn delete_room(conn: &mut SqliteConnection, room_id: i64) -> Result<(), PersistenceError> {
    info!(room_id, "Deleting room");

    let rows: usize = diesel::delete(rooms::table.filter(rooms::room_id.eq(room_id))).execute(conn)?;
    require_affected(rows, "Room", room_id)
}
