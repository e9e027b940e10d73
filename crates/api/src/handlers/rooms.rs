// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{client_summary, persisted_id, required_period};
use crate::error::{ApiError, translate_domain_error, translate_ledger_error, translate_persistence_error};
use crate::input_policy::{optional_bool, optional_integer, optional_text};
use crate::request_response::{
    CreateRoomRequest, FreeCapacityResponse, ListRoomsResponse, PeriodQuery, RoomListQuery,
    RoomResponse, RoomStayResponse, RoomStaysResponse, RoomTypeCountResponse, UpdateRoomRequest,
};
use hotel_ledger::{StayLedger, StayRepository};
use hotel_ledger_domain::{
    Client, FreeCapacityReport, Room, RoomType, Stay, format_date, resolve_capacity, validate_room,
};
use hotel_ledger_persistence::{Persistence, RoomFilter};
use std::collections::HashMap;
use time::Date;
use tracing::info;

fn room_response(room: &Room, occupied_places: usize) -> Result<RoomResponse, ApiError> {
    Ok(RoomResponse {
        id: persisted_id(room.room_id, "Room")?,
        number: room.number,
        floor: room.floor,
        room_type: room.room_type.as_str().to_string(),
        room_type_label: room.room_type.label().to_string(),
        capacity: room.capacity,
        daily_rate: room.daily_rate,
        phone_number: room.phone_number.clone(),
        is_active: room.is_active,
        description: room.description.clone(),
        occupied_places,
    })
}

fn parse_room_type(value: &str) -> Result<RoomType, ApiError> {
    RoomType::parse_str(value.trim()).map_err(translate_domain_error)
}

fn require_room(persistence: &mut Persistence, room_id: i64) -> Result<Room, ApiError> {
    persistence
        .get_room(room_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Room", room_id))
}

fn occupied_places(persistence: &mut Persistence, room_id: i64) -> Result<usize, ApiError> {
    let active: HashMap<i64, usize> = persistence
        .count_active_stays_by_room()
        .map_err(translate_persistence_error)?;
    Ok(active.get(&room_id).copied().unwrap_or(0))
}

/// Creates a room.
///
/// The capacity is derived from the room type when omitted or zero.
///
/// # Errors
///
/// Returns an error if:
/// - The room type is unknown
/// - The room number is zero or the rate is negative or too precise
/// - Another room already has the number (`Conflict`)
pub fn create_room(
    persistence: &mut Persistence,
    request: &CreateRoomRequest,
) -> Result<RoomResponse, ApiError> {
    let room_type: RoomType = parse_room_type(&request.room_type)?;
    let mut room: Room = Room::new(
        request.number,
        request.floor,
        room_type,
        request.capacity,
        request.daily_rate,
        optional_text(request.phone_number.as_deref()),
    );
    room.is_active = request.is_active.unwrap_or(true);
    room.description = optional_text(request.description.as_deref());
    validate_room(&room).map_err(translate_domain_error)?;

    let room_id: i64 = persistence
        .create_room(&room)
        .map_err(translate_persistence_error)?;
    room.room_id = Some(room_id);
    info!(room_id, number = room.number, "Created room");

    room_response(&room, 0)
}

/// Retrieves a room with its current occupancy.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the room does not exist.
pub fn get_room(persistence: &mut Persistence, room_id: i64) -> Result<RoomResponse, ApiError> {
    let room: Room = require_room(persistence, room_id)?;
    let occupied: usize = occupied_places(persistence, room_id)?;
    room_response(&room, occupied)
}

/// Lists rooms by number, optionally filtered.
///
/// # Errors
///
/// Returns an error if a filter value is malformed or the query fails.
pub fn list_rooms(
    persistence: &mut Persistence,
    query: &RoomListQuery,
) -> Result<ListRoomsResponse, ApiError> {
    let filter: RoomFilter = RoomFilter {
        room_type: query
            .room_type
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(parse_room_type)
            .transpose()?,
        floor: optional_integer::<u16>("floor", query.floor.as_deref())?,
        is_active: optional_bool("is_active", query.is_active.as_deref())?,
    };

    let rooms: Vec<Room> = persistence
        .list_rooms_filtered(&filter)
        .map_err(translate_persistence_error)?;
    let active: HashMap<i64, usize> = persistence
        .count_active_stays_by_room()
        .map_err(translate_persistence_error)?;

    let rooms: Vec<RoomResponse> = rooms
        .iter()
        .map(|room| {
            let occupied: usize = room
                .room_id
                .and_then(|id| active.get(&id).copied())
                .unwrap_or(0);
            room_response(room, occupied)
        })
        .collect::<Result<_, _>>()?;
    Ok(ListRoomsResponse { rooms })
}

/// Applies a partial update to a room.
///
/// A new capacity of zero falls back to the room type's default.
///
/// # Errors
///
/// Returns an error if the room does not exist, a value is invalid, or the
/// new number is taken.
pub fn update_room(
    persistence: &mut Persistence,
    room_id: i64,
    request: &UpdateRoomRequest,
) -> Result<RoomResponse, ApiError> {
    let mut room: Room = require_room(persistence, room_id)?;

    if let Some(number) = request.number {
        room.number = number;
    }
    if let Some(floor) = request.floor {
        room.floor = floor;
    }
    if let Some(room_type) = request.room_type.as_deref() {
        room.room_type = parse_room_type(room_type)?;
    }
    if let Some(capacity) = request.capacity {
        room.capacity = resolve_capacity(room.room_type, Some(capacity));
    }
    if let Some(daily_rate) = request.daily_rate {
        room.daily_rate = daily_rate;
    }
    if let Some(phone_number) = request.phone_number.as_deref() {
        room.phone_number = phone_number.trim().to_string();
    }
    if let Some(is_active) = request.is_active {
        room.is_active = is_active;
    }
    if let Some(description) = request.description.as_deref() {
        room.description = description.trim().to_string();
    }
    validate_room(&room).map_err(translate_domain_error)?;

    persistence
        .update_room(&room)
        .map_err(translate_persistence_error)?;
    info!(room_id, "Updated room");

    let occupied: usize = occupied_places(persistence, room_id)?;
    room_response(&room, occupied)
}

/// Deletes a room and its stays.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the room does not exist.
pub fn delete_room(persistence: &mut Persistence, room_id: i64) -> Result<(), ApiError> {
    persistence
        .delete_room(room_id)
        .map_err(translate_persistence_error)?;
    info!(room_id, "Deleted room");
    Ok(())
}

/// Stays in a room touching `[start, end]`, latest check-in first, each
/// with a summary of its client.
///
/// # Errors
///
/// Returns an error if:
/// - `start` or `end` is missing or malformed
/// - `start` is after `end` (`InvalidDateRange`)
/// - The room does not exist
pub fn list_room_stays(
    persistence: &mut Persistence,
    room_id: i64,
    query: &PeriodQuery,
) -> Result<RoomStaysResponse, ApiError> {
    let (start, end): (Date, Date) =
        required_period(query.start.as_deref(), query.end.as_deref())?;

    let stays: Vec<Stay> = StayLedger::new(&mut *persistence)
        .find_overlapping(room_id, start, end)
        .map_err(translate_ledger_error)?;

    let client_ids: Vec<i64> = stays.iter().map(|stay| stay.client_id).collect();
    let clients: HashMap<i64, Client> = persistence
        .find_clients(&client_ids)
        .map_err(translate_persistence_error)?
        .into_iter()
        .filter_map(|client| client.client_id.map(|id| (id, client)))
        .collect();

    let stays: Vec<RoomStayResponse> = stays
        .iter()
        .map(|stay: &Stay| -> Result<RoomStayResponse, ApiError> {
            let client: &Client = clients
                .get(&stay.client_id)
                .ok_or_else(|| ApiError::not_found("Client", stay.client_id))?;
            Ok(RoomStayResponse {
                id: persisted_id(stay.stay_id, "Stay")?,
                client: client_summary(client)?,
                check_in: format_date(stay.check_in),
                check_out: stay.check_out.map(format_date),
                status: stay.status.as_str().to_string(),
                total_cost: stay.total_cost,
            })
        })
        .collect::<Result<_, _>>()?;

    Ok(RoomStaysResponse {
        room_id,
        start: format_date(start),
        end: format_date(end),
        stays,
    })
}

/// Active rooms with at least one free place, by room type.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn free_capacity(persistence: &mut Persistence) -> Result<FreeCapacityResponse, ApiError> {
    let report: FreeCapacityReport = StayLedger::new(persistence)
        .free_capacity_report()
        .map_err(translate_ledger_error)?;

    Ok(FreeCapacityResponse {
        total_free_rooms: report.total_free_rooms,
        by_type: report
            .by_type
            .into_iter()
            .map(|entry| RoomTypeCountResponse {
                room_type: entry.room_type.as_str().to_string(),
                label: entry.room_type.label().to_string(),
                count: entry.count,
            })
            .collect(),
    })
}
