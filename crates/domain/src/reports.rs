// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Occupancy and income aggregation.
//!
//! These functions are pure folds over rooms and stays already loaded by
//! the caller. They re-apply the relevant stay predicates so the result
//! does not depend on how loosely the caller pre-filtered.

use crate::overlap::intersects_period;
use crate::quarter::Quarter;
use crate::stay::{Stay, StayStatus};
use crate::types::{Room, RoomType};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Number of rooms of one type with at least one free place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomTypeAvailability {
    pub room_type: RoomType,
    pub count: usize,
}

/// Rooms with free places, overall and per room type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeCapacityReport {
    pub total_free_rooms: usize,
    /// Only types with at least one free room, in `RoomType` order.
    pub by_type: Vec<RoomTypeAvailability>,
}

/// Free places left in a room given its number of active stays.
#[must_use]
pub fn free_places(room: &Room, active_stays: usize) -> i64 {
    let occupied: i64 = i64::try_from(active_stays).unwrap_or(i64::MAX);
    i64::from(room.capacity) - occupied
}

/// Builds the free-capacity report.
///
/// Inactive rooms are ignored. A room is free when its capacity exceeds
/// the number of its active stays.
///
/// # Arguments
///
/// * `rooms` - All rooms
/// * `active_stays_by_room` - Active stay count keyed by room id; missing means zero
#[must_use]
pub fn build_free_capacity_report(
    rooms: &[Room],
    active_stays_by_room: &HashMap<i64, usize>,
) -> FreeCapacityReport {
    let mut by_type: BTreeMap<RoomType, usize> = BTreeMap::new();

    for room in rooms.iter().filter(|room| room.is_active) {
        let active: usize = room
            .room_id
            .and_then(|id| active_stays_by_room.get(&id).copied())
            .unwrap_or(0);
        if free_places(room, active) > 0 {
            *by_type.entry(room.room_type).or_insert(0) += 1;
        }
    }

    FreeCapacityReport {
        total_free_rooms: by_type.values().sum(),
        by_type: by_type
            .into_iter()
            .map(|(room_type, count)| RoomTypeAvailability { room_type, count })
            .collect(),
    }
}

/// Distinct clients that stayed in a room during the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomClientCount {
    pub room_id: i64,
    pub room_number: u32,
    pub client_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FloorRoomCount {
    pub floor: u16,
    pub room_count: usize,
}

/// Income realised by a room from stays checked out in the period.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomIncome {
    pub room_id: i64,
    pub room_number: u32,
    pub total_income: Decimal,
}

/// Occupancy and income for one calendar quarter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuarterlyReport {
    pub quarter: Quarter,
    /// Rooms with at least one stay in the period, by room number.
    pub clients_per_room: Vec<RoomClientCount>,
    /// Every floor with rooms, by floor.
    pub rooms_per_floor: Vec<FloorRoomCount>,
    /// Rooms with completed stays checked out in the period, by room number.
    pub income_per_room: Vec<RoomIncome>,
    pub total_income: Decimal,
}

/// Builds the quarterly report.
///
/// # Arguments
///
/// * `quarter` - The reporting quarter
/// * `rooms` - All rooms
/// * `stays` - Candidate stays; anything not intersecting the quarter is ignored
#[must_use]
pub fn build_quarterly_report(quarter: Quarter, rooms: &[Room], stays: &[Stay]) -> QuarterlyReport {
    let period = quarter.period();
    let room_numbers: HashMap<i64, u32> = rooms
        .iter()
        .filter_map(|room| room.room_id.map(|id| (id, room.number)))
        .collect();

    let mut clients_by_room: BTreeMap<(u32, i64), BTreeSet<i64>> = BTreeMap::new();
    let mut income_by_room: BTreeMap<(u32, i64), Decimal> = BTreeMap::new();

    for stay in stays {
        let Some(&room_number) = room_numbers.get(&stay.room_id) else {
            continue;
        };
        let key: (u32, i64) = (room_number, stay.room_id);

        if intersects_period(&stay.dates(), &period) {
            clients_by_room
                .entry(key)
                .or_default()
                .insert(stay.client_id);
        }

        let checked_out_in_period: bool = stay
            .check_out
            .is_some_and(|check_out| period.contains(check_out));
        if stay.status == StayStatus::Completed && checked_out_in_period {
            *income_by_room.entry(key).or_insert(Decimal::ZERO) += stay.total_cost;
        }
    }

    let mut rooms_by_floor: BTreeMap<u16, usize> = BTreeMap::new();
    for room in rooms {
        *rooms_by_floor.entry(room.floor).or_insert(0) += 1;
    }

    let income_per_room: Vec<RoomIncome> = income_by_room
        .into_iter()
        .map(|((room_number, room_id), mut total_income)| {
            total_income.rescale(2);
            RoomIncome {
                room_id,
                room_number,
                total_income,
            }
        })
        .collect();

    let mut total_income: Decimal = income_per_room
        .iter()
        .map(|income| income.total_income)
        .sum();
    total_income.rescale(2);

    QuarterlyReport {
        quarter,
        clients_per_room: clients_by_room
            .into_iter()
            .map(|((room_number, room_id), clients)| RoomClientCount {
                room_id,
                room_number,
                client_count: clients.len(),
            })
            .collect(),
        rooms_per_floor: rooms_by_floor
            .into_iter()
            .map(|(floor, room_count)| FloorRoomCount { floor, room_count })
            .collect(),
        income_per_room,
        total_income,
    }
}
