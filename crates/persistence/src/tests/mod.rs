// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod ledger_tests;

use crate::Persistence;
use hotel_ledger_domain::{Client, Room, RoomType, Stay, StayDates, StayStatus};
use rust_decimal::Decimal;
use time::Date;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

pub fn create_test_room(number: u32, floor: u16, room_type: RoomType) -> Room {
    Room::new(
        number,
        floor,
        room_type,
        None,
        Decimal::from(3500),
        format!("+7-843-{number}"),
    )
}

pub fn create_test_client(passport: &str, last_name: &str, city: &str) -> Client {
    Client::new(
        passport.to_string(),
        last_name.to_string(),
        String::from("Test"),
        city.to_string(),
    )
}

/// Stores a room and returns its ID.
pub fn seed_room(persistence: &mut Persistence, number: u32, floor: u16, room_type: RoomType) -> i64 {
    persistence
        .create_room(&create_test_room(number, floor, room_type))
        .unwrap()
}

/// Stores a client and returns its ID.
pub fn seed_client(persistence: &mut Persistence, passport: &str, last_name: &str) -> i64 {
    persistence
        .create_client(&create_test_client(passport, last_name, "Kazan"))
        .unwrap()
}

/// Writes a stay straight to the table, bypassing ledger checks.
///
/// A stay with a check-out date is stored as completed, so one client can
/// have several historical stays.
pub fn seed_stay(
    persistence: &mut Persistence,
    client_id: i64,
    room_id: i64,
    check_in: Date,
    check_out: Option<Date>,
) -> i64 {
    use hotel_ledger::StayRepository;

    let mut stay: Stay = Stay::open(client_id, room_id, StayDates::new(check_in, check_out));
    if check_out.is_some() {
        stay.status = StayStatus::Completed;
    }
    persistence.insert_stay(&stay).unwrap()
}
