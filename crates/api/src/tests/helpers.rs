// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::request_response::{
    ClientResponse, CreateClientRequest, CreateRoomRequest, CreateStayRequest, RoomResponse,
    StayResponse,
};
use crate::{create_client, create_room, create_stay};
use hotel_ledger_persistence::Persistence;
use rust_decimal::Decimal;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database")
}

/// A room request at 3500.00 per night with the type's default capacity.
pub fn create_test_room_request(number: u32, floor: u16, room_type: &str) -> CreateRoomRequest {
    CreateRoomRequest {
        number,
        floor,
        room_type: room_type.to_string(),
        capacity: None,
        daily_rate: Decimal::new(350_000, 2),
        phone_number: None,
        is_active: None,
        description: None,
    }
}

pub fn create_test_client_request(passport: &str, last_name: &str, city: &str) -> CreateClientRequest {
    CreateClientRequest {
        passport_number: passport.to_string(),
        last_name: last_name.to_string(),
        first_name: String::from("Test"),
        middle_name: None,
        city: city.to_string(),
        phone: None,
        email: None,
        notes: None,
    }
}

pub fn seed_room(persistence: &mut Persistence, number: u32, floor: u16, room_type: &str) -> RoomResponse {
    create_room(persistence, &create_test_room_request(number, floor, room_type)).unwrap()
}

pub fn seed_client(persistence: &mut Persistence, passport: &str, last_name: &str) -> ClientResponse {
    create_client(
        persistence,
        &create_test_client_request(passport, last_name, "Kazan"),
    )
    .unwrap()
}

pub fn seed_stay(
    persistence: &mut Persistence,
    client_id: i64,
    room_id: i64,
    check_in: &str,
    check_out: Option<&str>,
) -> StayResponse {
    create_stay(
        persistence,
        &CreateStayRequest {
            client_id,
            room_id,
            check_in: check_in.to_string(),
            check_out: check_out.map(str::to_string),
        },
    )
    .unwrap()
}
