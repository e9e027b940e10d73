// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Client, DomainError, Room, RoomType, resolve_capacity};
use rust_decimal::Decimal;

#[test]
fn test_room_capacity_derived_from_type() {
    let room: Room = Room::new(
        201,
        2,
        RoomType::Triple,
        None,
        Decimal::from(7200),
        String::from("201"),
    );
    assert_eq!(room.capacity, 3);
    assert!(room.is_active);
    assert_eq!(room.room_id, None);
}

#[test]
fn test_room_explicit_capacity_wins() {
    assert_eq!(resolve_capacity(RoomType::Double, Some(4)), 4);
    assert_eq!(resolve_capacity(RoomType::Double, Some(0)), 2);
    assert_eq!(resolve_capacity(RoomType::Single, None), 1);
}

#[test]
fn test_room_type_parse() {
    assert_eq!("double".parse::<RoomType>(), Ok(RoomType::Double));
    assert_eq!(
        RoomType::parse_str("Suite"),
        Err(DomainError::InvalidRoomType(String::from("Suite")))
    );
    assert_eq!(RoomType::Triple.to_string(), "triple");
}

#[test]
fn test_client_full_name_skips_empty_parts() {
    let mut client: Client = Client::new(
        String::from("4510 123456"),
        String::from("Petrov"),
        String::from("Ivan"),
        String::from("Kazan"),
    );
    assert_eq!(client.full_name(), "Petrov Ivan");

    client.middle_name = String::from("Sergeevich");
    assert_eq!(client.full_name(), "Petrov Ivan Sergeevich");
}
