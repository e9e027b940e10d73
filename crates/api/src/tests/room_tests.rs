// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    create_test_persistence, create_test_room_request, seed_client, seed_room, seed_stay,
};
use crate::error::ApiError;
use crate::request_response::{
    CheckoutRequest, CreateRoomRequest, FreeCapacityResponse, ListRoomsResponse, PeriodQuery, RoomListQuery,
    RoomResponse, RoomStaysResponse, UpdateRoomRequest,
};
use crate::{
    checkout, create_room, delete_room, free_capacity, get_room, list_room_stays, list_rooms,
    update_room,
};
use hotel_ledger_persistence::Persistence;
use rust_decimal::Decimal;

fn period(start: &str, end: &str) -> PeriodQuery {
    PeriodQuery {
        start: Some(start.to_string()),
        end: Some(end.to_string()),
    }
}

#[test]
fn test_create_room_derives_capacity_from_type() {
    let mut persistence: Persistence = create_test_persistence();

    let room: RoomResponse = seed_room(&mut persistence, 301, 3, "triple");
    assert_eq!(room.capacity, 3);
    assert_eq!(room.room_type, "triple");
    assert_eq!(room.room_type_label, "Triple room");
    assert_eq!(room.occupied_places, 0);
    assert!(room.is_active);

    let mut request: CreateRoomRequest = create_test_room_request(302, 3, "double");
    request.capacity = Some(0);
    let room: RoomResponse = create_room(&mut persistence, &request).unwrap();
    assert_eq!(room.capacity, 2);

    let mut request: CreateRoomRequest = create_test_room_request(303, 3, "single");
    request.capacity = Some(4);
    let room: RoomResponse = create_room(&mut persistence, &request).unwrap();
    assert_eq!(room.capacity, 4);
}

#[test]
fn test_create_room_rejects_unknown_type() {
    let mut persistence: Persistence = create_test_persistence();

    let err: ApiError =
        create_room(&mut persistence, &create_test_room_request(101, 1, "suite")).unwrap_err();
    assert_eq!(err.code(), "InvalidRoomType");
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "room_type"));
}

#[test]
fn test_create_room_rejects_negative_rate() {
    let mut persistence: Persistence = create_test_persistence();

    let mut request: CreateRoomRequest = create_test_room_request(101, 1, "single");
    request.daily_rate = Decimal::new(-100, 2);
    let err: ApiError = create_room(&mut persistence, &request).unwrap_err();
    assert_eq!(err.code(), "InvalidDailyRate");
}

#[test]
fn test_create_room_with_taken_number_conflicts() {
    let mut persistence: Persistence = create_test_persistence();
    seed_room(&mut persistence, 101, 1, "single");

    let err: ApiError =
        create_room(&mut persistence, &create_test_room_request(101, 2, "double")).unwrap_err();
    assert_eq!(err.code(), "DuplicateRoomNumber");
    assert!(matches!(err, ApiError::Conflict { .. }));
}

#[test]
fn test_get_room_reports_occupancy() {
    let mut persistence: Persistence = create_test_persistence();
    let room: RoomResponse = seed_room(&mut persistence, 201, 2, "double");
    let client_id: i64 = seed_client(&mut persistence, "4500 000001", "Petrov").id;
    seed_stay(&mut persistence, client_id, room.id, "2025-01-10", None);

    let fetched: RoomResponse = get_room(&mut persistence, room.id).unwrap();
    assert_eq!(fetched.occupied_places, 1);
    assert_eq!(fetched.daily_rate, Decimal::new(350_000, 2));
}

#[test]
fn test_get_missing_room_is_not_found() {
    let mut persistence: Persistence = create_test_persistence();

    let err: ApiError = get_room(&mut persistence, 42).unwrap_err();
    assert_eq!(err.code(), "NotFound");
    assert_eq!(
        err,
        ApiError::ResourceNotFound {
            resource_type: String::from("Room"),
            message: String::from("Room 42 does not exist"),
        }
    );
}

#[test]
fn test_list_rooms_applies_filters() {
    let mut persistence: Persistence = create_test_persistence();
    seed_room(&mut persistence, 201, 2, "double");
    seed_room(&mut persistence, 101, 1, "single");
    seed_room(&mut persistence, 102, 1, "double");

    let all: ListRoomsResponse = list_rooms(&mut persistence, &RoomListQuery::default()).unwrap();
    let numbers: Vec<u32> = all.rooms.iter().map(|room| room.number).collect();
    assert_eq!(numbers, vec![101, 102, 201]);

    let query: RoomListQuery = RoomListQuery {
        room_type: Some(String::from("double")),
        floor: Some(String::from("1")),
        is_active: None,
    };
    let filtered: ListRoomsResponse = list_rooms(&mut persistence, &query).unwrap();
    assert_eq!(filtered.rooms.len(), 1);
    assert_eq!(filtered.rooms[0].number, 102);
}

#[test]
fn test_list_rooms_rejects_malformed_filters() {
    let mut persistence: Persistence = create_test_persistence();

    let query: RoomListQuery = RoomListQuery {
        is_active: Some(String::from("maybe")),
        ..RoomListQuery::default()
    };
    let err: ApiError = list_rooms(&mut persistence, &query).unwrap_err();
    assert_eq!(err.code(), "InvalidParameter");

    let query: RoomListQuery = RoomListQuery {
        floor: Some(String::from("-1")),
        ..RoomListQuery::default()
    };
    let err: ApiError = list_rooms(&mut persistence, &query).unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "floor"));
}

#[test]
fn test_update_room_changes_only_given_fields() {
    let mut persistence: Persistence = create_test_persistence();
    let room: RoomResponse = seed_room(&mut persistence, 101, 1, "single");

    let request: UpdateRoomRequest = UpdateRoomRequest {
        daily_rate: Some(Decimal::new(420_050, 2)),
        is_active: Some(false),
        ..UpdateRoomRequest::default()
    };
    let updated: RoomResponse = update_room(&mut persistence, room.id, &request).unwrap();
    assert_eq!(updated.number, 101);
    assert_eq!(updated.capacity, 1);
    assert!(!updated.is_active);

    let fetched: RoomResponse = get_room(&mut persistence, room.id).unwrap();
    assert_eq!(fetched.daily_rate.to_string(), "4200.50");
    assert!(!fetched.is_active);
}

#[test]
fn test_update_room_zero_capacity_falls_back_to_type() {
    let mut persistence: Persistence = create_test_persistence();
    let room: RoomResponse = seed_room(&mut persistence, 101, 1, "single");

    let request: UpdateRoomRequest = UpdateRoomRequest {
        room_type: Some(String::from("triple")),
        capacity: Some(0),
        ..UpdateRoomRequest::default()
    };
    let updated: RoomResponse = update_room(&mut persistence, room.id, &request).unwrap();
    assert_eq!(updated.room_type, "triple");
    assert_eq!(updated.capacity, 3);
}

#[test]
fn test_delete_room() {
    let mut persistence: Persistence = create_test_persistence();
    let room: RoomResponse = seed_room(&mut persistence, 101, 1, "single");

    delete_room(&mut persistence, room.id).unwrap();
    assert_eq!(get_room(&mut persistence, room.id).unwrap_err().code(), "NotFound");
    assert_eq!(delete_room(&mut persistence, room.id).unwrap_err().code(), "NotFound");
}

#[test]
fn test_list_room_stays_includes_client_summaries() {
    let mut persistence: Persistence = create_test_persistence();
    let room: RoomResponse = seed_room(&mut persistence, 201, 2, "double");
    let first: i64 = seed_client(&mut persistence, "4500 000001", "Abramov").id;
    let second: i64 = seed_client(&mut persistence, "4500 000002", "Zaitsev").id;
    seed_stay(&mut persistence, first, room.id, "2025-01-10", Some("2025-01-15"));
    seed_stay(&mut persistence, second, room.id, "2025-01-12", Some("2025-01-20"));

    let response: RoomStaysResponse =
        list_room_stays(&mut persistence, room.id, &period("2025-01-15", "2025-01-31")).unwrap();
    assert_eq!(response.start, "2025-01-15");
    assert_eq!(response.stays.len(), 2);
    assert_eq!(response.stays[0].client.id, second);
    assert_eq!(response.stays[0].client.full_name, "Zaitsev Test");
    assert_eq!(response.stays[1].client.city, "Kazan");
    assert_eq!(response.stays[1].check_out.as_deref(), Some("2025-01-15"));

    let response: RoomStaysResponse =
        list_room_stays(&mut persistence, room.id, &period("2025-01-21", "2025-01-31")).unwrap();
    assert!(response.stays.is_empty());
}

#[test]
fn test_list_room_stays_validates_period() {
    let mut persistence: Persistence = create_test_persistence();
    let room: RoomResponse = seed_room(&mut persistence, 101, 1, "single");

    let missing: PeriodQuery = PeriodQuery {
        start: None,
        end: Some(String::from("2025-01-31")),
    };
    let err: ApiError = list_room_stays(&mut persistence, room.id, &missing).unwrap_err();
    assert_eq!(err.code(), "MissingParameter");
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "start"));

    let err: ApiError =
        list_room_stays(&mut persistence, room.id, &period("2025-01-01", "2025-13-01")).unwrap_err();
    assert_eq!(err.code(), "InvalidDateFormat");
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "end"));

    let err: ApiError =
        list_room_stays(&mut persistence, room.id, &period("2025-02-01", "2025-01-01")).unwrap_err();
    assert_eq!(err.code(), "InvalidDateRange");

    let err: ApiError =
        list_room_stays(&mut persistence, 999, &period("2025-01-01", "2025-01-31")).unwrap_err();
    assert_eq!(err.code(), "NotFound");
}

#[test]
fn test_free_capacity_counts_rooms_with_space() {
    let mut persistence: Persistence = create_test_persistence();
    let single: RoomResponse = seed_room(&mut persistence, 101, 1, "single");
    let double: RoomResponse = seed_room(&mut persistence, 201, 2, "double");
    seed_room(&mut persistence, 202, 2, "double");
    let first: i64 = seed_client(&mut persistence, "4500 000001", "Abramov").id;
    let second: i64 = seed_client(&mut persistence, "4500 000002", "Zaitsev").id;
    let stay: i64 = seed_stay(&mut persistence, first, single.id, "2025-01-10", None).id;
    seed_stay(&mut persistence, second, double.id, "2025-01-10", None);

    let report: FreeCapacityResponse = free_capacity(&mut persistence).unwrap();
    assert_eq!(report.total_free_rooms, 2);
    assert_eq!(report.by_type.len(), 1);
    assert_eq!(report.by_type[0].room_type, "double");
    assert_eq!(report.by_type[0].count, 2);

    checkout(
        &mut persistence,
        stay,
        &CheckoutRequest {
            check_out: Some(String::from("2025-01-12")),
        },
    )
    .unwrap();
    let report: FreeCapacityResponse = free_capacity(&mut persistence).unwrap();
    assert_eq!(report.total_free_rooms, 3);
    assert_eq!(report.by_type[0].room_type, "single");
}
