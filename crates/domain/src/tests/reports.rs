// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    FreeCapacityReport, Quarter, QuarterlyReport, Room, RoomType, RoomTypeAvailability, Stay,
    StayDates, build_free_capacity_report, build_quarterly_report,
};
use rust_decimal::Decimal;
use std::collections::HashMap;
use time::Date;
use time::macros::date;

fn create_test_room(room_id: i64, number: u32, floor: u16, room_type: RoomType) -> Room {
    let mut room: Room = Room::new(
        number,
        floor,
        room_type,
        None,
        Decimal::from(3500),
        number.to_string(),
    );
    room.room_id = Some(room_id);
    room
}

fn create_test_stay(client_id: i64, room_id: i64, check_in: Date, check_out: Option<Date>) -> Stay {
    Stay::open(client_id, room_id, StayDates::new(check_in, check_out))
}

fn completed_stay(client_id: i64, room_id: i64, check_in: Date, check_out: Date) -> Stay {
    let mut stay: Stay = create_test_stay(client_id, room_id, check_in, None);
    stay.close(check_out, Decimal::from(1000)).unwrap();
    stay
}

#[test]
fn test_free_capacity_counts_rooms_with_a_free_place() {
    let rooms: Vec<Room> = vec![
        create_test_room(1, 101, 1, RoomType::Single),
        create_test_room(2, 102, 1, RoomType::Double),
        create_test_room(3, 201, 2, RoomType::Double),
        create_test_room(4, 301, 3, RoomType::Triple),
    ];
    let active: HashMap<i64, usize> = HashMap::from([(1, 1), (2, 1), (3, 2), (4, 3)]);

    let report: FreeCapacityReport = build_free_capacity_report(&rooms, &active);

    assert_eq!(report.total_free_rooms, 1);
    assert_eq!(
        report.by_type,
        vec![RoomTypeAvailability {
            room_type: RoomType::Double,
            count: 1
        }]
    );
}

#[test]
fn test_free_capacity_ignores_inactive_rooms() {
    let mut closed_room: Room = create_test_room(1, 101, 1, RoomType::Single);
    closed_room.is_active = false;
    let rooms: Vec<Room> = vec![closed_room, create_test_room(2, 301, 3, RoomType::Triple)];

    let report: FreeCapacityReport = build_free_capacity_report(&rooms, &HashMap::new());

    assert_eq!(report.total_free_rooms, 1);
    assert_eq!(report.by_type[0].room_type, RoomType::Triple);
}

#[test]
fn test_free_capacity_orders_types() {
    let rooms: Vec<Room> = vec![
        create_test_room(1, 301, 3, RoomType::Triple),
        create_test_room(2, 101, 1, RoomType::Single),
        create_test_room(3, 102, 1, RoomType::Single),
    ];

    let report: FreeCapacityReport = build_free_capacity_report(&rooms, &HashMap::new());

    assert_eq!(report.total_free_rooms, 3);
    assert_eq!(
        report.by_type,
        vec![
            RoomTypeAvailability {
                room_type: RoomType::Single,
                count: 2
            },
            RoomTypeAvailability {
                room_type: RoomType::Triple,
                count: 1
            },
        ]
    );
}

#[test]
fn test_quarterly_report_aggregates() {
    let rooms: Vec<Room> = vec![
        create_test_room(1, 101, 1, RoomType::Single),
        create_test_room(2, 102, 1, RoomType::Double),
        create_test_room(3, 201, 2, RoomType::Double),
    ];
    let stays: Vec<Stay> = vec![
        // Room 101: one client twice, completed inside Q1.
        completed_stay(10, 1, date!(2025 - 01 - 05), date!(2025 - 01 - 08)),
        completed_stay(10, 1, date!(2025 - 02 - 01), date!(2025 - 02 - 02)),
        // Room 102: two clients, one checked out after the quarter.
        completed_stay(11, 2, date!(2025 - 03 - 30), date!(2025 - 04 - 02)),
        create_test_stay(12, 2, date!(2025 - 03 - 31), None),
        // Room 201: entirely outside the quarter.
        completed_stay(13, 3, date!(2024 - 12 - 01), date!(2024 - 12 - 31)),
    ];

    let quarter: Quarter = Quarter::new(2025, 1).unwrap();
    let report: QuarterlyReport = build_quarterly_report(quarter, &rooms, &stays);

    let clients: Vec<(u32, usize)> = report
        .clients_per_room
        .iter()
        .map(|entry| (entry.room_number, entry.client_count))
        .collect();
    assert_eq!(clients, vec![(101, 1), (102, 2)]);

    let floors: Vec<(u16, usize)> = report
        .rooms_per_floor
        .iter()
        .map(|entry| (entry.floor, entry.room_count))
        .collect();
    assert_eq!(floors, vec![(1, 2), (2, 1)]);

    assert_eq!(report.income_per_room.len(), 1);
    assert_eq!(report.income_per_room[0].room_number, 101);
    assert_eq!(report.income_per_room[0].total_income, Decimal::from(4000));
    assert_eq!(report.total_income.to_string(), "4000.00");
}

#[test]
fn test_quarterly_report_empty_income_is_zero() {
    let rooms: Vec<Room> = vec![create_test_room(1, 101, 1, RoomType::Single)];
    let quarter: Quarter = Quarter::new(2025, 4).unwrap();

    let report: QuarterlyReport = build_quarterly_report(quarter, &rooms, &[]);

    assert!(report.clients_per_room.is_empty());
    assert!(report.income_per_room.is_empty());
    assert_eq!(report.total_income.to_string(), "0.00");
    assert_eq!(report.quarter.period().start(), date!(2025 - 10 - 01));
    assert_eq!(report.quarter.period().end(), date!(2025 - 12 - 31));
}
