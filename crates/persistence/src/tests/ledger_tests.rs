// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The stay ledger running against `SQLite`.

use super::{create_test_persistence, seed_client, seed_room, seed_stay};
use crate::{Persistence, PersistenceError, StayFilter};
use hotel_ledger::{LedgerError, StayChanges, StayLedger, StayRepository};
use hotel_ledger_domain::{Client, DomainError, RoomType, Stay, StayDates, StayStatus};
use rust_decimal::Decimal;
use time::macros::date;

#[test]
fn test_create_and_checkout_persists_cost() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = seed_room(&mut persistence, 101, 1, RoomType::Single);
    let client_id: i64 = seed_client(&mut persistence, "P-1", "Petrov");

    let mut ledger = StayLedger::new(&mut persistence);
    let stay: Stay = ledger
        .create_stay(client_id, room_id, StayDates::new(date!(2025 - 01 - 10), None))
        .unwrap();
    let stay_id: i64 = stay.stay_id.unwrap();
    ledger.checkout(stay_id, date!(2025 - 01 - 15)).unwrap();

    let stored: Stay = persistence.get_stay(stay_id).unwrap().unwrap();
    assert_eq!(stored.status, StayStatus::Completed);
    assert_eq!(stored.check_out, Some(date!(2025 - 01 - 15)));
    assert_eq!(stored.total_cost, Decimal::from(17500));
    assert_eq!(stored.total_cost.to_string(), "17500.00");
}

#[test]
fn test_capacity_boundary_on_single_room() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = seed_room(&mut persistence, 101, 1, RoomType::Single);
    let first: i64 = seed_client(&mut persistence, "P-1", "Petrov");
    let second: i64 = seed_client(&mut persistence, "P-2", "Orlov");
    let third: i64 = seed_client(&mut persistence, "P-3", "Sidorova");

    let mut ledger = StayLedger::new(&mut persistence);
    ledger
        .create_stay(
            first,
            room_id,
            StayDates::new(date!(2025 - 01 - 01), Some(date!(2025 - 01 - 10))),
        )
        .unwrap();

    let overlapping = ledger.create_stay(
        second,
        room_id,
        StayDates::new(date!(2025 - 01 - 05), Some(date!(2025 - 01 - 20))),
    );
    assert!(matches!(
        overlapping,
        Err(LedgerError::Domain(DomainError::RoomCapacityExceeded { .. }))
    ));

    let adjacent = ledger.create_stay(
        third,
        room_id,
        StayDates::new(date!(2025 - 01 - 10), Some(date!(2025 - 01 - 20))),
    );
    assert!(adjacent.is_ok());
}

#[test]
fn test_rejected_create_leaves_no_row() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = seed_room(&mut persistence, 101, 1, RoomType::Single);
    let client_id: i64 = seed_client(&mut persistence, "P-1", "Petrov");

    let result = StayLedger::new(&mut persistence).create_stay(
        client_id,
        room_id,
        StayDates::new(date!(2025 - 01 - 10), Some(date!(2025 - 01 - 10))),
    );
    assert!(matches!(
        result,
        Err(LedgerError::Domain(DomainError::InvalidDateRange { .. }))
    ));

    assert!(
        persistence
            .list_stays(&StayFilter::default())
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_second_active_stay_is_rejected_by_ledger() {
    let mut persistence: Persistence = create_test_persistence();
    let room_a: i64 = seed_room(&mut persistence, 101, 1, RoomType::Single);
    let room_b: i64 = seed_room(&mut persistence, 102, 1, RoomType::Single);
    let client_id: i64 = seed_client(&mut persistence, "P-1", "Petrov");

    let mut ledger = StayLedger::new(&mut persistence);
    ledger
        .create_stay(client_id, room_a, StayDates::new(date!(2025 - 01 - 01), None))
        .unwrap();
    let result = ledger.create_stay(client_id, room_b, StayDates::new(date!(2025 - 03 - 01), None));

    assert_eq!(
        result,
        Err(LedgerError::Domain(DomainError::DuplicateActiveStay { client_id }))
    );
}

#[test]
fn test_unique_index_backs_the_one_active_stay_rule() {
    let mut persistence: Persistence = create_test_persistence();
    let room_a: i64 = seed_room(&mut persistence, 101, 1, RoomType::Single);
    let room_b: i64 = seed_room(&mut persistence, 102, 1, RoomType::Single);
    let client_id: i64 = seed_client(&mut persistence, "P-1", "Petrov");
    seed_stay(&mut persistence, client_id, room_a, date!(2025 - 01 - 01), None);

    let second: Stay = Stay::open(client_id, room_b, StayDates::new(date!(2025 - 02 - 01), None));
    let result = persistence.insert_stay(&second);

    assert!(matches!(result, Err(PersistenceError::UniqueViolation(_))));
}

#[test]
fn test_check_constraint_backs_date_order() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = seed_room(&mut persistence, 101, 1, RoomType::Single);
    let client_id: i64 = seed_client(&mut persistence, "P-1", "Petrov");

    let reversed: Stay = Stay::open(
        client_id,
        room_id,
        StayDates::new(date!(2025 - 02 - 01), Some(date!(2025 - 01 - 01))),
    );
    assert!(persistence.insert_stay(&reversed).is_err());
}

#[test]
fn test_rejected_update_rolls_back() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = seed_room(&mut persistence, 101, 1, RoomType::Single);
    let first: i64 = seed_client(&mut persistence, "P-1", "Petrov");
    let second: i64 = seed_client(&mut persistence, "P-2", "Orlov");
    seed_stay(
        &mut persistence,
        first,
        room_id,
        date!(2025 - 01 - 01),
        Some(date!(2025 - 01 - 05)),
    );
    let later: i64 = seed_stay(
        &mut persistence,
        second,
        room_id,
        date!(2025 - 01 - 10),
        Some(date!(2025 - 01 - 12)),
    );

    let changes: StayChanges = StayChanges {
        check_in: Some(date!(2025 - 01 - 03)),
        ..StayChanges::default()
    };
    let result = StayLedger::new(&mut persistence).update_stay(later, &changes);
    assert!(matches!(
        result,
        Err(LedgerError::Domain(DomainError::RoomCapacityExceeded { .. }))
    ));

    let stored: Stay = persistence.get_stay(later).unwrap().unwrap();
    assert_eq!(stored.check_in, date!(2025 - 01 - 10));
}

#[test]
fn test_atomically_rolls_back_earlier_writes() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = seed_room(&mut persistence, 101, 1, RoomType::Single);
    let client_id: i64 = seed_client(&mut persistence, "P-1", "Petrov");

    let result: Result<(), PersistenceError> = persistence.atomically(|repo: &mut Persistence| {
        let stay: Stay = Stay::open(client_id, room_id, StayDates::new(date!(2025 - 01 - 01), None));
        repo.insert_stay(&stay)?;
        Err(PersistenceError::Other(String::from("abort")))
    });
    assert!(result.is_err());

    assert!(
        persistence
            .list_stays(&StayFilter::default())
            .unwrap()
            .is_empty()
    );
    let next: Result<i64, PersistenceError> = persistence.atomically(|repo: &mut Persistence| {
        let stay: Stay = Stay::open(client_id, room_id, StayDates::new(date!(2025 - 01 - 01), None));
        repo.insert_stay(&stay)
    });
    assert!(next.is_ok());
}

#[test]
fn test_overlapping_clients_against_sqlite() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = seed_room(&mut persistence, 201, 2, RoomType::Double);
    let a: i64 = seed_client(&mut persistence, "P-1", "Petrov");
    let b: i64 = seed_client(&mut persistence, "P-2", "Orlov");
    seed_stay(
        &mut persistence,
        a,
        room_id,
        date!(2025 - 01 - 01),
        Some(date!(2025 - 01 - 10)),
    );
    seed_stay(&mut persistence, b, room_id, date!(2025 - 01 - 10), None);

    let mut ledger = StayLedger::new(&mut persistence);
    let from_a: Vec<Client> = ledger
        .find_overlapping_clients(a, date!(2025 - 01 - 01), date!(2025 - 01 - 31))
        .unwrap();
    let from_b: Vec<Client> = ledger
        .find_overlapping_clients(b, date!(2025 - 01 - 01), date!(2025 - 01 - 31))
        .unwrap();

    assert_eq!(from_a.len(), 1);
    assert_eq!(from_a[0].client_id, Some(b));
    assert_eq!(from_b.len(), 1);
    assert_eq!(from_b[0].client_id, Some(a));
}

#[test]
fn test_quarterly_report_against_sqlite() {
    let mut persistence: Persistence = create_test_persistence();
    let room_id: i64 = seed_room(&mut persistence, 101, 1, RoomType::Single);
    seed_room(&mut persistence, 301, 3, RoomType::Triple);
    let client_id: i64 = seed_client(&mut persistence, "P-1", "Petrov");

    let mut ledger = StayLedger::new(&mut persistence);
    let stay: Stay = ledger
        .create_stay(client_id, room_id, StayDates::new(date!(2025 - 09 - 29), None))
        .unwrap();
    ledger
        .checkout(stay.stay_id.unwrap(), date!(2025 - 10 - 02))
        .unwrap();

    let q3 = ledger.quarterly_report(2025, 3).unwrap();
    let q4 = ledger.quarterly_report(2025, 4).unwrap();

    assert_eq!(q3.clients_per_room.len(), 1);
    assert_eq!(q3.total_income, Decimal::ZERO);
    assert_eq!(q4.clients_per_room.len(), 1);
    assert_eq!(q4.total_income.to_string(), "10500.00");
    assert_eq!(q4.rooms_per_floor.len(), 2);
}
