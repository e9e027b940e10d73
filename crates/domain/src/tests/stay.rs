// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Stay, StayDates, StayStatus, billable_nights, stay_cost};
use rust_decimal::Decimal;
use time::macros::date;

fn create_test_stay() -> Stay {
    let mut stay: Stay = Stay::open(1, 1, StayDates::new(date!(2025 - 01 - 10), None));
    stay.stay_id = Some(11);
    stay
}

#[test]
fn test_open_stay_is_active_with_zero_cost() {
    let stay: Stay = create_test_stay();
    assert_eq!(stay.status, StayStatus::Active);
    assert_eq!(stay.total_cost, Decimal::ZERO);
    assert_eq!(stay.total_cost.to_string(), "0.00");
}

#[test]
fn test_close_computes_cost_from_nights() {
    let mut stay: Stay = create_test_stay();
    stay.close(date!(2025 - 01 - 15), Decimal::from(3500)).unwrap();

    assert_eq!(stay.status, StayStatus::Completed);
    assert_eq!(stay.check_out, Some(date!(2025 - 01 - 15)));
    assert_eq!(stay.total_cost, Decimal::from(17500));
    assert_eq!(stay.total_cost.to_string(), "17500.00");
}

#[test]
fn test_close_on_check_in_day_is_rejected() {
    let mut stay: Stay = create_test_stay();
    let result = stay.close(date!(2025 - 01 - 10), Decimal::from(3500));

    assert!(matches!(result, Err(DomainError::InvalidDateRange { .. })));
    assert_eq!(stay.status, StayStatus::Active);
    assert_eq!(stay.check_out, None);
}

#[test]
fn test_close_before_check_in_is_rejected() {
    let mut stay: Stay = create_test_stay();
    let result = stay.close(date!(2025 - 01 - 01), Decimal::from(3500));
    assert!(matches!(result, Err(DomainError::InvalidDateRange { .. })));
}

#[test]
fn test_close_twice_keeps_original_cost() {
    let mut stay: Stay = create_test_stay();
    stay.close(date!(2025 - 01 - 12), Decimal::from(1000)).unwrap();

    let result = stay.close(date!(2025 - 01 - 20), Decimal::from(1000));
    assert_eq!(
        result,
        Err(DomainError::StayAlreadyCompleted { stay_id: Some(11) })
    );
    assert_eq!(stay.total_cost, Decimal::from(2000));
    assert_eq!(stay.check_out, Some(date!(2025 - 01 - 12)));
}

#[test]
fn test_billable_nights_has_floor_of_one() {
    assert_eq!(billable_nights(date!(2025 - 01 - 10), date!(2025 - 01 - 11)), 1);
    assert_eq!(billable_nights(date!(2025 - 01 - 10), date!(2025 - 01 - 10)), 1);
    assert_eq!(billable_nights(date!(2025 - 01 - 10), date!(2025 - 02 - 10)), 31);
}

#[test]
fn test_stay_cost_keeps_cents() {
    let rate: Decimal = Decimal::new(519_950, 2);
    assert_eq!(stay_cost(3, rate).to_string(), "15598.50");
}

#[test]
fn test_stay_dates_validate() {
    assert!(StayDates::new(date!(2025 - 01 - 10), None).validate().is_ok());
    assert!(
        StayDates::new(date!(2025 - 01 - 10), Some(date!(2025 - 01 - 11)))
            .validate()
            .is_ok()
    );
    assert!(
        StayDates::new(date!(2025 - 01 - 10), Some(date!(2025 - 01 - 10)))
            .validate()
            .is_err()
    );
}

#[test]
fn test_stay_status_strings() {
    assert_eq!(StayStatus::parse_str("active"), Ok(StayStatus::Active));
    assert_eq!(StayStatus::parse_str("completed"), Ok(StayStatus::Completed));
    assert!(StayStatus::parse_str("Active").is_err());
}
