// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Period, days_between, format_date, parse_date_param};
use time::macros::date;

#[test]
fn test_parse_date_param_accepts_iso_dates() {
    assert_eq!(
        parse_date_param("check_in", "2025-01-10"),
        Ok(date!(2025 - 01 - 10))
    );
}

#[test]
fn test_parse_date_param_names_the_parameter() {
    for raw in ["10.01.2025", "2025-1-10", "2025-02-30", "", "tomorrow"] {
        let result = parse_date_param("check_out", raw);
        assert_eq!(
            result,
            Err(DomainError::InvalidDateFormat {
                parameter: String::from("check_out"),
                value: raw.to_string(),
            }),
            "value {raw:?} should be rejected"
        );
    }
}

#[test]
fn test_parse_date_param_rejects_signed_and_long_years() {
    for raw in ["-0003-01-01", "+2025-01-01", "12025-01-01", "0000-01-01", "2025-01-10 "] {
        assert_eq!(
            parse_date_param("check_in", raw),
            Err(DomainError::InvalidDateFormat {
                parameter: String::from("check_in"),
                value: raw.to_string(),
            }),
            "value {raw:?} should be rejected"
        );
    }
}

#[test]
fn test_format_date_round_trips_edge_years() {
    assert_eq!(format_date(date!(0001 - 01 - 01)), "0001-01-01");
    assert_eq!(format_date(date!(9999 - 12 - 31)), "9999-12-31");
    assert_eq!(
        parse_date_param("end", "0001-01-01"),
        Ok(date!(0001 - 01 - 01))
    );
}

#[test]
fn test_format_date_pads_components() {
    assert_eq!(format_date(date!(2025 - 03 - 07)), "2025-03-07");
}

#[test]
fn test_days_between() {
    assert_eq!(days_between(date!(2025 - 01 - 10), date!(2025 - 01 - 15)), 5);
    assert_eq!(days_between(date!(2024 - 12 - 31), date!(2025 - 01 - 01)), 1);
    assert_eq!(days_between(date!(2025 - 01 - 15), date!(2025 - 01 - 10)), -5);
}

#[test]
fn test_period_allows_single_day() {
    let period: Period = Period::new(date!(2025 - 05 - 01), date!(2025 - 05 - 01)).unwrap();
    assert!(period.contains(date!(2025 - 05 - 01)));
    assert!(!period.contains(date!(2025 - 05 - 02)));
}

#[test]
fn test_period_rejects_reversed_bounds() {
    let result = Period::new(date!(2025 - 05 - 02), date!(2025 - 05 - 01));
    assert!(matches!(result, Err(DomainError::InvalidDateRange { .. })));
}

#[test]
fn test_period_parse_reports_the_bad_bound() {
    let result = Period::parse("2025-05-01", "05/31/2025");
    assert_eq!(
        result,
        Err(DomainError::InvalidDateFormat {
            parameter: String::from("end"),
            value: String::from("05/31/2025"),
        })
    );
}
