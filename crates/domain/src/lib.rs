// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod dates;
mod employee;
mod error;
mod overlap;
mod quarter;
mod reports;
mod stay;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use dates::{Period, days_between, format_date, parse_date_param};
pub use employee::{
    CleaningAssignment, Employee, EmployeeStatus, parse_weekday_code, validate_schedule,
    weekday_code,
};
pub use overlap::{capacity_overlap, intersects_period};
pub use quarter::Quarter;
pub use reports::{
    FloorRoomCount, FreeCapacityReport, QuarterlyReport, RoomClientCount, RoomIncome,
    RoomTypeAvailability, build_free_capacity_report, build_quarterly_report, free_places,
};
pub use stay::{Stay, StayDates, StayStatus, billable_nights, stay_cost};

// Re-export public types
pub use error::DomainError;
pub use types::{Client, Room, RoomType, resolve_capacity};
pub use validation::{validate_client, validate_daily_rate, validate_person_names, validate_room};
