// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use time::{Date, Weekday};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A date parameter is not a valid `YYYY-MM-DD` calendar date.
    InvalidDateFormat {
        /// The name of the offending parameter.
        parameter: String,
        /// The value that failed to parse.
        value: String,
    },
    /// A date range is empty or reversed.
    InvalidDateRange {
        /// The lower bound of the range.
        start: Date,
        /// The upper bound of the range.
        end: Date,
        /// Which ordering rule was broken.
        reason: &'static str,
    },
    /// Booking the stay would put more guests in the room than it holds.
    RoomCapacityExceeded {
        /// The room being booked.
        room_id: i64,
        /// The room capacity.
        capacity: u16,
        /// The number of other stays overlapping the candidate interval.
        overlapping: usize,
    },
    /// The client already has an active stay.
    DuplicateActiveStay {
        /// The client in question.
        client_id: i64,
    },
    /// Checkout was requested for a stay that is already completed.
    StayAlreadyCompleted {
        /// The stay in question, if persisted.
        stay_id: Option<i64>,
    },
    /// Quarter is outside 1..=4.
    InvalidQuarter(i64),
    /// Year is outside the supported calendar range.
    InvalidYear(i64),
    /// Room type is not one of the known kinds.
    InvalidRoomType(String),
    /// Room number is invalid.
    InvalidRoomNumber(String),
    /// Room capacity is zero.
    InvalidCapacity(String),
    /// Daily rate is negative or too precise.
    InvalidDailyRate(Decimal),
    /// Stay status string is not recognised.
    InvalidStayStatus(String),
    /// Employee status string is not recognised.
    InvalidEmployeeStatus(String),
    /// Weekday code is not one of `mon`..`sun`.
    InvalidWeekday(String),
    /// A person name is empty or invalid.
    InvalidName(String),
    /// Passport number is empty or invalid.
    InvalidPassport(String),
    /// City is empty.
    InvalidCity(String),
    /// Employee has already been fired.
    EmployeeAlreadyFired {
        /// The employee in question, if persisted.
        employee_id: Option<i64>,
    },
    /// The same floor and weekday appear twice in one schedule.
    DuplicateCleaningAssignment {
        /// The floor.
        floor: u16,
        /// The weekday.
        weekday: Weekday,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidDateFormat { parameter, value } => {
                write!(
                    f,
                    "Parameter '{parameter}' must be a date in YYYY-MM-DD format, got '{value}'"
                )
            }
            Self::InvalidDateRange { start, end, reason } => {
                write!(f, "Invalid date range {start} to {end}: {reason}")
            }
            Self::RoomCapacityExceeded {
                room_id,
                capacity,
                overlapping,
            } => write!(
                f,
                "Room {room_id} is fully booked for the requested dates \
                 (capacity {capacity}, {overlapping} overlapping stays)"
            ),
            Self::DuplicateActiveStay { client_id } => {
                write!(f, "Client {client_id} already has an active stay")
            }
            Self::StayAlreadyCompleted { stay_id } => match stay_id {
                Some(id) => write!(f, "Stay {id} is already completed"),
                None => write!(f, "Stay is already completed"),
            },
            Self::InvalidQuarter(quarter) => {
                write!(f, "Quarter must be between 1 and 4, got {quarter}")
            }
            Self::InvalidYear(year) => write!(f, "Invalid year: {year}"),
            Self::InvalidRoomType(msg) => write!(f, "Invalid room type: {msg}"),
            Self::InvalidRoomNumber(msg) => write!(f, "Invalid room number: {msg}"),
            Self::InvalidCapacity(msg) => write!(f, "Invalid capacity: {msg}"),
            Self::InvalidDailyRate(rate) => write!(
                f,
                "Invalid daily rate {rate}: must be non-negative with at most 2 decimal places"
            ),
            Self::InvalidStayStatus(msg) => write!(f, "Invalid stay status: {msg}"),
            Self::InvalidEmployeeStatus(msg) => write!(f, "Invalid employee status: {msg}"),
            Self::InvalidWeekday(msg) => write!(f, "Invalid weekday: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidPassport(msg) => write!(f, "Invalid passport number: {msg}"),
            Self::InvalidCity(msg) => write!(f, "Invalid city: {msg}"),
            Self::EmployeeAlreadyFired { employee_id } => match employee_id {
                Some(id) => write!(f, "Employee {id} is already fired"),
                None => write!(f, "Employee is already fired"),
            },
            Self::DuplicateCleaningAssignment { floor, weekday } => write!(
                f,
                "Floor {floor} is assigned more than once on {weekday}"
            ),
        }
    }
}

impl std::error::Error for DomainError {}
