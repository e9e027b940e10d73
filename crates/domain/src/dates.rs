// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar date handling.
//!
//! Dates cross every boundary of the system as ISO-8601 calendar dates
//! (`YYYY-MM-DD`). This module owns parsing and formatting of that wire
//! form and the inclusive [`Period`] used by lookups and reports.

use crate::error::DomainError;
use time::Date;
use time::format_description::BorrowedFormatItem;
use time::macros::format_description;

const ISO_DATE: &[BorrowedFormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Parses an ISO-8601 calendar date supplied for a named parameter.
///
/// Only four unsigned year digits are accepted, and year 0 is rejected, so
/// every accepted date formats back to the same ten characters.
///
/// # Arguments
///
/// * `parameter` - The parameter name reported on failure
/// * `value` - The raw value
///
/// # Errors
///
/// Returns `DomainError::InvalidDateFormat` naming `parameter` if the value
/// is not a valid `YYYY-MM-DD` date in years 1 through 9999.
pub fn parse_date_param(parameter: &str, value: &str) -> Result<Date, DomainError> {
    let invalid = || DomainError::InvalidDateFormat {
        parameter: parameter.to_string(),
        value: value.to_string(),
    };

    if !has_iso_shape(value) {
        return Err(invalid());
    }
    Date::parse(value, ISO_DATE)
        .ok()
        .filter(|date| date.year() >= 1)
        .ok_or_else(invalid)
}

/// `DDDD-DD-DD` with ASCII digits and no sign.
fn has_iso_shape(value: &str) -> bool {
    let bytes: &[u8] = value.as_bytes();
    bytes.len() == 10
        && bytes.iter().enumerate().all(|(index, byte)| match index {
            4 | 7 => *byte == b'-',
            _ => byte.is_ascii_digit(),
        })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(date: Date) -> String {
    // A `Date` carries every component `ISO_DATE` names.
    date.format(ISO_DATE).unwrap_or_else(|_| date.to_string())
}

/// Whole days from `from` to `to` (negative when `to` precedes `from`).
#[must_use]
pub fn days_between(from: Date, to: Date) -> i64 {
    (to - from).whole_days()
}

/// An inclusive calendar period `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    start: Date,
    end: Date,
}

impl Period {
    /// Creates a period, rejecting reversed bounds.
    ///
    /// A single-day period (`start == end`) is valid.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidDateRange` if `start > end`.
    pub fn new(start: Date, end: Date) -> Result<Self, DomainError> {
        if start > end {
            return Err(DomainError::InvalidDateRange {
                start,
                end,
                reason: "start must not be after end",
            });
        }
        Ok(Self { start, end })
    }

    /// Parses both bounds from optional raw parameters.
    ///
    /// # Arguments
    ///
    /// * `start` - Raw value of the `start` parameter
    /// * `end` - Raw value of the `end` parameter
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateFormat` naming the malformed parameter, or
    /// `InvalidDateRange` if the parsed start is after the parsed end.
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        let start: Date = parse_date_param("start", start)?;
        let end: Date = parse_date_param("end", end)?;
        Self::new(start, end)
    }

    #[must_use]
    pub const fn start(&self) -> Date {
        self.start
    }

    #[must_use]
    pub const fn end(&self) -> Date {
        self.end
    }

    /// Returns whether `date` lies within the period, bounds included.
    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }
}
