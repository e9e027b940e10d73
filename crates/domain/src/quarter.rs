// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar quarters for reporting.

use crate::dates::Period;
use crate::error::DomainError;
use time::{Date, Month};

/// A calendar quarter of a specific year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quarter {
    year: i32,
    number: u8,
    period: Period,
}

impl Quarter {
    /// Creates a quarter and derives its boundaries.
    ///
    /// Quarter `q` covers months `3(q-1)+1 ..= 3(q-1)+3`; the last day is
    /// the day before the next quarter starts (Dec 31 for Q4).
    ///
    /// # Arguments
    ///
    /// * `year` - Calendar year, 1 through 9999
    /// * `quarter` - Quarter number, 1 through 4
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuarter` if `quarter` is not in 1..=4 and
    /// `InvalidYear` if the year is outside the supported range.
    pub fn new(year: i64, quarter: i64) -> Result<Self, DomainError> {
        let number: u8 = u8::try_from(quarter)
            .ok()
            .filter(|q| (1..=4).contains(q))
            .ok_or(DomainError::InvalidQuarter(quarter))?;
        let year_value: i32 = i32::try_from(year)
            .ok()
            .filter(|y| (1..=9999).contains(y))
            .ok_or(DomainError::InvalidYear(year))?;

        let start: Date = first_day_of_quarter(year_value, number, year)?;
        let end: Date = if number == 4 {
            Date::from_calendar_date(year_value, Month::December, 31)
                .map_err(|_| DomainError::InvalidYear(year))?
        } else {
            first_day_of_quarter(year_value, number + 1, year)?
                .previous_day()
                .ok_or(DomainError::InvalidYear(year))?
        };

        Ok(Self {
            year: year_value,
            number,
            period: Period::new(start, end)?,
        })
    }

    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    #[must_use]
    pub const fn number(&self) -> u8 {
        self.number
    }

    /// The inclusive date range covered by this quarter.
    #[must_use]
    pub const fn period(&self) -> Period {
        self.period
    }
}

fn first_day_of_quarter(year: i32, quarter: u8, raw_year: i64) -> Result<Date, DomainError> {
    let month: Month = quarter
        .checked_sub(1)
        .and_then(|index| index.checked_mul(3)?.checked_add(1))
        .and_then(|month| Month::try_from(month).ok())
        .ok_or(DomainError::InvalidQuarter(i64::from(quarter)))?;
    Date::from_calendar_date(year, month, 1).map_err(|_| DomainError::InvalidYear(raw_year))
}
