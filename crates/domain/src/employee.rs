// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Housekeeping staff and their cleaning schedules.

use crate::error::DomainError;
use crate::types::join_name_parts;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::str::FromStr;
use time::{Date, Weekday};

/// Employment status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeStatus {
    Active,
    Fired,
}

impl EmployeeStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Fired => "fired",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `active` or `fired`.
    pub fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "active" => Ok(Self::Active),
            "fired" => Ok(Self::Fired),
            _ => Err(DomainError::InvalidEmployeeStatus(s.to_string())),
        }
    }
}

impl FromStr for EmployeeStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

/// A member of the housekeeping staff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Employee {
    pub employee_id: Option<i64>,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub status: EmployeeStatus,
    pub hire_date: Date,
    /// Set when the employee is fired.
    pub termination_date: Option<Date>,
}

impl Employee {
    /// Creates an active employee hired on `hire_date`.
    #[must_use]
    pub const fn new(
        last_name: String,
        first_name: String,
        middle_name: String,
        hire_date: Date,
    ) -> Self {
        Self {
            employee_id: None,
            last_name,
            first_name,
            middle_name,
            status: EmployeeStatus::Active,
            hire_date,
            termination_date: None,
        }
    }

    #[must_use]
    pub fn full_name(&self) -> String {
        join_name_parts(&self.last_name, &self.first_name, &self.middle_name)
    }

    /// Marks the employee as fired on `today`.
    ///
    /// # Errors
    ///
    /// Returns `EmployeeAlreadyFired` if the employee was already fired.
    pub fn fire(&mut self, today: Date) -> Result<(), DomainError> {
        if self.status == EmployeeStatus::Fired {
            return Err(DomainError::EmployeeAlreadyFired {
                employee_id: self.employee_id,
            });
        }
        self.status = EmployeeStatus::Fired;
        self.termination_date = Some(today);
        Ok(())
    }
}

/// One recurring cleaning duty: a floor on a weekday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CleaningAssignment {
    pub assignment_id: Option<i64>,
    pub floor: u16,
    pub weekday: Weekday,
}

impl CleaningAssignment {
    #[must_use]
    pub const fn new(floor: u16, weekday: Weekday) -> Self {
        Self {
            assignment_id: None,
            floor,
            weekday,
        }
    }
}

/// Parses a three-letter weekday code (`mon` through `sun`).
///
/// # Errors
///
/// Returns `InvalidWeekday` for any other value.
pub fn parse_weekday_code(code: &str) -> Result<Weekday, DomainError> {
    match code {
        "mon" => Ok(Weekday::Monday),
        "tue" => Ok(Weekday::Tuesday),
        "wed" => Ok(Weekday::Wednesday),
        "thu" => Ok(Weekday::Thursday),
        "fri" => Ok(Weekday::Friday),
        "sat" => Ok(Weekday::Saturday),
        "sun" => Ok(Weekday::Sunday),
        _ => Err(DomainError::InvalidWeekday(code.to_string())),
    }
}

/// The three-letter code for a weekday.
#[must_use]
pub const fn weekday_code(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Monday => "mon",
        Weekday::Tuesday => "tue",
        Weekday::Wednesday => "wed",
        Weekday::Thursday => "thu",
        Weekday::Friday => "fri",
        Weekday::Saturday => "sat",
        Weekday::Sunday => "sun",
    }
}

/// Rejects a schedule that lists the same floor and weekday twice.
///
/// # Errors
///
/// Returns `DuplicateCleaningAssignment` for the first repeated pair.
pub fn validate_schedule(assignments: &[CleaningAssignment]) -> Result<(), DomainError> {
    let mut seen: HashSet<(u16, Weekday)> = HashSet::new();
    for assignment in assignments {
        if !seen.insert((assignment.floor, assignment.weekday)) {
            return Err(DomainError::DuplicateCleaningAssignment {
                floor: assignment.floor,
                weekday: assignment.weekday,
            });
        }
    }
    Ok(())
}
