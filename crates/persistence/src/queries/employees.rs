// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hotel_ledger_domain::{CleaningAssignment, Employee, EmployeeStatus, weekday_code};
use time::Weekday;
use tracing::debug;

use crate::data_models::{AssignmentRow, EmployeeRow, convert_rows};
use crate::diesel_schema::{cleaning_assignments, employees};
use crate::error::PersistenceError;

/// Optional filters for listing employees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmployeeFilter {
    pub status: Option<EmployeeStatus>,
}

/// Retrieves an employee by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
/// Returns `Ok(None)` if the employee does not exist.
pub fn get_employee(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Option<Employee>, PersistenceError> {
    debug!(employee_id, "Looking up employee");

    let row: Option<EmployeeRow> = employees::table
        .filter(employees::employee_id.eq(employee_id))
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Employee::try_from).transpose()
}

/// Lists employees ordered by last then first name.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_employees(
    conn: &mut SqliteConnection,
    filter: &EmployeeFilter,
) -> Result<Vec<Employee>, PersistenceError> {
    let mut query = employees::table
        .select(EmployeeRow::as_select())
        .order((
            employees::last_name.asc(),
            employees::first_name.asc(),
            employees::employee_id.asc(),
        ))
        .into_boxed();

    if let Some(status) = filter.status {
        query = query.filter(employees::status.eq(status.as_str()));
    }

    let rows: Vec<EmployeeRow> = query.load(conn)?;
    convert_rows(rows)
}

/// An employee's cleaning assignments in creation order.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn get_schedule(
    conn: &mut SqliteConnection,
    employee_id: i64,
) -> Result<Vec<CleaningAssignment>, PersistenceError> {
    let rows: Vec<AssignmentRow> = cleaning_assignments::table
        .filter(cleaning_assignments::employee_id.eq(employee_id))
        .order(cleaning_assignments::assignment_id.asc())
        .select(AssignmentRow::as_select())
        .load(conn)?;

    convert_rows(rows)
}

/// The employee assigned to clean `floor` on `weekday`.
///
/// When several employees share the slot the earliest assignment wins.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn find_cleaner(
    conn: &mut SqliteConnection,
    floor: u16,
    weekday: Weekday,
) -> Result<Option<Employee>, PersistenceError> {
    debug!(floor, weekday = weekday_code(weekday), "Looking up cleaner");

    let row: Option<EmployeeRow> = cleaning_assignments::table
        .inner_join(employees::table)
        .filter(cleaning_assignments::floor.eq(i32::from(floor)))
        .filter(cleaning_assignments::weekday.eq(weekday_code(weekday)))
        .order(cleaning_assignments::assignment_id.asc())
        .select(EmployeeRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Employee::try_from).transpose()
}
