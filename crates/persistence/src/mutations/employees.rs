// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hotel_ledger_domain::{CleaningAssignment, Employee, weekday_code};
use tracing::info;

use super::{require_affected, require_id};
use crate::backend::PersistenceBackend;
use crate::data_models::{encode_date, encode_optional_date};
use crate::diesel_schema::{cleaning_assignments, employees};
use crate::error::PersistenceError;

/// Inserts an employee and returns its ID.
///
/// # Errors
///
/// Returns an error if the insert fails.
pub fn create_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<i64, PersistenceError> {
    info!(last_name = %employee.last_name, "Creating employee");

    diesel::insert_into(employees::table)
        .values((
            employees::last_name.eq(&employee.last_name),
            employees::first_name.eq(&employee.first_name),
            employees::middle_name.eq(&employee.middle_name),
            employees::status.eq(employee.status.as_str()),
            employees::hire_date.eq(encode_date(employee.hire_date)),
            employees::termination_date.eq(encode_optional_date(employee.termination_date)),
        ))
        .execute(conn)?;

    let employee_id: i64 = conn.get_last_insert_rowid()?;
    info!(employee_id, "Employee created");
    Ok(employee_id)
}

/// Overwrites the names, status and termination date of an employee.
///
/// # Errors
///
/// Returns `NotFound` if the employee does not exist, or another error.
pub fn update_employee(
    conn: &mut SqliteConnection,
    employee: &Employee,
) -> Result<(), PersistenceError> {
    let employee_id: i64 = require_id(employee.employee_id, "Employee")?;
    info!(employee_id, status = employee.status.as_str(), "Updating employee");

    let rows: usize =
        diesel::update(employees::table.filter(employees::employee_id.eq(employee_id)))
            .set((
                employees::last_name.eq(&employee.last_name),
                employees::first_name.eq(&employee.first_name),
                employees::middle_name.eq(&employee.middle_name),
                employees::status.eq(employee.status.as_str()),
                employees::termination_date.eq(encode_optional_date(employee.termination_date)),
            ))
            .execute(conn)?;

    require_affected(rows, "Employee", employee_id)
}

/// Deletes an employee together with their assignments.
///
/// # Errors
///
/// Returns `NotFound` if the employee does not exist, or another error.
pub fn delete_employee(conn: &mut SqliteConnection, employee_id: i64) -> Result<(), PersistenceError> {
    info!(employee_id, "Deleting employee");

    let rows: usize =
        diesel::delete(employees::table.filter(employees::employee_id.eq(employee_id)))
            .execute(conn)?;
    require_affected(rows, "Employee", employee_id)
}

/// Replaces an employee's cleaning schedule.
///
/// # Errors
///
/// Returns `UniqueViolation` for a repeated (floor, weekday) entry, or
/// another error if a write fails.
pub fn replace_schedule(
    conn: &mut SqliteConnection,
    employee_id: i64,
    assignments: &[CleaningAssignment],
) -> Result<(), PersistenceError> {
    info!(employee_id, entries = assignments.len(), "Replacing cleaning schedule");

    diesel::delete(
        cleaning_assignments::table.filter(cleaning_assignments::employee_id.eq(employee_id)),
    )
    .execute(conn)?;

    for assignment in assignments {
        diesel::insert_into(cleaning_assignments::table)
            .values((
                cleaning_assignments::employee_id.eq(employee_id),
                cleaning_assignments::floor.eq(i32::from(assignment.floor)),
                cleaning_assignments::weekday.eq(weekday_code(assignment.weekday)),
            ))
            .execute(conn)?;
    }

    Ok(())
}
