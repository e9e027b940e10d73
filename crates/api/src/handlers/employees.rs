// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::persisted_id;
use crate::error::{ApiError, translate_domain_error, translate_persistence_error};
use crate::input_policy::{InputPolicyError, parse_integer, require_param};
use crate::request_response::{
    AssignmentEntry, AssignmentResponse, CreateEmployeeRequest, EmployeeListQuery,
    EmployeeResponse, ListEmployeesResponse, ReplaceScheduleRequest, UpdateEmployeeRequest,
    WhoCleansQuery, WhoCleansResponse,
};
use hotel_ledger::StayRepository;
use hotel_ledger_domain::{
    CleaningAssignment, Employee, EmployeeStatus, Room, Stay, format_date, parse_weekday_code,
    validate_person_names, validate_schedule, weekday_code,
};
use hotel_ledger_persistence::{EmployeeFilter, Persistence};
use time::{Date, Weekday};
use tracing::info;

fn employee_response(
    employee: &Employee,
    schedule: &[CleaningAssignment],
) -> Result<EmployeeResponse, ApiError> {
    Ok(EmployeeResponse {
        id: persisted_id(employee.employee_id, "Employee")?,
        last_name: employee.last_name.clone(),
        first_name: employee.first_name.clone(),
        middle_name: employee.middle_name.clone(),
        full_name: employee.full_name(),
        status: employee.status.as_str().to_string(),
        hire_date: format_date(employee.hire_date),
        termination_date: employee.termination_date.map(format_date),
        assignments: schedule
            .iter()
            .map(|assignment: &CleaningAssignment| -> Result<AssignmentResponse, ApiError> {
                Ok(AssignmentResponse {
                    id: persisted_id(assignment.assignment_id, "Cleaning assignment")?,
                    floor: assignment.floor,
                    weekday: weekday_code(assignment.weekday).to_string(),
                })
            })
            .collect::<Result<_, _>>()?,
    })
}

fn load_response(persistence: &mut Persistence, employee: &Employee) -> Result<EmployeeResponse, ApiError> {
    let employee_id: i64 = persisted_id(employee.employee_id, "Employee")?;
    let schedule: Vec<CleaningAssignment> = persistence
        .get_schedule(employee_id)
        .map_err(translate_persistence_error)?;
    employee_response(employee, &schedule)
}

fn require_employee(persistence: &mut Persistence, employee_id: i64) -> Result<Employee, ApiError> {
    persistence
        .get_employee(employee_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Employee", employee_id))
}

fn parse_weekday(value: &str) -> Result<Weekday, ApiError> {
    parse_weekday_code(&value.trim().to_ascii_lowercase()).map_err(translate_domain_error)
}

/// Converts and validates schedule entries.
fn parse_schedule(entries: &[AssignmentEntry]) -> Result<Vec<CleaningAssignment>, ApiError> {
    let schedule: Vec<CleaningAssignment> = entries
        .iter()
        .map(|entry: &AssignmentEntry| -> Result<CleaningAssignment, ApiError> {
            let floor: u16 = u16::try_from(entry.floor).map_err(|_| InputPolicyError::OutOfRange {
                field: String::from("floor"),
                value: entry.floor.to_string(),
            })?;
            Ok(CleaningAssignment::new(floor, parse_weekday(&entry.weekday)?))
        })
        .collect::<Result<_, _>>()?;
    validate_schedule(&schedule).map_err(translate_domain_error)?;
    Ok(schedule)
}

/// Hires an employee with an optional initial schedule.
///
/// The employee starts active with `today` as the hire date.
///
/// # Errors
///
/// Returns an error if a name is blank or a schedule entry is invalid;
/// nothing is stored in that case.
pub fn create_employee(
    persistence: &mut Persistence,
    request: &CreateEmployeeRequest,
    today: Date,
) -> Result<EmployeeResponse, ApiError> {
    validate_person_names(&request.last_name, &request.first_name)
        .map_err(translate_domain_error)?;
    let schedule: Vec<CleaningAssignment> = parse_schedule(&request.assignments)?;

    let mut employee: Employee = Employee::new(
        request.last_name.trim().to_string(),
        request.first_name.trim().to_string(),
        request
            .middle_name
            .as_deref()
            .map(str::trim)
            .unwrap_or_default()
            .to_string(),
        today,
    );
    let employee_id: i64 = persistence
        .create_employee(&employee, &schedule)
        .map_err(translate_persistence_error)?;
    employee.employee_id = Some(employee_id);
    info!(employee_id, assignments = schedule.len(), "Hired employee");

    load_response(persistence, &employee)
}

/// Retrieves an employee with their schedule.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the employee does not exist.
pub fn get_employee(
    persistence: &mut Persistence,
    employee_id: i64,
) -> Result<EmployeeResponse, ApiError> {
    let employee: Employee = require_employee(persistence, employee_id)?;
    load_response(persistence, &employee)
}

/// Lists employees by name, optionally filtered by status.
///
/// # Errors
///
/// Returns an error if the status is unknown or the query fails.
pub fn list_employees(
    persistence: &mut Persistence,
    query: &EmployeeListQuery,
) -> Result<ListEmployeesResponse, ApiError> {
    let filter: EmployeeFilter = EmployeeFilter {
        status: query
            .status
            .as_deref()
            .map(str::trim)
            .filter(|status| !status.is_empty())
            .map(EmployeeStatus::parse_str)
            .transpose()
            .map_err(translate_domain_error)?,
    };

    let employees: Vec<Employee> = persistence
        .list_employees(&filter)
        .map_err(translate_persistence_error)?;
    let mut responses: Vec<EmployeeResponse> = Vec::with_capacity(employees.len());
    for employee in &employees {
        responses.push(load_response(persistence, employee)?);
    }
    Ok(ListEmployeesResponse {
        employees: responses,
    })
}

/// Renames an employee; absent fields are left alone.
///
/// # Errors
///
/// Returns an error if the employee does not exist or a required name
/// would become blank.
pub fn update_employee(
    persistence: &mut Persistence,
    employee_id: i64,
    request: &UpdateEmployeeRequest,
) -> Result<EmployeeResponse, ApiError> {
    let mut employee: Employee = require_employee(persistence, employee_id)?;
    if let Some(last_name) = request.last_name.as_deref() {
        employee.last_name = last_name.trim().to_string();
    }
    if let Some(first_name) = request.first_name.as_deref() {
        employee.first_name = first_name.trim().to_string();
    }
    if let Some(middle_name) = request.middle_name.as_deref() {
        employee.middle_name = middle_name.trim().to_string();
    }
    validate_person_names(&employee.last_name, &employee.first_name)
        .map_err(translate_domain_error)?;

    persistence
        .update_employee(&employee)
        .map_err(translate_persistence_error)?;
    info!(employee_id, "Updated employee");

    load_response(persistence, &employee)
}

/// Deletes an employee and their schedule.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the employee does not exist.
pub fn delete_employee(persistence: &mut Persistence, employee_id: i64) -> Result<(), ApiError> {
    persistence
        .delete_employee(employee_id)
        .map_err(translate_persistence_error)?;
    info!(employee_id, "Deleted employee");
    Ok(())
}

/// Fires an employee as of `today`.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the employee does not exist and
/// `EmployeeAlreadyFired` if they were already fired.
pub fn fire_employee(
    persistence: &mut Persistence,
    employee_id: i64,
    today: Date,
) -> Result<EmployeeResponse, ApiError> {
    let mut employee: Employee = require_employee(persistence, employee_id)?;
    employee.fire(today).map_err(translate_domain_error)?;

    persistence
        .update_employee(&employee)
        .map_err(translate_persistence_error)?;
    info!(employee_id, termination_date = %format_date(today), "Fired employee");

    load_response(persistence, &employee)
}

/// Replaces an employee's whole cleaning schedule.
///
/// # Errors
///
/// Returns an error if the employee does not exist or an entry is invalid;
/// the previous schedule is kept in that case.
pub fn replace_schedule(
    persistence: &mut Persistence,
    employee_id: i64,
    request: &ReplaceScheduleRequest,
) -> Result<EmployeeResponse, ApiError> {
    let schedule: Vec<CleaningAssignment> = parse_schedule(&request.assignments)?;
    persistence
        .replace_schedule(employee_id, &schedule)
        .map_err(translate_persistence_error)?;
    info!(employee_id, assignments = schedule.len(), "Replaced cleaning schedule");

    get_employee(persistence, employee_id)
}

/// Finds who cleans a client's room on a weekday.
///
/// The client's active stay gives the room and so the floor; the earliest
/// assignment for that floor and weekday wins.
///
/// # Errors
///
/// Returns an error if:
/// - `client_id` or `weekday` is missing or malformed
/// - The client has no active stay
/// - Nobody is assigned to the floor on that day
pub fn who_cleans(
    persistence: &mut Persistence,
    query: &WhoCleansQuery,
) -> Result<WhoCleansResponse, ApiError> {
    let client_id: i64 = parse_integer(
        "client_id",
        require_param("client_id", query.client_id.as_deref())?,
    )?;
    let weekday: Weekday = parse_weekday(require_param("weekday", query.weekday.as_deref())?)?;

    let stay: Stay = persistence
        .active_stay_for_client(client_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Stay"),
            message: format!("Client {client_id} has no active stay"),
        })?;
    let room: Room = persistence
        .get_room(stay.room_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Room", stay.room_id))?;

    let employee: Employee = persistence
        .find_cleaner(room.floor, weekday)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Employee"),
            message: format!(
                "Nobody cleans floor {} on '{}'",
                room.floor,
                weekday_code(weekday)
            ),
        })?;

    Ok(WhoCleansResponse {
        client_id,
        room_id: stay.room_id,
        floor: room.floor,
        weekday: weekday_code(weekday).to_string(),
        employee: load_response(persistence, &employee)?,
    })
}
