// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row structs and the conversions between stored columns and domain values.

use diesel::prelude::*;
use hotel_ledger_domain::{
    CleaningAssignment, Client, Employee, EmployeeStatus, Room, RoomType, Stay, StayStatus,
    format_date, parse_date_param, parse_weekday_code,
};
use rust_decimal::Decimal;
use std::str::FromStr;
use time::Date;

use crate::diesel_schema::{cleaning_assignments, clients, employees, rooms, stays};
use crate::error::PersistenceError;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = rooms)]
pub struct RoomRow {
    pub room_id: i64,
    pub number: i32,
    pub floor: i32,
    pub room_type: String,
    pub capacity: i32,
    pub daily_rate: String,
    pub phone_number: String,
    pub is_active: i32,
    pub description: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = clients)]
pub struct ClientRow {
    pub client_id: i64,
    pub passport_number: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

/// Stay columns; the bookkeeping timestamps are not part of the domain value.
#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = stays)]
pub struct StayRow {
    pub stay_id: i64,
    pub client_id: i64,
    pub room_id: i64,
    pub check_in: String,
    pub check_out: Option<String>,
    pub status: String,
    pub total_cost: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = employees)]
pub struct EmployeeRow {
    pub employee_id: i64,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub status: String,
    pub hire_date: String,
    pub termination_date: Option<String>,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = cleaning_assignments)]
pub struct AssignmentRow {
    pub assignment_id: i64,
    pub floor: i32,
    pub weekday: String,
}

fn reconstruction(err: impl std::fmt::Display) -> PersistenceError {
    PersistenceError::ReconstructionError(err.to_string())
}

fn narrow<T: TryFrom<i32>>(column: &str, value: i32) -> Result<T, PersistenceError> {
    T::try_from(value).map_err(|_| {
        PersistenceError::ReconstructionError(format!("{column} out of range: {value}"))
    })
}

fn decode_money(column: &str, value: &str) -> Result<Decimal, PersistenceError> {
    Decimal::from_str(value).map_err(|e| {
        PersistenceError::ReconstructionError(format!("{column} is not a decimal ({value}): {e}"))
    })
}

fn decode_date(column: &str, value: &str) -> Result<Date, PersistenceError> {
    parse_date_param(column, value).map_err(reconstruction)
}

fn decode_optional_date(column: &str, value: Option<&str>) -> Result<Option<Date>, PersistenceError> {
    value.map(|value| decode_date(column, value)).transpose()
}

/// Money is stored with exactly two decimal places.
pub fn encode_money(amount: Decimal) -> String {
    let mut amount: Decimal = amount;
    amount.rescale(2);
    amount.to_string()
}

pub fn encode_date(date: Date) -> String {
    format_date(date)
}

pub fn encode_optional_date(date: Option<Date>) -> Option<String> {
    date.map(format_date)
}

impl TryFrom<RoomRow> for Room {
    type Error = PersistenceError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        Ok(Self {
            room_id: Some(row.room_id),
            number: narrow("rooms.number", row.number)?,
            floor: narrow("rooms.floor", row.floor)?,
            room_type: RoomType::parse_str(&row.room_type).map_err(reconstruction)?,
            capacity: narrow("rooms.capacity", row.capacity)?,
            daily_rate: decode_money("rooms.daily_rate", &row.daily_rate)?,
            phone_number: row.phone_number,
            is_active: row.is_active != 0,
            description: row.description,
        })
    }
}

impl From<ClientRow> for Client {
    fn from(row: ClientRow) -> Self {
        Self {
            client_id: Some(row.client_id),
            passport_number: row.passport_number,
            last_name: row.last_name,
            first_name: row.first_name,
            middle_name: row.middle_name,
            city: row.city,
            phone: row.phone,
            email: row.email,
            notes: row.notes,
        }
    }
}

impl TryFrom<StayRow> for Stay {
    type Error = PersistenceError;

    fn try_from(row: StayRow) -> Result<Self, Self::Error> {
        Ok(Self {
            stay_id: Some(row.stay_id),
            client_id: row.client_id,
            room_id: row.room_id,
            check_in: decode_date("stays.check_in", &row.check_in)?,
            check_out: decode_optional_date("stays.check_out", row.check_out.as_deref())?,
            status: StayStatus::parse_str(&row.status).map_err(reconstruction)?,
            total_cost: decode_money("stays.total_cost", &row.total_cost)?,
        })
    }
}

impl TryFrom<EmployeeRow> for Employee {
    type Error = PersistenceError;

    fn try_from(row: EmployeeRow) -> Result<Self, Self::Error> {
        Ok(Self {
            employee_id: Some(row.employee_id),
            last_name: row.last_name,
            first_name: row.first_name,
            middle_name: row.middle_name,
            status: EmployeeStatus::parse_str(&row.status).map_err(reconstruction)?,
            hire_date: decode_date("employees.hire_date", &row.hire_date)?,
            termination_date: decode_optional_date(
                "employees.termination_date",
                row.termination_date.as_deref(),
            )?,
        })
    }
}

impl TryFrom<AssignmentRow> for CleaningAssignment {
    type Error = PersistenceError;

    fn try_from(row: AssignmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            assignment_id: Some(row.assignment_id),
            floor: narrow("cleaning_assignments.floor", row.floor)?,
            weekday: parse_weekday_code(&row.weekday).map_err(reconstruction)?,
        })
    }
}

/// Converts a batch of rows, failing on the first bad one.
pub fn convert_rows<R, T>(rows: Vec<R>) -> Result<Vec<T>, PersistenceError>
where
    T: TryFrom<R, Error = PersistenceError>,
{
    rows.into_iter().map(T::try_from).collect()
}
