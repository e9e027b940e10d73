// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each handler takes the persistence adapter and a request DTO, runs the
//! operation and returns a response DTO or an [`ApiError`]. Handlers are
//! synchronous; the server serialises access to the adapter.
//!
//! ## Module Organization
//!
//! - `rooms`: Room directory, room stay lookup, free-capacity report
//! - `clients`: Client directory, city count, overlap lookup
//! - `stays`: Stay booking, updates and checkout
//! - `employees`: Housekeeping staff and cleaning schedules
//! - `reports`: Quarterly occupancy and income

pub mod clients;
pub mod employees;
pub mod reports;
pub mod rooms;
pub mod stays;

use crate::error::{ApiError, translate_domain_error};
use crate::input_policy::require_param;
use crate::request_response::{ClientSummary, StayResponse};
use hotel_ledger_domain::{Client, Period, Stay, format_date, parse_date_param};
use time::Date;

/// Parses a required date parameter.
fn required_date(field: &str, value: Option<&str>) -> Result<Date, ApiError> {
    let raw: &str = require_param(field, value)?;
    parse_date_param(field, raw).map_err(translate_domain_error)
}

/// Parses an optional date field.
fn optional_date(field: &str, value: Option<&str>) -> Result<Option<Date>, ApiError> {
    value
        .map(|raw| parse_date_param(field, raw.trim()).map_err(translate_domain_error))
        .transpose()
}

/// Parses the `start`/`end` pair of a period lookup.
fn required_period(start: Option<&str>, end: Option<&str>) -> Result<(Date, Date), ApiError> {
    let start: Date = required_date("start", start)?;
    let end: Date = required_date("end", end)?;
    Period::new(start, end).map_err(translate_domain_error)?;
    Ok((start, end))
}

fn persisted_id(id: Option<i64>, what: &str) -> Result<i64, ApiError> {
    id.ok_or_else(|| ApiError::Internal {
        message: format!("{what} has no ID"),
    })
}

fn client_summary(client: &Client) -> Result<ClientSummary, ApiError> {
    Ok(ClientSummary {
        id: persisted_id(client.client_id, "Client")?,
        full_name: client.full_name(),
        city: client.city.clone(),
    })
}

fn stay_response(stay: &Stay) -> Result<StayResponse, ApiError> {
    Ok(StayResponse {
        id: persisted_id(stay.stay_id, "Stay")?,
        client_id: stay.client_id,
        room_id: stay.room_id,
        check_in: format_date(stay.check_in),
        check_out: stay.check_out.map(format_date),
        status: stay.status.as_str().to_string(),
        total_cost: stay.total_cost,
    })
}
