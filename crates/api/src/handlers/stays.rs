// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{optional_date, required_date, stay_response};
use crate::error::{ApiError, translate_domain_error, translate_ledger_error, translate_persistence_error};
use crate::input_policy::optional_integer;
use crate::request_response::{
    CheckoutRequest, CreateStayRequest, ListStaysResponse, StayListQuery, StayResponse,
    UpdateStayRequest,
};
use hotel_ledger::{StayChanges, StayLedger};
use hotel_ledger_domain::{Stay, StayDates, StayStatus};
use hotel_ledger_persistence::{Persistence, StayFilter};
use time::Date;
use tracing::info;

/// Books a client into a room.
///
/// # Errors
///
/// Returns an error if:
/// - A date is malformed (`InvalidDateFormat`)
/// - The client or room does not exist
/// - Check-out is not after check-in (`InvalidDateRange`)
/// - The room is full for the dates (`RoomCapacityExceeded`)
/// - The client already has an active stay (`DuplicateActiveStay`)
pub fn create_stay(
    persistence: &mut Persistence,
    request: &CreateStayRequest,
) -> Result<StayResponse, ApiError> {
    let check_in: Date = required_date("check_in", Some(&request.check_in))?;
    let check_out: Option<Date> = optional_date("check_out", request.check_out.as_deref())?;

    let stay: Stay = StayLedger::new(persistence)
        .create_stay(
            request.client_id,
            request.room_id,
            StayDates::new(check_in, check_out),
        )
        .map_err(translate_ledger_error)?;
    info!(
        stay_id = ?stay.stay_id,
        client_id = stay.client_id,
        room_id = stay.room_id,
        "Created stay"
    );

    stay_response(&stay)
}

/// Retrieves a stay.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the stay does not exist.
pub fn get_stay(persistence: &mut Persistence, stay_id: i64) -> Result<StayResponse, ApiError> {
    let stay: Stay = persistence
        .get_stay(stay_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Stay", stay_id))?;
    stay_response(&stay)
}

/// Lists stays, latest check-in first, optionally filtered.
///
/// # Errors
///
/// Returns an error if a filter value is malformed or the query fails.
pub fn list_stays(
    persistence: &mut Persistence,
    query: &StayListQuery,
) -> Result<ListStaysResponse, ApiError> {
    let filter: StayFilter = StayFilter {
        client_id: optional_integer("client_id", query.client_id.as_deref())?,
        room_id: optional_integer("room_id", query.room_id.as_deref())?,
        status: query
            .status
            .as_deref()
            .map(str::trim)
            .filter(|status| !status.is_empty())
            .map(StayStatus::parse_str)
            .transpose()
            .map_err(translate_domain_error)?,
        room_number: optional_integer("room_number", query.room_number.as_deref())?,
    };

    let stays: Vec<Stay> = persistence
        .list_stays(&filter)
        .map_err(translate_persistence_error)?;
    Ok(ListStaysResponse {
        stays: stays.iter().map(stay_response).collect::<Result<_, _>>()?,
    })
}

/// Applies a partial update to a stay.
///
/// Status and total cost are not changeable here.
///
/// # Errors
///
/// Returns the same errors as [`create_stay`], plus `ResourceNotFound` if
/// the stay does not exist.
pub fn update_stay(
    persistence: &mut Persistence,
    stay_id: i64,
    request: &UpdateStayRequest,
) -> Result<StayResponse, ApiError> {
    let check_out: Option<Option<Date>> = match &request.check_out {
        None => None,
        Some(value) => Some(optional_date("check_out", value.as_deref())?),
    };
    let changes: StayChanges = StayChanges {
        client_id: request.client_id,
        room_id: request.room_id,
        check_in: optional_date("check_in", request.check_in.as_deref())?,
        check_out,
    };

    let stay: Stay = StayLedger::new(persistence)
        .update_stay(stay_id, &changes)
        .map_err(translate_ledger_error)?;
    info!(stay_id, "Updated stay");

    stay_response(&stay)
}

/// Deletes a stay.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the stay does not exist.
pub fn delete_stay(persistence: &mut Persistence, stay_id: i64) -> Result<(), ApiError> {
    persistence
        .delete_stay(stay_id)
        .map_err(translate_persistence_error)?;
    info!(stay_id, "Deleted stay");
    Ok(())
}

/// Checks a guest out and fixes the stay's cost.
///
/// # Errors
///
/// Returns an error if:
/// - `check_out` is missing or malformed
/// - The stay does not exist
/// - The stay is already completed (`StayAlreadyCompleted`)
/// - `check_out` is not after check-in (`InvalidDateRange`)
pub fn checkout(
    persistence: &mut Persistence,
    stay_id: i64,
    request: &CheckoutRequest,
) -> Result<StayResponse, ApiError> {
    let check_out: Date = required_date("check_out", request.check_out.as_deref())?;

    let stay: Stay = StayLedger::new(persistence)
        .checkout(stay_id, check_out)
        .map_err(translate_ledger_error)?;
    info!(stay_id, total_cost = %stay.total_cost, "Checked out stay");

    stay_response(&stay)
}
