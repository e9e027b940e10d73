// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stay queries.
//!
//! The range-filtered lookups here are SQL prefilters for the ledger. They
//! compare ISO date text, which orders the same way as the dates, and may
//! return more rows than the exact predicates accept but never fewer.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hotel_ledger::StayScope;
use hotel_ledger_domain::{Period, Stay, StayDates, StayStatus};
use std::collections::HashMap;
use tracing::debug;

use crate::data_models::{StayRow, convert_rows, encode_date};
use crate::diesel_schema::stays;
use crate::error::PersistenceError;
use crate::queries::rooms::find_room_id_by_number;

/// Optional filters for listing stays. Unset fields match everything.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StayFilter {
    pub client_id: Option<i64>,
    pub room_id: Option<i64>,
    pub status: Option<StayStatus>,
    pub room_number: Option<u32>,
}

/// Retrieves a stay by ID.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
/// Returns `Ok(None)` if the stay does not exist.
pub fn get_stay(conn: &mut SqliteConnection, stay_id: i64) -> Result<Option<Stay>, PersistenceError> {
    debug!(stay_id, "Looking up stay");

    let row: Option<StayRow> = stays::table
        .filter(stays::stay_id.eq(stay_id))
        .select(StayRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Stay::try_from).transpose()
}

/// Lists stays matching `filter`, latest check-in first.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn list_stays(
    conn: &mut SqliteConnection,
    filter: &StayFilter,
) -> Result<Vec<Stay>, PersistenceError> {
    let numbered_room: Option<i64> = match filter.room_number {
        Some(number) => match find_room_id_by_number(conn, number)? {
            Some(room_id) => Some(room_id),
            None => return Ok(Vec::new()),
        },
        None => None,
    };

    let mut query = stays::table
        .select(StayRow::as_select())
        .order((stays::check_in.desc(), stays::stay_id.desc()))
        .into_boxed();

    if let Some(client_id) = filter.client_id {
        query = query.filter(stays::client_id.eq(client_id));
    }
    if let Some(room_id) = filter.room_id {
        query = query.filter(stays::room_id.eq(room_id));
    }
    if let Some(room_id) = numbered_room {
        query = query.filter(stays::room_id.eq(room_id));
    }
    if let Some(status) = filter.status {
        query = query.filter(stays::status.eq(status.as_str()));
    }

    let rows: Vec<StayRow> = query.load(conn)?;
    convert_rows(rows)
}

/// Stays in `room_id` whose interval may overlap `dates` under the
/// half-open capacity test.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn capacity_candidates(
    conn: &mut SqliteConnection,
    room_id: i64,
    dates: &StayDates,
    excluding: Option<i64>,
) -> Result<Vec<Stay>, PersistenceError> {
    let mut query = stays::table
        .filter(stays::room_id.eq(room_id))
        .filter(
            stays::check_out
                .is_null()
                .or(stays::check_out.gt(encode_date(dates.check_in))),
        )
        .select(StayRow::as_select())
        .into_boxed();

    if let Some(check_out) = dates.check_out {
        query = query.filter(stays::check_in.lt(encode_date(check_out)));
    }
    if let Some(stay_id) = excluding {
        query = query.filter(stays::stay_id.ne(stay_id));
    }

    let rows: Vec<StayRow> = query.load(conn)?;
    convert_rows(rows)
}

/// The active stay of a client, if any.
///
/// # Errors
///
/// Returns an error if the database query fails or the row is malformed.
pub fn active_stay_for_client(
    conn: &mut SqliteConnection,
    client_id: i64,
) -> Result<Option<Stay>, PersistenceError> {
    let row: Option<StayRow> = stays::table
        .filter(stays::client_id.eq(client_id))
        .filter(stays::status.eq(StayStatus::Active.as_str()))
        .order(stays::stay_id.asc())
        .select(StayRow::as_select())
        .first(conn)
        .optional()?;

    row.map(Stay::try_from).transpose()
}

/// Stays within `scope` touching `period` under the inclusive test.
///
/// # Errors
///
/// Returns an error if the database query fails or a row is malformed.
pub fn stays_touching(
    conn: &mut SqliteConnection,
    scope: StayScope<'_>,
    period: &Period,
) -> Result<Vec<Stay>, PersistenceError> {
    let mut query = stays::table
        .filter(
            stays::check_out
                .is_null()
                .or(stays::check_out.ge(encode_date(period.start()))),
        )
        .filter(stays::check_in.le(encode_date(period.end())))
        .select(StayRow::as_select())
        .into_boxed();

    query = match scope {
        StayScope::All => query,
        StayScope::Room(room_id) => query.filter(stays::room_id.eq(room_id)),
        StayScope::Client(client_id) => query.filter(stays::client_id.eq(client_id)),
        StayScope::Rooms(room_ids) => query.filter(stays::room_id.eq_any(room_ids.to_vec())),
    };

    let rows: Vec<StayRow> = query.load(conn)?;
    convert_rows(rows)
}

/// Number of active stays per room. Rooms without any are absent.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_active_stays_by_room(
    conn: &mut SqliteConnection,
) -> Result<HashMap<i64, usize>, PersistenceError> {
    let counts: Vec<(i64, i64)> = stays::table
        .filter(stays::status.eq(StayStatus::Active.as_str()))
        .group_by(stays::room_id)
        .select((stays::room_id, diesel::dsl::count_star()))
        .load(conn)?;

    counts
        .into_iter()
        .map(|(room_id, count)| {
            usize::try_from(count)
                .map(|count| (room_id, count))
                .map_err(|e| PersistenceError::ReconstructionError(e.to_string()))
        })
        .collect()
}
