// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use diesel::sql_types::Text;
use hotel_ledger_domain::Stay;
use tracing::info;

use super::{require_affected, require_id};
use crate::backend::PersistenceBackend;
use crate::data_models::{encode_date, encode_money, encode_optional_date};
use crate::diesel_schema::stays;
use crate::error::PersistenceError;

/// Inserts a stay and returns its ID.
///
/// # Errors
///
/// Returns `UniqueViolation` if the client already has an active stay,
/// `ForeignKeyViolation` for an unknown client or room, or another error.
pub fn insert_stay(conn: &mut SqliteConnection, stay: &Stay) -> Result<i64, PersistenceError> {
    info!(
        client_id = stay.client_id,
        room_id = stay.room_id,
        check_in = %stay.check_in,
        "Creating stay"
    );

    diesel::insert_into(stays::table)
        .values((
            stays::client_id.eq(stay.client_id),
            stays::room_id.eq(stay.room_id),
            stays::check_in.eq(encode_date(stay.check_in)),
            stays::check_out.eq(encode_optional_date(stay.check_out)),
            stays::status.eq(stay.status.as_str()),
            stays::total_cost.eq(encode_money(stay.total_cost)),
        ))
        .execute(conn)?;

    let stay_id: i64 = conn.get_last_insert_rowid()?;
    info!(stay_id, "Stay created");
    Ok(stay_id)
}

/// Overwrites a stored stay and touches `updated_at`.
///
/// # Errors
///
/// Returns `NotFound` if the stay does not exist, or another error.
pub fn update_stay(conn: &mut SqliteConnection, stay: &Stay) -> Result<(), PersistenceError> {
    let stay_id: i64 = require_id(stay.stay_id, "Stay")?;
    info!(
        stay_id,
        status = stay.status.as_str(),
        total_cost = %stay.total_cost,
        "Updating stay"
    );

    let rows: usize = diesel::update(stays::table.filter(stays::stay_id.eq(stay_id)))
        .set((
            stays::client_id.eq(stay.client_id),
            stays::room_id.eq(stay.room_id),
            stays::check_in.eq(encode_date(stay.check_in)),
            stays::check_out.eq(encode_optional_date(stay.check_out)),
            stays::status.eq(stay.status.as_str()),
            stays::total_cost.eq(encode_money(stay.total_cost)),
            stays::updated_at.eq(diesel::dsl::sql::<Text>("CURRENT_TIMESTAMP")),
        ))
        .execute(conn)?;

    require_affected(rows, "Stay", stay_id)
}

/// Deletes a stay.
///
/// # Errors
///
/// Returns `NotFound` if the stay does not exist, or another error.
pub fn delete_stay(conn: &mut SqliteConnection, stay_id: i64) -> Result<(), PersistenceError> {
    info!(stay_id, "Deleting stay");

    let rows: usize = diesel::delete(stays::table.filter(stays::stay_id.eq(stay_id))).execute(conn)?;
    require_affected(rows, "Stay", stay_id)
}
