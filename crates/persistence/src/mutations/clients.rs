// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hotel_ledger_domain::Client;
use tracing::info;

use super::{require_affected, require_id};
use crate::backend::PersistenceBackend;
use crate::diesel_schema::clients;
use crate::error::PersistenceError;

/// Inserts a client and returns its ID.
///
/// # Errors
///
/// Returns `UniqueViolation` if the passport number is already registered,
/// or another error if the insert fails.
pub fn create_client(conn: &mut SqliteConnection, client: &Client) -> Result<i64, PersistenceError> {
    info!(
        last_name = %client.last_name,
        city = %client.city,
        "Creating client"
    );

    diesel::insert_into(clients::table)
        .values((
            clients::passport_number.eq(&client.passport_number),
            clients::last_name.eq(&client.last_name),
            clients::first_name.eq(&client.first_name),
            clients::middle_name.eq(&client.middle_name),
            clients::city.eq(&client.city),
            clients::phone.eq(&client.phone),
            clients::email.eq(&client.email),
            clients::notes.eq(&client.notes),
        ))
        .execute(conn)?;

    let client_id: i64 = conn.get_last_insert_rowid()?;
    info!(client_id, "Client created");
    Ok(client_id)
}

/// Overwrites every column of a stored client.
///
/// # Errors
///
/// Returns `NotFound` if the client does not exist, `UniqueViolation` if
/// the passport number belongs to another client, or another error.
pub fn update_client(conn: &mut SqliteConnection, client: &Client) -> Result<(), PersistenceError> {
    let client_id: i64 = require_id(client.client_id, "Client")?;
    info!(client_id, "Updating client");

    let rows: usize = diesel::update(clients::table.filter(clients::client_id.eq(client_id)))
        .set((
            clients::passport_number.eq(&client.passport_number),
            clients::last_name.eq(&client.last_name),
            clients::first_name.eq(&client.first_name),
            clients::middle_name.eq(&client.middle_name),
            clients::city.eq(&client.city),
            clients::phone.eq(&client.phone),
            clients::email.eq(&client.email),
            clients::notes.eq(&client.notes),
        ))
        .execute(conn)?;

    require_affected(rows, "Client", client_id)
}

/// Deletes a client together with their stays.
///
/// # Errors
///
/// Returns `NotFound` if the client does not exist, or another error.
pub fn delete_client(conn: &mut SqliteConnection, client_id: i64) -> Result<(), PersistenceError> {
    info!(client_id, "Deleting client");

    let rows: usize =
        diesel::delete(clients::table.filter(clients::client_id.eq(client_id))).execute(conn)?;
    require_affected(rows, "Client", client_id)
}
