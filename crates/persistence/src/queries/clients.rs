// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::SqliteConnection;
use diesel::prelude::*;
use hotel_ledger_domain::Client;
use tracing::debug;

use crate::data_models::ClientRow;
use crate::diesel_schema::clients;
use crate::error::PersistenceError;

/// Retrieves a client by ID.
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the client does not exist.
pub fn get_client(
    conn: &mut SqliteConnection,
    client_id: i64,
) -> Result<Option<Client>, PersistenceError> {
    debug!(client_id, "Looking up client");

    let row: Option<ClientRow> = clients::table
        .filter(clients::client_id.eq(client_id))
        .select(ClientRow::as_select())
        .first(conn)
        .optional()?;

    Ok(row.map(Client::from))
}

/// Loads the clients with the given IDs, ordered by name.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn get_clients(
    conn: &mut SqliteConnection,
    client_ids: &[i64],
) -> Result<Vec<Client>, PersistenceError> {
    if client_ids.is_empty() {
        return Ok(Vec::new());
    }

    let rows: Vec<ClientRow> = clients::table
        .filter(clients::client_id.eq_any(client_ids))
        .select(ClientRow::as_select())
        .order((
            clients::last_name.asc(),
            clients::first_name.asc(),
            clients::client_id.asc(),
        ))
        .load(conn)?;

    Ok(rows.into_iter().map(Client::from).collect())
}

/// Lists clients ordered by last then first name, optionally from one city.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_clients(
    conn: &mut SqliteConnection,
    city: Option<&str>,
) -> Result<Vec<Client>, PersistenceError> {
    let mut query = clients::table
        .select(ClientRow::as_select())
        .order((
            clients::last_name.asc(),
            clients::first_name.asc(),
            clients::client_id.asc(),
        ))
        .into_boxed();

    if let Some(city) = city {
        query = query.filter(clients::city.eq(city.to_string()));
    }

    let rows: Vec<ClientRow> = query.load(conn)?;
    Ok(rows.into_iter().map(Client::from).collect())
}

/// Counts clients whose city matches `city` ignoring case.
///
/// The comparison runs in Rust; `SQLite`'s `lower()` only folds ASCII.
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn count_clients_by_city(
    conn: &mut SqliteConnection,
    city: &str,
) -> Result<usize, PersistenceError> {
    let wanted: String = city.to_lowercase();
    let cities: Vec<String> = clients::table.select(clients::city).load(conn)?;

    Ok(cities
        .iter()
        .filter(|stored| stored.to_lowercase() == wanted)
        .count())
}
