// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{client_summary, persisted_id, required_period, stay_response};
use crate::error::{ApiError, translate_domain_error, translate_ledger_error, translate_persistence_error};
use crate::input_policy::{optional_text, require_param};
use crate::request_response::{
    CityCountQuery, CityCountResponse, ClientListQuery, ClientOverlapsResponse, ClientResponse,
    CreateClientRequest, ListClientsResponse, ListStaysResponse, PeriodQuery, UpdateClientRequest,
};
use hotel_ledger::StayLedger;
use hotel_ledger_domain::{Client, Stay, format_date, validate_client};
use hotel_ledger_persistence::{Persistence, StayFilter};
use time::Date;
use tracing::{debug, info};

fn client_response(client: &Client) -> Result<ClientResponse, ApiError> {
    Ok(ClientResponse {
        id: persisted_id(client.client_id, "Client")?,
        passport_number: client.passport_number.clone(),
        last_name: client.last_name.clone(),
        first_name: client.first_name.clone(),
        middle_name: client.middle_name.clone(),
        full_name: client.full_name(),
        city: client.city.clone(),
        phone: client.phone.clone(),
        email: client.email.clone(),
        notes: client.notes.clone(),
    })
}

fn require_client(persistence: &mut Persistence, client_id: i64) -> Result<Client, ApiError> {
    persistence
        .get_client(client_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::not_found("Client", client_id))
}

/// Registers a client.
///
/// # Errors
///
/// Returns an error if a required field is blank or the passport number is
/// already registered (`Conflict`).
pub fn create_client(
    persistence: &mut Persistence,
    request: &CreateClientRequest,
) -> Result<ClientResponse, ApiError> {
    let mut client: Client = Client::new(
        request.passport_number.trim().to_string(),
        request.last_name.trim().to_string(),
        request.first_name.trim().to_string(),
        request.city.trim().to_string(),
    );
    client.middle_name = optional_text(request.middle_name.as_deref());
    client.phone = optional_text(request.phone.as_deref());
    client.email = optional_text(request.email.as_deref());
    client.notes = optional_text(request.notes.as_deref());
    validate_client(&client).map_err(translate_domain_error)?;

    let client_id: i64 = persistence
        .create_client(&client)
        .map_err(translate_persistence_error)?;
    client.client_id = Some(client_id);
    info!(client_id, "Registered client");

    client_response(&client)
}

/// Retrieves a client.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the client does not exist.
pub fn get_client(persistence: &mut Persistence, client_id: i64) -> Result<ClientResponse, ApiError> {
    client_response(&require_client(persistence, client_id)?)
}

/// Lists clients by name, optionally restricted to one city.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn list_clients(
    persistence: &mut Persistence,
    query: &ClientListQuery,
) -> Result<ListClientsResponse, ApiError> {
    let city: Option<&str> = query
        .city
        .as_deref()
        .map(str::trim)
        .filter(|city| !city.is_empty());
    let clients: Vec<ClientResponse> = persistence
        .list_clients(city)
        .map_err(translate_persistence_error)?
        .iter()
        .map(client_response)
        .collect::<Result<_, _>>()?;
    Ok(ListClientsResponse { clients })
}

/// Applies a partial update to a client.
///
/// # Errors
///
/// Returns an error if the client does not exist, a required field would
/// become blank, or the new passport number is taken.
pub fn update_client(
    persistence: &mut Persistence,
    client_id: i64,
    request: &UpdateClientRequest,
) -> Result<ClientResponse, ApiError> {
    let mut client: Client = require_client(persistence, client_id)?;

    let text_fields: [(&mut String, &Option<String>); 8] = [
        (&mut client.passport_number, &request.passport_number),
        (&mut client.last_name, &request.last_name),
        (&mut client.first_name, &request.first_name),
        (&mut client.middle_name, &request.middle_name),
        (&mut client.city, &request.city),
        (&mut client.phone, &request.phone),
        (&mut client.email, &request.email),
        (&mut client.notes, &request.notes),
    ];
    for (current, requested) in text_fields {
        if let Some(value) = requested {
            *current = value.trim().to_string();
        }
    }
    validate_client(&client).map_err(translate_domain_error)?;

    persistence
        .update_client(&client)
        .map_err(translate_persistence_error)?;
    info!(client_id, "Updated client");

    client_response(&client)
}

/// Deletes a client and their stays.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the client does not exist.
pub fn delete_client(persistence: &mut Persistence, client_id: i64) -> Result<(), ApiError> {
    persistence
        .delete_client(client_id)
        .map_err(translate_persistence_error)?;
    info!(client_id, "Deleted client");
    Ok(())
}

/// Counts clients from a city, ignoring case.
///
/// # Errors
///
/// Returns `InvalidInput` if `city` is missing, or a query error.
pub fn count_by_city(
    persistence: &mut Persistence,
    query: &CityCountQuery,
) -> Result<CityCountResponse, ApiError> {
    let city: &str = require_param("city", query.city.as_deref())?;
    let count: usize = persistence
        .count_clients_by_city(city)
        .map_err(translate_persistence_error)?;
    debug!(city, count, "Counted clients by city");
    Ok(CityCountResponse {
        city: city.to_string(),
        count,
    })
}

/// Every stay of a client, latest check-in first.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the client does not exist.
pub fn list_client_stays(
    persistence: &mut Persistence,
    client_id: i64,
) -> Result<ListStaysResponse, ApiError> {
    require_client(persistence, client_id)?;
    let filter: StayFilter = StayFilter {
        client_id: Some(client_id),
        ..StayFilter::default()
    };
    let stays: Vec<Stay> = persistence
        .list_stays(&filter)
        .map_err(translate_persistence_error)?;
    Ok(ListStaysResponse {
        stays: stays.iter().map(stay_response).collect::<Result<_, _>>()?,
    })
}

/// Other clients who shared a room with the client during `[start, end]`.
///
/// # Errors
///
/// Returns an error if:
/// - `start` or `end` is missing or malformed
/// - `start` is after `end` (`InvalidDateRange`)
/// - The client does not exist
pub fn client_overlaps(
    persistence: &mut Persistence,
    client_id: i64,
    query: &PeriodQuery,
) -> Result<ClientOverlapsResponse, ApiError> {
    let (start, end): (Date, Date) =
        required_period(query.start.as_deref(), query.end.as_deref())?;

    let clients: Vec<Client> = StayLedger::new(persistence)
        .find_overlapping_clients(client_id, start, end)
        .map_err(translate_ledger_error)?;

    Ok(ClientOverlapsResponse {
        client_id,
        start: format_date(start),
        end: format_date(end),
        clients: clients.iter().map(client_summary).collect::<Result<_, _>>()?,
    })
}
