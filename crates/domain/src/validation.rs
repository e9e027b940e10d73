// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Client, Room};
use rust_decimal::Decimal;

/// Validates a room's field constraints.
///
/// Uniqueness of the room number is not checked here (that requires the
/// store).
///
/// # Errors
///
/// Returns an error if:
/// - The room number is zero
/// - The capacity is zero
/// - The daily rate is negative or has more than two decimal places
pub fn validate_room(room: &Room) -> Result<(), DomainError> {
    if room.number == 0 {
        return Err(DomainError::InvalidRoomNumber(String::from(
            "Room number must be positive",
        )));
    }
    if room.capacity == 0 {
        return Err(DomainError::InvalidCapacity(format!(
            "Room {} must hold at least one guest",
            room.number
        )));
    }
    validate_daily_rate(room.daily_rate)
}

/// Validates a nightly rate.
///
/// # Errors
///
/// Returns `InvalidDailyRate` if the rate is negative or has more than two
/// significant decimal places.
pub fn validate_daily_rate(rate: Decimal) -> Result<(), DomainError> {
    if rate.is_sign_negative() && !rate.is_zero() {
        return Err(DomainError::InvalidDailyRate(rate));
    }
    if rate.normalize().scale() > 2 {
        return Err(DomainError::InvalidDailyRate(rate));
    }
    Ok(())
}

/// Validates a client's required identity fields.
///
/// # Errors
///
/// Returns an error if the passport number, last name, first name or city
/// is blank.
pub fn validate_client(client: &Client) -> Result<(), DomainError> {
    if client.passport_number.trim().is_empty() {
        return Err(DomainError::InvalidPassport(String::from(
            "Passport number cannot be empty",
        )));
    }
    validate_person_names(&client.last_name, &client.first_name)?;
    if client.city.trim().is_empty() {
        return Err(DomainError::InvalidCity(String::from(
            "City cannot be empty",
        )));
    }
    Ok(())
}

/// Validates the required name parts of a person.
///
/// # Errors
///
/// Returns `InvalidName` if the last or first name is blank.
pub fn validate_person_names(last_name: &str, first_name: &str) -> Result<(), DomainError> {
    if last_name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Last name cannot be empty",
        )));
    }
    if first_name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "First name cannot be empty",
        )));
    }
    Ok(())
}
