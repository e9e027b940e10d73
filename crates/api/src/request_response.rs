// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Dates travel as `YYYY-MM-DD` strings and are parsed by the handlers so a
//! malformed value can be reported against the field that carried it.
//! Money travels as a decimal string with two places.

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Distinguishes an absent field from an explicit `null`.
///
/// Use with `#[serde(default, deserialize_with = "deserialize_some")]` on an
/// `Option<Option<T>>`: absent gives `None`, `null` gives `Some(None)`.
///
/// # Errors
///
/// Returns the inner deserializer's error.
pub fn deserialize_some<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ============================================================================
// Rooms
// ============================================================================

/// API request to create a room.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateRoomRequest {
    pub number: u32,
    pub floor: u16,
    /// `single`, `double` or `triple`.
    pub room_type: String,
    /// Derived from the room type when absent or zero.
    pub capacity: Option<u16>,
    pub daily_rate: Decimal,
    pub phone_number: Option<String>,
    /// Defaults to `true`.
    pub is_active: Option<bool>,
    pub description: Option<String>,
}

/// API request to change a room; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateRoomRequest {
    pub number: Option<u32>,
    pub floor: Option<u16>,
    pub room_type: Option<String>,
    pub capacity: Option<u16>,
    pub daily_rate: Option<Decimal>,
    pub phone_number: Option<String>,
    pub is_active: Option<bool>,
    pub description: Option<String>,
}

/// Query parameters for listing rooms.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RoomListQuery {
    pub room_type: Option<String>,
    pub floor: Option<String>,
    pub is_active: Option<String>,
}

/// A room as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomResponse {
    pub id: i64,
    pub number: u32,
    pub floor: u16,
    pub room_type: String,
    pub room_type_label: String,
    pub capacity: u16,
    pub daily_rate: Decimal,
    pub phone_number: String,
    pub is_active: bool,
    pub description: String,
    /// Number of active stays in the room.
    pub occupied_places: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListRoomsResponse {
    pub rooms: Vec<RoomResponse>,
}

/// Query parameters naming an inclusive period.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct PeriodQuery {
    pub start: Option<String>,
    pub end: Option<String>,
}

/// A client as embedded in other responses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub id: i64,
    pub full_name: String,
    pub city: String,
}

/// A stay in a room, with the client who made it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStayResponse {
    pub id: i64,
    pub client: ClientSummary,
    pub check_in: String,
    pub check_out: Option<String>,
    pub status: String,
    pub total_cost: Decimal,
}

/// Stays in a room touching a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomStaysResponse {
    pub room_id: i64,
    pub start: String,
    pub end: String,
    pub stays: Vec<RoomStayResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTypeCountResponse {
    pub room_type: String,
    pub label: String,
    pub count: usize,
}

/// Active rooms with at least one free place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreeCapacityResponse {
    pub total_free_rooms: usize,
    pub by_type: Vec<RoomTypeCountResponse>,
}

// ============================================================================
// Clients
// ============================================================================

/// API request to register a client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateClientRequest {
    pub passport_number: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    pub city: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

/// API request to change a client; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateClientRequest {
    pub passport_number: Option<String>,
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
    pub city: Option<String>,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub notes: Option<String>,
}

/// Query parameters for listing clients.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ClientListQuery {
    /// Exact city match.
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientResponse {
    pub id: i64,
    pub passport_number: String,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub full_name: String,
    pub city: String,
    pub phone: String,
    pub email: String,
    pub notes: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListClientsResponse {
    pub clients: Vec<ClientResponse>,
}

/// Query parameters for counting clients from a city.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CityCountQuery {
    pub city: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CityCountResponse {
    pub city: String,
    pub count: usize,
}

/// Other clients who shared a room with a client during a period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientOverlapsResponse {
    pub client_id: i64,
    pub start: String,
    pub end: String,
    pub clients: Vec<ClientSummary>,
}

// ============================================================================
// Stays
// ============================================================================

/// API request to book a client into a room.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateStayRequest {
    pub client_id: i64,
    pub room_id: i64,
    pub check_in: String,
    pub check_out: Option<String>,
}

/// API request to change a stay.
///
/// Status and total cost are not accepted; they only change at checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateStayRequest {
    pub client_id: Option<i64>,
    pub room_id: Option<i64>,
    pub check_in: Option<String>,
    /// `null` clears the check-out date.
    #[serde(default, deserialize_with = "deserialize_some")]
    pub check_out: Option<Option<String>>,
}

/// API request to check a guest out.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CheckoutRequest {
    pub check_out: Option<String>,
}

/// Query parameters for listing stays.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct StayListQuery {
    pub client_id: Option<String>,
    pub room_id: Option<String>,
    pub status: Option<String>,
    pub room_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StayResponse {
    pub id: i64,
    pub client_id: i64,
    pub room_id: i64,
    pub check_in: String,
    pub check_out: Option<String>,
    pub status: String,
    pub total_cost: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListStaysResponse {
    pub stays: Vec<StayResponse>,
}

// ============================================================================
// Employees
// ============================================================================

/// One schedule entry: a floor on a weekday (`mon`..`sun`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentEntry {
    pub floor: i64,
    pub weekday: String,
}

/// API request to hire an employee.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CreateEmployeeRequest {
    pub last_name: String,
    pub first_name: String,
    pub middle_name: Option<String>,
    #[serde(default)]
    pub assignments: Vec<AssignmentEntry>,
}

/// API request to rename an employee; absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UpdateEmployeeRequest {
    pub last_name: Option<String>,
    pub first_name: Option<String>,
    pub middle_name: Option<String>,
}

/// API request replacing an employee's whole schedule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ReplaceScheduleRequest {
    pub assignments: Vec<AssignmentEntry>,
}

/// Query parameters for listing employees.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EmployeeListQuery {
    pub status: Option<String>,
}

/// Query parameters for finding who cleans a client's room.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WhoCleansQuery {
    pub client_id: Option<String>,
    pub weekday: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssignmentResponse {
    pub id: i64,
    pub floor: u16,
    pub weekday: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeResponse {
    pub id: i64,
    pub last_name: String,
    pub first_name: String,
    pub middle_name: String,
    pub full_name: String,
    pub status: String,
    pub hire_date: String,
    pub termination_date: Option<String>,
    pub assignments: Vec<AssignmentResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListEmployeesResponse {
    pub employees: Vec<EmployeeResponse>,
}

/// The employee cleaning a client's floor on a weekday.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoCleansResponse {
    pub client_id: i64,
    pub room_id: i64,
    pub floor: u16,
    pub weekday: String,
    pub employee: EmployeeResponse,
}

// ============================================================================
// Reports
// ============================================================================

/// Query parameters for the quarterly report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct QuarterlyReportQuery {
    pub quarter: Option<String>,
    pub year: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomClientCountResponse {
    pub room_id: i64,
    pub room_number: u32,
    pub client_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FloorRoomCountResponse {
    pub floor: u16,
    pub room_count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomIncomeResponse {
    pub room_id: i64,
    pub room_number: u32,
    pub total_income: Decimal,
}

/// Occupancy and income for a calendar quarter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuarterlyReportResponse {
    pub year: i32,
    pub quarter: u8,
    pub start: String,
    pub end: String,
    pub clients_per_room: Vec<RoomClientCountResponse>,
    pub rooms_per_floor: Vec<FloorRoomCountResponse>,
    pub income_per_room: Vec<RoomIncomeResponse>,
    pub total_income: Decimal,
}
