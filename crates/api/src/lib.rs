// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

//! API boundary for the hotel stay ledger.
//!
//! Request DTOs come in, the ledger and directories do the work, response
//! DTOs or an [`ApiError`] go out. Transport concerns live in the server.

mod error;
mod handlers;
mod input_policy;
mod request_response;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, translate_domain_error, translate_ledger_error, translate_persistence_error,
};
pub use handlers::clients::{
    client_overlaps, count_by_city, create_client, delete_client, get_client, list_client_stays,
    list_clients, update_client,
};
pub use handlers::employees::{
    create_employee, delete_employee, fire_employee, get_employee, list_employees,
    replace_schedule, update_employee, who_cleans,
};
pub use handlers::reports::quarterly_report;
pub use handlers::rooms::{
    create_room, delete_room, free_capacity, get_room, list_room_stays, list_rooms, update_room,
};
pub use handlers::stays::{checkout, create_stay, delete_stay, get_stay, list_stays, update_stay};
pub use input_policy::InputPolicyError;
pub use request_response::{
    AssignmentEntry, AssignmentResponse, CheckoutRequest, CityCountQuery, CityCountResponse,
    ClientListQuery, ClientOverlapsResponse, ClientResponse, ClientSummary, CreateClientRequest,
    CreateEmployeeRequest, CreateRoomRequest, CreateStayRequest, EmployeeListQuery,
    EmployeeResponse, FloorRoomCountResponse, FreeCapacityResponse, ListClientsResponse,
    ListEmployeesResponse, ListRoomsResponse, ListStaysResponse, PeriodQuery,
    QuarterlyReportQuery, QuarterlyReportResponse, ReplaceScheduleRequest, RoomClientCountResponse,
    RoomIncomeResponse, RoomListQuery, RoomResponse, RoomStayResponse, RoomStaysResponse,
    RoomTypeCountResponse, StayListQuery, StayResponse, UpdateClientRequest,
    UpdateEmployeeRequest, UpdateRoomRequest, UpdateStayRequest, WhoCleansQuery,
    WhoCleansResponse, deserialize_some,
};
