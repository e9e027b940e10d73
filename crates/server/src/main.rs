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

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
};
use clap::Parser;
use hotel_ledger_api::{
    ApiError, CheckoutRequest, CityCountQuery, CityCountResponse, ClientListQuery,
    ClientOverlapsResponse, ClientResponse, CreateClientRequest, CreateEmployeeRequest,
    CreateRoomRequest, CreateStayRequest, EmployeeListQuery, EmployeeResponse,
    FreeCapacityResponse, ListClientsResponse, ListEmployeesResponse, ListRoomsResponse,
    ListStaysResponse, PeriodQuery, QuarterlyReportQuery, QuarterlyReportResponse,
    ReplaceScheduleRequest, RoomListQuery, RoomResponse, RoomStaysResponse, StayListQuery,
    StayResponse, UpdateClientRequest, UpdateEmployeeRequest, UpdateRoomRequest,
    UpdateStayRequest, WhoCleansQuery, WhoCleansResponse, checkout, client_overlaps,
    count_by_city, create_client, create_employee, create_room, create_stay, delete_client,
    delete_employee, delete_room, delete_stay, fire_employee, free_capacity, get_client,
    get_employee, get_room, get_stay, list_client_stays, list_clients, list_employees,
    list_room_stays, list_rooms, list_stays, quarterly_report, replace_schedule, update_client,
    update_employee, update_room, update_stay, who_cleans,
};
use hotel_ledger_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use time::{Date, OffsetDateTime};
use tokio::sync::Mutex;
use tracing::{error, info};

/// Hotel Ledger Server - HTTP server for the hotel stay ledger
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Address to bind the server to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The single connection sits behind a Mutex; every request holds it for
/// the whole operation.
#[derive(Clone)]
struct AppState {
    persistence: Arc<Mutex<Persistence>>,
}

/// Error response type.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Error indicator.
    error: bool,
    /// Stable machine-readable error code.
    code: String,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error code.
    code: String,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: true,
            code: self.code,
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let status: StatusCode = match err {
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::ResourceNotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::DomainRuleViolation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };
        Self {
            status,
            code: err.code().to_string(),
            message: err.to_string(),
        }
    }
}

/// The current calendar date, used as hire and termination date.
fn today() -> Date {
    OffsetDateTime::now_utc().date()
}

// ============================================================================
// Rooms
// ============================================================================

async fn handle_list_rooms(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<RoomListQuery>,
) -> Result<Json<ListRoomsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_rooms(&mut persistence, &query)?))
}

async fn handle_create_room(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateRoomRequest>,
) -> Result<(StatusCode, Json<RoomResponse>), HttpError> {
    info!(number = req.number, room_type = %req.room_type, "Handling create_room request");

    let mut persistence = app_state.persistence.lock().await;
    let room: RoomResponse = create_room(&mut persistence, &req)?;
    Ok((StatusCode::CREATED, Json(room)))
}

async fn handle_get_room(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
) -> Result<Json<RoomResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_room(&mut persistence, room_id)?))
}

/// Handler for PUT and PATCH `/rooms/{id}`; both apply the fields given.
async fn handle_update_room(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
    Json(req): Json<UpdateRoomRequest>,
) -> Result<Json<RoomResponse>, HttpError> {
    info!(room_id, "Handling update_room request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_room(&mut persistence, room_id, &req)?))
}

async fn handle_delete_room(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(room_id, "Handling delete_room request");

    let mut persistence = app_state.persistence.lock().await;
    delete_room(&mut persistence, room_id)?;
    Ok(StatusCode::NO_CONTENT)
}

/// Handler for GET `/rooms/{id}/clients`.
///
/// Stays in the room touching `[start, end]`, with their clients.
async fn handle_room_clients(
    AxumState(app_state): AxumState<AppState>,
    Path(room_id): Path<i64>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<RoomStaysResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_room_stays(&mut persistence, room_id, &query)?))
}

async fn handle_free_count(
    AxumState(app_state): AxumState<AppState>,
) -> Result<Json<FreeCapacityResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(free_capacity(&mut persistence)?))
}

// ============================================================================
// Clients
// ============================================================================

async fn handle_list_clients(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ClientListQuery>,
) -> Result<Json<ListClientsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_clients(&mut persistence, &query)?))
}

async fn handle_create_client(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateClientRequest>,
) -> Result<(StatusCode, Json<ClientResponse>), HttpError> {
    info!(last_name = %req.last_name, "Handling create_client request");

    let mut persistence = app_state.persistence.lock().await;
    let client: ClientResponse = create_client(&mut persistence, &req)?;
    Ok((StatusCode::CREATED, Json(client)))
}

async fn handle_get_client(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<ClientResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_client(&mut persistence, client_id)?))
}

async fn handle_update_client(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
    Json(req): Json<UpdateClientRequest>,
) -> Result<Json<ClientResponse>, HttpError> {
    info!(client_id, "Handling update_client request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_client(&mut persistence, client_id, &req)?))
}

async fn handle_delete_client(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(client_id, "Handling delete_client request");

    let mut persistence = app_state.persistence.lock().await;
    delete_client(&mut persistence, client_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_count_by_city(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<CityCountQuery>,
) -> Result<Json<CityCountResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(count_by_city(&mut persistence, &query)?))
}

async fn handle_client_stays(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
) -> Result<Json<ListStaysResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_client_stays(&mut persistence, client_id)?))
}

async fn handle_client_overlaps(
    AxumState(app_state): AxumState<AppState>,
    Path(client_id): Path<i64>,
    Query(query): Query<PeriodQuery>,
) -> Result<Json<ClientOverlapsResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(client_overlaps(&mut persistence, client_id, &query)?))
}

// ============================================================================
// Employees
// ============================================================================

async fn handle_list_employees(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<EmployeeListQuery>,
) -> Result<Json<ListEmployeesResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_employees(&mut persistence, &query)?))
}

async fn handle_create_employee(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<(StatusCode, Json<EmployeeResponse>), HttpError> {
    info!(last_name = %req.last_name, "Handling create_employee request");

    let mut persistence = app_state.persistence.lock().await;
    let employee: EmployeeResponse = create_employee(&mut persistence, &req, today())?;
    Ok((StatusCode::CREATED, Json(employee)))
}

async fn handle_get_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_employee(&mut persistence, employee_id)?))
}

async fn handle_update_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
    Json(req): Json<UpdateEmployeeRequest>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    info!(employee_id, "Handling update_employee request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_employee(&mut persistence, employee_id, &req)?))
}

async fn handle_delete_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(employee_id, "Handling delete_employee request");

    let mut persistence = app_state.persistence.lock().await;
    delete_employee(&mut persistence, employee_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_fire_employee(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    info!(employee_id, "Handling fire_employee request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(fire_employee(&mut persistence, employee_id, today())?))
}

async fn handle_replace_schedule(
    AxumState(app_state): AxumState<AppState>,
    Path(employee_id): Path<i64>,
    Json(req): Json<ReplaceScheduleRequest>,
) -> Result<Json<EmployeeResponse>, HttpError> {
    info!(
        employee_id,
        assignments = req.assignments.len(),
        "Handling replace_schedule request"
    );

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(replace_schedule(&mut persistence, employee_id, &req)?))
}

async fn handle_who_cleans(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<WhoCleansQuery>,
) -> Result<Json<WhoCleansResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(who_cleans(&mut persistence, &query)?))
}

// ============================================================================
// Stays
// ============================================================================

async fn handle_list_stays(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<StayListQuery>,
) -> Result<Json<ListStaysResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(list_stays(&mut persistence, &query)?))
}

async fn handle_create_stay(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<CreateStayRequest>,
) -> Result<(StatusCode, Json<StayResponse>), HttpError> {
    info!(
        client_id = req.client_id,
        room_id = req.room_id,
        check_in = %req.check_in,
        "Handling create_stay request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let stay: StayResponse = create_stay(&mut persistence, &req)?;
    Ok((StatusCode::CREATED, Json(stay)))
}

async fn handle_get_stay(
    AxumState(app_state): AxumState<AppState>,
    Path(stay_id): Path<i64>,
) -> Result<Json<StayResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(get_stay(&mut persistence, stay_id)?))
}

async fn handle_update_stay(
    AxumState(app_state): AxumState<AppState>,
    Path(stay_id): Path<i64>,
    Json(req): Json<UpdateStayRequest>,
) -> Result<Json<StayResponse>, HttpError> {
    info!(stay_id, "Handling update_stay request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(update_stay(&mut persistence, stay_id, &req)?))
}

async fn handle_delete_stay(
    AxumState(app_state): AxumState<AppState>,
    Path(stay_id): Path<i64>,
) -> Result<StatusCode, HttpError> {
    info!(stay_id, "Handling delete_stay request");

    let mut persistence = app_state.persistence.lock().await;
    delete_stay(&mut persistence, stay_id)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_checkout(
    AxumState(app_state): AxumState<AppState>,
    Path(stay_id): Path<i64>,
    Json(req): Json<CheckoutRequest>,
) -> Result<Json<StayResponse>, HttpError> {
    info!(stay_id, "Handling checkout request");

    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(checkout(&mut persistence, stay_id, &req)?))
}

// ============================================================================
// Reports
// ============================================================================

async fn handle_quarterly_report(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<QuarterlyReportQuery>,
) -> Result<Json<QuarterlyReportResponse>, HttpError> {
    let mut persistence = app_state.persistence.lock().await;
    Ok(Json(quarterly_report(&mut persistence, &query)?))
}

/// Builds the application router.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/rooms", get(handle_list_rooms).post(handle_create_room))
        .route("/rooms/free-count", get(handle_free_count))
        .route(
            "/rooms/{id}",
            get(handle_get_room)
                .put(handle_update_room)
                .patch(handle_update_room)
                .delete(handle_delete_room),
        )
        .route("/rooms/{id}/clients", get(handle_room_clients))
        .route("/clients", get(handle_list_clients).post(handle_create_client))
        .route("/clients/count-by-city", get(handle_count_by_city))
        .route(
            "/clients/{id}",
            get(handle_get_client)
                .put(handle_update_client)
                .patch(handle_update_client)
                .delete(handle_delete_client),
        )
        .route("/clients/{id}/stays", get(handle_client_stays))
        .route("/clients/{id}/overlaps", get(handle_client_overlaps))
        .route(
            "/employees",
            get(handle_list_employees).post(handle_create_employee),
        )
        .route("/employees/who-cleans", get(handle_who_cleans))
        .route(
            "/employees/{id}",
            get(handle_get_employee)
                .put(handle_update_employee)
                .patch(handle_update_employee)
                .delete(handle_delete_employee),
        )
        .route("/employees/{id}/fire", post(handle_fire_employee))
        .route("/employees/{id}/schedule", put(handle_replace_schedule))
        .route("/stays", get(handle_list_stays).post(handle_create_stay))
        .route(
            "/stays/{id}",
            get(handle_get_stay)
                .put(handle_update_stay)
                .patch(handle_update_stay)
                .delete(handle_delete_stay),
        )
        .route("/stays/{id}/checkout", post(handle_checkout))
        .route("/reports/quarterly", get(handle_quarterly_report))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Hotel Ledger Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
    };

    let app: Router = build_router(app_state);

    let addr: std::net::SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
