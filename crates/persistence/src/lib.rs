// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! `SQLite` persistence for the hotel stay ledger.
//!
//! This crate stores rooms, clients, stays, employees and cleaning
//! assignments with Diesel, and implements [`StayRepository`] so the stay
//! ledger can run on top of it.
//!
//! ## Storage conventions
//!
//! - Calendar dates are `YYYY-MM-DD` text, so text comparison matches date order
//! - Money is decimal text with exactly two places
//! - Booleans are integers (`0`/`1`)
//! - Stays and cleaning assignments cascade with their owner
//!
//! ## Units of work
//!
//! [`StayRepository::atomically`] opens `BEGIN IMMEDIATE`, so a unit holds
//! the write lock from its first read to its commit. Any error rolls the
//! whole unit back.
//!
//! ## Testing
//!
//! [`Persistence::new_in_memory`] gives every caller its own shared-cache
//! in-memory database with migrations applied.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use hotel_ledger::{StayRepository, StayScope};
use hotel_ledger_domain::{CleaningAssignment, Client, Employee, Period, Room, Stay, StayDates};
use std::collections::HashMap;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::Weekday;

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use error::PersistenceError;
pub use queries::{EmployeeFilter, RoomFilter, StayFilter};

use backend::PersistenceBackend;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// so tests never share state.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Rooms
    // ========================================================================

    /// Stores a new room and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` if the room number is taken, or another
    /// error if the insert fails.
    pub fn create_room(&mut self, room: &Room) -> Result<i64, PersistenceError> {
        mutations::rooms::create_room(&mut self.conn, room)
    }

    /// Retrieves a room by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_room(&mut self, room_id: i64) -> Result<Option<Room>, PersistenceError> {
        queries::rooms::get_room(&mut self.conn, room_id)
    }

    /// Lists rooms matching `filter`, ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_rooms_filtered(&mut self, filter: &RoomFilter) -> Result<Vec<Room>, PersistenceError> {
        queries::rooms::list_rooms(&mut self.conn, filter)
    }

    /// Overwrites a stored room.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `UniqueViolation`, or another database error.
    pub fn update_room(&mut self, room: &Room) -> Result<(), PersistenceError> {
        mutations::rooms::update_room(&mut self.conn, room)
    }

    /// Deletes a room and its stays.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the room does not exist, or another error.
    pub fn delete_room(&mut self, room_id: i64) -> Result<(), PersistenceError> {
        mutations::rooms::delete_room(&mut self.conn, room_id)
    }

    // ========================================================================
    // Clients
    // ========================================================================

    /// Stores a new client and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns `UniqueViolation` for a duplicate passport number, or another
    /// error if the insert fails.
    pub fn create_client(&mut self, client: &Client) -> Result<i64, PersistenceError> {
        mutations::clients::create_client(&mut self.conn, client)
    }

    /// Retrieves a client by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_client(&mut self, client_id: i64) -> Result<Option<Client>, PersistenceError> {
        queries::clients::get_client(&mut self.conn, client_id)
    }

    /// Lists clients by name, optionally restricted to one city.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_clients(&mut self, city: Option<&str>) -> Result<Vec<Client>, PersistenceError> {
        queries::clients::list_clients(&mut self.conn, city)
    }

    /// Overwrites a stored client.
    ///
    /// # Errors
    ///
    /// Returns `NotFound`, `UniqueViolation`, or another database error.
    pub fn update_client(&mut self, client: &Client) -> Result<(), PersistenceError> {
        mutations::clients::update_client(&mut self.conn, client)
    }

    /// Deletes a client and their stays.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the client does not exist, or another error.
    pub fn delete_client(&mut self, client_id: i64) -> Result<(), PersistenceError> {
        mutations::clients::delete_client(&mut self.conn, client_id)
    }

    /// Number of clients from `city`, ignoring case.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn count_clients_by_city(&mut self, city: &str) -> Result<usize, PersistenceError> {
        queries::clients::count_clients_by_city(&mut self.conn, city)
    }

    // ========================================================================
    // Stays
    // ========================================================================

    /// Retrieves a stay by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_stay(&mut self, stay_id: i64) -> Result<Option<Stay>, PersistenceError> {
        queries::stays::get_stay(&mut self.conn, stay_id)
    }

    /// Lists stays matching `filter`, latest check-in first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_stays(&mut self, filter: &StayFilter) -> Result<Vec<Stay>, PersistenceError> {
        queries::stays::list_stays(&mut self.conn, filter)
    }

    /// Deletes a stay.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the stay does not exist, or another error.
    pub fn delete_stay(&mut self, stay_id: i64) -> Result<(), PersistenceError> {
        mutations::stays::delete_stay(&mut self.conn, stay_id)
    }

    // ========================================================================
    // Employees
    // ========================================================================

    /// Stores a new employee with an initial schedule and returns its ID.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; nothing is stored in that case.
    pub fn create_employee(
        &mut self,
        employee: &Employee,
        schedule: &[CleaningAssignment],
    ) -> Result<i64, PersistenceError> {
        self.atomically(|persistence: &mut Self| -> Result<i64, PersistenceError> {
            let employee_id: i64 = mutations::employees::create_employee(&mut persistence.conn, employee)?;
            mutations::employees::replace_schedule(&mut persistence.conn, employee_id, schedule)?;
            Ok(employee_id)
        })
    }

    /// Retrieves an employee by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_employee(&mut self, employee_id: i64) -> Result<Option<Employee>, PersistenceError> {
        queries::employees::get_employee(&mut self.conn, employee_id)
    }

    /// Lists employees by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_employees(
        &mut self,
        filter: &EmployeeFilter,
    ) -> Result<Vec<Employee>, PersistenceError> {
        queries::employees::list_employees(&mut self.conn, filter)
    }

    /// An employee's cleaning assignments.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_schedule(
        &mut self,
        employee_id: i64,
    ) -> Result<Vec<CleaningAssignment>, PersistenceError> {
        queries::employees::get_schedule(&mut self.conn, employee_id)
    }

    /// Overwrites an employee's names, status and termination date.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist, or another error.
    pub fn update_employee(&mut self, employee: &Employee) -> Result<(), PersistenceError> {
        mutations::employees::update_employee(&mut self.conn, employee)
    }

    /// Deletes an employee and their assignments.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist, or another error.
    pub fn delete_employee(&mut self, employee_id: i64) -> Result<(), PersistenceError> {
        mutations::employees::delete_employee(&mut self.conn, employee_id)
    }

    /// Replaces an employee's whole cleaning schedule in one unit of work.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the employee does not exist, or another error;
    /// the previous schedule is kept on failure.
    pub fn replace_schedule(
        &mut self,
        employee_id: i64,
        schedule: &[CleaningAssignment],
    ) -> Result<(), PersistenceError> {
        self.atomically(|persistence: &mut Self| -> Result<(), PersistenceError> {
            if queries::employees::get_employee(&mut persistence.conn, employee_id)?.is_none() {
                return Err(PersistenceError::NotFound(format!("Employee {employee_id}")));
            }
            mutations::employees::replace_schedule(&mut persistence.conn, employee_id, schedule)
        })
    }

    /// The employee cleaning `floor` on `weekday`, earliest assignment first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn find_cleaner(
        &mut self,
        floor: u16,
        weekday: Weekday,
    ) -> Result<Option<Employee>, PersistenceError> {
        queries::employees::find_cleaner(&mut self.conn, floor, weekday)
    }
}

impl StayRepository for Persistence {
    type Error = PersistenceError;

    fn atomically<T, E, F>(&mut self, op: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<Self::Error>,
    {
        backend::sqlite::begin_immediate(&mut self.conn)?;
        match op(self) {
            Ok(value) => {
                backend::sqlite::commit(&mut self.conn)?;
                Ok(value)
            }
            Err(err) => {
                backend::sqlite::rollback(&mut self.conn);
                Err(err)
            }
        }
    }

    fn find_room(&mut self, room_id: i64) -> Result<Option<Room>, Self::Error> {
        queries::rooms::get_room(&mut self.conn, room_id)
    }

    fn list_rooms(&mut self) -> Result<Vec<Room>, Self::Error> {
        queries::rooms::list_rooms(&mut self.conn, &RoomFilter::default())
    }

    fn find_client(&mut self, client_id: i64) -> Result<Option<Client>, Self::Error> {
        queries::clients::get_client(&mut self.conn, client_id)
    }

    fn find_clients(&mut self, client_ids: &[i64]) -> Result<Vec<Client>, Self::Error> {
        queries::clients::get_clients(&mut self.conn, client_ids)
    }

    fn find_stay(&mut self, stay_id: i64) -> Result<Option<Stay>, Self::Error> {
        queries::stays::get_stay(&mut self.conn, stay_id)
    }

    fn capacity_candidates(
        &mut self,
        room_id: i64,
        dates: &StayDates,
        excluding: Option<i64>,
    ) -> Result<Vec<Stay>, Self::Error> {
        queries::stays::capacity_candidates(&mut self.conn, room_id, dates, excluding)
    }

    fn active_stay_for_client(&mut self, client_id: i64) -> Result<Option<Stay>, Self::Error> {
        queries::stays::active_stay_for_client(&mut self.conn, client_id)
    }

    fn stays_touching(
        &mut self,
        scope: StayScope<'_>,
        period: &Period,
    ) -> Result<Vec<Stay>, Self::Error> {
        queries::stays::stays_touching(&mut self.conn, scope, period)
    }

    fn count_active_stays_by_room(&mut self) -> Result<HashMap<i64, usize>, Self::Error> {
        queries::stays::count_active_stays_by_room(&mut self.conn)
    }

    fn insert_stay(&mut self, stay: &Stay) -> Result<i64, Self::Error> {
        mutations::stays::insert_stay(&mut self.conn, stay)
    }

    fn update_stay(&mut self, stay: &Stay) -> Result<(), Self::Error> {
        mutations::stays::update_stay(&mut self.conn, stay)
    }
}
