// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The storage interface the stay ledger is built on.

use hotel_ledger_domain::{Client, Period, Room, Stay, StayDates};
use std::collections::HashMap;

/// Which stays a period lookup is restricted to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StayScope<'a> {
    /// Every stay.
    All,
    /// Stays in one room.
    Room(i64),
    /// Stays of one client.
    Client(i64),
    /// Stays in any of the given rooms.
    Rooms(&'a [i64]),
}

/// Storage for stays plus read access to the room and client directories.
///
/// Lookup methods that take a date filter may return a superset of the
/// matching stays; the ledger applies the exact predicates itself. They
/// must never omit a matching stay.
pub trait StayRepository {
    /// The error type reported by the store.
    type Error: std::error::Error;

    /// Runs `op` as one atomic unit of work.
    ///
    /// Everything `op` reads and writes through `self` commits together
    /// when it returns `Ok`, and none of its writes are kept when it
    /// returns `Err`. Concurrent units of work must not interleave between
    /// a read and a write of the same unit.
    ///
    /// # Errors
    ///
    /// Returns the error produced by `op`, or a store error converted into
    /// `E` if the unit could not be started or committed.
    fn atomically<T, E, F>(&mut self, op: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<Self::Error>;

    /// Looks up a room by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_room(&mut self, room_id: i64) -> Result<Option<Room>, Self::Error>;

    /// Lists every room, ordered by room number.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn list_rooms(&mut self) -> Result<Vec<Room>, Self::Error>;

    /// Looks up a client by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_client(&mut self, client_id: i64) -> Result<Option<Client>, Self::Error>;

    /// Loads the clients with the given ids; unknown ids are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_clients(&mut self, client_ids: &[i64]) -> Result<Vec<Client>, Self::Error>;

    /// Looks up a stay by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn find_stay(&mut self, stay_id: i64) -> Result<Option<Stay>, Self::Error>;

    /// Stays in `room_id`, other than `excluding`, that may overlap `dates`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn capacity_candidates(
        &mut self,
        room_id: i64,
        dates: &StayDates,
        excluding: Option<i64>,
    ) -> Result<Vec<Stay>, Self::Error>;

    /// The active stay of a client, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn active_stay_for_client(&mut self, client_id: i64) -> Result<Option<Stay>, Self::Error>;

    /// Stays within `scope` that may intersect `period`.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn stays_touching(
        &mut self,
        scope: StayScope<'_>,
        period: &Period,
    ) -> Result<Vec<Stay>, Self::Error>;

    /// Number of active stays per room; rooms without any may be absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the store cannot be read.
    fn count_active_stays_by_room(&mut self) -> Result<HashMap<i64, usize>, Self::Error>;

    /// Persists a new stay and returns its id.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    fn insert_stay(&mut self, stay: &Stay) -> Result<i64, Self::Error>;

    /// Overwrites a persisted stay.
    ///
    /// # Errors
    ///
    /// Returns an error if the stay has no id or the write fails.
    fn update_stay(&mut self, stay: &Stay) -> Result<(), Self::Error>;
}
