// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The stay ledger.
//!
//! Owns the life cycle of a stay: creation with capacity validation,
//! the checkout transition with cost computation, and the overlap lookups
//! built on the two stay predicates.
//!
//! Every mutation reads what it validates and writes the result inside a
//! single [`StayRepository::atomically`] unit, so two concurrent bookings
//! cannot both observe the last free place.

use crate::error::LedgerError;
use crate::repository::{StayRepository, StayScope};
use hotel_ledger_domain::{
    Client, DomainError, FreeCapacityReport, Period, Quarter, QuarterlyReport, Room, Stay,
    StayDates, build_free_capacity_report, build_quarterly_report, capacity_overlap,
    intersects_period,
};
use std::collections::{BTreeSet, HashMap};
use time::Date;

/// Partial update of a stay.
///
/// Status and total cost are deliberately absent: they only change through
/// [`StayLedger::checkout`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StayChanges {
    pub client_id: Option<i64>,
    pub room_id: Option<i64>,
    pub check_in: Option<Date>,
    /// `Some(None)` clears the check-out date.
    pub check_out: Option<Option<Date>>,
}

impl StayChanges {
    fn apply_to(&self, stay: &mut Stay) {
        if let Some(client_id) = self.client_id {
            stay.client_id = client_id;
        }
        if let Some(room_id) = self.room_id {
            stay.room_id = room_id;
        }
        if let Some(check_in) = self.check_in {
            stay.check_in = check_in;
        }
        if let Some(check_out) = self.check_out {
            stay.check_out = check_out;
        }
    }
}

/// Stay operations over an injected repository.
pub struct StayLedger<'r, R: StayRepository> {
    repository: &'r mut R,
}

impl<'r, R: StayRepository> StayLedger<'r, R> {
    #[must_use]
    pub const fn new(repository: &'r mut R) -> Self {
        Self { repository }
    }

    /// Books a client into a room.
    ///
    /// # Arguments
    ///
    /// * `client_id` - The client staying
    /// * `room_id` - The room booked
    /// * `dates` - Check-in and optional check-out
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The client or room does not exist (`NotFound`)
    /// - Check-out is not after check-in (`InvalidDateRange`)
    /// - Overlapping stays already fill the room (`RoomCapacityExceeded`)
    /// - The client already has an active stay (`DuplicateActiveStay`)
    /// - The store fails
    pub fn create_stay(
        &mut self,
        client_id: i64,
        room_id: i64,
        dates: StayDates,
    ) -> Result<Stay, LedgerError<R::Error>> {
        self.repository
            .atomically(|repo: &mut R| -> Result<Stay, LedgerError<R::Error>> {
                require_client(repo, client_id)?;
                let room: Room = require_room(repo, room_id)?;

                dates.validate().map_err(LedgerError::Domain)?;
                ensure_room_has_capacity(repo, &room, room_id, &dates, None)?;
                ensure_no_other_active_stay(repo, client_id, None)?;

                let mut stay: Stay = Stay::open(client_id, room_id, dates);
                stay.stay_id = Some(repo.insert_stay(&stay)?);
                Ok(stay)
            })
    }

    /// Applies a partial update to a stay.
    ///
    /// The would-be result is validated as a whole before anything is
    /// written; the stay itself never counts against its room's capacity.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The stay, or a newly referenced client or room, does not exist
    /// - The resulting dates are out of order
    /// - The resulting interval would exceed the room's capacity
    /// - The stay is active and its client has another active stay
    /// - The store fails
    pub fn update_stay(
        &mut self,
        stay_id: i64,
        changes: &StayChanges,
    ) -> Result<Stay, LedgerError<R::Error>> {
        self.repository
            .atomically(|repo: &mut R| -> Result<Stay, LedgerError<R::Error>> {
                let mut stay: Stay = require_stay(repo, stay_id)?;
                changes.apply_to(&mut stay);

                require_client(repo, stay.client_id)?;
                let room: Room = require_room(repo, stay.room_id)?;

                let dates: StayDates = stay.dates();
                dates.validate().map_err(LedgerError::Domain)?;
                ensure_room_has_capacity(repo, &room, stay.room_id, &dates, Some(stay_id))?;
                if stay.is_active() {
                    ensure_no_other_active_stay(repo, stay.client_id, Some(stay_id))?;
                }

                repo.update_stay(&stay)?;
                Ok(stay)
            })
    }

    /// Checks a guest out: fixes the check-out date and the total cost.
    ///
    /// A completed stay cannot be checked out again; its cost is final.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The stay does not exist (`NotFound`)
    /// - The stay is already completed (`StayAlreadyCompleted`)
    /// - `check_out` is not after check-in (`InvalidDateRange`)
    /// - The store fails
    pub fn checkout(&mut self, stay_id: i64, check_out: Date) -> Result<Stay, LedgerError<R::Error>> {
        self.repository
            .atomically(|repo: &mut R| -> Result<Stay, LedgerError<R::Error>> {
                let mut stay: Stay = require_stay(repo, stay_id)?;
                let room: Room = require_room(repo, stay.room_id)?;

                stay.close(check_out, room.daily_rate)
                    .map_err(LedgerError::Domain)?;

                repo.update_stay(&stay)?;
                Ok(stay)
            })
    }

    /// Stays in a room that touch `[start, end]`, latest check-in first.
    ///
    /// Uses the inclusive period test, not the capacity test.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` if `start > end`, `NotFound` if the room
    /// does not exist, or a store error.
    pub fn find_overlapping(
        &mut self,
        room_id: i64,
        start: Date,
        end: Date,
    ) -> Result<Vec<Stay>, LedgerError<R::Error>> {
        let period: Period = Period::new(start, end).map_err(LedgerError::Domain)?;
        require_room(&mut *self.repository, room_id)?;

        let mut stays: Vec<Stay> = self
            .repository
            .stays_touching(StayScope::Room(room_id), &period)?
            .into_iter()
            .filter(|stay| stay.room_id == room_id && intersects_period(&stay.dates(), &period))
            .collect();
        stays.sort_by(|a, b| {
            b.check_in
                .cmp(&a.check_in)
                .then_with(|| b.stay_id.cmp(&a.stay_id))
        });
        Ok(stays)
    }

    /// Other clients who shared a room with `client_id` during `[start, end]`.
    ///
    /// The client's own stays touching the period select the rooms; every
    /// other client with a stay in one of those rooms touching the same
    /// period is returned once, ordered by last then first name.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` if `start > end`, `NotFound` if the client
    /// does not exist, or a store error.
    pub fn find_overlapping_clients(
        &mut self,
        client_id: i64,
        start: Date,
        end: Date,
    ) -> Result<Vec<Client>, LedgerError<R::Error>> {
        let period: Period = Period::new(start, end).map_err(LedgerError::Domain)?;
        require_client(&mut *self.repository, client_id)?;

        let room_ids: Vec<i64> = self
            .repository
            .stays_touching(StayScope::Client(client_id), &period)?
            .into_iter()
            .filter(|stay| stay.client_id == client_id && intersects_period(&stay.dates(), &period))
            .map(|stay| stay.room_id)
            .collect::<BTreeSet<i64>>()
            .into_iter()
            .collect();
        if room_ids.is_empty() {
            return Ok(Vec::new());
        }

        let neighbour_ids: Vec<i64> = self
            .repository
            .stays_touching(StayScope::Rooms(&room_ids), &period)?
            .into_iter()
            .filter(|stay| {
                stay.client_id != client_id
                    && room_ids.contains(&stay.room_id)
                    && intersects_period(&stay.dates(), &period)
            })
            .map(|stay| stay.client_id)
            .collect::<BTreeSet<i64>>()
            .into_iter()
            .collect();
        if neighbour_ids.is_empty() {
            return Ok(Vec::new());
        }

        let mut clients: Vec<Client> = self.repository.find_clients(&neighbour_ids)?;
        clients.sort_by(|a, b| {
            a.last_name
                .cmp(&b.last_name)
                .then_with(|| a.first_name.cmp(&b.first_name))
                .then_with(|| a.client_id.cmp(&b.client_id))
        });
        Ok(clients)
    }

    /// Active rooms with at least one free place, by room type.
    ///
    /// # Errors
    ///
    /// Returns an error if the store fails.
    pub fn free_capacity_report(&mut self) -> Result<FreeCapacityReport, LedgerError<R::Error>> {
        let rooms: Vec<Room> = self.repository.list_rooms()?;
        let active: HashMap<i64, usize> = self.repository.count_active_stays_by_room()?;
        Ok(build_free_capacity_report(&rooms, &active))
    }

    /// Occupancy and income for a calendar quarter.
    ///
    /// # Errors
    ///
    /// Returns `InvalidQuarter` if `quarter` is not 1 through 4,
    /// `InvalidYear` for an unsupported year, or a store error.
    pub fn quarterly_report(
        &mut self,
        year: i64,
        quarter: i64,
    ) -> Result<QuarterlyReport, LedgerError<R::Error>> {
        let quarter: Quarter = Quarter::new(year, quarter).map_err(LedgerError::Domain)?;
        let period: Period = quarter.period();

        let rooms: Vec<Room> = self.repository.list_rooms()?;
        let stays: Vec<Stay> = self.repository.stays_touching(StayScope::All, &period)?;
        Ok(build_quarterly_report(quarter, &rooms, &stays))
    }
}

fn require_room<R: StayRepository>(repo: &mut R, room_id: i64) -> Result<Room, LedgerError<R::Error>> {
    repo.find_room(room_id)?
        .ok_or_else(|| LedgerError::not_found("room", room_id))
}

fn require_client<R: StayRepository>(
    repo: &mut R,
    client_id: i64,
) -> Result<Client, LedgerError<R::Error>> {
    repo.find_client(client_id)?
        .ok_or_else(|| LedgerError::not_found("client", client_id))
}

fn require_stay<R: StayRepository>(repo: &mut R, stay_id: i64) -> Result<Stay, LedgerError<R::Error>> {
    repo.find_stay(stay_id)?
        .ok_or_else(|| LedgerError::not_found("stay", stay_id))
}

/// Fails when the stays overlapping `dates` already fill the room.
fn ensure_room_has_capacity<R: StayRepository>(
    repo: &mut R,
    room: &Room,
    room_id: i64,
    dates: &StayDates,
    excluding: Option<i64>,
) -> Result<(), LedgerError<R::Error>> {
    let overlapping: usize = repo
        .capacity_candidates(room_id, dates, excluding)?
        .iter()
        .filter(|other| {
            other.room_id == room_id
                && (excluding.is_none() || other.stay_id != excluding)
                && capacity_overlap(dates, &other.dates())
        })
        .count();

    if overlapping >= usize::from(room.capacity) {
        return Err(LedgerError::Domain(DomainError::RoomCapacityExceeded {
            room_id,
            capacity: room.capacity,
            overlapping,
        }));
    }
    Ok(())
}

fn ensure_no_other_active_stay<R: StayRepository>(
    repo: &mut R,
    client_id: i64,
    excluding: Option<i64>,
) -> Result<(), LedgerError<R::Error>> {
    match repo.active_stay_for_client(client_id)? {
        Some(active) if excluding.is_none() || active.stay_id != excluding => Err(
            LedgerError::Domain(DomainError::DuplicateActiveStay { client_id }),
        ),
        _ => Ok(()),
    }
}
