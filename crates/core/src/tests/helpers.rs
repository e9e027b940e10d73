// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! An in-memory `StayRepository` for ledger tests.
//!
//! Units of work snapshot the whole store and restore it when the
//! operation fails.

use crate::{StayRepository, StayScope};
use hotel_ledger_domain::{Client, Period, Room, RoomType, Stay, StayDates, StayStatus};
use rust_decimal::Decimal;
use std::collections::{BTreeMap, HashMap};
use time::Date;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MemoryError(pub String);

impl std::fmt::Display for MemoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "memory store: {}", self.0)
    }
}

impl std::error::Error for MemoryError {}

#[derive(Debug, Clone, Default)]
pub struct MemoryRepository {
    rooms: BTreeMap<i64, Room>,
    clients: BTreeMap<i64, Client>,
    stays: BTreeMap<i64, Stay>,
    next_id: i64,
    /// When set, the next stay write fails.
    pub fail_writes: bool,
    pub units_of_work: usize,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    pub fn add_room(&mut self, number: u32, floor: u16, room_type: RoomType, rate: i64) -> i64 {
        let room_id: i64 = self.allocate_id();
        let mut room: Room = Room::new(
            number,
            floor,
            room_type,
            None,
            Decimal::from(rate),
            number.to_string(),
        );
        room.room_id = Some(room_id);
        self.rooms.insert(room_id, room);
        room_id
    }

    pub fn room_mut(&mut self, room_id: i64) -> &mut Room {
        self.rooms.get_mut(&room_id).unwrap()
    }

    pub fn add_client(&mut self, last_name: &str, first_name: &str) -> i64 {
        let client_id: i64 = self.allocate_id();
        let mut client: Client = Client::new(
            format!("P-{client_id}"),
            last_name.to_string(),
            first_name.to_string(),
            String::from("Kazan"),
        );
        client.client_id = Some(client_id);
        self.clients.insert(client_id, client);
        client_id
    }

    /// Inserts a stay directly, bypassing ledger validation.
    pub fn seed_stay(
        &mut self,
        client_id: i64,
        room_id: i64,
        check_in: Date,
        check_out: Option<Date>,
        status: StayStatus,
    ) -> i64 {
        let stay_id: i64 = self.allocate_id();
        let mut stay: Stay = Stay::open(client_id, room_id, StayDates::new(check_in, check_out));
        stay.stay_id = Some(stay_id);
        stay.status = status;
        self.stays.insert(stay_id, stay);
        stay_id
    }

    pub fn stay(&self, stay_id: i64) -> &Stay {
        &self.stays[&stay_id]
    }

    pub fn stay_count(&self) -> usize {
        self.stays.len()
    }
}

impl StayRepository for MemoryRepository {
    type Error = MemoryError;

    fn atomically<T, E, F>(&mut self, op: F) -> Result<T, E>
    where
        F: FnOnce(&mut Self) -> Result<T, E>,
        E: From<Self::Error>,
    {
        self.units_of_work += 1;
        let snapshot: Self = self.clone();
        match op(self) {
            Ok(value) => Ok(value),
            Err(err) => {
                let units_of_work: usize = self.units_of_work;
                *self = snapshot;
                self.units_of_work = units_of_work;
                Err(err)
            }
        }
    }

    fn find_room(&mut self, room_id: i64) -> Result<Option<Room>, Self::Error> {
        Ok(self.rooms.get(&room_id).cloned())
    }

    fn list_rooms(&mut self) -> Result<Vec<Room>, Self::Error> {
        let mut rooms: Vec<Room> = self.rooms.values().cloned().collect();
        rooms.sort_by_key(|room| room.number);
        Ok(rooms)
    }

    fn find_client(&mut self, client_id: i64) -> Result<Option<Client>, Self::Error> {
        Ok(self.clients.get(&client_id).cloned())
    }

    fn find_clients(&mut self, client_ids: &[i64]) -> Result<Vec<Client>, Self::Error> {
        Ok(client_ids
            .iter()
            .filter_map(|id| self.clients.get(id).cloned())
            .collect())
    }

    fn find_stay(&mut self, stay_id: i64) -> Result<Option<Stay>, Self::Error> {
        Ok(self.stays.get(&stay_id).cloned())
    }

    fn capacity_candidates(
        &mut self,
        room_id: i64,
        _dates: &StayDates,
        excluding: Option<i64>,
    ) -> Result<Vec<Stay>, Self::Error> {
        Ok(self
            .stays
            .values()
            .filter(|stay| stay.room_id == room_id && stay.stay_id != excluding)
            .cloned()
            .collect())
    }

    fn active_stay_for_client(&mut self, client_id: i64) -> Result<Option<Stay>, Self::Error> {
        Ok(self
            .stays
            .values()
            .find(|stay| stay.client_id == client_id && stay.is_active())
            .cloned())
    }

    fn stays_touching(
        &mut self,
        scope: StayScope<'_>,
        _period: &Period,
    ) -> Result<Vec<Stay>, Self::Error> {
        Ok(self
            .stays
            .values()
            .filter(|stay| match scope {
                StayScope::All => true,
                StayScope::Room(room_id) => stay.room_id == room_id,
                StayScope::Client(client_id) => stay.client_id == client_id,
                StayScope::Rooms(room_ids) => room_ids.contains(&stay.room_id),
            })
            .cloned()
            .collect())
    }

    fn count_active_stays_by_room(&mut self) -> Result<HashMap<i64, usize>, Self::Error> {
        let mut counts: HashMap<i64, usize> = HashMap::new();
        for stay in self.stays.values().filter(|stay| stay.is_active()) {
            *counts.entry(stay.room_id).or_insert(0) += 1;
        }
        Ok(counts)
    }

    fn insert_stay(&mut self, stay: &Stay) -> Result<i64, Self::Error> {
        if self.fail_writes {
            return Err(MemoryError(String::from("write rejected")));
        }
        let stay_id: i64 = self.allocate_id();
        let mut stored: Stay = stay.clone();
        stored.stay_id = Some(stay_id);
        self.stays.insert(stay_id, stored);
        Ok(stay_id)
    }

    fn update_stay(&mut self, stay: &Stay) -> Result<(), Self::Error> {
        if self.fail_writes {
            return Err(MemoryError(String::from("write rejected")));
        }
        let stay_id: i64 = stay
            .stay_id
            .ok_or_else(|| MemoryError(String::from("stay has no id")))?;
        self.stays.insert(stay_id, stay.clone());
        Ok(())
    }
}
