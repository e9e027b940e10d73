// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! ## Module Organization
//!
//! - `rooms`: Room lookups and filtered listing
//! - `clients`: Client lookups, listing and city counts
//! - `stays`: Stay lookups and the range-filtered queries behind the ledger
//! - `employees`: Employees, schedules and the cleaner lookup

pub mod clients;
pub mod employees;
pub mod rooms;
pub mod stays;

pub use employees::EmployeeFilter;
pub use rooms::RoomFilter;
pub use stays::StayFilter;
