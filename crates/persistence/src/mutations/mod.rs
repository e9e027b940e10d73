// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! ## Module Organization
//!
//! - `rooms`: Room create/update/delete
//! - `clients`: Client create/update/delete
//! - `stays`: Stay writes issued by the ledger, plus delete
//! - `employees`: Employee records and cleaning schedules
//!
//! None of these open a transaction; callers that need several writes to
//! land together go through `Persistence::atomically`.

pub mod clients;
pub mod employees;
pub mod rooms;
pub mod stays;

use crate::error::PersistenceError;

/// Maps an affected-row count of zero to `NotFound`.
fn require_affected(rows: usize, what: &str, id: i64) -> Result<(), PersistenceError> {
    if rows == 0 {
        return Err(PersistenceError::NotFound(format!("{what} {id}")));
    }
    Ok(())
}

fn require_id(id: Option<i64>, what: &str) -> Result<i64, PersistenceError> {
    id.ok_or_else(|| PersistenceError::Other(format!("{what} has no ID")))
}
