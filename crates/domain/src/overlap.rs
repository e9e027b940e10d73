// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stay interval predicates.
//!
//! Two different tests exist and they are not interchangeable:
//!
//! - [`capacity_overlap`] is strict and half-open. A stay that ends on the
//!   day another begins does not overlap it. It decides room capacity.
//! - [`intersects_period`] is inclusive on both ends. A stay that ends on
//!   the first day of a period still touches it. It drives lookups and
//!   reports.

use crate::dates::Period;
use crate::stay::StayDates;

/// Strict overlap test used for capacity enforcement.
///
/// True iff `existing.check_out` is open or after `candidate.check_in`, and
/// `existing.check_in` is before `candidate.check_out` (an open candidate
/// end is unbounded).
#[must_use]
pub fn capacity_overlap(candidate: &StayDates, existing: &StayDates) -> bool {
    let existing_ends_after_start: bool = existing
        .check_out
        .is_none_or(|check_out| check_out > candidate.check_in);
    let existing_starts_before_end: bool = candidate
        .check_out
        .is_none_or(|end| existing.check_in < end);
    existing_ends_after_start && existing_starts_before_end
}

/// Inclusive intersection test used for lookups and reports.
///
/// True iff the stay has no check-out or checks out on or after
/// `period.start()`, and it checks in on or before `period.end()`.
#[must_use]
pub fn intersects_period(stay: &StayDates, period: &Period) -> bool {
    stay.check_out
        .is_none_or(|check_out| check_out >= period.start())
        && stay.check_in <= period.end()
}
