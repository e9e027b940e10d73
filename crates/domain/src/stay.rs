// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Stay lifecycle and checkout cost.
//!
//! A stay is created `Active` with a zero total cost and becomes
//! `Completed` exactly once, at checkout. The cost is fixed at that point
//! and is never recomputed.

use crate::dates::days_between;
use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::Date;

/// Lifecycle state of a stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StayStatus {
    /// The guest is occupying (or booked into) the room.
    Active,
    /// The guest has checked out and the cost is fixed.
    Completed,
}

impl StayStatus {
    /// Returns the string representation used for persistence and the API.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not `active` or `completed`.
    pub fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            _ => Err(DomainError::InvalidStayStatus(s.to_string())),
        }
    }
}

impl FromStr for StayStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for StayStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// The date interval of a stay.
///
/// `check_out == None` means the guest is still in the room; the interval
/// is open towards the future.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StayDates {
    pub check_in: Date,
    pub check_out: Option<Date>,
}

impl StayDates {
    #[must_use]
    pub const fn new(check_in: Date, check_out: Option<Date>) -> Self {
        Self {
            check_in,
            check_out,
        }
    }

    /// Checks that a present check-out is strictly after check-in.
    ///
    /// # Errors
    ///
    /// Returns `InvalidDateRange` if `check_out <= check_in`.
    pub fn validate(&self) -> Result<(), DomainError> {
        match self.check_out {
            Some(check_out) if check_out <= self.check_in => Err(DomainError::InvalidDateRange {
                start: self.check_in,
                end: check_out,
                reason: "check-out must be later than check-in",
            }),
            _ => Ok(()),
        }
    }
}

/// A reservation of one room by one client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stay {
    /// `None` until persisted.
    pub stay_id: Option<i64>,
    pub client_id: i64,
    pub room_id: i64,
    pub check_in: Date,
    pub check_out: Option<Date>,
    pub status: StayStatus,
    /// Zero while active; fixed at checkout.
    pub total_cost: Decimal,
}

impl Stay {
    /// Opens a new active stay with zero cost.
    #[must_use]
    pub fn open(client_id: i64, room_id: i64, dates: StayDates) -> Self {
        Self {
            stay_id: None,
            client_id,
            room_id,
            check_in: dates.check_in,
            check_out: dates.check_out,
            status: StayStatus::Active,
            total_cost: Decimal::new(0, 2),
        }
    }

    #[must_use]
    pub const fn dates(&self) -> StayDates {
        StayDates::new(self.check_in, self.check_out)
    }

    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.status, StayStatus::Active)
    }

    /// Closes the stay: fixes the check-out date and the total cost.
    ///
    /// # Arguments
    ///
    /// * `checkout_date` - The day the guest leaves
    /// * `daily_rate` - The room's nightly rate
    ///
    /// # Errors
    ///
    /// Returns `StayAlreadyCompleted` if the stay was already closed and
    /// `InvalidDateRange` if `checkout_date` is not after check-in. The stay
    /// is left untouched on error.
    pub fn close(&mut self, checkout_date: Date, daily_rate: Decimal) -> Result<(), DomainError> {
        if !self.is_active() {
            return Err(DomainError::StayAlreadyCompleted {
                stay_id: self.stay_id,
            });
        }
        StayDates::new(self.check_in, Some(checkout_date)).validate()?;

        let nights: i64 = billable_nights(self.check_in, checkout_date);
        self.total_cost = stay_cost(nights, daily_rate);
        self.check_out = Some(checkout_date);
        self.status = StayStatus::Completed;
        Ok(())
    }
}

/// Number of nights charged for a stay: at least one.
#[must_use]
pub fn billable_nights(check_in: Date, check_out: Date) -> i64 {
    days_between(check_in, check_out).max(1)
}

/// Cost of `nights` nights at `daily_rate`, to two decimal places.
#[must_use]
pub fn stay_cost(nights: i64, daily_rate: Decimal) -> Decimal {
    let mut cost: Decimal = Decimal::from(nights) * daily_rate;
    cost.rescale(2);
    cost
}
