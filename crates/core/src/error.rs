// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use hotel_ledger_domain::DomainError;

/// Errors that can occur during ledger operations.
///
/// `E` is the error type of the backing repository. Storage failures are
/// carried unchanged so callers see exactly what the store reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerError<E> {
    /// A domain rule was violated.
    Domain(DomainError),
    /// A referenced entity does not exist.
    NotFound {
        /// The kind of entity (`room`, `client`, `stay`).
        resource: &'static str,
        /// The identifier that was looked up.
        id: i64,
    },
    /// The repository failed.
    Storage(E),
}

impl<E> LedgerError<E> {
    pub(crate) const fn not_found(resource: &'static str, id: i64) -> Self {
        Self::NotFound { resource, id }
    }
}

impl<E: std::fmt::Display> std::fmt::Display for LedgerError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(err) => write!(f, "{err}"),
            Self::NotFound { resource, id } => write!(f, "{resource} {id} not found"),
            Self::Storage(err) => write!(f, "Storage error: {err}"),
        }
    }
}

impl<E: std::fmt::Debug + std::fmt::Display> std::error::Error for LedgerError<E> {}

impl<E> From<E> for LedgerError<E> {
    fn from(err: E) -> Self {
        Self::Storage(err)
    }
}
