// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::input_policy::InputPolicyError;
use hotel_ledger::LedgerError;
use hotel_ledger_domain::{DomainError, weekday_code};
use hotel_ledger_persistence::PersistenceError;
use tracing::error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// Stable error code.
        code: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated; doubles as the error code.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The write collides with an existing record.
    Conflict {
        /// The type of resource involved.
        resource_type: String,
        /// The uniqueness rule; doubles as the error code.
        rule: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// Stable machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::InvalidInput { code, .. } => code,
            Self::DomainRuleViolation { rule, .. } | Self::Conflict { rule, .. } => rule,
            Self::ResourceNotFound { .. } => "NotFound",
            Self::Internal { .. } => "Internal",
        }
    }

    fn invalid(field: &str, code: &str, message: String) -> Self {
        Self::InvalidInput {
            field: field.to_string(),
            code: code.to_string(),
            message,
        }
    }

    fn rule(rule: &str, message: String) -> Self {
        Self::DomainRuleViolation {
            rule: rule.to_string(),
            message,
        }
    }

    /// A not-found error for a resource and id.
    #[must_use]
    pub fn not_found(resource_type: &str, id: i64) -> Self {
        Self::ResourceNotFound {
            resource_type: resource_type.to_string(),
            message: format!("{resource_type} {id} does not exist"),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput { field, message, .. } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict {
                resource_type,
                message,
                ..
            } => {
                write!(f, "{resource_type} conflict: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<InputPolicyError> for ApiError {
    fn from(err: InputPolicyError) -> Self {
        Self::invalid(err.field(), err.code(), err.to_string())
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let message: String = err.to_string();
    match err {
        DomainError::InvalidDateFormat { parameter, .. } => {
            ApiError::invalid(&parameter, "InvalidDateFormat", message)
        }
        DomainError::InvalidDateRange { .. } => {
            ApiError::invalid("dates", "InvalidDateRange", message)
        }
        DomainError::RoomCapacityExceeded { .. } => ApiError::rule("RoomCapacityExceeded", message),
        DomainError::DuplicateActiveStay { .. } => ApiError::Conflict {
            resource_type: String::from("Stay"),
            rule: String::from("DuplicateActiveStay"),
            message,
        },
        DomainError::StayAlreadyCompleted { .. } => ApiError::rule("StayAlreadyCompleted", message),
        DomainError::EmployeeAlreadyFired { .. } => ApiError::rule("EmployeeAlreadyFired", message),
        DomainError::InvalidQuarter(_) => ApiError::invalid("quarter", "InvalidQuarter", message),
        DomainError::InvalidYear(_) => ApiError::invalid("year", "InvalidYear", message),
        DomainError::InvalidRoomType(_) => ApiError::invalid("room_type", "InvalidRoomType", message),
        DomainError::InvalidRoomNumber(_) => ApiError::invalid("number", "InvalidRoomNumber", message),
        DomainError::InvalidCapacity(_) => ApiError::invalid("capacity", "InvalidCapacity", message),
        DomainError::InvalidDailyRate(_) => ApiError::invalid("daily_rate", "InvalidDailyRate", message),
        DomainError::InvalidStayStatus(_) => ApiError::invalid("status", "InvalidStayStatus", message),
        DomainError::InvalidEmployeeStatus(_) => {
            ApiError::invalid("status", "InvalidEmployeeStatus", message)
        }
        DomainError::InvalidWeekday(_) => ApiError::invalid("weekday", "InvalidWeekday", message),
        DomainError::InvalidName(_) => ApiError::invalid("name", "InvalidName", message),
        DomainError::InvalidPassport(_) => {
            ApiError::invalid("passport_number", "InvalidPassport", message)
        }
        DomainError::InvalidCity(_) => ApiError::invalid("city", "InvalidCity", message),
        DomainError::DuplicateCleaningAssignment { floor, weekday } => ApiError::invalid(
            "assignments",
            "DuplicateCleaningAssignment",
            format!(
                "Floor {floor} is assigned more than once on '{}'",
                weekday_code(weekday)
            ),
        ),
    }
}

/// Translates a persistence error into an API error.
///
/// Constraint violations become conflicts; anything else is internal and logged.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::UniqueViolation(detail) => {
            let (resource_type, rule): (&str, &str) = unique_rule(&detail);
            ApiError::Conflict {
                resource_type: resource_type.to_string(),
                rule: rule.to_string(),
                message: format!("{resource_type} already exists ({detail})"),
            }
        }
        PersistenceError::ForeignKeyViolation(detail) => ApiError::Conflict {
            resource_type: String::from("Reference"),
            rule: String::from("ForeignKeyViolation"),
            message: format!("Referenced record does not exist ({detail})"),
        },
        PersistenceError::NotFound(what) => {
            let resource_type: &str = what.split_whitespace().next().unwrap_or("Record");
            ApiError::ResourceNotFound {
                resource_type: resource_type.to_string(),
                message: format!("{what} does not exist"),
            }
        }
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}

/// Translates a ledger error into an API error.
#[must_use]
pub fn translate_ledger_error(err: LedgerError<PersistenceError>) -> ApiError {
    match err {
        LedgerError::Domain(domain_err) => translate_domain_error(domain_err),
        LedgerError::NotFound { resource, id } => ApiError::not_found(&capitalize(resource), id),
        LedgerError::Storage(storage_err) => translate_persistence_error(storage_err),
    }
}

/// Maps a SQLite unique-constraint message to a resource and rule.
fn unique_rule(detail: &str) -> (&'static str, &'static str) {
    if detail.contains("rooms.number") {
        ("Room", "DuplicateRoomNumber")
    } else if detail.contains("clients.passport_number") {
        ("Client", "DuplicatePassport")
    } else if detail.contains("stays.client_id") {
        ("Stay", "DuplicateActiveStay")
    } else if detail.contains("cleaning_assignments") {
        ("Cleaning assignment", "DuplicateCleaningAssignment")
    } else {
        ("Record", "UniqueViolation")
    }
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
