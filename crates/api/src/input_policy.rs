// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Input field policy.
//!
//! Query parameters arrive as raw strings; this module turns them into
//! typed values and names the offending field when it cannot.

use thiserror::Error;

/// Input field policy errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputPolicyError {
    /// A required parameter is absent or empty.
    #[error("Parameter '{field}' is required")]
    Missing { field: String },

    /// The value is not an integer.
    #[error("Parameter '{field}' must be an integer, got '{value}'")]
    NotAnInteger { field: String, value: String },

    /// The integer does not fit the field.
    #[error("Parameter '{field}' is out of range: {value}")]
    OutOfRange { field: String, value: String },

    /// The value is not a boolean.
    #[error("Parameter '{field}' must be 'true' or 'false', got '{value}'")]
    NotABoolean { field: String, value: String },
}

impl InputPolicyError {
    /// The field the error refers to.
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::Missing { field }
            | Self::NotAnInteger { field, .. }
            | Self::OutOfRange { field, .. }
            | Self::NotABoolean { field, .. } => field,
        }
    }

    /// Stable machine-readable error code.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Missing { .. } => "MissingParameter",
            Self::NotAnInteger { .. } | Self::OutOfRange { .. } | Self::NotABoolean { .. } => {
                "InvalidParameter"
            }
        }
    }
}

/// Returns the parameter value, treating absent and empty alike.
///
/// # Errors
///
/// Returns `Missing` when the parameter is absent or blank.
pub fn require_param<'a>(field: &str, value: Option<&'a str>) -> Result<&'a str, InputPolicyError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(InputPolicyError::Missing {
            field: field.to_string(),
        }),
    }
}

/// Parses an integer parameter into the target type.
///
/// # Errors
///
/// Returns `NotAnInteger` for non-numeric input, `OutOfRange` if the value
/// does not fit `T`.
pub fn parse_integer<T: TryFrom<i64>>(field: &str, value: &str) -> Result<T, InputPolicyError> {
    let trimmed: &str = value.trim();
    let parsed: i64 = trimmed
        .parse::<i64>()
        .map_err(|_| InputPolicyError::NotAnInteger {
            field: field.to_string(),
            value: value.to_string(),
        })?;
    T::try_from(parsed).map_err(|_| InputPolicyError::OutOfRange {
        field: field.to_string(),
        value: trimmed.to_string(),
    })
}

/// Parses an optional integer parameter; absent or empty means `None`.
///
/// # Errors
///
/// Returns an error if the value is present but not a valid `T`.
pub fn optional_integer<T: TryFrom<i64>>(
    field: &str,
    value: Option<&str>,
) -> Result<Option<T>, InputPolicyError> {
    match value.map(str::trim) {
        Some(value) if !value.is_empty() => parse_integer(field, value).map(Some),
        _ => Ok(None),
    }
}

/// Parses an optional boolean parameter (`true`/`false`/`1`/`0`).
///
/// # Errors
///
/// Returns `NotABoolean` for any other value.
pub fn optional_bool(field: &str, value: Option<&str>) -> Result<Option<bool>, InputPolicyError> {
    match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
        None | Some("") => Ok(None),
        Some("true" | "1") => Ok(Some(true)),
        Some("false" | "0") => Ok(Some(false)),
        Some(other) => Err(InputPolicyError::NotABoolean {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}

/// Trims an optional text field; absent means empty.
#[must_use]
pub fn optional_text(value: Option<&str>) -> String {
    value.map(str::trim).unwrap_or_default().to_string()
}
