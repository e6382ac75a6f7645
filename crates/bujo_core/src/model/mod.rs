//! Domain models for the four journal resources.
//!
//! # Responsibility
//! - Define the canonical persisted record per resource, with wire field
//!   names matching the store schema (camelCase, Spanish enum values).
//! - Own per-resource field validation from raw transport input into typed
//!   field sets.
//!
//! # Invariants
//! - Validation fails fast: the first violated rule wins, no accumulation.
//! - Enum fields are closed sets; nothing outside them is ever persisted.
//! - Validation is pure: no store access, no side effects.

pub mod expense;
pub mod habit;
pub mod project;
pub mod task;

use chrono::{DateTime, NaiveDate};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type ValidationResult<T> = Result<T, ValidationError>;

/// Malformed, missing, or out-of-enum input. User-fixable.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// A required field is absent or empty.
    MissingField(&'static str),
    /// A closed-set field carries a value outside the set.
    UnknownEnumValue {
        field: &'static str,
        value: String,
        expected: &'static str,
    },
    NegativeAmount { amount: f64 },
    UnparseableDate {
        field: &'static str,
        value: String,
    },
    InvertedDateRange { start: NaiveDate, end: NaiveDate },
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => {
                write!(f, "required field `{field}` is missing or empty")
            }
            Self::UnknownEnumValue {
                field,
                value,
                expected,
            } => write!(f, "invalid {field} `{value}`; expected {expected}"),
            Self::NegativeAmount { amount } => {
                write!(f, "amount must be a non-negative number, got {amount}")
            }
            Self::UnparseableDate { field, value } => write!(
                f,
                "invalid {field} `{value}`; expected YYYY-MM-DD or an RFC 3339 timestamp"
            ),
            Self::InvertedDateRange { start, end } => {
                write!(f, "startDate {start} is after endDate {end}")
            }
        }
    }
}

impl Error for ValidationError {}

/// Requires a non-empty text field.
pub(crate) fn require_text(
    field: &'static str,
    value: Option<&str>,
) -> ValidationResult<String> {
    match value {
        Some(text) if !text.is_empty() => Ok(text.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Requires membership in a closed enum set.
pub(crate) fn require_member<T>(
    field: &'static str,
    value: String,
    expected: &'static str,
    parse: impl Fn(&str) -> Option<T>,
) -> ValidationResult<T> {
    match parse(&value) {
        Some(member) => Ok(member),
        None => Err(ValidationError::UnknownEnumValue {
            field,
            value,
            expected,
        }),
    }
}

/// Parses a calendar date from `YYYY-MM-DD` or an RFC 3339 timestamp.
pub(crate) fn parse_date(field: &'static str, value: &str) -> ValidationResult<NaiveDate> {
    if let Ok(date) = NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        return Ok(date);
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(value) {
        return Ok(stamp.date_naive());
    }

    Err(ValidationError::UnparseableDate {
        field,
        value: value.to_string(),
    })
}
