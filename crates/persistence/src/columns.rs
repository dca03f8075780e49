// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Text column encodings.
//!
//! Timestamps are stored as RFC 3339 in UTC, money as decimal strings and
//! enums by their `as_str` names.

use std::str::FromStr;

use time::format_description::well_known::Rfc3339;
use time::{OffsetDateTime, UtcOffset};

use crate::error::PersistenceError;

/// Encodes an instant as RFC 3339 UTC text.
pub fn format_timestamp(at: OffsetDateTime) -> Result<String, PersistenceError> {
    at.to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

pub fn format_optional_timestamp(
    at: Option<OffsetDateTime>,
) -> Result<Option<String>, PersistenceError> {
    at.map(format_timestamp).transpose()
}

pub fn parse_timestamp(
    table: &'static str,
    column: &'static str,
    value: &str,
) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|_| PersistenceError::corrupt(table, column, value))
}

pub fn parse_optional_timestamp(
    table: &'static str,
    column: &'static str,
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value.map(|v| parse_timestamp(table, column, v)).transpose()
}

/// Decodes any `FromStr` column: enums, decimals.
pub fn parse_column<T: FromStr>(
    table: &'static str,
    column: &'static str,
    value: &str,
) -> Result<T, PersistenceError> {
    value
        .parse::<T>()
        .map_err(|_| PersistenceError::corrupt(table, column, value))
}

/// Narrows a value for an `INTEGER` column mapped to `i32`.
pub fn to_integer(column: &'static str, value: i64) -> Result<i32, PersistenceError> {
    i32::try_from(value)
        .map_err(|_| PersistenceError::Other(format!("{column} value {value} is out of range")))
}
