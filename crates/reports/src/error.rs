// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;
use time::Date;

/// Errors raised while resolving report parameters.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReportError {
    /// A date parameter is not `YYYY-MM-DD`.
    #[error("Invalid {field} '{value}': expected YYYY-MM-DD")]
    InvalidDate {
        /// The parameter name.
        field: &'static str,
        /// The rejected value.
        value: String,
    },
    /// The period starts after it ends.
    #[error("Start date {start} is after end date {end}")]
    StartAfterEnd { start: Date, end: Date },
    /// Date arithmetic left the supported calendar range.
    #[error("Date out of range while {operation}")]
    DateOutOfRange { operation: &'static str },
    /// Limit outside `1..=100`.
    #[error("Invalid limit {0}: must be between 1 and 100")]
    InvalidLimit(i64),
    /// Unknown report name.
    #[error("Unknown report type '{0}'")]
    UnknownReportType(String),
    /// Unknown IANA time zone name.
    #[error("Unknown time zone '{0}'")]
    InvalidTimezone(String),
    /// A stored parameter string could not be decoded.
    #[error("Malformed report parameters '{0}'")]
    MalformedParameters(String),
}
