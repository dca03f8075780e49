// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary operations.
//!
//! Each handler validates its request, calls the persistence adapter and
//! translates every lower-level error explicitly. Handlers take `now` so
//! that callers control the clock.

mod clients;
mod reports;
mod rooms;

pub use clients::{
    active_clients, add_rooms, check_document, client_history, client_rooms, client_statistics,
    clients_in_range, clients_on_date, create_client, delete_client, get_client, list_clients,
    release_client, update_client,
};
pub use reports::{clear_expired_reports, generate_report, invalidate_cached_report, report_by_name};
pub use rooms::{
    available_rooms, begin_maintenance, check_room_number, clean_room, create_room, delete_room,
    end_maintenance, get_room, list_rooms, room_statistics, rooms_by_type, update_room,
};

use std::str::FromStr;

use innkeep_domain::DomainError;
use innkeep_reports::parse_date;
use time::format_description::well_known::Rfc3339;
use time::{Date, OffsetDateTime};

use crate::error::FieldViolation;

/// Parses an enumerated value, recording a violation on failure.
fn parse_choice<T>(value: &str, violations: &mut Vec<FieldViolation>) -> Option<T>
where
    T: FromStr<Err = DomainError>,
{
    match value.trim().parse::<T>() {
        Ok(parsed) => Some(parsed),
        Err(err) => {
            violations.push(FieldViolation::from(&err));
            None
        }
    }
}

/// Parses an optional enumerated filter.
fn parse_optional_choice<T>(
    value: Option<&str>,
    violations: &mut Vec<FieldViolation>,
) -> Option<T>
where
    T: FromStr<Err = DomainError>,
{
    value
        .filter(|v| !v.trim().is_empty())
        .and_then(|v| parse_choice(v, violations))
}

/// Parses an optional RFC 3339 timestamp.
///
/// The outer `Option` is `None` when the value was present but malformed.
fn parse_timestamp(
    field: &str,
    value: Option<&str>,
    violations: &mut Vec<FieldViolation>,
) -> Option<Option<OffsetDateTime>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        None => Some(None),
        Some(raw) => match OffsetDateTime::parse(raw, &Rfc3339) {
            Ok(at) => Some(Some(at)),
            Err(_) => {
                violations.push(FieldViolation::new(
                    field,
                    format!("Invalid {field} '{raw}': expected an RFC 3339 timestamp"),
                ));
                None
            }
        },
    }
}

/// Parses an optional `YYYY-MM-DD` day filter.
fn parse_day(
    field: &'static str,
    value: Option<&str>,
    violations: &mut Vec<FieldViolation>,
) -> Option<Date> {
    let raw: &str = value.map(str::trim).filter(|v| !v.is_empty())?;
    match parse_date(field, raw) {
        Ok(day) => Some(day),
        Err(err) => {
            violations.push(FieldViolation::new(field, err.to_string()));
            None
        }
    }
}

/// Trims optional text, treating blank as absent.
fn clean_text(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
