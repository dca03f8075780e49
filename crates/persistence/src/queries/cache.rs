// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep_reports::ReportKey;
use tracing::debug;

use crate::columns::{parse_column, parse_timestamp};
use crate::data_models::CachedReport;
use crate::diesel_schema::report_cache;
use crate::error::PersistenceError;

/// Diesel Queryable struct for report cache rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = report_cache)]
pub(crate) struct CacheRow {
    pub cache_id: i64,
    pub report_type: String,
    pub parameters: String,
    pub payload: String,
    pub generated_at: String,
    pub expires_at: String,
    pub is_valid: i32,
}

impl CacheRow {
    pub(crate) fn into_report(self) -> Result<CachedReport, PersistenceError> {
        Ok(CachedReport {
            cache_id: self.cache_id,
            report_type: parse_column("report_cache", "report_type", &self.report_type)?,
            payload: serde_json::from_str(&self.payload)?,
            generated_at: parse_timestamp("report_cache", "generated_at", &self.generated_at)?,
            expires_at: parse_timestamp("report_cache", "expires_at", &self.expires_at)?,
            is_valid: self.is_valid != 0,
            parameters: self.parameters,
        })
    }
}

/// Retrieves the valid entry for a key, expired or not.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn find_valid_entry(
    conn: &mut SqliteConnection,
    key: &ReportKey,
) -> Result<Option<CachedReport>, PersistenceError> {
    debug!(key = %key, "Looking up cached report");

    let result: Result<CacheRow, diesel::result::Error> = report_cache::table
        .filter(report_cache::report_type.eq(key.report_type.as_str()))
        .filter(report_cache::parameters.eq(&key.parameters))
        .filter(report_cache::is_valid.eq(1))
        .select(CacheRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_report()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a cache entry by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn get_entry(
    conn: &mut SqliteConnection,
    cache_id: i64,
) -> Result<Option<CachedReport>, PersistenceError> {
    let result: Result<CacheRow, diesel::result::Error> = report_cache::table
        .filter(report_cache::cache_id.eq(cache_id))
        .select(CacheRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_report()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists every valid entry, expired or not.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_valid_entries(
    conn: &mut SqliteConnection,
) -> Result<Vec<CachedReport>, PersistenceError> {
    let rows: Vec<CacheRow> = report_cache::table
        .filter(report_cache::is_valid.eq(1))
        .order(report_cache::cache_id.asc())
        .select(CacheRow::as_select())
        .load(conn)?;
    rows.into_iter().map(CacheRow::into_report).collect()
}
