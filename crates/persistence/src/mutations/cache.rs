// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report cache writes.
//!
//! At most one valid entry exists per key. Expired entries are never served:
//! a lookup that finds one invalidates it instead.

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep_reports::ReportKey;
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::backend::PersistenceBackend;
use crate::columns::format_timestamp;
use crate::data_models::CachedReport;
use crate::diesel_schema::report_cache;
use crate::error::PersistenceError;
use crate::queries::cache::{find_valid_entry, get_entry, list_valid_entries};

fn invalidate_key(conn: &mut SqliteConnection, key: &ReportKey) -> Result<usize, PersistenceError> {
    Ok(diesel::update(
        report_cache::table
            .filter(report_cache::report_type.eq(key.report_type.as_str()))
            .filter(report_cache::parameters.eq(&key.parameters))
            .filter(report_cache::is_valid.eq(1)),
    )
    .set(report_cache::is_valid.eq(0))
    .execute(conn)?)
}

/// Returns the cached payload for a key if it is valid and unexpired.
///
/// # Errors
///
/// Returns an error if the query fails or the stored payload is unreadable.
pub fn cached_report(
    conn: &mut SqliteConnection,
    key: &ReportKey,
    now: OffsetDateTime,
) -> Result<Option<CachedReport>, PersistenceError> {
    conn.transaction(|conn| match find_valid_entry(conn, key)? {
        Some(entry) if entry.expires_at > now => {
            debug!(key = %key, cache_id = entry.cache_id, "Report cache hit");
            Ok(Some(entry))
        }
        Some(entry) => {
            diesel::update(report_cache::table.filter(report_cache::cache_id.eq(entry.cache_id)))
                .set(report_cache::is_valid.eq(0))
                .execute(conn)?;
            warn!(key = %key, cache_id = entry.cache_id, "Invalidated expired cached report");
            Ok(None)
        }
        None => {
            debug!(key = %key, "Report cache miss");
            Ok(None)
        }
    })
}

/// Stores a payload, replacing any valid entry with the same key.
///
/// # Errors
///
/// Returns an error if the payload cannot be serialized, the expiry
/// overflows, or a write fails.
pub fn store_report(
    conn: &mut SqliteConnection,
    key: &ReportKey,
    payload: &serde_json::Value,
    now: OffsetDateTime,
    ttl: Duration,
) -> Result<CachedReport, PersistenceError> {
    let body: String = serde_json::to_string(payload)?;
    let generated_at: String = format_timestamp(now)?;
    let expiry: OffsetDateTime = now.checked_add(ttl).ok_or_else(|| {
        PersistenceError::Other(format!("Cache TTL {ttl} overflows the expiry timestamp"))
    })?;
    let expires_at: String = format_timestamp(expiry)?;

    conn.transaction(|conn| {
        let replaced: usize = invalidate_key(conn, key)?;

        diesel::insert_into(report_cache::table)
            .values((
                report_cache::report_type.eq(key.report_type.as_str()),
                report_cache::parameters.eq(&key.parameters),
                report_cache::payload.eq(&body),
                report_cache::generated_at.eq(&generated_at),
                report_cache::expires_at.eq(&expires_at),
                report_cache::is_valid.eq(1),
            ))
            .execute(conn)?;
        let cache_id: i64 = conn.get_last_insert_rowid()?;

        info!(key = %key, cache_id, replaced, "Stored report in cache");
        get_entry(conn, cache_id)?.ok_or(PersistenceError::CacheEntryNotFound(cache_id))
    })
}

/// Marks one cache entry invalid.
///
/// # Errors
///
/// Returns `PersistenceError::CacheEntryNotFound` if no entry has this ID.
pub fn invalidate_entry(
    conn: &mut SqliteConnection,
    cache_id: i64,
) -> Result<CachedReport, PersistenceError> {
    conn.transaction(|conn| {
        get_entry(conn, cache_id)?.ok_or(PersistenceError::CacheEntryNotFound(cache_id))?;
        diesel::update(report_cache::table.filter(report_cache::cache_id.eq(cache_id)))
            .set(report_cache::is_valid.eq(0))
            .execute(conn)?;

        info!(cache_id, "Invalidated cached report");
        get_entry(conn, cache_id)?.ok_or(PersistenceError::CacheEntryNotFound(cache_id))
    })
}

/// Invalidates every valid entry whose expiry is at or before `now`.
///
/// Returns the number of entries invalidated.
///
/// # Errors
///
/// Returns an error if a query or write fails.
pub fn invalidate_expired(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
) -> Result<usize, PersistenceError> {
    conn.transaction(|conn| {
        let expired: Vec<i64> = list_valid_entries(conn)?
            .into_iter()
            .filter(|entry| entry.expires_at <= now)
            .map(|entry| entry.cache_id)
            .collect();

        if expired.is_empty() {
            return Ok(0);
        }

        let count: usize =
            diesel::update(report_cache::table.filter(report_cache::cache_id.eq_any(&expired)))
                .set(report_cache::is_valid.eq(0))
                .execute(conn)?;
        info!(count, "Invalidated expired cached reports");
        Ok(count)
    })
}
