// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_persistence::{CachedReport, Persistence};
use innkeep_reports::{
    ReportInputs, ReportKey, ReportParameters, ReportPeriod, ReportType, resolve_limit,
};
use serde::Serialize;
use time::OffsetDateTime;
use tracing::{error, info};

use crate::error::{ApiError, translate_persistence_error, translate_report_error};
use crate::request_response::{
    CacheEntryResponse, ClearExpiredResponse, ReportQuery, ReportResponse,
};
use crate::settings::HotelSettings;

const fn uses_limit(report_type: ReportType) -> bool {
    matches!(
        report_type,
        ReportType::ClientFrequency | ReportType::RoomPopularity
    )
}

fn to_payload<T: Serialize>(report: &T) -> Result<serde_json::Value, ApiError> {
    serde_json::to_value(report).map_err(|err| {
        error!(error = %err, "Failed to serialize report");
        ApiError::Internal {
            message: err.to_string(),
        }
    })
}

fn compute(
    report_type: ReportType,
    inputs: &ReportInputs,
    period: &ReportPeriod,
    limit: usize,
    settings: &HotelSettings,
    now: OffsetDateTime,
) -> Result<serde_json::Value, ApiError> {
    let calendar = &settings.calendar;
    match report_type {
        ReportType::ClientFrequency => to_payload(&innkeep_reports::client_frequency(
            inputs, period, calendar, limit,
        )),
        ReportType::RoomPopularity => to_payload(&innkeep_reports::room_popularity(
            inputs, period, calendar, now, limit,
        )),
        ReportType::SeasonalSales => {
            to_payload(&innkeep_reports::seasonal_sales(inputs, period, calendar))
        }
        ReportType::Dashboard => to_payload(&innkeep_reports::dashboard(inputs, period, calendar)),
        ReportType::GeneralStats => to_payload(
            &innkeep_reports::general_stats(inputs, period, calendar)
                .map_err(translate_report_error)?,
        ),
        ReportType::Profitability => to_payload(&innkeep_reports::profitability(
            inputs, period, calendar, now,
        )),
    }
}

/// Produces a report for the query period, serving it from the cache when a
/// valid entry exists.
///
/// Cached reports are keyed on the resolved period, so a request that omits
/// dates shares an entry with one that spells out the same dates.
///
/// # Errors
///
/// Returns an error if:
/// - A date is malformed or the start is after the end
/// - The limit is outside 1 to 100
/// - Report inputs cannot be loaded or the cache cannot be written
pub fn generate_report(
    persistence: &mut Persistence,
    report_type: ReportType,
    query: &ReportQuery,
    settings: &HotelSettings,
    now: OffsetDateTime,
) -> Result<ReportResponse, ApiError> {
    let period: ReportPeriod = ReportPeriod::resolve(
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        settings.today(now),
    )
    .map_err(translate_report_error)?;
    let limit: usize = resolve_limit(query.limit).map_err(translate_report_error)?;

    if !report_type.is_cached() {
        let inputs: ReportInputs = persistence
            .load_report_inputs()
            .map_err(translate_persistence_error)?;
        let data: serde_json::Value =
            compute(report_type, &inputs, &period, limit, settings, now)?;
        return Ok(ReportResponse {
            report_type,
            cached: false,
            cache_id: None,
            generated_at: now,
            expires_at: None,
            data,
        });
    }

    let mut parameters: ReportParameters = ReportParameters::new()
        .with("start_date", period.start)
        .with("end_date", period.end);
    if uses_limit(report_type) {
        parameters = parameters.with("limit", limit);
    }
    let key: ReportKey = ReportKey::new(report_type, &parameters);

    if let Some(entry) = persistence
        .cached_report(&key, now)
        .map_err(translate_persistence_error)?
    {
        return Ok(ReportResponse::from_cache(entry, true));
    }

    let inputs: ReportInputs = persistence
        .load_report_inputs()
        .map_err(translate_persistence_error)?;
    let data: serde_json::Value = compute(report_type, &inputs, &period, limit, settings, now)?;
    let entry: CachedReport = persistence
        .store_report(&key, &data, now, settings.cache_ttl)
        .map_err(translate_persistence_error)?;
    info!(key = %key, cache_id = entry.cache_id, "Cached report");
    Ok(ReportResponse::from_cache(entry, false))
}

/// Produces a report named in the request path.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for an unknown report name, or any
/// error `generate_report` returns.
pub fn report_by_name(
    persistence: &mut Persistence,
    name: &str,
    query: &ReportQuery,
    settings: &HotelSettings,
    now: OffsetDateTime,
) -> Result<ReportResponse, ApiError> {
    let report_type: ReportType = name.parse().map_err(translate_report_error)?;
    generate_report(persistence, report_type, query, settings, now)
}

/// Invalidates every expired cache entry.
///
/// # Errors
///
/// Returns an error if the cache cannot be written.
pub fn clear_expired_reports(
    persistence: &mut Persistence,
    now: OffsetDateTime,
) -> Result<ClearExpiredResponse, ApiError> {
    let invalidated: usize = persistence
        .clear_expired_reports(now)
        .map_err(translate_persistence_error)?;
    Ok(ClearExpiredResponse {
        invalidated,
        message: format!("Invalidated {invalidated} expired cached reports"),
    })
}

/// Invalidates one cache entry.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the entry does not exist.
pub fn invalidate_cached_report(
    persistence: &mut Persistence,
    cache_id: i64,
) -> Result<CacheEntryResponse, ApiError> {
    let entry: CachedReport = persistence
        .invalidate_cached_report(cache_id)
        .map_err(translate_persistence_error)?;
    Ok(CacheEntryResponse::from(&entry))
}
