// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_reports::HotelCalendar;
use time::{Duration, OffsetDateTime};

use crate::error::{ApiError, translate_report_error};

pub const DEFAULT_TIMEZONE: &str = "America/Lima";
pub const DEFAULT_CACHE_TTL_MINUTES: i64 = 60;
/// One year.
pub const MAX_CACHE_TTL_MINUTES: i64 = 525_600;

/// Hotel-wide settings the handlers read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotelSettings {
    /// Maps stored instants onto the hotel's calendar days.
    pub calendar: HotelCalendar,
    /// How long a cached report stays valid.
    pub cache_ttl: Duration,
}

impl HotelSettings {
    /// Builds settings from an IANA zone name and a cache lifetime.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown time zone or a TTL outside
    /// `1..=MAX_CACHE_TTL_MINUTES`.
    pub fn new(timezone: &str, cache_ttl_minutes: i64) -> Result<Self, ApiError> {
        let calendar: HotelCalendar =
            HotelCalendar::from_name(timezone).map_err(translate_report_error)?;
        if !(1..=MAX_CACHE_TTL_MINUTES).contains(&cache_ttl_minutes) {
            return Err(ApiError::InvalidInput {
                field: String::from("report_cache_ttl_minutes"),
                message: format!(
                    "Cache TTL must be between 1 and {MAX_CACHE_TTL_MINUTES} minutes, got {cache_ttl_minutes}"
                ),
            });
        }
        Ok(Self {
            calendar,
            cache_ttl: Duration::minutes(cache_ttl_minutes),
        })
    }

    /// Today's date in the hotel.
    #[must_use]
    pub fn today(&self, now: OffsetDateTime) -> time::Date {
        self.calendar.local_date(now)
    }
}

impl Default for HotelSettings {
    fn default() -> Self {
        Self {
            calendar: HotelCalendar::new(chrono_tz::America::Lima),
            cache_ttl: Duration::minutes(DEFAULT_CACHE_TTL_MINUTES),
        }
    }
}
