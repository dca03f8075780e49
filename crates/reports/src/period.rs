// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Report periods and the hotel-local calendar.
//!
//! Timestamps are stored in UTC. Reports group them by the hotel's local
//! calendar day, so every timestamp goes through [`HotelCalendar::local_date`]
//! before it is compared against a period or bucketed by month or week.

use chrono::{Datelike, TimeZone};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use time::macros::format_description;
use time::{Date, Duration, Month, OffsetDateTime};

use crate::error::ReportError;

/// Days covered by a period when no start date is given.
pub const DEFAULT_PERIOD_DAYS: i64 = 30;
/// Rows returned by ranking reports when no limit is given.
pub const DEFAULT_LIMIT: usize = 10;
const MAX_LIMIT: i64 = 100;

/// The hotel's time zone, used to turn instants into calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HotelCalendar {
    tz: Tz,
}

impl HotelCalendar {
    #[must_use]
    pub const fn new(tz: Tz) -> Self {
        Self { tz }
    }

    /// Builds a calendar from an IANA zone name such as `America/Lima`.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::InvalidTimezone` for unknown names.
    pub fn from_name(name: &str) -> Result<Self, ReportError> {
        name.parse::<Tz>()
            .map(Self::new)
            .map_err(|_| ReportError::InvalidTimezone(name.to_string()))
    }

    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.tz
    }

    /// The hotel-local calendar day of an instant.
    #[must_use]
    pub fn local_date(&self, at: OffsetDateTime) -> Date {
        self.try_local_date(at).unwrap_or_else(|| at.date())
    }

    fn try_local_date(&self, at: OffsetDateTime) -> Option<Date> {
        let local = self
            .tz
            .timestamp_opt(at.unix_timestamp(), at.nanosecond())
            .single()?
            .date_naive();
        let month: Month = Month::try_from(u8::try_from(local.month()).ok()?).ok()?;
        Date::from_calendar_date(local.year(), month, u8::try_from(local.day()).ok()?).ok()
    }
}

/// `YYYY-MM` bucket key for a date.
#[must_use]
pub fn month_key(date: Date) -> String {
    format!("{:04}-{:02}", date.year(), u8::from(date.month()))
}

/// ISO week bucket key for a date, e.g. `2026-W09`.
#[must_use]
pub fn iso_week_key(date: Date) -> String {
    let (year, week, _) = date.to_iso_week_date();
    format!("{year:04}-W{week:02}")
}

/// Parses a `YYYY-MM-DD` parameter.
///
/// # Errors
///
/// Returns `ReportError::InvalidDate` naming the parameter.
pub fn parse_date(field: &'static str, value: &str) -> Result<Date, ReportError> {
    Date::parse(value.trim(), format_description!("[year]-[month]-[day]")).map_err(|_| {
        ReportError::InvalidDate {
            field,
            value: value.to_string(),
        }
    })
}

/// Validates a ranking limit, defaulting to ten.
///
/// # Errors
///
/// Returns `ReportError::InvalidLimit` outside `1..=100`.
pub fn resolve_limit(limit: Option<i64>) -> Result<usize, ReportError> {
    match limit {
        None => Ok(DEFAULT_LIMIT),
        Some(value) if (1..=MAX_LIMIT).contains(&value) => {
            usize::try_from(value).map_err(|_| ReportError::InvalidLimit(value))
        }
        Some(value) => Err(ReportError::InvalidLimit(value)),
    }
}

/// An inclusive range of hotel-local calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportPeriod {
    pub start: Date,
    pub end: Date,
}

impl ReportPeriod {
    /// Creates a period, rejecting ranges that run backwards.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::StartAfterEnd` if `start > end`.
    pub fn new(start: Date, end: Date) -> Result<Self, ReportError> {
        if start > end {
            return Err(ReportError::StartAfterEnd { start, end });
        }
        Ok(Self { start, end })
    }

    /// Resolves optional `start_date`/`end_date` parameters.
    ///
    /// A missing end defaults to `today`; a missing start to thirty days
    /// before the end.
    ///
    /// # Errors
    ///
    /// Returns an error for malformed dates or a backwards range.
    pub fn resolve(
        start: Option<&str>,
        end: Option<&str>,
        today: Date,
    ) -> Result<Self, ReportError> {
        let end: Date = match end {
            Some(value) => parse_date("end_date", value)?,
            None => today,
        };
        let start: Date = match start {
            Some(value) => parse_date("start_date", value)?,
            None => end
                .checked_sub(Duration::days(DEFAULT_PERIOD_DAYS))
                .ok_or(ReportError::DateOutOfRange {
                    operation: "computing the default start date",
                })?,
        };
        Self::new(start, end)
    }

    /// Number of days in the period, counting both ends.
    #[must_use]
    pub fn days(&self) -> i64 {
        (self.end - self.start).whole_days() + 1
    }

    #[must_use]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date <= self.end
    }

    /// The period of equal length ending the day before this one starts.
    ///
    /// # Errors
    ///
    /// Returns `ReportError::DateOutOfRange` at the edge of the calendar.
    pub fn previous(&self) -> Result<Self, ReportError> {
        let out_of_range = ReportError::DateOutOfRange {
            operation: "computing the previous period",
        };
        let end: Date = self.start.previous_day().ok_or_else(|| out_of_range.clone())?;
        let start: Date = end
            .checked_sub(Duration::days(self.days() - 1))
            .ok_or(out_of_range)?;
        Ok(Self { start, end })
    }

    /// Iterates every day of the period in order.
    pub fn dates(&self) -> impl Iterator<Item = Date> + '_ {
        std::iter::successors(Some(self.start), |day| day.next_day())
            .take_while(|day| *day <= self.end)
    }

    /// Serializable summary of the period.
    #[must_use]
    pub fn info(&self) -> PeriodInfo {
        PeriodInfo {
            start: self.start,
            end: self.end,
            days: self.days(),
        }
    }
}

/// Period bounds as returned in report payloads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PeriodInfo {
    pub start: Date,
    pub end: Date,
    pub days: i64,
}
