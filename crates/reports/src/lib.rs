// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Reporting engine for the Innkeep hotel back office.
//!
//! Reports are pure aggregations over [`ReportInputs`] loaded by the
//! persistence layer. Periods are inclusive ranges of hotel-local days;
//! [`HotelCalendar`] maps stored UTC instants onto those days.
//!
//! Cacheable reports are addressed by a [`ReportKey`] whose parameter part
//! is canonical, so equivalent requests share one cache entry.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod cache_key;
mod clients;
mod error;
mod facts;
mod figures;
mod overview;
mod period;
mod rooms;
mod sales;

#[cfg(test)]
mod tests;

pub use cache_key::{ReportKey, ReportParameters, ReportType};
pub use clients::{
    ClientFrequencyReport, ClientFrequencyRow, ClientRoomCount, ClientStatistics, DocumentShare,
    PaymentShare, client_frequency, client_statistics,
};
pub use error::ReportError;
pub use facts::{ClientFact, OccupancyFact, ReportInputs, RoomFact};
pub use overview::{
    ClientSummary, DashboardReport, DashboardSummary, GeneralStatsReport, RecentClient,
    RevenueSummary, RoomSummary, TopRoom, TopSpender, Trend, TrendDirection, Trends, dashboard,
    general_stats,
};
pub use period::{
    DEFAULT_LIMIT, DEFAULT_PERIOD_DAYS, HotelCalendar, PeriodInfo, ReportPeriod, iso_week_key,
    month_key, parse_date, resolve_limit,
};
pub use rooms::{
    PricedRoom, ProfitabilityReport, RoomPopularityReport, RoomPopularityRow, RoomProfitRow,
    RoomStatistics, RoomTypeStatistics, TypeProfitRow, profitability, room_popularity,
    room_statistics,
};
pub use sales::{MonthSales, SeasonalSalesReport, seasonal_sales};
