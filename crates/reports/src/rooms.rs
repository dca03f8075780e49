// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room-centred reports: popularity, profitability and inventory figures.

use std::collections::{BTreeMap, HashSet};

use innkeep_domain::{RoomNumber, RoomState, RoomType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::facts::{OccupancyFact, ReportInputs, RoomFact};
use crate::figures::{average, average_decimal, capped_percentage, percentage};
use crate::period::{HotelCalendar, PeriodInfo, ReportPeriod, month_key};

/// Usage of one room over a period.
#[derive(Debug, Clone, Default)]
struct RoomUsage {
    assignments: usize,
    clients: HashSet<i64>,
    nights: i64,
    by_month: BTreeMap<String, usize>,
}

impl RoomUsage {
    fn revenue(&self, room: &RoomFact) -> Decimal {
        room.nightly_price * Decimal::from(self.nights)
    }
}

/// Entries whose assignment falls in the period, grouped by room.
fn usage_by_room(
    inputs: &ReportInputs,
    period: &ReportPeriod,
    calendar: &HotelCalendar,
    now: OffsetDateTime,
) -> BTreeMap<i64, RoomUsage> {
    let mut usage: BTreeMap<i64, RoomUsage> = BTreeMap::new();
    for entry in &inputs.occupancy {
        let day = calendar.local_date(entry.assigned_at);
        if !period.contains(day) {
            continue;
        }
        let room_usage: &mut RoomUsage = usage.entry(entry.room_id).or_default();
        room_usage.assignments += 1;
        room_usage.clients.insert(entry.client_id);
        room_usage.nights += entry.nights(now);
        *room_usage.by_month.entry(month_key(day)).or_default() += 1;
    }
    usage
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPopularityRow {
    pub room_id: i64,
    pub number: RoomNumber,
    pub room_type: RoomType,
    pub nightly_price: Decimal,
    pub assignments: usize,
    pub unique_clients: usize,
    pub nights_occupied: i64,
    pub estimated_revenue: Decimal,
    /// Nights occupied over days in the period, as a percentage.
    pub occupancy_rate: f64,
    pub average_stay_nights: f64,
    pub assignments_by_month: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomPopularityReport {
    pub period: PeriodInfo,
    pub total_assignments: usize,
    pub rooms: Vec<RoomPopularityRow>,
}

/// Ranks rooms by assignments starting in the period.
///
/// Rooms never assigned in the period are left out.
#[must_use]
pub fn room_popularity(
    inputs: &ReportInputs,
    period: &ReportPeriod,
    calendar: &HotelCalendar,
    now: OffsetDateTime,
    limit: usize,
) -> RoomPopularityReport {
    let usage: BTreeMap<i64, RoomUsage> = usage_by_room(inputs, period, calendar, now);
    let total_assignments: usize = usage.values().map(|u| u.assignments).sum();

    let mut rows: Vec<RoomPopularityRow> = usage
        .into_iter()
        .filter_map(|(room_id, room_usage)| {
            let room: &RoomFact = inputs.room(room_id)?;
            Some(RoomPopularityRow {
                room_id,
                number: room.number,
                room_type: room.room_type,
                nightly_price: room.nightly_price,
                assignments: room_usage.assignments,
                unique_clients: room_usage.clients.len(),
                nights_occupied: room_usage.nights,
                estimated_revenue: room_usage.revenue(room),
                occupancy_rate: capped_percentage(room_usage.nights, period.days()),
                average_stay_nights: average(room_usage.nights, room_usage.assignments),
                assignments_by_month: room_usage.by_month,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.assignments
            .cmp(&a.assignments)
            .then_with(|| b.estimated_revenue.cmp(&a.estimated_revenue))
            .then_with(|| a.number.cmp(&b.number))
    });
    rows.truncate(limit);

    RoomPopularityReport {
        period: period.info(),
        total_assignments,
        rooms: rows,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomProfitRow {
    pub room_id: i64,
    pub number: RoomNumber,
    pub room_type: RoomType,
    pub nightly_price: Decimal,
    pub assignments: usize,
    pub nights: i64,
    pub estimated_revenue: Decimal,
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TypeProfitRow {
    pub room_type: RoomType,
    pub rooms: usize,
    pub assignments: usize,
    pub nights: i64,
    pub estimated_revenue: Decimal,
    pub average_revenue_per_room: Decimal,
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitabilityReport {
    pub period: PeriodInfo,
    pub total_revenue: Decimal,
    pub rooms: Vec<RoomProfitRow>,
    pub by_type: Vec<TypeProfitRow>,
    pub most_profitable_room: Option<RoomNumber>,
    pub most_profitable_type: Option<RoomType>,
}

/// Estimated revenue per room and per room type over the period.
///
/// Every room is listed, including rooms with no stays.
#[must_use]
pub fn profitability(
    inputs: &ReportInputs,
    period: &ReportPeriod,
    calendar: &HotelCalendar,
    now: OffsetDateTime,
) -> ProfitabilityReport {
    let usage: BTreeMap<i64, RoomUsage> = usage_by_room(inputs, period, calendar, now);
    let days: i64 = period.days();

    let mut rooms: Vec<RoomProfitRow> = inputs
        .rooms
        .iter()
        .map(|room| {
            let room_usage: RoomUsage = usage.get(&room.room_id).cloned().unwrap_or_default();
            RoomProfitRow {
                room_id: room.room_id,
                number: room.number,
                room_type: room.room_type,
                nightly_price: room.nightly_price,
                assignments: room_usage.assignments,
                nights: room_usage.nights,
                estimated_revenue: room_usage.revenue(room),
                occupancy_rate: capped_percentage(room_usage.nights, days),
            }
        })
        .collect();
    rooms.sort_by(|a, b| {
        b.estimated_revenue
            .cmp(&a.estimated_revenue)
            .then_with(|| a.number.cmp(&b.number))
    });

    let by_type: Vec<TypeProfitRow> = RoomType::ALL
        .iter()
        .map(|room_type| {
            let of_type: Vec<&RoomProfitRow> =
                rooms.iter().filter(|r| r.room_type == *room_type).collect();
            let revenue: Decimal = of_type.iter().map(|r| r.estimated_revenue).sum();
            let nights: i64 = of_type.iter().map(|r| r.nights).sum();
            let capacity: i64 = days * i64::try_from(of_type.len()).unwrap_or(i64::MAX);
            TypeProfitRow {
                room_type: *room_type,
                rooms: of_type.len(),
                assignments: of_type.iter().map(|r| r.assignments).sum(),
                nights,
                estimated_revenue: revenue,
                average_revenue_per_room: average_decimal(revenue, of_type.len()),
                occupancy_rate: capped_percentage(nights, capacity),
            }
        })
        .collect();

    let most_profitable_room: Option<RoomNumber> = rooms
        .first()
        .filter(|r| r.estimated_revenue > Decimal::ZERO)
        .map(|r| r.number);
    let most_profitable_type: Option<RoomType> = by_type
        .iter()
        .filter(|t| t.estimated_revenue > Decimal::ZERO)
        .max_by(|a, b| a.estimated_revenue.cmp(&b.estimated_revenue))
        .map(|t| t.room_type);

    ProfitabilityReport {
        period: period.info(),
        total_revenue: rooms.iter().map(|r| r.estimated_revenue).sum(),
        rooms,
        by_type,
        most_profitable_room,
        most_profitable_type,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTypeStatistics {
    pub room_type: RoomType,
    pub rooms: usize,
    pub average_price: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricedRoom {
    pub room_id: i64,
    pub number: RoomNumber,
    pub nightly_price: Decimal,
}

/// Inventory figures for the whole hotel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomStatistics {
    pub total_rooms: usize,
    pub by_state: BTreeMap<String, usize>,
    pub by_type: Vec<RoomTypeStatistics>,
    pub average_price: Decimal,
    pub occupancy_rate: f64,
    pub most_expensive: Option<PricedRoom>,
    pub least_expensive: Option<PricedRoom>,
}

/// Counts rooms per state and type and summarizes prices.
#[must_use]
pub fn room_statistics(rooms: &[RoomFact]) -> RoomStatistics {
    let by_state: BTreeMap<String, usize> = RoomState::ALL
        .iter()
        .map(|state| {
            (
                state.as_str().to_string(),
                rooms.iter().filter(|r| r.state == *state).count(),
            )
        })
        .collect();

    let by_type: Vec<RoomTypeStatistics> = RoomType::ALL
        .iter()
        .map(|room_type| {
            let prices: Vec<Decimal> = rooms
                .iter()
                .filter(|r| r.room_type == *room_type)
                .map(|r| r.nightly_price)
                .collect();
            RoomTypeStatistics {
                room_type: *room_type,
                rooms: prices.len(),
                average_price: average_decimal(prices.iter().sum(), prices.len()),
            }
        })
        .collect();

    let priced = |room: &RoomFact| PricedRoom {
        room_id: room.room_id,
        number: room.number,
        nightly_price: room.nightly_price,
    };
    let occupied: usize = rooms
        .iter()
        .filter(|r| r.state == RoomState::Occupied)
        .count();

    RoomStatistics {
        total_rooms: rooms.len(),
        by_state,
        by_type,
        average_price: average_decimal(rooms.iter().map(|r| r.nightly_price).sum(), rooms.len()),
        occupancy_rate: percentage(occupied, rooms.len()),
        most_expensive: rooms
            .iter()
            .max_by(|a, b| {
                a.nightly_price
                    .cmp(&b.nightly_price)
                    .then_with(|| b.number.cmp(&a.number))
            })
            .map(priced),
        least_expensive: rooms
            .iter()
            .min_by(|a, b| {
                a.nightly_price
                    .cmp(&b.nightly_price)
                    .then_with(|| a.number.cmp(&b.number))
            })
            .map(priced),
    }
}

/// Entries whose assignment falls in the period.
pub(crate) fn assignments_in_period<'a>(
    occupancy: &'a [OccupancyFact],
    period: &'a ReportPeriod,
    calendar: &'a HotelCalendar,
) -> impl Iterator<Item = &'a OccupancyFact> + Clone + 'a {
    occupancy
        .iter()
        .filter(move |e| period.contains(calendar.local_date(e.assigned_at)))
}
