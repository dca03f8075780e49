// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Dashboard and general statistics.

use std::collections::BTreeMap;

use innkeep_domain::{DocumentType, PaymentType, RoomNumber, RoomState, RoomType};
use num_traits::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::clients::{PaymentShare, payment_shares};
use crate::error::ReportError;
use crate::facts::{ClientFact, ReportInputs};
use crate::figures::{average, average_decimal, percentage, round2};
use crate::period::{HotelCalendar, PeriodInfo, ReportPeriod, month_key};
use crate::rooms::assignments_in_period;

const TOP_ROOMS: usize = 5;
const RECENT_CLIENTS: usize = 5;

fn clients_in_period<'a>(
    clients: &'a [ClientFact],
    period: &'a ReportPeriod,
    calendar: &'a HotelCalendar,
) -> impl Iterator<Item = &'a ClientFact> + Clone + 'a {
    clients
        .iter()
        .filter(move |c| period.contains(calendar.local_date(c.registered_at)))
}

fn occupancy_rate(inputs: &ReportInputs) -> f64 {
    let occupied: usize = inputs
        .rooms
        .iter()
        .filter(|r| r.state == RoomState::Occupied)
        .count();
    percentage(occupied, inputs.rooms.len())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub clients_in_period: usize,
    pub assignments_in_period: usize,
    pub revenue_in_period: Decimal,
    pub active_clients: usize,
    pub occupied_rooms: usize,
    pub total_rooms: usize,
    /// Rooms occupied right now over all rooms, as a percentage.
    pub occupancy_rate: f64,
    pub daily_average_clients: f64,
    pub daily_average_revenue: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TopRoom {
    pub number: RoomNumber,
    pub room_type: RoomType,
    pub assignments: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecentClient {
    pub client_id: i64,
    pub full_name: String,
    pub amount_paid: Decimal,
    #[serde(with = "time::serde::rfc3339")]
    pub registered_at: OffsetDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub period: PeriodInfo,
    pub summary: DashboardSummary,
    pub clients_by_month: BTreeMap<String, usize>,
    pub top_rooms: Vec<TopRoom>,
    pub payment_distribution: Vec<PaymentShare>,
    pub recent_clients: Vec<RecentClient>,
}

/// Front-desk overview of the period plus current occupancy.
#[must_use]
pub fn dashboard(
    inputs: &ReportInputs,
    period: &ReportPeriod,
    calendar: &HotelCalendar,
) -> DashboardReport {
    let clients = clients_in_period(&inputs.clients, period, calendar);
    let client_count: usize = clients.clone().count();
    let revenue: Decimal = clients.clone().map(|c| c.amount_paid).sum();
    let days: usize = usize::try_from(period.days()).unwrap_or(1);

    let mut clients_by_month: BTreeMap<String, usize> = BTreeMap::new();
    for client in clients.clone() {
        *clients_by_month
            .entry(month_key(calendar.local_date(client.registered_at)))
            .or_default() += 1;
    }

    let mut room_counts: BTreeMap<i64, usize> = BTreeMap::new();
    let assignments = assignments_in_period(&inputs.occupancy, period, calendar);
    for entry in assignments.clone() {
        *room_counts.entry(entry.room_id).or_default() += 1;
    }
    let mut top_rooms: Vec<TopRoom> = room_counts
        .into_iter()
        .filter_map(|(room_id, assignments)| {
            inputs.room(room_id).map(|room| TopRoom {
                number: room.number,
                room_type: room.room_type,
                assignments,
            })
        })
        .collect();
    top_rooms.sort_by(|a, b| {
        b.assignments
            .cmp(&a.assignments)
            .then_with(|| a.number.cmp(&b.number))
    });
    top_rooms.truncate(TOP_ROOMS);

    let mut recent: Vec<&ClientFact> = clients.clone().collect();
    recent.sort_by(|a, b| b.registered_at.cmp(&a.registered_at));
    let recent_clients: Vec<RecentClient> = recent
        .into_iter()
        .take(RECENT_CLIENTS)
        .map(|c| RecentClient {
            client_id: c.client_id,
            full_name: c.full_name.clone(),
            amount_paid: c.amount_paid,
            registered_at: c.registered_at,
        })
        .collect();

    let occupied_rooms: usize = inputs
        .rooms
        .iter()
        .filter(|r| r.state == RoomState::Occupied)
        .count();

    DashboardReport {
        period: period.info(),
        summary: DashboardSummary {
            clients_in_period: client_count,
            assignments_in_period: assignments.count(),
            revenue_in_period: revenue,
            active_clients: inputs.clients.iter().filter(|c| c.is_active()).count(),
            occupied_rooms,
            total_rooms: inputs.rooms.len(),
            occupancy_rate: occupancy_rate(inputs),
            daily_average_clients: average(client_count, days),
            daily_average_revenue: average_decimal(revenue, days),
        },
        clients_by_month,
        top_rooms,
        payment_distribution: payment_shares(clients),
        recent_clients,
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Growth,
    Decline,
    Stable,
}

/// A figure compared with the previous period of equal length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trend {
    pub current: f64,
    pub previous: f64,
    /// `None` when the previous period had nothing to compare against.
    pub growth_percentage: Option<f64>,
    pub direction: TrendDirection,
}

impl Trend {
    fn between<T: ToPrimitive>(current: T, previous: T) -> Self {
        let current: f64 = current.to_f64().unwrap_or(0.0);
        let previous: f64 = previous.to_f64().unwrap_or(0.0);
        let growth_percentage: Option<f64> = (previous.abs() >= f64::EPSILON)
            .then(|| round2((current - previous) / previous * 100.0));
        let delta: f64 = current - previous;
        let direction: TrendDirection = if delta.abs() < f64::EPSILON {
            TrendDirection::Stable
        } else if delta > 0.0 {
            TrendDirection::Growth
        } else {
            TrendDirection::Decline
        };
        Self {
            current: round2(current),
            previous: round2(previous),
            growth_percentage,
            direction,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopSpender {
    pub client_id: i64,
    pub full_name: String,
    pub amount_paid: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientSummary {
    pub total: usize,
    pub in_period: usize,
    pub active: usize,
    pub by_document_type: BTreeMap<String, usize>,
    pub top_spender: Option<TopSpender>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoomSummary {
    pub total: usize,
    pub by_state: BTreeMap<String, usize>,
    pub by_type: BTreeMap<String, usize>,
    pub occupancy_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenueSummary {
    pub total: Decimal,
    pub in_period: Decimal,
    pub average_per_client: Decimal,
    pub by_payment_type: BTreeMap<String, Decimal>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trends {
    pub clients: Trend,
    pub revenue: Trend,
    pub assignments: Trend,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneralStatsReport {
    pub period: PeriodInfo,
    pub previous_period: PeriodInfo,
    pub clients: ClientSummary,
    pub rooms: RoomSummary,
    pub revenue: RevenueSummary,
    pub trends: Trends,
}

/// Hotel-wide figures with trends against the preceding period.
///
/// # Errors
///
/// Returns `ReportError::DateOutOfRange` if the preceding period falls off
/// the calendar.
pub fn general_stats(
    inputs: &ReportInputs,
    period: &ReportPeriod,
    calendar: &HotelCalendar,
) -> Result<GeneralStatsReport, ReportError> {
    let previous: ReportPeriod = period.previous()?;

    let current_clients = clients_in_period(&inputs.clients, period, calendar);
    let previous_clients = clients_in_period(&inputs.clients, &previous, calendar);
    let current_revenue: Decimal = current_clients.clone().map(|c| c.amount_paid).sum();
    let previous_revenue: Decimal = previous_clients.clone().map(|c| c.amount_paid).sum();
    let current_assignments: usize =
        assignments_in_period(&inputs.occupancy, period, calendar).count();
    let previous_assignments: usize =
        assignments_in_period(&inputs.occupancy, &previous, calendar).count();

    let by_document_type: BTreeMap<String, usize> = DocumentType::ALL
        .iter()
        .map(|d| {
            (
                d.as_str().to_string(),
                inputs
                    .clients
                    .iter()
                    .filter(|c| c.document.document_type == *d)
                    .count(),
            )
        })
        .collect();

    let top_spender: Option<TopSpender> = inputs
        .clients
        .iter()
        .max_by(|a, b| {
            a.amount_paid
                .cmp(&b.amount_paid)
                .then_with(|| b.client_id.cmp(&a.client_id))
        })
        .map(|c| TopSpender {
            client_id: c.client_id,
            full_name: c.full_name.clone(),
            amount_paid: c.amount_paid,
        });

    let rooms = RoomSummary {
        total: inputs.rooms.len(),
        by_state: RoomState::ALL
            .iter()
            .map(|s| {
                (
                    s.as_str().to_string(),
                    inputs.rooms.iter().filter(|r| r.state == *s).count(),
                )
            })
            .collect(),
        by_type: RoomType::ALL
            .iter()
            .map(|t| {
                (
                    t.as_str().to_string(),
                    inputs.rooms.iter().filter(|r| r.room_type == *t).count(),
                )
            })
            .collect(),
        occupancy_rate: occupancy_rate(inputs),
    };

    let total_revenue: Decimal = inputs.clients.iter().map(|c| c.amount_paid).sum();
    let revenue = RevenueSummary {
        total: total_revenue,
        in_period: current_revenue,
        average_per_client: average_decimal(total_revenue, inputs.clients.len()),
        by_payment_type: PaymentType::ALL
            .iter()
            .map(|p| {
                (
                    p.as_str().to_string(),
                    inputs
                        .clients
                        .iter()
                        .filter(|c| c.payment_type == *p)
                        .map(|c| c.amount_paid)
                        .sum(),
                )
            })
            .collect(),
    };

    Ok(GeneralStatsReport {
        period: period.info(),
        previous_period: previous.info(),
        clients: ClientSummary {
            total: inputs.clients.len(),
            in_period: current_clients.clone().count(),
            active: inputs.clients.iter().filter(|c| c.is_active()).count(),
            by_document_type,
            top_spender,
        },
        rooms,
        revenue,
        trends: Trends {
            clients: Trend::between(current_clients.count(), previous_clients.count()),
            revenue: Trend::between(current_revenue, previous_revenue),
            assignments: Trend::between(current_assignments, previous_assignments),
        },
    })
}
