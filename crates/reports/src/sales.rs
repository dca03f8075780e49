// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Month-by-month sales for spotting high and low seasons.

use std::collections::{BTreeMap, HashMap, HashSet};

use innkeep_domain::{PaymentType, RoomNumber};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::facts::{ClientFact, ReportInputs};
use crate::figures::average;
use crate::period::{HotelCalendar, PeriodInfo, ReportPeriod, iso_week_key, month_key};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthSales {
    /// `YYYY-MM`.
    pub month: String,
    pub registrations: usize,
    pub rooms_sold: usize,
    pub revenue: Decimal,
    /// Distinct documents registered in the month.
    pub unique_clients: usize,
    /// Registrations per day of the month that falls inside the period.
    pub average_daily_registrations: f64,
    pub most_popular_room: Option<RoomNumber>,
    pub preferred_payment_type: Option<PaymentType>,
    pub registrations_by_week: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeasonalSalesReport {
    pub period: PeriodInfo,
    pub total_revenue: Decimal,
    /// Ordered by revenue, then registrations, both descending.
    pub months: Vec<MonthSales>,
    pub best_month: Option<String>,
}

/// Groups registrations in the period by hotel-local month.
#[must_use]
pub fn seasonal_sales(
    inputs: &ReportInputs,
    period: &ReportPeriod,
    calendar: &HotelCalendar,
) -> SeasonalSalesReport {
    let mut days_per_month: HashMap<String, usize> = HashMap::new();
    for day in period.dates() {
        *days_per_month.entry(month_key(day)).or_default() += 1;
    }

    let mut by_month: BTreeMap<String, Vec<&ClientFact>> = BTreeMap::new();
    for client in &inputs.clients {
        let day = calendar.local_date(client.registered_at);
        if period.contains(day) {
            by_month.entry(month_key(day)).or_default().push(client);
        }
    }

    let mut months: Vec<MonthSales> = by_month
        .into_iter()
        .map(|(month, clients)| {
            let client_ids: HashSet<i64> = clients.iter().map(|c| c.client_id).collect();

            let mut room_counts: HashMap<i64, usize> = HashMap::new();
            for entry in inputs
                .occupancy
                .iter()
                .filter(|e| client_ids.contains(&e.client_id))
            {
                *room_counts.entry(entry.room_id).or_default() += 1;
            }
            let rooms_sold: usize = room_counts.values().sum();
            let most_popular_room: Option<RoomNumber> = room_counts
                .iter()
                .filter_map(|(room_id, count)| inputs.room(*room_id).map(|r| (r.number, *count)))
                .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))
                .map(|(number, _)| number);

            let preferred_payment_type: Option<PaymentType> = PaymentType::ALL
                .iter()
                .map(|p| (*p, clients.iter().filter(|c| c.payment_type == *p).count()))
                .filter(|(_, count)| *count > 0)
                .rev()
                .max_by_key(|(_, count)| *count)
                .map(|(p, _)| p);

            let mut registrations_by_week: BTreeMap<String, usize> = BTreeMap::new();
            for client in &clients {
                *registrations_by_week
                    .entry(iso_week_key(calendar.local_date(client.registered_at)))
                    .or_default() += 1;
            }

            let unique_clients: usize = clients
                .iter()
                .map(|c| (&c.document.document_type, &c.document.number))
                .collect::<HashSet<_>>()
                .len();
            let days: usize = days_per_month.get(&month).copied().unwrap_or(1);

            MonthSales {
                registrations: clients.len(),
                rooms_sold,
                revenue: clients.iter().map(|c| c.amount_paid).sum(),
                unique_clients,
                average_daily_registrations: average(clients.len(), days),
                most_popular_room,
                preferred_payment_type,
                registrations_by_week,
                month,
            }
        })
        .collect();

    months.sort_by(|a, b| {
        b.revenue
            .cmp(&a.revenue)
            .then_with(|| b.registrations.cmp(&a.registrations))
            .then_with(|| a.month.cmp(&b.month))
    });

    SeasonalSalesReport {
        period: period.info(),
        total_revenue: months.iter().map(|m| m.revenue).sum(),
        best_month: months.first().map(|m| m.month.clone()),
        months,
    }
}
