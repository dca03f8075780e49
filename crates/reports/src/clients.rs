// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client-centred reports.

use std::collections::{BTreeMap, HashMap};

use innkeep_domain::{DocumentType, PaymentType};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::facts::{ClientFact, ReportInputs};
use crate::figures::{average, percentage};
use crate::period::{HotelCalendar, PeriodInfo, ReportPeriod, month_key};

const TOP_CLIENTS: usize = 5;

/// One returning guest, grouped by identity document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientFrequencyRow {
    pub document_type: DocumentType,
    pub document_number: String,
    /// Name on the most recent registration.
    pub full_name: String,
    pub registrations: usize,
    pub rooms_assigned: usize,
    pub total_paid: Decimal,
    #[serde(with = "time::serde::rfc3339")]
    pub first_registration: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub last_registration: OffsetDateTime,
    pub average_rooms_per_registration: f64,
    pub registrations_by_month: BTreeMap<String, usize>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientFrequencyReport {
    pub period: PeriodInfo,
    /// Distinct documents registered in the period.
    pub distinct_clients: usize,
    pub total_registrations: usize,
    pub clients: Vec<ClientFrequencyRow>,
}

/// Ranks guests by how often they registered in the period.
///
/// Registrations sharing a document are one guest. Ordered by registrations,
/// then total paid, both descending.
#[must_use]
pub fn client_frequency(
    inputs: &ReportInputs,
    period: &ReportPeriod,
    calendar: &HotelCalendar,
    limit: usize,
) -> ClientFrequencyReport {
    let mut groups: HashMap<(DocumentType, &str), Vec<&ClientFact>> = HashMap::new();
    for client in inputs
        .clients
        .iter()
        .filter(|c| period.contains(calendar.local_date(c.registered_at)))
    {
        groups
            .entry((client.document.document_type, client.document.number.as_str()))
            .or_default()
            .push(client);
    }

    let total_registrations: usize = groups.values().map(Vec::len).sum();
    let distinct_clients: usize = groups.len();

    let mut rows: Vec<ClientFrequencyRow> = groups
        .into_iter()
        .filter_map(|((document_type, document_number), mut stays)| {
            stays.sort_by_key(|c| c.registered_at);
            let first: &ClientFact = stays.first()?;
            let last: &ClientFact = stays.last()?;
            let rooms_assigned: usize = stays.iter().map(|c| c.rooms_assigned).sum();
            let mut registrations_by_month: BTreeMap<String, usize> = BTreeMap::new();
            for stay in &stays {
                *registrations_by_month
                    .entry(month_key(calendar.local_date(stay.registered_at)))
                    .or_default() += 1;
            }
            Some(ClientFrequencyRow {
                document_type,
                document_number: document_number.to_string(),
                full_name: last.full_name.clone(),
                registrations: stays.len(),
                rooms_assigned,
                total_paid: stays.iter().map(|c| c.amount_paid).sum(),
                first_registration: first.registered_at,
                last_registration: last.registered_at,
                average_rooms_per_registration: average(rooms_assigned, stays.len()),
                registrations_by_month,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.registrations
            .cmp(&a.registrations)
            .then_with(|| b.total_paid.cmp(&a.total_paid))
            .then_with(|| a.document_number.cmp(&b.document_number))
    });
    rows.truncate(limit);

    ClientFrequencyReport {
        period: period.info(),
        distinct_clients,
        total_registrations,
        clients: rows,
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentShare {
    pub document_type: DocumentType,
    pub clients: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentShare {
    pub payment_type: PaymentType,
    pub clients: usize,
    pub amount: Decimal,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRoomCount {
    pub client_id: i64,
    pub full_name: String,
    pub rooms_assigned: usize,
}

/// Registry-wide client figures.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientStatistics {
    pub total_clients: usize,
    pub active_clients: usize,
    pub inactive_clients: usize,
    pub by_document_type: Vec<DocumentShare>,
    pub by_payment_type: Vec<PaymentShare>,
    pub total_collected: Decimal,
    pub average_rooms_per_client: f64,
    pub top_clients_by_rooms: Vec<ClientRoomCount>,
}

/// Breaks the client registry down by document, payment and room usage.
#[must_use]
pub fn client_statistics(clients: &[ClientFact]) -> ClientStatistics {
    let total: usize = clients.len();
    let active: usize = clients.iter().filter(|c| c.is_active()).count();

    let by_document_type: Vec<DocumentShare> = DocumentType::ALL
        .iter()
        .map(|document_type| {
            let count: usize = clients
                .iter()
                .filter(|c| c.document.document_type == *document_type)
                .count();
            DocumentShare {
                document_type: *document_type,
                clients: count,
                percentage: percentage(count, total),
            }
        })
        .collect();

    let by_payment_type: Vec<PaymentShare> = payment_shares(clients.iter());

    let mut top: Vec<ClientRoomCount> = clients
        .iter()
        .filter(|c| c.rooms_assigned > 0)
        .map(|c| ClientRoomCount {
            client_id: c.client_id,
            full_name: c.full_name.clone(),
            rooms_assigned: c.rooms_assigned,
        })
        .collect();
    top.sort_by(|a, b| {
        b.rooms_assigned
            .cmp(&a.rooms_assigned)
            .then_with(|| a.client_id.cmp(&b.client_id))
    });
    top.truncate(TOP_CLIENTS);

    ClientStatistics {
        total_clients: total,
        active_clients: active,
        inactive_clients: total - active,
        by_document_type,
        by_payment_type,
        total_collected: clients.iter().map(|c| c.amount_paid).sum(),
        average_rooms_per_client: average(
            clients.iter().map(|c| c.rooms_assigned).sum::<usize>(),
            total,
        ),
        top_clients_by_rooms: top,
    }
}

/// Client count, amount and share per payment type, in enum order.
pub(crate) fn payment_shares<'a>(
    clients: impl Iterator<Item = &'a ClientFact> + Clone,
) -> Vec<PaymentShare> {
    let total: usize = clients.clone().count();
    PaymentType::ALL
        .iter()
        .map(|payment_type| {
            let matching = clients.clone().filter(|c| c.payment_type == *payment_type);
            let count: usize = matching.clone().count();
            PaymentShare {
                payment_type: *payment_type,
                clients: count,
                amount: matching.map(|c| c.amount_paid).sum(),
                percentage: percentage(count, total),
            }
        })
        .collect()
}
