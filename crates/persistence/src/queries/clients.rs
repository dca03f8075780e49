// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client queries.
//!
//! Client records are returned with their ledger counts so callers can
//! tell active guests from closed stays without a second query.

use std::collections::HashMap;

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep_domain::{ClientProfile, Document};
use tracing::debug;

use crate::columns::{parse_column, parse_optional_timestamp, parse_timestamp};
use crate::data_models::{ClientRecord, DocumentCheck, DocumentStatus};
use crate::diesel_schema::{clients, occupancy};
use crate::error::PersistenceError;

/// Diesel Queryable struct for client rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = clients)]
pub(crate) struct ClientRow {
    pub client_id: i64,
    pub first_names: String,
    pub last_names: String,
    pub document_type: String,
    pub document_number: String,
    pub desired_rooms: i32,
    pub payment_type: String,
    pub amount_paid: String,
    pub age: Option<i32>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub check_in: Option<String>,
    pub planned_checkout: Option<String>,
    pub actual_checkout: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

/// Active and total ledger entries of one client.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub(crate) struct LedgerCounts {
    pub active: usize,
    pub total: usize,
}

impl ClientRow {
    pub(crate) fn into_record(self, counts: LedgerCounts) -> Result<ClientRecord, PersistenceError> {
        let profile = ClientProfile {
            document: Document::new(
                parse_column("clients", "document_type", &self.document_type)?,
                &self.document_number,
            ),
            desired_rooms: i64::from(self.desired_rooms),
            payment_type: parse_column("clients", "payment_type", &self.payment_type)?,
            amount_paid: parse_column("clients", "amount_paid", &self.amount_paid)?,
            age: self.age.map(i64::from),
            check_in: parse_optional_timestamp("clients", "check_in", self.check_in.as_deref())?,
            planned_checkout: parse_optional_timestamp(
                "clients",
                "planned_checkout",
                self.planned_checkout.as_deref(),
            )?,
            first_names: self.first_names,
            last_names: self.last_names,
            phone: self.phone,
            address: self.address,
        };

        Ok(ClientRecord {
            client_id: self.client_id,
            profile,
            actual_checkout: parse_optional_timestamp(
                "clients",
                "actual_checkout",
                self.actual_checkout.as_deref(),
            )?,
            created_at: parse_timestamp("clients", "created_at", &self.created_at)?,
            updated_at: parse_timestamp("clients", "updated_at", &self.updated_at)?,
            active_rooms: counts.active,
            rooms_assigned: counts.total,
        })
    }
}

fn tally(states: impl IntoIterator<Item = String>) -> LedgerCounts {
    states
        .into_iter()
        .fold(LedgerCounts::default(), |mut counts, state| {
            counts.total += 1;
            if state == "active" {
                counts.active += 1;
            }
            counts
        })
}

fn ledger_counts_for(
    conn: &mut SqliteConnection,
    client_id: i64,
) -> Result<LedgerCounts, PersistenceError> {
    let states: Vec<String> = occupancy::table
        .filter(occupancy::client_id.eq(client_id))
        .select(occupancy::state)
        .load(conn)?;
    Ok(tally(states))
}

fn all_ledger_counts(
    conn: &mut SqliteConnection,
) -> Result<HashMap<i64, LedgerCounts>, PersistenceError> {
    let rows: Vec<(i64, String)> = occupancy::table
        .select((occupancy::client_id, occupancy::state))
        .load(conn)?;

    let mut by_client: HashMap<i64, Vec<String>> = HashMap::new();
    for (client_id, state) in rows {
        by_client.entry(client_id).or_default().push(state);
    }
    Ok(by_client
        .into_iter()
        .map(|(client_id, states)| (client_id, tally(states)))
        .collect())
}

fn attach_counts(
    rows: Vec<ClientRow>,
    counts: &HashMap<i64, LedgerCounts>,
) -> Result<Vec<ClientRecord>, PersistenceError> {
    let mut records: Vec<ClientRecord> = rows
        .into_iter()
        .map(|row| {
            let client_counts: LedgerCounts = counts.get(&row.client_id).copied().unwrap_or_default();
            row.into_record(client_counts)
        })
        .collect::<Result<_, _>>()?;
    records.sort_by(|a, b| {
        b.created_at
            .cmp(&a.created_at)
            .then_with(|| b.client_id.cmp(&a.client_id))
    });
    Ok(records)
}

/// Retrieves a client by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
/// Returns `Ok(None)` if the client does not exist.
pub fn get_client(
    conn: &mut SqliteConnection,
    client_id: i64,
) -> Result<Option<ClientRecord>, PersistenceError> {
    debug!(client_id, "Looking up client");

    let result: Result<ClientRow, diesel::result::Error> = clients::table
        .filter(clients::client_id.eq(client_id))
        .select(ClientRow::as_select())
        .first(conn);

    match result {
        Ok(row) => {
            let counts: LedgerCounts = ledger_counts_for(conn, client_id)?;
            Ok(Some(row.into_record(counts)?))
        }
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists every client, most recently registered first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_clients(conn: &mut SqliteConnection) -> Result<Vec<ClientRecord>, PersistenceError> {
    let rows: Vec<ClientRow> = clients::table.select(ClientRow::as_select()).load(conn)?;
    let counts: HashMap<i64, LedgerCounts> = all_ledger_counts(conn)?;

    debug!(count = rows.len(), "Loaded clients");
    attach_counts(rows, &counts)
}

/// Lists the records registered with a document, most recent first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn clients_with_document(
    conn: &mut SqliteConnection,
    document: &Document,
) -> Result<Vec<ClientRecord>, PersistenceError> {
    let rows: Vec<ClientRow> = clients::table
        .filter(clients::document_type.eq(document.document_type.as_str()))
        .filter(clients::document_number.eq(&document.number))
        .select(ClientRow::as_select())
        .load(conn)?;

    let mut counts: HashMap<i64, LedgerCounts> = HashMap::with_capacity(rows.len());
    for row in &rows {
        counts.insert(row.client_id, ledger_counts_for(conn, row.client_id)?);
    }
    attach_counts(rows, &counts)
}

/// Finds another client with this document that still holds a room.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `document` - The document to look for
/// * `excluding` - A client to ignore, typically the one being updated
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn active_document_holder(
    conn: &mut SqliteConnection,
    document: &Document,
    excluding: Option<i64>,
) -> Result<Option<i64>, PersistenceError> {
    let holders: Vec<i64> = clients::table
        .inner_join(occupancy::table)
        .filter(clients::document_type.eq(document.document_type.as_str()))
        .filter(clients::document_number.eq(&document.number))
        .filter(occupancy::state.eq("active"))
        .select(clients::client_id)
        .distinct()
        .load(conn)?;

    Ok(holders
        .into_iter()
        .find(|client_id| Some(*client_id) != excluding))
}

/// Reports whether a document may register a new stay.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn check_document(
    conn: &mut SqliteConnection,
    document: &Document,
) -> Result<DocumentCheck, PersistenceError> {
    let records: Vec<ClientRecord> = clients_with_document(conn, document)?;
    let previous_stays: usize = records.len();

    let active: Option<&ClientRecord> = records.iter().find(|r| r.is_active());
    let (status, existing) = match (active, records.first()) {
        (Some(record), _) => (DocumentStatus::ActiveClient, Some(record.clone())),
        (None, Some(latest)) => (DocumentStatus::PreviousStayClosed, Some(latest.clone())),
        (None, None) => (DocumentStatus::NewClient, None),
    };

    debug!(
        document = %document,
        status = status.as_str(),
        previous_stays,
        "Checked document"
    );
    Ok(DocumentCheck {
        status,
        existing,
        previous_stays,
    })
}
