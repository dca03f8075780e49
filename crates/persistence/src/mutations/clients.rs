// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Client registry writes.
//!
//! Registration, updates, room assignment, release and removal each run in
//! one immediate transaction. The active-document rule is checked again
//! inside that transaction so two registrations with the same document
//! cannot both pass.

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep::{Command, Transition};
use innkeep_domain::{ClientProfile, DomainError, LedgerState, validate_stay_dates};
use time::OffsetDateTime;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::columns::{format_optional_timestamp, format_timestamp, to_integer};
use crate::data_models::{ClientDetail, ClientRecord, OccupancyRecord, ReleaseOutcome, RemovalOutcome};
use crate::diesel_schema::clients;
use crate::error::PersistenceError;
use crate::mutations::occupancy::{apply_command, freed_rooms};
use crate::queries::clients::{active_document_holder, get_client};
use crate::queries::occupancy::entries_for_client;

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = clients)]
#[diesel(treat_none_as_null = true)]
struct ClientColumns<'a> {
    first_names: &'a str,
    last_names: &'a str,
    document_type: &'a str,
    document_number: &'a str,
    desired_rooms: i32,
    payment_type: &'a str,
    amount_paid: String,
    age: Option<i32>,
    phone: Option<&'a str>,
    address: Option<&'a str>,
    check_in: Option<String>,
    planned_checkout: Option<String>,
    updated_at: &'a str,
}

#[derive(Insertable)]
#[diesel(table_name = clients)]
struct NewClientRow<'a> {
    #[diesel(embed)]
    columns: ClientColumns<'a>,
    created_at: &'a str,
}

impl<'a> ClientColumns<'a> {
    fn new(profile: &'a ClientProfile, updated_at: &'a str) -> Result<Self, PersistenceError> {
        Ok(Self {
            first_names: profile.first_names.trim(),
            last_names: profile.last_names.trim(),
            document_type: profile.document.document_type.as_str(),
            document_number: &profile.document.number,
            desired_rooms: to_integer("desired_rooms", profile.desired_rooms)?,
            payment_type: profile.payment_type.as_str(),
            amount_paid: profile.amount_paid.to_string(),
            age: profile.age.map(|age| to_integer("age", age)).transpose()?,
            phone: profile.phone.as_deref(),
            address: profile.address.as_deref(),
            check_in: format_optional_timestamp(profile.check_in)?,
            planned_checkout: format_optional_timestamp(profile.planned_checkout)?,
            updated_at,
        })
    }
}

fn ensure_document_free(
    conn: &mut SqliteConnection,
    profile: &ClientProfile,
    owner: Option<i64>,
) -> Result<(), PersistenceError> {
    match active_document_holder(conn, &profile.document, owner)? {
        Some(client_id) => Err(PersistenceError::DomainViolation(
            DomainError::ActiveDocumentConflict {
                document_type: profile.document.document_type,
                document_number: profile.document.number.clone(),
                client_id,
            },
        )),
        None => Ok(()),
    }
}

fn existing(conn: &mut SqliteConnection, client_id: i64) -> Result<ClientRecord, PersistenceError> {
    get_client(conn, client_id)?.ok_or(PersistenceError::ClientNotFound(client_id))
}

/// Loads a client with its active rooms and full ledger history.
///
/// # Errors
///
/// Returns `PersistenceError::ClientNotFound` if the client does not exist.
pub fn client_detail(
    conn: &mut SqliteConnection,
    client_id: i64,
) -> Result<ClientDetail, PersistenceError> {
    let client: ClientRecord = existing(conn, client_id)?;
    let history: Vec<OccupancyRecord> = entries_for_client(conn, client_id)?;
    let active_rooms: Vec<OccupancyRecord> = history
        .iter()
        .filter(|entry| entry.state == LedgerState::Active)
        .cloned()
        .collect();
    Ok(ClientDetail {
        client,
        active_rooms,
        history,
    })
}

/// Registers a client and assigns the selected rooms.
///
/// A missing check-in is stamped with `now`.
///
/// # Errors
///
/// Returns a domain violation if another record with the document holds
/// rooms, or the lifecycle rejection if a room cannot be assigned. Nothing
/// is written on failure.
pub fn register_client(
    conn: &mut SqliteConnection,
    profile: &ClientProfile,
    room_ids: &[i64],
    now: OffsetDateTime,
) -> Result<ClientDetail, PersistenceError> {
    let at: String = format_timestamp(now)?;
    let mut profile: ClientProfile = profile.clone();
    profile.check_in = profile.check_in.or(Some(now));
    validate_stay_dates(profile.check_in, profile.planned_checkout)?;

    conn.immediate_transaction(|conn| {
        ensure_document_free(conn, &profile, None)?;

        let row = NewClientRow {
            columns: ClientColumns::new(&profile, &at)?,
            created_at: &at,
        };
        diesel::insert_into(clients::table).values(&row).execute(conn)?;
        let client_id: i64 = conn.get_last_insert_rowid()?;

        apply_command(
            conn,
            Command::Assign {
                client_id,
                room_ids: room_ids.to_vec(),
            },
            now,
        )?;

        info!(
            client_id,
            document = %profile.document,
            rooms = room_ids.len(),
            "Registered client"
        );
        client_detail(conn, client_id)
    })
}

/// Replaces a client's profile.
///
/// # Errors
///
/// Returns `PersistenceError::ClientNotFound`, or a domain violation if the
/// new document is held by another active client.
pub fn update_client(
    conn: &mut SqliteConnection,
    client_id: i64,
    profile: &ClientProfile,
    now: OffsetDateTime,
) -> Result<ClientRecord, PersistenceError> {
    let at: String = format_timestamp(now)?;

    conn.immediate_transaction(|conn| {
        existing(conn, client_id)?;
        ensure_document_free(conn, profile, Some(client_id))?;

        let columns: ClientColumns<'_> = ClientColumns::new(profile, &at)?;
        diesel::update(clients::table.filter(clients::client_id.eq(client_id)))
            .set(&columns)
            .execute(conn)?;

        info!(client_id, "Updated client");
        existing(conn, client_id)
    })
}

/// Assigns more rooms to an existing client.
///
/// # Errors
///
/// Returns `PersistenceError::ClientNotFound` or the lifecycle rejection.
pub fn add_rooms(
    conn: &mut SqliteConnection,
    client_id: i64,
    room_ids: &[i64],
    now: OffsetDateTime,
) -> Result<ClientDetail, PersistenceError> {
    conn.immediate_transaction(|conn| {
        existing(conn, client_id)?;
        apply_command(
            conn,
            Command::Assign {
                client_id,
                room_ids: room_ids.to_vec(),
            },
            now,
        )?;
        client_detail(conn, client_id)
    })
}

/// Releases every room a client holds and stamps the actual checkout.
///
/// Releasing a client with no active rooms succeeds with a warning.
///
/// # Errors
///
/// Returns `PersistenceError::ClientNotFound` or a database error.
pub fn release_client(
    conn: &mut SqliteConnection,
    client_id: i64,
    now: OffsetDateTime,
) -> Result<ReleaseOutcome, PersistenceError> {
    conn.immediate_transaction(|conn| {
        existing(conn, client_id)?;
        let transition: Transition = apply_command(conn, Command::ReleaseAll { client_id }, now)?;

        info!(client_id, released = transition.released.len(), "Released client rooms");
        Ok(ReleaseOutcome {
            client_id,
            released: freed_rooms(&transition),
            actual_checkout: transition.at,
            warning: transition.warning,
        })
    })
}

/// Releases a client's rooms, then deletes the client and its history.
///
/// # Errors
///
/// Returns `PersistenceError::ClientNotFound` or a database error.
pub fn remove_client(
    conn: &mut SqliteConnection,
    client_id: i64,
    now: OffsetDateTime,
) -> Result<RemovalOutcome, PersistenceError> {
    conn.immediate_transaction(|conn| {
        existing(conn, client_id)?;
        let transition: Transition = apply_command(conn, Command::RemoveClient { client_id }, now)?;
        Ok(RemovalOutcome {
            client_id,
            freed: freed_rooms(&transition),
        })
    })
}
