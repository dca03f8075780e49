// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Innkeep hotel back office.
//!
//! Rooms, clients, the occupancy ledger and the report cache live in
//! `SQLite`, accessed through Diesel. The `Persistence` adapter owns one
//! connection and exposes typed repository methods; callers never see
//! rows or SQL.
//!
//! ## Consistency
//!
//! Every occupancy change is computed by the pure lifecycle in `innkeep`
//! and written in one immediate transaction. Room updates are guarded on
//! the state the lifecycle saw, and partial unique indexes reject a second
//! active entry for a room or a (client, room) pair, so double assignment
//! fails even with several connections open.
//!
//! ## Storage
//!
//! - Timestamps are RFC 3339 UTC text
//! - Money is decimal text read back with `rust_decimal`
//! - Migrations are embedded and run on open
//! - File databases use WAL journaling
//! - In-memory databases get a unique name per adapter for test isolation

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

use diesel::SqliteConnection;
use innkeep::Command;
use innkeep_domain::{ClientProfile, Document, RoomSpec};
use innkeep_reports::{HotelCalendar, ReportInputs, ReportKey};
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::{Duration, OffsetDateTime};

/// Counter for unique in-memory database names.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod columns;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    CachedReport, ClientDetail, ClientFilter, ClientRecord, DocumentCheck, DocumentStatus,
    FreedRoom, OccupancyRecord, ReleaseOutcome, RemovalOutcome, RoomFilter, RoomRecord,
};
pub use error::PersistenceError;

use backend::PersistenceBackend;

/// Persistence adapter for the hotel's rooms, clients, ledger and report cache.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates an adapter over a fresh in-memory database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:innkeep_memdb_{db_id}?mode=memory&cache=shared");

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Creates an adapter over a database file, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;
        backend::sqlite::enable_wal_mode(&mut conn)?;
        conn.verify_foreign_key_enforcement()?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Rooms
    // ========================================================================

    /// Creates an available room.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateRoomNumber` if the number is taken.
    pub fn create_room(
        &mut self,
        spec: &RoomSpec,
        now: OffsetDateTime,
    ) -> Result<RoomRecord, PersistenceError> {
        mutations::rooms::create_room(&mut self.conn, spec, now)
    }

    /// Retrieves a room by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_room(&mut self, room_id: i64) -> Result<Option<RoomRecord>, PersistenceError> {
        queries::rooms::get_room(&mut self.conn, room_id)
    }

    /// Retrieves a room by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn find_room_by_number(
        &mut self,
        number: i64,
    ) -> Result<Option<RoomRecord>, PersistenceError> {
        match i32::try_from(number) {
            Ok(number) => queries::rooms::find_room_by_number(&mut self.conn, number),
            Err(_) => Ok(None),
        }
    }

    /// Lists rooms matching a filter, ordered by number.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_rooms(&mut self, filter: &RoomFilter) -> Result<Vec<RoomRecord>, PersistenceError> {
        let rooms: Vec<RoomRecord> = queries::rooms::list_rooms(&mut self.conn)?;
        Ok(rooms.into_iter().filter(|room| filter.matches(room)).collect())
    }

    /// Replaces a room's editable attributes.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RoomNotFound` or
    /// `PersistenceError::DuplicateRoomNumber`.
    pub fn update_room(
        &mut self,
        room_id: i64,
        spec: &RoomSpec,
        now: OffsetDateTime,
    ) -> Result<RoomRecord, PersistenceError> {
        mutations::rooms::update_room(&mut self.conn, room_id, spec, now)
    }

    /// Deletes a room no client holds.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RoomNotFound` or `PersistenceError::RoomInUse`.
    pub fn delete_room(&mut self, room_id: i64) -> Result<(), PersistenceError> {
        mutations::rooms::delete_room(&mut self.conn, room_id)
    }

    /// Marks a dirty room as cleaned.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RoomNotFound` or the lifecycle rejection.
    pub fn clean_room(
        &mut self,
        room_id: i64,
        now: OffsetDateTime,
    ) -> Result<RoomRecord, PersistenceError> {
        mutations::rooms::change_room_state(&mut self.conn, Command::Clean { room_id }, now)
    }

    /// Takes a room out of service.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RoomNotFound` or the lifecycle rejection.
    pub fn begin_maintenance(
        &mut self,
        room_id: i64,
        now: OffsetDateTime,
    ) -> Result<RoomRecord, PersistenceError> {
        mutations::rooms::change_room_state(
            &mut self.conn,
            Command::BeginMaintenance { room_id },
            now,
        )
    }

    /// Returns a room from maintenance to available, or to occupied if a
    /// client still holds it.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::RoomNotFound` or the lifecycle rejection.
    pub fn end_maintenance(
        &mut self,
        room_id: i64,
        now: OffsetDateTime,
    ) -> Result<RoomRecord, PersistenceError> {
        mutations::rooms::change_room_state(&mut self.conn, Command::EndMaintenance { room_id }, now)
    }

    /// The client currently holding a room, if any.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn room_holder(&mut self, room_id: i64) -> Result<Option<i64>, PersistenceError> {
        queries::rooms::active_holder(&mut self.conn, room_id)
    }

    // ========================================================================
    // Clients
    // ========================================================================

    /// Registers a client and assigns the selected rooms atomically.
    ///
    /// # Errors
    ///
    /// Returns a domain violation for a document held by an active client,
    /// or the lifecycle rejection if a room cannot be assigned.
    pub fn register_client(
        &mut self,
        profile: &ClientProfile,
        room_ids: &[i64],
        now: OffsetDateTime,
    ) -> Result<ClientDetail, PersistenceError> {
        mutations::clients::register_client(&mut self.conn, profile, room_ids, now)
    }

    /// Retrieves a client by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_client(&mut self, client_id: i64) -> Result<Option<ClientRecord>, PersistenceError> {
        queries::clients::get_client(&mut self.conn, client_id)
    }

    /// Retrieves a client with its active rooms and ledger history.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ClientNotFound` if the client does not exist.
    pub fn client_detail(&mut self, client_id: i64) -> Result<ClientDetail, PersistenceError> {
        mutations::clients::client_detail(&mut self.conn, client_id)
    }

    /// Lists a client's ledger entries with room details, newest first.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ClientNotFound` if the client does not exist.
    pub fn client_entries(
        &mut self,
        client_id: i64,
    ) -> Result<Vec<OccupancyRecord>, PersistenceError> {
        Ok(self.client_detail(client_id)?.history)
    }

    /// Lists clients matching a filter, most recently registered first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_clients(
        &mut self,
        filter: &ClientFilter,
        calendar: &HotelCalendar,
    ) -> Result<Vec<ClientRecord>, PersistenceError> {
        let clients: Vec<ClientRecord> = queries::clients::list_clients(&mut self.conn)?;
        Ok(clients
            .into_iter()
            .filter(|client| filter.matches(client, calendar))
            .collect())
    }

    /// Replaces a client's profile.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ClientNotFound`, or a domain violation for
    /// a document held by another active client.
    pub fn update_client(
        &mut self,
        client_id: i64,
        profile: &ClientProfile,
        now: OffsetDateTime,
    ) -> Result<ClientRecord, PersistenceError> {
        mutations::clients::update_client(&mut self.conn, client_id, profile, now)
    }

    /// Assigns more rooms to a client.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ClientNotFound` or the lifecycle rejection.
    pub fn add_rooms(
        &mut self,
        client_id: i64,
        room_ids: &[i64],
        now: OffsetDateTime,
    ) -> Result<ClientDetail, PersistenceError> {
        mutations::clients::add_rooms(&mut self.conn, client_id, room_ids, now)
    }

    /// Releases every room a client holds.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ClientNotFound` or a database error.
    pub fn release_client(
        &mut self,
        client_id: i64,
        now: OffsetDateTime,
    ) -> Result<ReleaseOutcome, PersistenceError> {
        mutations::clients::release_client(&mut self.conn, client_id, now)
    }

    /// Releases a client's rooms and deletes the client with its history.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ClientNotFound` or a database error.
    pub fn remove_client(
        &mut self,
        client_id: i64,
        now: OffsetDateTime,
    ) -> Result<RemovalOutcome, PersistenceError> {
        mutations::clients::remove_client(&mut self.conn, client_id, now)
    }

    /// Reports whether a document may register a new stay.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn check_document(&mut self, document: &Document) -> Result<DocumentCheck, PersistenceError> {
        queries::clients::check_document(&mut self.conn, document)
    }

    /// Finds a client other than `excluding` holding rooms under this document.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn active_document_holder(
        &mut self,
        document: &Document,
        excluding: Option<i64>,
    ) -> Result<Option<i64>, PersistenceError> {
        queries::clients::active_document_holder(&mut self.conn, document, excluding)
    }

    // ========================================================================
    // Reports
    // ========================================================================

    /// Loads every room, client and ledger entry for the reporting engine.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails.
    pub fn load_report_inputs(&mut self) -> Result<ReportInputs, PersistenceError> {
        queries::reports::load_report_inputs(&mut self.conn)
    }

    /// Returns a valid, unexpired cached report for the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn cached_report(
        &mut self,
        key: &ReportKey,
        now: OffsetDateTime,
    ) -> Result<Option<CachedReport>, PersistenceError> {
        mutations::cache::cached_report(&mut self.conn, key, now)
    }

    /// Stores a report payload for `ttl`, replacing any valid entry for the key.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn store_report(
        &mut self,
        key: &ReportKey,
        payload: &serde_json::Value,
        now: OffsetDateTime,
        ttl: Duration,
    ) -> Result<CachedReport, PersistenceError> {
        mutations::cache::store_report(&mut self.conn, key, payload, now, ttl)
    }

    /// Invalidates one cached report.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::CacheEntryNotFound` if no entry has this ID.
    pub fn invalidate_cached_report(
        &mut self,
        cache_id: i64,
    ) -> Result<CachedReport, PersistenceError> {
        mutations::cache::invalidate_entry(&mut self.conn, cache_id)
    }

    /// Invalidates every expired cached report, returning how many.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails.
    pub fn clear_expired_reports(&mut self, now: OffsetDateTime) -> Result<usize, PersistenceError> {
        mutations::cache::invalidate_expired(&mut self.conn, now)
    }
}
