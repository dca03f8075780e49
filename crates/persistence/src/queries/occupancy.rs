// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ledger queries and lifecycle snapshot loading.

use std::collections::BTreeSet;

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep::{Command, OccupancySnapshot, RoomSlot};
use innkeep_domain::{LedgerEntry, Room};
use tracing::debug;

use crate::columns::{parse_column, parse_optional_timestamp, parse_timestamp};
use crate::data_models::OccupancyRecord;
use crate::diesel_schema::{occupancy, rooms};
use crate::error::PersistenceError;
use crate::queries::rooms::RoomRow;

/// Diesel Queryable struct for ledger rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = occupancy)]
pub(crate) struct OccupancyRow {
    pub entry_id: i64,
    pub client_id: i64,
    pub room_id: i64,
    pub state: String,
    pub assigned_at: String,
    pub released_at: Option<String>,
}

impl OccupancyRow {
    pub(crate) fn to_entry(&self) -> Result<LedgerEntry, PersistenceError> {
        Ok(LedgerEntry {
            entry_id: self.entry_id,
            client_id: self.client_id,
            room_id: self.room_id,
            state: parse_column("occupancy", "state", &self.state)?,
            assigned_at: parse_timestamp("occupancy", "assigned_at", &self.assigned_at)?,
            released_at: parse_optional_timestamp(
                "occupancy",
                "released_at",
                self.released_at.as_deref(),
            )?,
        })
    }
}

fn to_record(row: &OccupancyRow, room: &RoomRow) -> Result<OccupancyRecord, PersistenceError> {
    let entry: LedgerEntry = row.to_entry()?;
    let room: Room = room.to_room()?;
    Ok(OccupancyRecord {
        entry_id: entry.entry_id,
        client_id: entry.client_id,
        room_id: entry.room_id,
        room_number: room.number,
        room_type: room.room_type,
        nightly_price: room.nightly_price,
        state: entry.state,
        assigned_at: entry.assigned_at,
        released_at: entry.released_at,
    })
}

/// Lists a client's ledger entries with room details, newest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn entries_for_client(
    conn: &mut SqliteConnection,
    client_id: i64,
) -> Result<Vec<OccupancyRecord>, PersistenceError> {
    let rows: Vec<(OccupancyRow, RoomRow)> = occupancy::table
        .inner_join(rooms::table)
        .filter(occupancy::client_id.eq(client_id))
        .order((occupancy::assigned_at.desc(), occupancy::entry_id.desc()))
        .select((OccupancyRow::as_select(), RoomRow::as_select()))
        .load(conn)?;

    debug!(client_id, count = rows.len(), "Loaded ledger entries");
    rows.iter().map(|(row, room)| to_record(row, room)).collect()
}

fn active_entries_for_client(
    conn: &mut SqliteConnection,
    client_id: i64,
) -> Result<Vec<OccupancyRow>, PersistenceError> {
    Ok(occupancy::table
        .filter(occupancy::client_id.eq(client_id))
        .filter(occupancy::state.eq("active"))
        .select(OccupancyRow::as_select())
        .load(conn)?)
}

/// Loads the rooms and active entries a command touches.
///
/// The slice covers the command's rooms, every room the client holds and
/// all active entries on those rooms.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn load_snapshot(
    conn: &mut SqliteConnection,
    command: &Command,
) -> Result<OccupancySnapshot, PersistenceError> {
    let mut room_ids: BTreeSet<i64> = BTreeSet::new();
    match command {
        Command::Assign {
            client_id,
            room_ids: requested,
        } => {
            room_ids.extend(requested.iter().copied());
            room_ids.extend(active_entries_for_client(conn, *client_id)?.iter().map(|e| e.room_id));
        }
        Command::ReleaseAll { client_id } | Command::RemoveClient { client_id } => {
            room_ids.extend(active_entries_for_client(conn, *client_id)?.iter().map(|e| e.room_id));
        }
        Command::Clean { room_id }
        | Command::BeginMaintenance { room_id }
        | Command::EndMaintenance { room_id } => {
            room_ids.insert(*room_id);
        }
    }

    let room_ids: Vec<i64> = room_ids.into_iter().collect();
    let room_rows: Vec<RoomRow> = rooms::table
        .filter(rooms::room_id.eq_any(&room_ids))
        .select(RoomRow::as_select())
        .load(conn)?;
    let entry_rows: Vec<OccupancyRow> = occupancy::table
        .filter(occupancy::room_id.eq_any(&room_ids))
        .filter(occupancy::state.eq("active"))
        .select(OccupancyRow::as_select())
        .load(conn)?;

    let rooms: Vec<RoomSlot> = room_rows
        .iter()
        .map(|row| {
            row.to_room().map(|room| RoomSlot {
                room_id: room.room_id,
                number: room.number,
                state: room.state,
            })
        })
        .collect::<Result<_, _>>()?;
    let entries: Vec<LedgerEntry> = entry_rows
        .iter()
        .map(OccupancyRow::to_entry)
        .collect::<Result<_, _>>()?;

    debug!(
        command = command.name(),
        rooms = rooms.len(),
        entries = entries.len(),
        "Loaded occupancy snapshot"
    );
    Ok(OccupancySnapshot::new(rooms, entries))
}
