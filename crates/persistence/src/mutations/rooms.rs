// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Room registry writes and room state commands.

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep::Command;
use innkeep_domain::{RoomSpec, RoomState};
use time::OffsetDateTime;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::columns::{format_timestamp, to_integer};
use crate::data_models::RoomRecord;
use crate::diesel_schema::rooms;
use crate::error::PersistenceError;
use crate::mutations::occupancy::apply_command;
use crate::queries::rooms::{active_holder, find_room_by_number, get_room};

fn ensure_number_free(
    conn: &mut SqliteConnection,
    number: i64,
    owner: Option<i64>,
) -> Result<i32, PersistenceError> {
    let column: i32 = to_integer("number", number)?;
    match find_room_by_number(conn, column)? {
        Some(existing) if Some(existing.room.room_id) != owner => {
            Err(PersistenceError::DuplicateRoomNumber(number))
        }
        _ => Ok(column),
    }
}

fn reload(conn: &mut SqliteConnection, room_id: i64) -> Result<RoomRecord, PersistenceError> {
    get_room(conn, room_id)?.ok_or(PersistenceError::RoomNotFound(room_id))
}

/// Creates an available room.
///
/// Callers validate the room first.
///
/// # Errors
///
/// Returns `PersistenceError::DuplicateRoomNumber` if the number is taken.
pub fn create_room(
    conn: &mut SqliteConnection,
    spec: &RoomSpec,
    now: OffsetDateTime,
) -> Result<RoomRecord, PersistenceError> {
    let at: String = format_timestamp(now)?;

    conn.immediate_transaction(|conn| {
        let number: i32 = ensure_number_free(conn, spec.number, None)?;

        diesel::insert_into(rooms::table)
            .values((
                rooms::number.eq(number),
                rooms::room_type.eq(spec.room_type.as_str()),
                rooms::nightly_price.eq(spec.nightly_price.to_string()),
                rooms::state.eq(RoomState::Available.as_str()),
                rooms::description.eq(spec.description.as_deref()),
                rooms::created_at.eq(&at),
                rooms::updated_at.eq(&at),
            ))
            .execute(conn)?;

        let room_id: i64 = conn.get_last_insert_rowid()?;
        info!(room_id, number, room_type = spec.room_type.as_str(), "Created room");
        reload(conn, room_id)
    })
}

/// Replaces a room's editable attributes. State is never touched.
///
/// # Errors
///
/// Returns `PersistenceError::RoomNotFound` or
/// `PersistenceError::DuplicateRoomNumber`.
pub fn update_room(
    conn: &mut SqliteConnection,
    room_id: i64,
    spec: &RoomSpec,
    now: OffsetDateTime,
) -> Result<RoomRecord, PersistenceError> {
    let at: String = format_timestamp(now)?;

    conn.immediate_transaction(|conn| {
        reload(conn, room_id)?;
        let number: i32 = ensure_number_free(conn, spec.number, Some(room_id))?;

        diesel::update(rooms::table.filter(rooms::room_id.eq(room_id)))
            .set((
                rooms::number.eq(number),
                rooms::room_type.eq(spec.room_type.as_str()),
                rooms::nightly_price.eq(spec.nightly_price.to_string()),
                rooms::description.eq(spec.description.as_deref()),
                rooms::updated_at.eq(&at),
            ))
            .execute(conn)?;

        info!(room_id, number, "Updated room");
        reload(conn, room_id)
    })
}

/// Deletes a room and its released history.
///
/// # Errors
///
/// Returns `PersistenceError::RoomInUse` while a client holds the room.
pub fn delete_room(conn: &mut SqliteConnection, room_id: i64) -> Result<(), PersistenceError> {
    conn.immediate_transaction(|conn| {
        reload(conn, room_id)?;
        if let Some(client_id) = active_holder(conn, room_id)? {
            return Err(PersistenceError::RoomInUse { room_id, client_id });
        }

        diesel::delete(rooms::table.filter(rooms::room_id.eq(room_id))).execute(conn)?;
        info!(room_id, "Deleted room");
        Ok(())
    })
}

/// Runs a single-room lifecycle command and returns the updated room.
///
/// # Errors
///
/// Returns `PersistenceError::RoomNotFound` or the lifecycle rejection.
pub fn change_room_state(
    conn: &mut SqliteConnection,
    command: Command,
    now: OffsetDateTime,
) -> Result<RoomRecord, PersistenceError> {
    let room_id: i64 = match &command {
        Command::Clean { room_id }
        | Command::BeginMaintenance { room_id }
        | Command::EndMaintenance { room_id } => *room_id,
        other => {
            return Err(PersistenceError::Other(format!(
                "{} is not a room command",
                other.name()
            )));
        }
    };

    conn.immediate_transaction(|conn| {
        reload(conn, room_id)?;
        apply_command(conn, command, now)?;
        reload(conn, room_id)
    })
}
