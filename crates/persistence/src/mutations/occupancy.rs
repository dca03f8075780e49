// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Writing lifecycle transitions.
//!
//! `apply_command` loads the slice a command touches, runs the pure
//! lifecycle check and writes the result. It expects to run inside a
//! transaction opened by the caller.

use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::SqliteConnection;
use innkeep::{Command, OccupancySnapshot, Transition, apply};
use innkeep_domain::RoomState;
use time::OffsetDateTime;
use tracing::{debug, info, warn};

use crate::backend::PersistenceBackend;
use crate::columns::{format_timestamp, to_integer};
use crate::data_models::FreedRoom;
use crate::diesel_schema::{clients, occupancy, rooms};
use crate::error::PersistenceError;
use crate::queries::occupancy::load_snapshot;

/// Applies a command and writes its transition.
///
/// # Errors
///
/// Returns `PersistenceError::Rejected` if the lifecycle refuses the
/// command, `PersistenceError::RoomStateChanged` if a guarded update finds
/// the room in another state, or a database error.
pub fn apply_command(
    conn: &mut SqliteConnection,
    command: Command,
    now: OffsetDateTime,
) -> Result<Transition, PersistenceError> {
    let name: &'static str = command.name();
    let snapshot: OccupancySnapshot = load_snapshot(conn, &command)?;
    let transition: Transition = apply(&snapshot, command, now)?;
    write_transition(conn, &transition)?;

    if let Some(warning) = &transition.warning {
        warn!(command = name, warning, "Command applied with warning");
    }
    info!(
        command = name,
        room_changes = transition.room_changes.len(),
        opened = transition.opened.len(),
        released = transition.released.len(),
        "Applied occupancy command"
    );
    Ok(transition)
}

/// Rooms released by a transition and the state each was left in.
#[must_use]
pub fn freed_rooms(transition: &Transition) -> Vec<FreedRoom> {
    transition
        .released
        .iter()
        .map(|released| FreedRoom {
            room_id: released.room_id,
            number: released.number,
            state: transition
                .room_changes
                .iter()
                .find(|change| change.room_id == released.room_id)
                .map_or(RoomState::Dirty, |change| change.to),
        })
        .collect()
}

fn write_transition(
    conn: &mut SqliteConnection,
    transition: &Transition,
) -> Result<(), PersistenceError> {
    let at: String = format_timestamp(transition.at)?;

    for change in &transition.room_changes {
        // Guarded on the state the lifecycle saw; a concurrent writer that
        // changed the room first makes this match nothing.
        let updated: usize = diesel::update(
            rooms::table
                .filter(rooms::room_id.eq(change.room_id))
                .filter(rooms::state.eq(change.from.as_str())),
        )
        .set((
            rooms::state.eq(change.to.as_str()),
            rooms::updated_at.eq(&at),
        ))
        .execute(conn)?;

        if updated != 1 {
            return Err(PersistenceError::RoomStateChanged {
                room_id: change.room_id,
            });
        }
        debug!(
            room_id = change.room_id,
            from = change.from.as_str(),
            to = change.to.as_str(),
            "Room state changed"
        );
    }

    for released in &transition.released {
        diesel::update(
            occupancy::table
                .filter(occupancy::entry_id.eq(released.entry_id))
                .filter(occupancy::state.eq("active")),
        )
        .set((
            occupancy::state.eq("released"),
            occupancy::released_at.eq(Some(&at)),
        ))
        .execute(conn)?;
    }

    for opened in &transition.opened {
        let result: Result<usize, DieselError> = diesel::insert_into(occupancy::table)
            .values((
                occupancy::client_id.eq(opened.client_id),
                occupancy::room_id.eq(opened.room_id),
                occupancy::state.eq("active"),
                occupancy::assigned_at.eq(&at),
            ))
            .execute(conn);

        match result {
            Ok(_) => {
                let entry_id: i64 = conn.get_last_insert_rowid()?;
                debug!(
                    entry_id,
                    client_id = opened.client_id,
                    room_id = opened.room_id,
                    "Opened ledger entry"
                );
            }
            Err(DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _)) => {
                return Err(PersistenceError::RoomStateChanged {
                    room_id: opened.room_id,
                });
            }
            Err(e) => return Err(e.into()),
        }
    }

    if let Some(client_id) = transition.checkout_client {
        diesel::update(clients::table.filter(clients::client_id.eq(client_id)))
            .set((
                clients::actual_checkout.eq(Some(&at)),
                clients::updated_at.eq(&at),
            ))
            .execute(conn)?;
    }

    if let (Some(count), Some(opened)) = (transition.active_room_count, transition.opened.first()) {
        let count: i64 = i64::try_from(count)
            .map_err(|_| PersistenceError::Other(format!("room count {count} is out of range")))?;
        diesel::update(clients::table.filter(clients::client_id.eq(opened.client_id)))
            .set((
                clients::desired_rooms.eq(to_integer("desired_rooms", count)?),
                clients::updated_at.eq(&at),
            ))
            .execute(conn)?;
    }

    if let Some(client_id) = transition.removed_client {
        diesel::delete(clients::table.filter(clients::client_id.eq(client_id))).execute(conn)?;
        info!(client_id, "Removed client and its ledger history");
    }

    Ok(())
}
