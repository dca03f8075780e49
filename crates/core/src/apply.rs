// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashSet;

use crate::command::Command;
use crate::error::CoreError;
use crate::invariants::check_invariants;
use crate::state::{
    OccupancySnapshot, OpenedEntry, ReleasedEntry, RoomChange, RoomSlot, Transition,
};
use innkeep_domain::{DomainError, MAX_ROOMS_PER_CLIENT, RoomState};
use time::OffsetDateTime;

/// Applies a command to an occupancy snapshot, producing a transition.
///
/// This function is pure: it never mutates the snapshot. The resulting
/// post-state is checked against the ledger invariants before the
/// transition is returned.
///
/// # Arguments
///
/// * `snapshot` - The rooms and ledger entries the command touches
/// * `command` - The command to apply
/// * `now` - The instant to stamp on opened and released entries
///
/// # Errors
///
/// Returns an error if:
/// - A referenced room is missing from the snapshot
/// - A room is not in a state that allows the command
/// - An assignment is empty, repeats a room or exceeds the per-client cap
/// - The resulting ledger would violate an invariant
pub fn apply(
    snapshot: &OccupancySnapshot,
    command: Command,
    now: OffsetDateTime,
) -> Result<Transition, CoreError> {
    let transition: Transition = match command {
        Command::Assign {
            client_id,
            room_ids,
        } => assign(snapshot, client_id, &room_ids, now)?,
        Command::ReleaseAll { client_id } => release_all(snapshot, client_id, now)?,
        Command::RemoveClient { client_id } => {
            let mut transition: Transition = release_all(snapshot, client_id, now)?;
            transition.checkout_client = None;
            transition.warning = None;
            transition.removed_client = Some(client_id);
            transition
        }
        Command::Clean { room_id } => single_room_change(
            snapshot,
            room_id,
            Some(RoomState::Dirty),
            RoomState::Available,
            now,
        )?,
        Command::BeginMaintenance { room_id } => {
            single_room_change(snapshot, room_id, None, RoomState::Maintenance, now)?
        }
        Command::EndMaintenance { room_id } => {
            // A room still held by a client goes back to occupied.
            let target: RoomState = if snapshot.active_entry_for_room(room_id).is_some() {
                RoomState::Occupied
            } else {
                RoomState::Available
            };
            single_room_change(snapshot, room_id, Some(RoomState::Maintenance), target, now)?
        }
    };

    check_invariants(&snapshot.with_transition(&transition))?;

    Ok(transition)
}

fn find_room(snapshot: &OccupancySnapshot, room_id: i64) -> Result<&RoomSlot, CoreError> {
    snapshot
        .room(room_id)
        .ok_or(CoreError::RoomNotFound(room_id))
}

fn assign(
    snapshot: &OccupancySnapshot,
    client_id: i64,
    room_ids: &[i64],
    now: OffsetDateTime,
) -> Result<Transition, CoreError> {
    if room_ids.is_empty() {
        return Err(CoreError::NoRoomsRequested);
    }

    let mut seen: HashSet<i64> = HashSet::with_capacity(room_ids.len());
    for room_id in room_ids {
        if !seen.insert(*room_id) {
            return Err(CoreError::DuplicateRoomInRequest(*room_id));
        }
    }

    let held: usize = snapshot.active_entries_for_client(client_id).count();
    let requested: usize = held + room_ids.len();
    if requested > MAX_ROOMS_PER_CLIENT {
        return Err(CoreError::TooManyRooms {
            requested,
            max: MAX_ROOMS_PER_CLIENT,
        });
    }

    let mut transition: Transition = Transition::empty(now);
    for room_id in room_ids {
        let room: &RoomSlot = find_room(snapshot, *room_id)?;

        if let Some(entry) = snapshot.active_entry_for_room(room.room_id) {
            return Err(CoreError::RoomAlreadyAssigned {
                number: room.number,
                client_id: entry.client_id,
            });
        }
        if room.state != RoomState::Available {
            return Err(CoreError::RoomNotAvailable {
                number: room.number,
                state: room.state,
            });
        }

        let to: RoomState = room.state.transition_to(RoomState::Occupied)?;
        transition.room_changes.push(RoomChange {
            room_id: room.room_id,
            number: room.number,
            from: room.state,
            to,
        });
        transition.opened.push(OpenedEntry {
            client_id,
            room_id: room.room_id,
            number: room.number,
        });
    }
    transition.active_room_count = Some(requested);

    Ok(transition)
}

fn release_all(
    snapshot: &OccupancySnapshot,
    client_id: i64,
    now: OffsetDateTime,
) -> Result<Transition, CoreError> {
    let mut transition: Transition = Transition::empty(now);
    transition.checkout_client = Some(client_id);

    for entry in snapshot.active_entries_for_client(client_id) {
        let room: &RoomSlot = find_room(snapshot, entry.room_id)?;
        transition.released.push(ReleasedEntry {
            entry_id: entry.entry_id,
            room_id: room.room_id,
            number: room.number,
        });

        // A room vacated during maintenance still needs cleaning.
        let to: RoomState = room.state.transition_to(RoomState::Dirty)?;
        transition.room_changes.push(RoomChange {
            room_id: room.room_id,
            number: room.number,
            from: room.state,
            to,
        });
    }

    if transition.released.is_empty() {
        transition.warning = Some(format!("Client {client_id} has no active rooms to release"));
    }

    Ok(transition)
}

/// Moves one room to `target`. When `required` is set the room must
/// currently be in that state.
fn single_room_change(
    snapshot: &OccupancySnapshot,
    room_id: i64,
    required: Option<RoomState>,
    target: RoomState,
    now: OffsetDateTime,
) -> Result<Transition, CoreError> {
    let room: &RoomSlot = find_room(snapshot, room_id)?;
    if required.is_some_and(|state| state != room.state) {
        return Err(CoreError::DomainViolation(
            DomainError::InvalidRoomTransition {
                from: room.state,
                to: target,
            },
        ));
    }
    let to: RoomState = room.state.transition_to(target)?;

    let mut transition: Transition = Transition::empty(now);
    transition.room_changes.push(RoomChange {
        room_id: room.room_id,
        number: room.number,
        from: room.state,
        to,
    });
    Ok(transition)
}
