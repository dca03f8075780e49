// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Consistency rules of the occupancy ledger.
//!
//! The rules hold over any snapshot loaded the way `OccupancySnapshot`
//! documents:
//!
//! - a `(client, room)` pair has at most one active entry
//! - a room is held by at most one active entry
//! - a room with an active entry is `occupied` or `maintenance`
//! - an `occupied` room has an active entry

use std::collections::{HashMap, HashSet};

use crate::error::CoreError;
use crate::state::OccupancySnapshot;
use innkeep_domain::RoomState;

/// Verifies every ledger invariant over a snapshot.
///
/// # Errors
///
/// Returns `CoreError::InvariantViolation` naming the first broken rule.
pub fn check_invariants(snapshot: &OccupancySnapshot) -> Result<(), CoreError> {
    let mut pairs: HashSet<(i64, i64)> = HashSet::new();
    let mut holders: HashMap<i64, i64> = HashMap::new();

    for entry in snapshot.entries.iter().filter(|e| e.is_active()) {
        if !pairs.insert((entry.client_id, entry.room_id)) {
            return Err(CoreError::InvariantViolation(format!(
                "client {} holds room {} more than once",
                entry.client_id, entry.room_id
            )));
        }
        if let Some(other) = holders.insert(entry.room_id, entry.client_id) {
            return Err(CoreError::InvariantViolation(format!(
                "room {} is held by clients {other} and {}",
                entry.room_id, entry.client_id
            )));
        }
    }

    for room in &snapshot.rooms {
        let held: bool = holders.contains_key(&room.room_id);
        match room.state {
            RoomState::Occupied if !held => {
                return Err(CoreError::InvariantViolation(format!(
                    "room {} is occupied without an active entry",
                    room.number
                )));
            }
            RoomState::Available | RoomState::Dirty if held => {
                return Err(CoreError::InvariantViolation(format!(
                    "room {} is {} while held by client {}",
                    room.number,
                    room.state,
                    holders.get(&room.room_id).copied().unwrap_or_default()
                )));
            }
            _ => {}
        }
    }

    Ok(())
}
