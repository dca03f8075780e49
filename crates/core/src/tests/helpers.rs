// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::{LedgerEntry, LedgerState, RoomNumber, RoomState};
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{OccupancySnapshot, RoomSlot, Transition};

pub const CLIENT_A: i64 = 1;
pub const CLIENT_B: i64 = 2;

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2026-03-10 11:30 UTC)
}

pub fn create_test_room(room_id: i64, number: i64, state: RoomState) -> RoomSlot {
    RoomSlot {
        room_id,
        number: RoomNumber::new(number).unwrap(),
        state,
    }
}

pub fn create_active_entry(entry_id: i64, client_id: i64, room_id: i64) -> LedgerEntry {
    LedgerEntry {
        entry_id,
        client_id,
        room_id,
        state: LedgerState::Active,
        assigned_at: datetime!(2026-03-08 15:00 UTC),
        released_at: None,
    }
}

/// Room 101 (id 1) and 102 (id 2), both available, no entries.
pub fn create_test_snapshot() -> OccupancySnapshot {
    OccupancySnapshot::new(
        vec![
            create_test_room(1, 101, RoomState::Available),
            create_test_room(2, 102, RoomState::Available),
        ],
        Vec::new(),
    )
}

/// Writes a transition into a snapshot the way the store does, assigning
/// sequential ids to opened entries.
pub fn commit(snapshot: &OccupancySnapshot, transition: &Transition) -> OccupancySnapshot {
    let mut next: OccupancySnapshot = snapshot.with_transition(transition);
    let mut next_id: i64 = snapshot.entries.iter().map(|e| e.entry_id).max().unwrap_or(0);
    for entry in &mut next.entries {
        if entry.entry_id == 0 {
            next_id += 1;
            entry.entry_id = next_id;
        }
    }
    next
}
