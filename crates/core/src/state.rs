// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::{LedgerEntry, LedgerState, RoomNumber, RoomState};
use time::OffsetDateTime;

/// The state of one room as the occupancy lifecycle sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSlot {
    pub room_id: i64,
    pub number: RoomNumber,
    pub state: RoomState,
}

/// The slice of rooms and ledger entries a command operates on.
///
/// Callers load every room the command touches together with all active
/// entries for those rooms and all active entries of the client involved.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OccupancySnapshot {
    pub rooms: Vec<RoomSlot>,
    pub entries: Vec<LedgerEntry>,
}

impl OccupancySnapshot {
    #[must_use]
    pub const fn new(rooms: Vec<RoomSlot>, entries: Vec<LedgerEntry>) -> Self {
        Self { rooms, entries }
    }

    #[must_use]
    pub fn room(&self, room_id: i64) -> Option<&RoomSlot> {
        self.rooms.iter().find(|room| room.room_id == room_id)
    }

    /// Active entries held by a client.
    pub fn active_entries_for_client(&self, client_id: i64) -> impl Iterator<Item = &LedgerEntry> {
        self.entries
            .iter()
            .filter(move |entry| entry.client_id == client_id && entry.is_active())
    }

    /// The active entry currently holding a room, if any.
    #[must_use]
    pub fn active_entry_for_room(&self, room_id: i64) -> Option<&LedgerEntry> {
        self.entries
            .iter()
            .find(|entry| entry.room_id == room_id && entry.is_active())
    }

    /// Returns the snapshot as it would look after the transition.
    ///
    /// Opened entries receive placeholder id `0` since real ids are assigned
    /// by the store.
    #[must_use]
    pub fn with_transition(&self, transition: &Transition) -> Self {
        let mut next: Self = self.clone();

        for change in &transition.room_changes {
            if let Some(room) = next.rooms.iter_mut().find(|r| r.room_id == change.room_id) {
                room.state = change.to;
            }
        }

        for released in &transition.released {
            if let Some(entry) = next
                .entries
                .iter_mut()
                .find(|e| e.entry_id == released.entry_id)
            {
                entry.state = LedgerState::Released;
                entry.released_at = Some(transition.at);
            }
        }

        for opened in &transition.opened {
            next.entries.push(LedgerEntry {
                entry_id: 0,
                client_id: opened.client_id,
                room_id: opened.room_id,
                state: LedgerState::Active,
                assigned_at: transition.at,
                released_at: None,
            });
        }

        if let Some(client_id) = transition.removed_client {
            next.entries.retain(|entry| entry.client_id != client_id);
        }

        next
    }
}

/// A room state change produced by a transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomChange {
    pub room_id: i64,
    pub number: RoomNumber,
    pub from: RoomState,
    pub to: RoomState,
}

/// A ledger entry to be opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenedEntry {
    pub client_id: i64,
    pub room_id: i64,
    pub number: RoomNumber,
}

/// A ledger entry to be released.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasedEntry {
    pub entry_id: i64,
    pub room_id: i64,
    pub number: RoomNumber,
}

/// The outcome of applying a command.
///
/// Transitions are pure data; the store writes them in one transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    /// The instant the command was applied.
    pub at: OffsetDateTime,
    pub room_changes: Vec<RoomChange>,
    pub opened: Vec<OpenedEntry>,
    pub released: Vec<ReleasedEntry>,
    /// Client whose actual checkout is stamped with `at`.
    pub checkout_client: Option<i64>,
    /// Client to delete together with its ledger history.
    pub removed_client: Option<i64>,
    /// Active rooms the client holds afterwards, for assignments.
    pub active_room_count: Option<usize>,
    /// Non-fatal condition worth reporting to the operator.
    pub warning: Option<String>,
}

impl Transition {
    #[must_use]
    pub const fn empty(at: OffsetDateTime) -> Self {
        Self {
            at,
            room_changes: Vec::new(),
            opened: Vec::new(),
            released: Vec::new(),
            checkout_client: None,
            removed_client: None,
            active_room_count: None,
            warning: None,
        }
    }
}
