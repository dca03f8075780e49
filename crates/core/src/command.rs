// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// A command represents operator intent against the occupancy ledger.
///
/// Commands are the only way to change room state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Assign rooms to a client, opening one active entry per room.
    Assign {
        /// The client receiving the rooms.
        client_id: i64,
        /// The rooms to assign, in request order.
        room_ids: Vec<i64>,
    },
    /// Release every active room of a client and stamp the actual checkout.
    ReleaseAll {
        /// The client checking out.
        client_id: i64,
    },
    /// Release a client's rooms, then remove the client.
    RemoveClient {
        /// The client being removed.
        client_id: i64,
    },
    /// Mark a dirty room as cleaned.
    Clean {
        /// The room.
        room_id: i64,
    },
    /// Take a room out of service.
    BeginMaintenance {
        /// The room.
        room_id: i64,
    },
    /// Return a room from maintenance.
    EndMaintenance {
        /// The room.
        room_id: i64,
    },
}

impl Command {
    /// Short name used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Assign { .. } => "assign",
            Self::ReleaseAll { .. } => "release_all",
            Self::RemoveClient { .. } => "remove_client",
            Self::Clean { .. } => "clean",
            Self::BeginMaintenance { .. } => "begin_maintenance",
            Self::EndMaintenance { .. } => "end_maintenance",
        }
    }
}
