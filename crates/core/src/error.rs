// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::{DomainError, RoomNumber, RoomState};

/// Errors that can occur during occupancy transitions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// A referenced room is not part of the snapshot.
    RoomNotFound(i64),
    /// An assignment named no rooms.
    NoRoomsRequested,
    /// An assignment named the same room more than once.
    DuplicateRoomInRequest(i64),
    /// A room cannot be assigned in its current state.
    RoomNotAvailable {
        /// The room number.
        number: RoomNumber,
        /// The room's current state.
        state: RoomState,
    },
    /// A room already carries an active ledger entry.
    RoomAlreadyAssigned {
        /// The room number.
        number: RoomNumber,
        /// The client holding the room.
        client_id: i64,
    },
    /// The client would hold more rooms than allowed.
    TooManyRooms {
        /// Rooms the client would hold after the assignment.
        requested: usize,
        /// The allowed maximum.
        max: usize,
    },
    /// The ledger would break one of its consistency rules.
    InvariantViolation(String),
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::RoomNotFound(room_id) => write!(f, "Room {room_id} not found"),
            Self::NoRoomsRequested => write!(f, "At least one room must be selected"),
            Self::DuplicateRoomInRequest(room_id) => {
                write!(f, "Room {room_id} was selected more than once")
            }
            Self::RoomNotAvailable { number, state } => {
                write!(f, "Room {number} is not available (currently {state})")
            }
            Self::RoomAlreadyAssigned { number, client_id } => {
                write!(f, "Room {number} is already assigned to client {client_id}")
            }
            Self::TooManyRooms { requested, max } => write!(
                f,
                "A client may hold at most {max} rooms; this request would give {requested}"
            ),
            Self::InvariantViolation(msg) => write!(f, "Ledger invariant violated: {msg}"),
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
