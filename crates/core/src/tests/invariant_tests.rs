// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::RoomState;

use crate::tests::helpers::{CLIENT_A, CLIENT_B, create_active_entry, create_test_room};
use crate::{CoreError, OccupancySnapshot, check_invariants};

#[test]
fn test_consistent_snapshot_passes() {
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(
        vec![
            create_test_room(1, 101, RoomState::Occupied),
            create_test_room(2, 102, RoomState::Maintenance),
            create_test_room(3, 103, RoomState::Dirty),
        ],
        vec![
            create_active_entry(1, CLIENT_A, 1),
            create_active_entry(2, CLIENT_B, 2),
        ],
    );
    assert!(check_invariants(&snapshot).is_ok());
}

#[test]
fn test_duplicate_active_pair_is_rejected() {
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(
        vec![create_test_room(1, 101, RoomState::Occupied)],
        vec![
            create_active_entry(1, CLIENT_A, 1),
            create_active_entry(2, CLIENT_A, 1),
        ],
    );
    assert!(matches!(
        check_invariants(&snapshot),
        Err(CoreError::InvariantViolation(_))
    ));
}

#[test]
fn test_room_held_by_two_clients_is_rejected() {
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(
        vec![create_test_room(1, 101, RoomState::Occupied)],
        vec![
            create_active_entry(1, CLIENT_A, 1),
            create_active_entry(2, CLIENT_B, 1),
        ],
    );
    assert!(check_invariants(&snapshot).is_err());
}

#[test]
fn test_occupied_room_without_entry_is_rejected() {
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(
        vec![create_test_room(1, 101, RoomState::Occupied)],
        Vec::new(),
    );
    assert!(check_invariants(&snapshot).is_err());
}

#[test]
fn test_available_room_with_active_entry_is_rejected() {
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(
        vec![create_test_room(1, 101, RoomState::Available)],
        vec![create_active_entry(1, CLIENT_A, 1)],
    );
    assert!(check_invariants(&snapshot).is_err());
}
