// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::{DomainError, RoomNumber, RoomState};

use crate::tests::helpers::{
    CLIENT_A, CLIENT_B, create_active_entry, create_test_now, create_test_room,
    create_test_snapshot,
};
use crate::{Command, CoreError, OccupancySnapshot, Transition, apply};

#[test]
fn test_assign_occupies_rooms_and_opens_entries() {
    let snapshot: OccupancySnapshot = create_test_snapshot();

    let transition: Transition = apply(
        &snapshot,
        Command::Assign {
            client_id: CLIENT_A,
            room_ids: vec![1, 2],
        },
        create_test_now(),
    )
    .unwrap();

    assert_eq!(transition.opened.len(), 2);
    assert!(
        transition
            .room_changes
            .iter()
            .all(|c| c.from == RoomState::Available && c.to == RoomState::Occupied)
    );
    assert_eq!(transition.active_room_count, Some(2));
    assert!(transition.warning.is_none());
}

#[test]
fn test_assign_does_not_mutate_snapshot() {
    let snapshot: OccupancySnapshot = create_test_snapshot();
    let before: OccupancySnapshot = snapshot.clone();

    let _ = apply(
        &snapshot,
        Command::Assign {
            client_id: CLIENT_A,
            room_ids: vec![1],
        },
        create_test_now(),
    );

    assert_eq!(snapshot, before);
}

#[test]
fn test_assign_rejects_empty_request() {
    let result: Result<Transition, CoreError> = apply(
        &create_test_snapshot(),
        Command::Assign {
            client_id: CLIENT_A,
            room_ids: Vec::new(),
        },
        create_test_now(),
    );
    assert_eq!(result, Err(CoreError::NoRoomsRequested));
}

#[test]
fn test_assign_rejects_repeated_room() {
    let result: Result<Transition, CoreError> = apply(
        &create_test_snapshot(),
        Command::Assign {
            client_id: CLIENT_A,
            room_ids: vec![1, 1],
        },
        create_test_now(),
    );
    assert_eq!(result, Err(CoreError::DuplicateRoomInRequest(1)));
}

#[test]
fn test_assign_rejects_unknown_room() {
    let result: Result<Transition, CoreError> = apply(
        &create_test_snapshot(),
        Command::Assign {
            client_id: CLIENT_A,
            room_ids: vec![1, 99],
        },
        create_test_now(),
    );
    assert_eq!(result, Err(CoreError::RoomNotFound(99)));
}

#[test]
fn test_assign_rejects_dirty_room() {
    let snapshot: OccupancySnapshot =
        OccupancySnapshot::new(vec![create_test_room(1, 101, RoomState::Dirty)], Vec::new());

    let result: Result<Transition, CoreError> = apply(
        &snapshot,
        Command::Assign {
            client_id: CLIENT_A,
            room_ids: vec![1],
        },
        create_test_now(),
    );
    assert_eq!(
        result,
        Err(CoreError::RoomNotAvailable {
            number: RoomNumber::new(101).unwrap(),
            state: RoomState::Dirty,
        })
    );
}

#[test]
fn test_assign_rejects_room_held_by_another_client() {
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(
        vec![create_test_room(1, 101, RoomState::Occupied)],
        vec![create_active_entry(7, CLIENT_B, 1)],
    );

    let result: Result<Transition, CoreError> = apply(
        &snapshot,
        Command::Assign {
            client_id: CLIENT_A,
            room_ids: vec![1],
        },
        create_test_now(),
    );
    assert_eq!(
        result,
        Err(CoreError::RoomAlreadyAssigned {
            number: RoomNumber::new(101).unwrap(),
            client_id: CLIENT_B,
        })
    );
}

#[test]
fn test_assign_enforces_room_cap_including_held_rooms() {
    let mut rooms = Vec::new();
    let mut entries = Vec::new();
    for id in 1..=9 {
        rooms.push(create_test_room(id, 100 + id, RoomState::Occupied));
        entries.push(create_active_entry(id, CLIENT_A, id));
    }
    rooms.push(create_test_room(10, 110, RoomState::Available));
    rooms.push(create_test_room(11, 111, RoomState::Available));
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(rooms, entries);

    let result: Result<Transition, CoreError> = apply(
        &snapshot,
        Command::Assign {
            client_id: CLIENT_A,
            room_ids: vec![10, 11],
        },
        create_test_now(),
    );
    assert_eq!(
        result,
        Err(CoreError::TooManyRooms {
            requested: 11,
            max: 10
        })
    );

    let transition: Transition = apply(
        &snapshot,
        Command::Assign {
            client_id: CLIENT_A,
            room_ids: vec![10],
        },
        create_test_now(),
    )
    .unwrap();
    assert_eq!(transition.active_room_count, Some(10));
}

#[test]
fn test_release_all_marks_rooms_dirty_and_stamps_checkout() {
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(
        vec![
            create_test_room(1, 101, RoomState::Occupied),
            create_test_room(2, 102, RoomState::Occupied),
        ],
        vec![
            create_active_entry(1, CLIENT_A, 1),
            create_active_entry(2, CLIENT_A, 2),
        ],
    );

    let transition: Transition =
        apply(&snapshot, Command::ReleaseAll { client_id: CLIENT_A }, create_test_now()).unwrap();

    assert_eq!(transition.released.len(), 2);
    assert!(transition.room_changes.iter().all(|c| c.to == RoomState::Dirty));
    assert_eq!(transition.checkout_client, Some(CLIENT_A));
    assert_eq!(transition.at, create_test_now());
    assert!(transition.warning.is_none());
}

#[test]
fn test_release_all_without_active_rooms_is_a_warning() {
    let transition: Transition = apply(
        &create_test_snapshot(),
        Command::ReleaseAll { client_id: CLIENT_A },
        create_test_now(),
    )
    .unwrap();

    assert!(transition.released.is_empty());
    assert!(transition.room_changes.is_empty());
    assert_eq!(transition.checkout_client, Some(CLIENT_A));
    assert!(transition.warning.is_some());
}

#[test]
fn test_release_sends_maintenance_room_to_dirty() {
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(
        vec![create_test_room(1, 101, RoomState::Maintenance)],
        vec![create_active_entry(1, CLIENT_A, 1)],
    );

    let transition: Transition =
        apply(&snapshot, Command::ReleaseAll { client_id: CLIENT_A }, create_test_now()).unwrap();

    assert_eq!(transition.released.len(), 1);
    assert_eq!(transition.room_changes.len(), 1);
    assert_eq!(transition.room_changes[0].from, RoomState::Maintenance);
    assert_eq!(transition.room_changes[0].to, RoomState::Dirty);
}

#[test]
fn test_remove_client_releases_then_removes() {
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(
        vec![create_test_room(1, 101, RoomState::Occupied)],
        vec![create_active_entry(1, CLIENT_A, 1)],
    );

    let transition: Transition = apply(
        &snapshot,
        Command::RemoveClient { client_id: CLIENT_A },
        create_test_now(),
    )
    .unwrap();

    assert_eq!(transition.removed_client, Some(CLIENT_A));
    assert_eq!(transition.checkout_client, None);
    assert_eq!(transition.room_changes[0].to, RoomState::Dirty);
}

#[test]
fn test_clean_requires_dirty_room() {
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(
        vec![create_test_room(1, 101, RoomState::Available)],
        Vec::new(),
    );

    let result: Result<Transition, CoreError> =
        apply(&snapshot, Command::Clean { room_id: 1 }, create_test_now());
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidRoomTransition {
                from: RoomState::Available,
                to: RoomState::Available,
            }
        ))
    );
}

#[test]
fn test_end_maintenance_returns_held_room_to_occupied() {
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(
        vec![create_test_room(1, 101, RoomState::Maintenance)],
        vec![create_active_entry(1, CLIENT_A, 1)],
    );

    let transition: Transition =
        apply(&snapshot, Command::EndMaintenance { room_id: 1 }, create_test_now()).unwrap();
    assert_eq!(transition.room_changes[0].to, RoomState::Occupied);
}

#[test]
fn test_end_maintenance_returns_free_room_to_available() {
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(
        vec![create_test_room(1, 101, RoomState::Maintenance)],
        Vec::new(),
    );

    let transition: Transition =
        apply(&snapshot, Command::EndMaintenance { room_id: 1 }, create_test_now()).unwrap();
    assert_eq!(transition.room_changes[0].to, RoomState::Available);
}

#[test]
fn test_end_maintenance_requires_maintenance_room() {
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(
        vec![create_test_room(1, 101, RoomState::Dirty)],
        Vec::new(),
    );

    let result: Result<Transition, CoreError> =
        apply(&snapshot, Command::EndMaintenance { room_id: 1 }, create_test_now());
    assert_eq!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::InvalidRoomTransition {
                from: RoomState::Dirty,
                to: RoomState::Available,
            }
        ))
    );
}

#[test]
fn test_clean_rejects_maintenance_room() {
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(
        vec![create_test_room(1, 101, RoomState::Maintenance)],
        Vec::new(),
    );

    let result: Result<Transition, CoreError> =
        apply(&snapshot, Command::Clean { room_id: 1 }, create_test_now());
    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::InvalidRoomTransition { .. }))
    ));
}

#[test]
fn test_begin_maintenance_twice_is_rejected() {
    let snapshot: OccupancySnapshot = OccupancySnapshot::new(
        vec![create_test_room(1, 101, RoomState::Maintenance)],
        Vec::new(),
    );

    let result: Result<Transition, CoreError> =
        apply(&snapshot, Command::BeginMaintenance { room_id: 1 }, create_test_now());
    assert!(matches!(result, Err(CoreError::DomainViolation(_))));
}
