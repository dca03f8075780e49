// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep::CoreError;
use innkeep_domain::{DomainError, RoomState, RoomType};
use rust_decimal::Decimal;
use time::macros::datetime;

use super::{create_client_profile, create_room_spec, create_test_now, create_test_persistence, seed_rooms};
use crate::{Persistence, PersistenceError, RoomFilter, RoomRecord};

#[test]
fn test_create_room_starts_available() {
    let mut persistence: Persistence = create_test_persistence();
    let mut spec = create_room_spec(101, RoomType::Double, 120);
    spec.description = Some(String::from("Street view"));

    let record: RoomRecord = persistence.create_room(&spec, create_test_now()).unwrap();

    assert_eq!(record.room.number.value(), 101);
    assert_eq!(record.room.room_type, RoomType::Double);
    assert_eq!(record.room.nightly_price, Decimal::from(120));
    assert_eq!(record.room.state, RoomState::Available);
    assert_eq!(record.description.as_deref(), Some("Street view"));
    assert_eq!(record.created_at, create_test_now());
}

#[test]
fn test_decimal_price_round_trips() {
    let mut persistence: Persistence = create_test_persistence();
    let mut spec = create_room_spec(102, RoomType::Simple, 0);
    spec.nightly_price = Decimal::new(8950, 2);

    let created: RoomRecord = persistence.create_room(&spec, create_test_now()).unwrap();
    let loaded: RoomRecord = persistence.get_room(created.room.room_id).unwrap().unwrap();

    assert_eq!(loaded.room.nightly_price, Decimal::new(8950, 2));
}

#[test]
fn test_duplicate_room_number_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    seed_rooms(&mut persistence);

    let result = persistence.create_room(
        &create_room_spec(101, RoomType::Family, 300),
        create_test_now(),
    );

    assert_eq!(result, Err(PersistenceError::DuplicateRoomNumber(101)));
}

#[test]
fn test_update_room_keeps_state() {
    let mut persistence: Persistence = create_test_persistence();
    let ids: Vec<i64> = seed_rooms(&mut persistence);
    persistence.begin_maintenance(ids[0], create_test_now()).unwrap();

    let later = datetime!(2026-03-11 09:00 UTC);
    let updated: RoomRecord = persistence
        .update_room(ids[0], &create_room_spec(110, RoomType::Triple, 150), later)
        .unwrap();

    assert_eq!(updated.room.number.value(), 110);
    assert_eq!(updated.room.room_type, RoomType::Triple);
    assert_eq!(updated.room.state, RoomState::Maintenance);
    assert_eq!(updated.updated_at, later);
    assert_eq!(updated.created_at, create_test_now());
}

#[test]
fn test_update_room_may_keep_its_own_number() {
    let mut persistence: Persistence = create_test_persistence();
    let ids: Vec<i64> = seed_rooms(&mut persistence);

    let result = persistence.update_room(
        ids[0],
        &create_room_spec(101, RoomType::Simple, 95),
        create_test_now(),
    );

    assert!(result.is_ok());
}

#[test]
fn test_update_room_rejects_number_of_another_room() {
    let mut persistence: Persistence = create_test_persistence();
    let ids: Vec<i64> = seed_rooms(&mut persistence);

    let result = persistence.update_room(
        ids[0],
        &create_room_spec(102, RoomType::Simple, 80),
        create_test_now(),
    );

    assert_eq!(result, Err(PersistenceError::DuplicateRoomNumber(102)));
}

#[test]
fn test_update_missing_room() {
    let mut persistence: Persistence = create_test_persistence();

    let result = persistence.update_room(
        42,
        &create_room_spec(101, RoomType::Simple, 80),
        create_test_now(),
    );

    assert_eq!(result, Err(PersistenceError::RoomNotFound(42)));
}

#[test]
fn test_delete_free_room() {
    let mut persistence: Persistence = create_test_persistence();
    let ids: Vec<i64> = seed_rooms(&mut persistence);

    persistence.delete_room(ids[2]).unwrap();

    assert!(persistence.get_room(ids[2]).unwrap().is_none());
    assert_eq!(persistence.list_rooms(&RoomFilter::default()).unwrap().len(), 2);
}

#[test]
fn test_delete_held_room_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let ids: Vec<i64> = seed_rooms(&mut persistence);
    let client_id: i64 = persistence
        .register_client(&create_client_profile("45871236"), &[ids[0]], create_test_now())
        .unwrap()
        .client
        .client_id;

    let result = persistence.delete_room(ids[0]);

    assert_eq!(
        result,
        Err(PersistenceError::RoomInUse {
            room_id: ids[0],
            client_id
        })
    );
}

#[test]
fn test_delete_room_after_release_drops_its_history() {
    let mut persistence: Persistence = create_test_persistence();
    let ids: Vec<i64> = seed_rooms(&mut persistence);
    let client_id: i64 = persistence
        .register_client(&create_client_profile("45871236"), &[ids[0], ids[1]], create_test_now())
        .unwrap()
        .client
        .client_id;
    persistence.release_client(client_id, create_test_now()).unwrap();

    persistence.delete_room(ids[0]).unwrap();

    let history = persistence.client_entries(client_id).unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].room_id, ids[1]);
}

#[test]
fn test_clean_dirty_room() {
    let mut persistence: Persistence = create_test_persistence();
    let ids: Vec<i64> = seed_rooms(&mut persistence);
    let client_id: i64 = persistence
        .register_client(&create_client_profile("45871236"), &[ids[0]], create_test_now())
        .unwrap()
        .client
        .client_id;
    persistence.release_client(client_id, create_test_now()).unwrap();

    let cleaned: RoomRecord = persistence.clean_room(ids[0], create_test_now()).unwrap();

    assert_eq!(cleaned.room.state, RoomState::Available);
}

#[test]
fn test_clean_available_room_is_rejected() {
    let mut persistence: Persistence = create_test_persistence();
    let ids: Vec<i64> = seed_rooms(&mut persistence);

    let result = persistence.clean_room(ids[0], create_test_now());

    assert_eq!(
        result,
        Err(PersistenceError::Rejected(CoreError::DomainViolation(
            DomainError::InvalidRoomTransition {
                from: RoomState::Available,
                to: RoomState::Available,
            }
        )))
    );
}

#[test]
fn test_maintenance_round_trip_for_free_room() {
    let mut persistence: Persistence = create_test_persistence();
    let ids: Vec<i64> = seed_rooms(&mut persistence);

    let down: RoomRecord = persistence.begin_maintenance(ids[1], create_test_now()).unwrap();
    assert_eq!(down.room.state, RoomState::Maintenance);

    let up: RoomRecord = persistence.end_maintenance(ids[1], create_test_now()).unwrap();
    assert_eq!(up.room.state, RoomState::Available);
}

#[test]
fn test_end_maintenance_on_held_room_returns_to_occupied() {
    let mut persistence: Persistence = create_test_persistence();
    let ids: Vec<i64> = seed_rooms(&mut persistence);
    persistence
        .register_client(&create_client_profile("45871236"), &[ids[0]], create_test_now())
        .unwrap();

    persistence.begin_maintenance(ids[0], create_test_now()).unwrap();
    let room: RoomRecord = persistence.end_maintenance(ids[0], create_test_now()).unwrap();

    assert_eq!(room.room.state, RoomState::Occupied);
}

#[test]
fn test_state_change_on_missing_room() {
    let mut persistence: Persistence = create_test_persistence();

    let result = persistence.begin_maintenance(7, create_test_now());

    assert_eq!(result, Err(PersistenceError::RoomNotFound(7)));
}

#[test]
fn test_list_rooms_filters_and_orders_by_number() {
    let mut persistence: Persistence = create_test_persistence();
    persistence
        .create_room(&create_room_spec(305, RoomType::Double, 140), create_test_now())
        .unwrap();
    seed_rooms(&mut persistence);

    let all: Vec<RoomRecord> = persistence.list_rooms(&RoomFilter::default()).unwrap();
    let numbers: Vec<u16> = all.iter().map(|r| r.room.number.value()).collect();
    assert_eq!(numbers, vec![101, 102, 201, 305]);

    let doubles: Vec<RoomRecord> = persistence
        .list_rooms(&RoomFilter {
            room_type: Some(RoomType::Double),
            max_price: Some(Decimal::from(130)),
            ..RoomFilter::default()
        })
        .unwrap();
    assert_eq!(doubles.len(), 1);
    assert_eq!(doubles[0].room.number.value(), 102);

    let searched: Vec<RoomRecord> = persistence
        .list_rooms(&RoomFilter {
            search: Some(String::from("FAMILY")),
            ..RoomFilter::default()
        })
        .unwrap();
    assert_eq!(searched.len(), 1);
    assert_eq!(searched[0].room.number.value(), 201);
}

#[test]
fn test_room_holder() {
    let mut persistence: Persistence = create_test_persistence();
    let ids: Vec<i64> = seed_rooms(&mut persistence);
    let client_id: i64 = persistence
        .register_client(&create_client_profile("45871236"), &[ids[1]], create_test_now())
        .unwrap()
        .client
        .client_id;

    assert_eq!(persistence.room_holder(ids[1]).unwrap(), Some(client_id));
    assert_eq!(persistence.room_holder(ids[0]).unwrap(), None);
}
