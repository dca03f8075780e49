// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test module for the API crate.

#![allow(clippy::expect_used, clippy::unwrap_used)]


use innkeep_persistence::Persistence;
use rust_decimal::Decimal;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::{CreateClientRequest, CreateRoomRequest, HotelSettings, create_room};

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should initialize")
}

/// 06:30 on 2026-03-10 in Lima.
pub fn create_test_now() -> OffsetDateTime {
    datetime!(2026-03-10 11:30 UTC)
}

pub fn create_test_settings() -> HotelSettings {
    HotelSettings::default()
}

pub fn create_room_request(number: i64, room_type: &str, price: i64) -> CreateRoomRequest {
    CreateRoomRequest {
        number,
        room_type: String::from(room_type),
        nightly_price: Decimal::from(price),
        description: None,
    }
}

pub fn create_client_request(document_number: &str, rooms: Vec<i64>) -> CreateClientRequest {
    CreateClientRequest {
        first_names: String::from("Ana Lucia"),
        last_names: String::from("Quispe Rojas"),
        document_type: String::from("national_id"),
        document_number: String::from(document_number),
        desired_rooms: i64::try_from(rooms.len()).unwrap(),
        payment_type: String::from("cash"),
        amount_paid: Decimal::from(240),
        age: Some(34),
        phone: Some(String::from("987654321")),
        address: Some(String::from("Av. Arequipa 1520, Lima")),
        check_in: Some(String::from("2026-03-10T14:00:00Z")),
        planned_checkout: Some(String::from("2026-03-12T12:00:00Z")),
        rooms,
    }
}

/// Rooms 101 (simple, 80), 102 (double, 120) and 201 (family, 250).
/// Returns their ids in that order.
pub fn seed_rooms(persistence: &mut Persistence) -> Vec<i64> {
    let now: OffsetDateTime = create_test_now();
    [
        create_room_request(101, "simple", 80),
        create_room_request(102, "double", 120),
        create_room_request(201, "family", 250),
    ]
    .iter()
    .map(|request| create_room(persistence, request, now).unwrap().room_id)
    .collect()
}

/// Collects the fields named in a validation failure.
pub fn violated_fields(err: &crate::ApiError) -> Vec<String> {
    err.violations().into_iter().map(|v| v.field).collect()
}
