// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod report_input_tests;
mod room_tests;

use innkeep_domain::{ClientProfile, Document, DocumentType, PaymentType, RoomSpec, RoomType};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use time::macros::datetime;

use crate::Persistence;

pub fn create_test_persistence() -> Persistence {
    Persistence::new_in_memory().expect("in-memory database should initialize")
}

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2026-03-10 11:30 UTC)
}

pub fn create_room_spec(number: i64, room_type: RoomType, price: i64) -> RoomSpec {
    RoomSpec {
        number,
        room_type,
        nightly_price: Decimal::from(price),
        description: None,
    }
}

pub fn create_client_profile(document_number: &str) -> ClientProfile {
    ClientProfile {
        first_names: String::from("Ana Lucia"),
        last_names: String::from("Quispe Rojas"),
        document: Document::new(DocumentType::NationalId, document_number),
        desired_rooms: 1,
        payment_type: PaymentType::Cash,
        amount_paid: Decimal::from(240),
        age: Some(34),
        phone: Some(String::from("+51 987 654 321")),
        address: Some(String::from("Av. Arequipa 1520, Lima")),
        check_in: Some(datetime!(2026-03-10 14:00 UTC)),
        planned_checkout: Some(datetime!(2026-03-12 12:00 UTC)),
    }
}

/// Rooms 101 (simple, 80), 102 (double, 120) and 201 (family, 250).
/// Returns their ids in that order.
pub fn seed_rooms(persistence: &mut Persistence) -> Vec<i64> {
    let now: OffsetDateTime = create_test_now();
    [
        create_room_spec(101, RoomType::Simple, 80),
        create_room_spec(102, RoomType::Double, 120),
        create_room_spec(201, RoomType::Family, 250),
    ]
    .iter()
    .map(|spec| persistence.create_room(spec, now).unwrap().room.room_id)
    .collect()
}
