// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::{Document, DocumentType, PaymentType, RoomNumber, RoomState, RoomType};
use rust_decimal::Decimal;
use time::OffsetDateTime;
use time::macros::{date, datetime};

use crate::{ClientFact, HotelCalendar, OccupancyFact, ReportInputs, ReportPeriod, RoomFact};

pub fn create_test_calendar() -> HotelCalendar {
    HotelCalendar::from_name("America/Lima").unwrap()
}

pub fn create_test_now() -> OffsetDateTime {
    datetime!(2026-03-31 18:00 UTC)
}

/// 1 to 31 March 2026.
pub fn create_test_period() -> ReportPeriod {
    ReportPeriod::new(date!(2026-03-01), date!(2026-03-31)).unwrap()
}

pub fn room(room_id: i64, number: i64, room_type: RoomType, price: i64, state: RoomState) -> RoomFact {
    RoomFact {
        room_id,
        number: RoomNumber::new(number).unwrap(),
        room_type,
        nightly_price: Decimal::new(price, 0),
        state,
    }
}

pub fn client(
    client_id: i64,
    document_number: &str,
    payment_type: PaymentType,
    amount: i64,
    registered_at: OffsetDateTime,
) -> ClientFact {
    ClientFact {
        client_id,
        full_name: format!("Guest {client_id}"),
        document: Document::new(DocumentType::NationalId, document_number),
        payment_type,
        amount_paid: Decimal::new(amount, 0),
        desired_rooms: 1,
        registered_at,
        actual_checkout: None,
        active_rooms: 0,
        rooms_assigned: 1,
    }
}

pub fn stay(
    entry_id: i64,
    client_id: i64,
    room_id: i64,
    assigned_at: OffsetDateTime,
    released_at: Option<OffsetDateTime>,
) -> OccupancyFact {
    OccupancyFact {
        entry_id,
        client_id,
        room_id,
        assigned_at,
        released_at,
    }
}

/// Three rooms, four registrations in March (two by the same document) and
/// one in February, with matching stays.
pub fn create_test_inputs() -> ReportInputs {
    let rooms = vec![
        room(1, 101, RoomType::Simple, 100, RoomState::Dirty),
        room(2, 102, RoomType::Double, 150, RoomState::Occupied),
        room(3, 201, RoomType::Family, 300, RoomState::Available),
    ];

    let mut active = client(
        5,
        "10000003",
        PaymentType::Card,
        450,
        datetime!(2026-03-28 15:00 UTC),
    );
    active.active_rooms = 1;

    let clients = vec![
        client(1, "10000001", PaymentType::Cash, 200, datetime!(2026-03-02 15:00 UTC)),
        client(2, "10000002", PaymentType::Cash, 300, datetime!(2026-03-05 15:00 UTC)),
        client(3, "10000001", PaymentType::DigitalWallet, 100, datetime!(2026-03-20 15:00 UTC)),
        client(4, "10000004", PaymentType::Cash, 900, datetime!(2026-02-10 15:00 UTC)),
        active,
    ];

    let occupancy = vec![
        stay(1, 1, 1, datetime!(2026-03-02 15:00 UTC), Some(datetime!(2026-03-04 12:00 UTC))),
        stay(2, 2, 1, datetime!(2026-03-05 15:00 UTC), Some(datetime!(2026-03-06 10:00 UTC))),
        stay(3, 3, 1, datetime!(2026-03-20 15:00 UTC), Some(datetime!(2026-03-21 12:00 UTC))),
        stay(4, 4, 3, datetime!(2026-02-10 15:00 UTC), Some(datetime!(2026-02-12 12:00 UTC))),
        stay(5, 5, 2, datetime!(2026-03-28 15:00 UTC), None),
    ];

    ReportInputs {
        rooms,
        clients,
        occupancy,
    }
}

pub fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < 1e-9,
        "expected {expected}, got {actual}"
    );
}
