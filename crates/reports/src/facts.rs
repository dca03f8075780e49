// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only inputs to the reporting engine.
//!
//! The persistence layer loads these from the rooms, clients and occupancy
//! tables; every report is a pure function over them.

use innkeep_domain::{Document, PaymentType, RoomNumber, RoomState, RoomType};
use rust_decimal::Decimal;
use time::OffsetDateTime;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomFact {
    pub room_id: i64,
    pub number: RoomNumber,
    pub room_type: RoomType,
    pub nightly_price: Decimal,
    pub state: RoomState,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientFact {
    pub client_id: i64,
    pub full_name: String,
    pub document: Document,
    pub payment_type: PaymentType,
    pub amount_paid: Decimal,
    pub desired_rooms: i64,
    /// When the client record was created.
    pub registered_at: OffsetDateTime,
    pub actual_checkout: Option<OffsetDateTime>,
    /// Ledger entries currently active.
    pub active_rooms: usize,
    /// Ledger entries ever opened, active or released.
    pub rooms_assigned: usize,
}

impl ClientFact {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active_rooms > 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyFact {
    pub entry_id: i64,
    pub client_id: i64,
    pub room_id: i64,
    pub assigned_at: OffsetDateTime,
    pub released_at: Option<OffsetDateTime>,
}

impl OccupancyFact {
    /// Nights the room was held: the stay length rounded up to whole days,
    /// at least one. Open stays are measured up to `now`.
    #[must_use]
    pub fn nights(&self, now: OffsetDateTime) -> i64 {
        const SECONDS_PER_DAY: i64 = 86_400;
        let end: OffsetDateTime = self.released_at.unwrap_or(now);
        let seconds: i64 = (end - self.assigned_at).whole_seconds();
        let nights: i64 = (seconds + SECONDS_PER_DAY - 1).div_euclid(SECONDS_PER_DAY);
        nights.max(1)
    }
}

/// Everything a report may read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportInputs {
    pub rooms: Vec<RoomFact>,
    pub clients: Vec<ClientFact>,
    pub occupancy: Vec<OccupancyFact>,
}

impl ReportInputs {
    #[must_use]
    pub fn room(&self, room_id: i64) -> Option<&RoomFact> {
        self.rooms.iter().find(|room| room.room_id == room_id)
    }
}
