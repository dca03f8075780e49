// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::{
    ClientProfile, DocumentType, LedgerState, PaymentType, Room, RoomNumber, RoomState, RoomType,
};
use innkeep_reports::{HotelCalendar, ReportType};
use rust_decimal::Decimal;
use time::{Date, OffsetDateTime};

/// A stored room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomRecord {
    pub room: Room,
    pub description: Option<String>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

/// Room listing filters. Every set field must match.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoomFilter {
    pub room_type: Option<RoomType>,
    pub state: Option<RoomState>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    /// Case-insensitive match on number, description, type or state.
    pub search: Option<String>,
}

impl RoomFilter {
    #[must_use]
    pub fn matches(&self, record: &RoomRecord) -> bool {
        let room: &Room = &record.room;
        if self.room_type.is_some_and(|t| t != room.room_type)
            || self.state.is_some_and(|s| s != room.state)
            || self.min_price.is_some_and(|p| room.nightly_price < p)
            || self.max_price.is_some_and(|p| room.nightly_price > p)
        {
            return false;
        }
        self.search.as_deref().is_none_or(|term| {
            let term: String = term.trim().to_lowercase();
            room.number.to_string().contains(&term)
                || room.room_type.as_str().contains(&term)
                || room.state.as_str().contains(&term)
                || record
                    .description
                    .as_deref()
                    .is_some_and(|d| d.to_lowercase().contains(&term))
        })
    }
}

/// A stored client with ledger counts.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientRecord {
    pub client_id: i64,
    pub profile: ClientProfile,
    pub actual_checkout: Option<OffsetDateTime>,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
    /// Ledger entries currently active.
    pub active_rooms: usize,
    /// Ledger entries ever opened.
    pub rooms_assigned: usize,
}

impl ClientRecord {
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active_rooms > 0
    }

    /// When the stay began: the check-in time, or registration when unset.
    #[must_use]
    pub fn arrival(&self) -> OffsetDateTime {
        self.profile.check_in.unwrap_or(self.created_at)
    }

    /// Whether the client was in the hotel on the given local day.
    #[must_use]
    pub fn stayed_on(&self, day: Date, calendar: &HotelCalendar) -> bool {
        self.stayed_between(day, day, calendar)
    }

    /// Whether any part of the stay overlaps the inclusive local date range.
    #[must_use]
    pub fn stayed_between(&self, start: Date, end: Date, calendar: &HotelCalendar) -> bool {
        let arrived: Date = calendar.local_date(self.arrival());
        let left: Option<Date> = self.actual_checkout.map(|at| calendar.local_date(at));
        arrived <= end && left.is_none_or(|left| left >= start)
    }
}

/// Client listing filters. Dates are hotel-local days.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClientFilter {
    pub document_type: Option<DocumentType>,
    pub payment_type: Option<PaymentType>,
    /// Holds at least one active room.
    pub active: Option<bool>,
    /// Has ever been assigned a room.
    pub has_rooms: Option<bool>,
    pub check_in_from: Option<Date>,
    pub check_in_to: Option<Date>,
    pub checkout_from: Option<Date>,
    pub checkout_to: Option<Date>,
    pub on_date: Option<Date>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    /// Case-insensitive match on names, document, address or phone.
    pub search: Option<String>,
}

fn within(day: Option<Date>, from: Option<Date>, to: Option<Date>) -> bool {
    if from.is_none() && to.is_none() {
        return true;
    }
    day.is_some_and(|day| from.is_none_or(|f| day >= f) && to.is_none_or(|t| day <= t))
}

impl ClientFilter {
    #[must_use]
    pub fn matches(&self, record: &ClientRecord, calendar: &HotelCalendar) -> bool {
        let profile: &ClientProfile = &record.profile;
        let local = |at: Option<OffsetDateTime>| at.map(|at| calendar.local_date(at));

        let age_ok: bool = if self.min_age.is_none() && self.max_age.is_none() {
            true
        } else {
            profile.age.is_some_and(|age| {
                self.min_age.is_none_or(|min| age >= min) && self.max_age.is_none_or(|max| age <= max)
            })
        };

        self.document_type
            .is_none_or(|t| t == profile.document.document_type)
            && self.payment_type.is_none_or(|p| p == profile.payment_type)
            && self.active.is_none_or(|a| a == record.is_active())
            && self.has_rooms.is_none_or(|h| h == (record.rooms_assigned > 0))
            && within(local(profile.check_in), self.check_in_from, self.check_in_to)
            && within(
                local(profile.planned_checkout),
                self.checkout_from,
                self.checkout_to,
            )
            && self.on_date.is_none_or(|day| record.stayed_on(day, calendar))
            && age_ok
            && self.min_amount.is_none_or(|min| profile.amount_paid >= min)
            && self.max_amount.is_none_or(|max| profile.amount_paid <= max)
            && self.search.as_deref().is_none_or(|term| {
                let term: String = term.trim().to_lowercase();
                [
                    Some(profile.first_names.as_str()),
                    Some(profile.last_names.as_str()),
                    Some(profile.document.number.as_str()),
                    profile.address.as_deref(),
                    profile.phone.as_deref(),
                ]
                .into_iter()
                .flatten()
                .any(|field| field.to_lowercase().contains(&term))
            })
    }
}

/// A ledger entry joined with its room.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OccupancyRecord {
    pub entry_id: i64,
    pub client_id: i64,
    pub room_id: i64,
    pub room_number: RoomNumber,
    pub room_type: RoomType,
    pub nightly_price: Decimal,
    pub state: LedgerState,
    pub assigned_at: OffsetDateTime,
    pub released_at: Option<OffsetDateTime>,
}

/// A client together with its current and past rooms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientDetail {
    pub client: ClientRecord,
    pub active_rooms: Vec<OccupancyRecord>,
    pub history: Vec<OccupancyRecord>,
}

/// A room freed by a release or client removal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreedRoom {
    pub room_id: i64,
    pub number: RoomNumber,
    /// The room's state afterwards.
    pub state: RoomState,
}

/// Result of releasing every room a client holds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseOutcome {
    pub client_id: i64,
    pub released: Vec<FreedRoom>,
    pub actual_checkout: OffsetDateTime,
    /// Set when the client held nothing to release.
    pub warning: Option<String>,
}

/// Result of deleting a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemovalOutcome {
    pub client_id: i64,
    pub freed: Vec<FreedRoom>,
}

/// Why a document can or cannot register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentStatus {
    /// No record carries this document.
    NewClient,
    /// Earlier records exist but none holds a room.
    PreviousStayClosed,
    /// A record with this document holds rooms.
    ActiveClient,
}

impl DocumentStatus {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NewClient => "new_client",
            Self::PreviousStayClosed => "previous_stay_closed",
            Self::ActiveClient => "active_client",
        }
    }

    #[must_use]
    pub const fn is_available(&self) -> bool {
        !matches!(self, Self::ActiveClient)
    }
}

/// Answer to a document availability check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentCheck {
    pub status: DocumentStatus,
    /// The active record, or the most recent one for a closed stay.
    pub existing: Option<ClientRecord>,
    pub previous_stays: usize,
}

/// A stored report payload.
#[derive(Debug, Clone, PartialEq)]
pub struct CachedReport {
    pub cache_id: i64,
    pub report_type: ReportType,
    pub parameters: String,
    pub payload: serde_json::Value,
    pub generated_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
    pub is_valid: bool,
}
