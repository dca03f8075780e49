// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// The lowest room number the hotel uses.
pub const MIN_ROOM_NUMBER: i64 = 1;
/// The highest room number the hotel uses.
pub const MAX_ROOM_NUMBER: i64 = 9999;
/// Upper bound on rooms a single client may hold at once.
pub const MAX_ROOMS_PER_CLIENT: usize = 10;

/// Room category. Drives pricing and the per-type reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoomType {
    Simple,
    Double,
    Triple,
    Family,
}

impl RoomType {
    /// Every room type, in display order.
    pub const ALL: [Self; 4] = [Self::Simple, Self::Double, Self::Triple, Self::Family];

    /// Converts this room type to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Simple => "simple",
            Self::Double => "double",
            Self::Triple => "triple",
            Self::Family => "family",
        }
    }
}

impl FromStr for RoomType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "simple" => Ok(Self::Simple),
            "double" => Ok(Self::Double),
            "triple" => Ok(Self::Triple),
            "family" => Ok(Self::Family),
            _ => Err(DomainError::InvalidRoomType(s.to_string())),
        }
    }
}

impl std::fmt::Display for RoomType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Operational state of a room.
///
/// The normal cycle is `Available → Occupied → Dirty → Available`.
/// Maintenance can be entered from any other state and is left either back
/// to `Available` or, when the room is still held by a client, to `Occupied`.
/// Releasing the holder of a room under maintenance leaves it `Dirty`.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum RoomState {
    #[default]
    Available,
    Occupied,
    Dirty,
    Maintenance,
}

impl RoomState {
    /// Every room state, in display order.
    pub const ALL: [Self; 4] = [
        Self::Available,
        Self::Occupied,
        Self::Dirty,
        Self::Maintenance,
    ];

    /// Converts this room state to its stored string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Dirty => "dirty",
            Self::Maintenance => "maintenance",
        }
    }

    /// Checks if a transition from this state to another is valid.
    ///
    /// Valid transitions are:
    /// - `Available` → `Occupied`
    /// - `Occupied` → `Dirty`
    /// - `Dirty` → `Available`
    /// - any state except `Maintenance` → `Maintenance`
    /// - `Maintenance` → `Available` or `Occupied`
    /// - `Maintenance` → `Dirty` when the holding client is released
    #[must_use]
    pub const fn can_transition_to(&self, target: Self) -> bool {
        matches!(
            (self, target),
            (Self::Available, Self::Occupied)
                | (Self::Occupied, Self::Dirty)
                | (Self::Dirty, Self::Available)
                | (
                    Self::Available | Self::Occupied | Self::Dirty,
                    Self::Maintenance
                )
                | (
                    Self::Maintenance,
                    Self::Available | Self::Occupied | Self::Dirty
                )
        )
    }

    /// Checks the transition and returns the target state.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRoomTransition` if the transition is not allowed.
    pub const fn transition_to(self, target: Self) -> Result<Self, DomainError> {
        if self.can_transition_to(target) {
            Ok(target)
        } else {
            Err(DomainError::InvalidRoomTransition {
                from: self,
                to: target,
            })
        }
    }
}

impl FromStr for RoomState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "dirty" => Ok(Self::Dirty),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(DomainError::InvalidRoomState(s.to_string())),
        }
    }
}

impl std::fmt::Display for RoomState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Identity document kinds accepted at check-in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    /// National identity card. Exactly eight digits.
    NationalId,
    Passport,
    /// Foreign resident card.
    ForeignId,
}

impl DocumentType {
    pub const ALL: [Self; 3] = [Self::NationalId, Self::Passport, Self::ForeignId];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NationalId => "national_id",
            Self::Passport => "passport",
            Self::ForeignId => "foreign_id",
        }
    }
}

impl FromStr for DocumentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "national_id" => Ok(Self::NationalId),
            "passport" => Ok(Self::Passport),
            "foreign_id" => Ok(Self::ForeignId),
            _ => Err(DomainError::InvalidDocumentType(s.to_string())),
        }
    }
}

impl std::fmt::Display for DocumentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a client settled their stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentType {
    Cash,
    DigitalWallet,
    Card,
}

impl PaymentType {
    pub const ALL: [Self; 3] = [Self::Cash, Self::DigitalWallet, Self::Card];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::DigitalWallet => "digital_wallet",
            Self::Card => "card",
        }
    }
}

impl FromStr for PaymentType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "digital_wallet" => Ok(Self::DigitalWallet),
            "card" => Ok(Self::Card),
            _ => Err(DomainError::InvalidPaymentType(s.to_string())),
        }
    }
}

impl std::fmt::Display for PaymentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle of an occupancy ledger entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LedgerState {
    Active,
    Released,
}

impl LedgerState {
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Released => "released",
        }
    }
}

impl FromStr for LedgerState {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "released" => Ok(Self::Released),
            _ => Err(DomainError::InvalidLedgerState(s.to_string())),
        }
    }
}

impl std::fmt::Display for LedgerState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A validated room number in `1..=9999`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub struct RoomNumber(u16);

impl RoomNumber {
    /// Creates a room number, rejecting values outside the hotel's range.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidRoomNumber` if `value` is out of range.
    pub fn new(value: i64) -> Result<Self, DomainError> {
        if !(MIN_ROOM_NUMBER..=MAX_ROOM_NUMBER).contains(&value) {
            return Err(DomainError::InvalidRoomNumber(value));
        }
        u16::try_from(value)
            .map(Self)
            .map_err(|_| DomainError::InvalidRoomNumber(value))
    }

    #[must_use]
    pub const fn value(&self) -> u16 {
        self.0
    }
}

impl TryFrom<i64> for RoomNumber {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<RoomNumber> for i64 {
    fn from(number: RoomNumber) -> Self {
        Self::from(number.0)
    }
}

impl std::fmt::Display for RoomNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The editable attributes of a room.
///
/// State is absent: it only changes through the occupancy lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomSpec {
    pub number: i64,
    pub room_type: RoomType,
    pub nightly_price: Decimal,
    pub description: Option<String>,
}

/// A persisted room as seen by the occupancy lifecycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Room {
    pub room_id: i64,
    pub number: RoomNumber,
    pub room_type: RoomType,
    pub nightly_price: Decimal,
    pub state: RoomState,
}

/// The identity document a client presents.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Document {
    pub document_type: DocumentType,
    pub number: String,
}

impl Document {
    #[must_use]
    pub fn new(document_type: DocumentType, number: &str) -> Self {
        Self {
            document_type,
            number: number.trim().to_string(),
        }
    }
}

impl std::fmt::Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.document_type, self.number)
    }
}

/// Everything a client record carries apart from its identity and
/// bookkeeping timestamps.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientProfile {
    pub first_names: String,
    pub last_names: String,
    pub document: Document,
    pub desired_rooms: i64,
    pub payment_type: PaymentType,
    pub amount_paid: Decimal,
    pub age: Option<i64>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub check_in: Option<OffsetDateTime>,
    pub planned_checkout: Option<OffsetDateTime>,
}

impl ClientProfile {
    /// Full display name, first names then last names.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_names, self.last_names)
    }
}

/// One row of the occupancy ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    pub entry_id: i64,
    pub client_id: i64,
    pub room_id: i64,
    pub state: LedgerState,
    pub assigned_at: OffsetDateTime,
    pub released_at: Option<OffsetDateTime>,
}

impl LedgerEntry {
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.state == LedgerState::Active
    }
}
