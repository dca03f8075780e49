// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! Enumerations and timestamps arrive as strings so that a bad value becomes
//! a field violation instead of a rejected body.

use innkeep_domain::{DocumentType, LedgerState, PaymentType, RoomState, RoomType};
use innkeep_persistence::{CachedReport, ClientRecord, FreedRoom, OccupancyRecord, RoomRecord};
use innkeep_reports::ReportType;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

// ============================================================================
// Rooms
// ============================================================================

/// API request to create a room.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateRoomRequest {
    pub number: i64,
    pub room_type: String,
    pub nightly_price: Decimal,
    #[serde(default)]
    pub description: Option<String>,
}

/// API request to change some of a room's attributes.
///
/// A blank description clears it. `state` is accepted only to be rejected:
/// rooms change state through assignment, release, cleaning and maintenance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpdateRoomRequest {
    #[serde(default)]
    pub number: Option<i64>,
    #[serde(default)]
    pub room_type: Option<String>,
    #[serde(default)]
    pub nightly_price: Option<Decimal>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
}

/// Query string for room listings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct RoomListQuery {
    pub room_type: Option<String>,
    pub state: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
    pub search: Option<String>,
}

/// API request asking whether a room number is free.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CheckNumberRequest {
    pub number: i64,
    /// The room being edited, whose own number counts as free.
    #[serde(default)]
    pub exclude_room_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckNumberResponse {
    pub number: i64,
    pub available: bool,
    /// The room already using the number.
    pub room_id: Option<i64>,
    pub message: String,
}

/// A room as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomResponse {
    pub room_id: i64,
    pub number: u16,
    pub room_type: RoomType,
    pub nightly_price: Decimal,
    pub state: RoomState,
    pub description: Option<String>,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<&RoomRecord> for RoomResponse {
    fn from(record: &RoomRecord) -> Self {
        Self {
            room_id: record.room.room_id,
            number: record.room.number.value(),
            room_type: record.room.room_type,
            nightly_price: record.room.nightly_price,
            state: record.room.state,
            description: record.description.clone(),
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomListResponse {
    pub count: usize,
    pub rooms: Vec<RoomResponse>,
}

impl RoomListResponse {
    #[must_use]
    pub fn new(records: &[RoomRecord]) -> Self {
        Self {
            count: records.len(),
            rooms: records.iter().map(RoomResponse::from).collect(),
        }
    }
}

/// Rooms of one type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomTypeGroup {
    pub room_type: RoomType,
    pub count: usize,
    pub available: usize,
    pub rooms: Vec<RoomResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomsByTypeResponse {
    pub groups: Vec<RoomTypeGroup>,
}

// ============================================================================
// Clients
// ============================================================================

/// API request to register a client together with the rooms they take.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CreateClientRequest {
    pub first_names: String,
    pub last_names: String,
    pub document_type: String,
    pub document_number: String,
    pub desired_rooms: i64,
    pub payment_type: String,
    pub amount_paid: Decimal,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    /// RFC 3339; defaults to the registration time.
    #[serde(default)]
    pub check_in: Option<String>,
    /// RFC 3339.
    #[serde(default)]
    pub planned_checkout: Option<String>,
    /// Room IDs to assign.
    #[serde(default)]
    pub rooms: Vec<i64>,
}

/// API request to change some of a client's details.
///
/// Blank optional text fields clear the stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UpdateClientRequest {
    #[serde(default)]
    pub first_names: Option<String>,
    #[serde(default)]
    pub last_names: Option<String>,
    #[serde(default)]
    pub document_type: Option<String>,
    #[serde(default)]
    pub document_number: Option<String>,
    #[serde(default)]
    pub desired_rooms: Option<i64>,
    #[serde(default)]
    pub payment_type: Option<String>,
    #[serde(default)]
    pub amount_paid: Option<Decimal>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub address: Option<String>,
    #[serde(default)]
    pub check_in: Option<String>,
    #[serde(default)]
    pub planned_checkout: Option<String>,
}

/// API request to assign more rooms to a client.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AddRoomsRequest {
    pub rooms: Vec<i64>,
}

/// API request asking whether a document may register.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct CheckDocumentRequest {
    pub document_type: String,
    pub document_number: String,
}

/// Query string for client listings. Dates are `YYYY-MM-DD` hotel days.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ClientListQuery {
    pub document_type: Option<String>,
    pub payment_type: Option<String>,
    pub active: Option<bool>,
    pub has_rooms: Option<bool>,
    pub check_in_from: Option<String>,
    pub check_in_to: Option<String>,
    pub checkout_from: Option<String>,
    pub checkout_to: Option<String>,
    pub on_date: Option<String>,
    pub min_age: Option<i64>,
    pub max_age: Option<i64>,
    pub min_amount: Option<Decimal>,
    pub max_amount: Option<Decimal>,
    pub search: Option<String>,
}

/// Query string with a single optional day, defaulting to today.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DateQuery {
    pub date: Option<String>,
}

/// Query string with an optional date range.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct DateRangeQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

/// A client as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientResponse {
    pub client_id: i64,
    pub first_names: String,
    pub last_names: String,
    pub full_name: String,
    pub document_type: DocumentType,
    pub document_number: String,
    pub desired_rooms: i64,
    pub payment_type: PaymentType,
    pub amount_paid: Decimal,
    pub age: Option<i64>,
    pub phone: Option<String>,
    pub address: Option<String>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub check_in: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub planned_checkout: Option<OffsetDateTime>,
    #[serde(with = "time::serde::rfc3339::option")]
    pub actual_checkout: Option<OffsetDateTime>,
    pub is_active: bool,
    pub active_rooms: usize,
    pub rooms_assigned: usize,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

impl From<&ClientRecord> for ClientResponse {
    fn from(record: &ClientRecord) -> Self {
        let profile = &record.profile;
        Self {
            client_id: record.client_id,
            first_names: profile.first_names.clone(),
            last_names: profile.last_names.clone(),
            full_name: profile.full_name(),
            document_type: profile.document.document_type,
            document_number: profile.document.number.clone(),
            desired_rooms: profile.desired_rooms,
            payment_type: profile.payment_type,
            amount_paid: profile.amount_paid,
            age: profile.age,
            phone: profile.phone.clone(),
            address: profile.address.clone(),
            check_in: profile.check_in,
            planned_checkout: profile.planned_checkout,
            actual_checkout: record.actual_checkout,
            is_active: record.is_active(),
            active_rooms: record.active_rooms,
            rooms_assigned: record.rooms_assigned,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

/// A ledger entry with its room.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccupancyResponse {
    pub entry_id: i64,
    pub room_id: i64,
    pub room_number: u16,
    pub room_type: RoomType,
    pub nightly_price: Decimal,
    pub state: LedgerState,
    #[serde(with = "time::serde::rfc3339")]
    pub assigned_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub released_at: Option<OffsetDateTime>,
}

impl From<&OccupancyRecord> for OccupancyResponse {
    fn from(record: &OccupancyRecord) -> Self {
        Self {
            entry_id: record.entry_id,
            room_id: record.room_id,
            room_number: record.room_number.value(),
            room_type: record.room_type,
            nightly_price: record.nightly_price,
            state: record.state,
            assigned_at: record.assigned_at,
            released_at: record.released_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientDetailResponse {
    pub client: ClientResponse,
    pub active_rooms: Vec<OccupancyResponse>,
    pub history: Vec<OccupancyResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientListResponse {
    pub count: usize,
    pub clients: Vec<ClientResponse>,
}

impl ClientListResponse {
    #[must_use]
    pub fn new<'a>(records: impl IntoIterator<Item = &'a ClientRecord>) -> Self {
        let clients: Vec<ClientResponse> = records.into_iter().map(ClientResponse::from).collect();
        Self {
            count: clients.len(),
            clients,
        }
    }
}

/// Clients split by whether they still hold rooms.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientHistoryResponse {
    pub active: ClientListResponse,
    pub inactive: ClientListResponse,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientsOnDateResponse {
    pub date: Date,
    pub count: usize,
    pub clients: Vec<ClientResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientsInRangeResponse {
    pub start_date: Date,
    pub end_date: Date,
    pub count: usize,
    pub clients: Vec<ClientResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientRoomsResponse {
    pub client_id: i64,
    pub count: usize,
    pub entries: Vec<OccupancyResponse>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckDocumentResponse {
    pub available: bool,
    /// `new_client`, `previous_stay_closed` or `active_client`.
    pub reason: String,
    pub message: String,
    pub previous_stays: usize,
    pub existing_client: Option<ClientResponse>,
}

/// A room freed by a release or client removal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FreedRoomResponse {
    pub room_id: i64,
    pub number: u16,
    pub state: RoomState,
}

impl From<&FreedRoom> for FreedRoomResponse {
    fn from(room: &FreedRoom) -> Self {
        Self {
            room_id: room.room_id,
            number: room.number.value(),
            state: room.state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseResponse {
    pub client_id: i64,
    pub released: Vec<FreedRoomResponse>,
    #[serde(with = "time::serde::rfc3339")]
    pub actual_checkout: OffsetDateTime,
    pub warning: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemovalResponse {
    pub client_id: i64,
    pub freed: Vec<FreedRoomResponse>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub deleted: bool,
    pub message: String,
}

// ============================================================================
// Reports
// ============================================================================

/// Query string shared by all reports.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct ReportQuery {
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub limit: Option<i64>,
}

/// A generated or cached report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportResponse {
    pub report_type: ReportType,
    /// Whether the payload came from the cache.
    pub cached: bool,
    pub cache_id: Option<i64>,
    #[serde(with = "time::serde::rfc3339")]
    pub generated_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339::option")]
    pub expires_at: Option<OffsetDateTime>,
    pub data: serde_json::Value,
}

impl ReportResponse {
    #[must_use]
    pub fn from_cache(entry: CachedReport, cached: bool) -> Self {
        Self {
            report_type: entry.report_type,
            cached,
            cache_id: Some(entry.cache_id),
            generated_at: entry.generated_at,
            expires_at: Some(entry.expires_at),
            data: entry.payload,
        }
    }
}

/// A cache entry after invalidation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntryResponse {
    pub cache_id: i64,
    pub report_type: ReportType,
    pub parameters: String,
    pub is_valid: bool,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
}

impl From<&CachedReport> for CacheEntryResponse {
    fn from(entry: &CachedReport) -> Self {
        Self {
            cache_id: entry.cache_id,
            report_type: entry.report_type,
            parameters: entry.parameters.clone(),
            is_valid: entry.is_valid,
            expires_at: entry.expires_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClearExpiredResponse {
    pub invalidated: usize,
    pub message: String,
}
