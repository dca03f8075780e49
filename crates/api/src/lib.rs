// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the Innkeep hotel back office.
//!
//! Handlers take raw request DTOs, validate them against the domain rules,
//! call the persistence adapter and return response DTOs. Every rejected
//! field is collected before any write happens, so a 400 response lists all
//! problems at once. Errors from lower layers are translated explicitly
//! into `ApiError`; nothing below this crate leaks to callers.
//!
//! This crate knows nothing about HTTP. The server maps `ApiError` onto
//! status codes.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod error;
mod handlers;
mod request_response;
mod settings;

#[cfg(test)]
mod tests;

pub use error::{
    ApiError, FieldViolation, translate_core_error, translate_domain_error,
    translate_persistence_error, translate_report_error,
};
pub use handlers::{
    active_clients, add_rooms, available_rooms, begin_maintenance, check_document,
    check_room_number, clean_room, clear_expired_reports, client_history, client_rooms,
    client_statistics, clients_in_range, clients_on_date, create_client, create_room,
    delete_client, delete_room, end_maintenance, generate_report, get_client, get_room,
    invalidate_cached_report, list_clients, list_rooms, release_client, report_by_name,
    room_statistics, rooms_by_type, update_client, update_room,
};
pub use request_response::{
    AddRoomsRequest, CacheEntryResponse, CheckDocumentRequest, CheckDocumentResponse,
    CheckNumberRequest, CheckNumberResponse, ClearExpiredResponse, ClientDetailResponse,
    ClientHistoryResponse, ClientListQuery, ClientListResponse, ClientResponse,
    ClientRoomsResponse, ClientsInRangeResponse, ClientsOnDateResponse, CreateClientRequest,
    CreateRoomRequest, DateQuery, DateRangeQuery, DeleteResponse, FreedRoomResponse,
    OccupancyResponse, ReleaseResponse, RemovalResponse, ReportQuery, ReportResponse,
    RoomListQuery, RoomListResponse, RoomResponse, RoomTypeGroup, RoomsByTypeResponse,
    UpdateClientRequest, UpdateRoomRequest,
};
pub use innkeep_reports::{ClientStatistics, RoomStatistics};
pub use settings::{
    DEFAULT_CACHE_TTL_MINUTES, DEFAULT_TIMEZONE, HotelSettings, MAX_CACHE_TTL_MINUTES,
};
