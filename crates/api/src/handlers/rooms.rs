// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::{RoomSpec, RoomState, RoomType, validate_room_spec};
use innkeep_persistence::{Persistence, RoomFilter, RoomRecord};
use innkeep_reports::{ReportInputs, RoomStatistics};
use time::OffsetDateTime;
use tracing::{debug, info};

use super::{clean_text, parse_choice, parse_optional_choice};
use crate::error::{ApiError, FieldViolation, translate_persistence_error};
use crate::request_response::{
    CheckNumberRequest, CheckNumberResponse, CreateRoomRequest, DeleteResponse, RoomListQuery,
    RoomListResponse, RoomResponse, RoomTypeGroup, RoomsByTypeResponse, UpdateRoomRequest,
};

fn load_room(persistence: &mut Persistence, room_id: i64) -> Result<RoomRecord, ApiError> {
    persistence
        .get_room(room_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Room"),
            message: format!("Room {room_id} does not exist"),
        })
}

/// Validates a room and checks its number is free.
fn validate_room(
    persistence: &mut Persistence,
    spec: &RoomSpec,
    owner: Option<i64>,
    mut violations: Vec<FieldViolation>,
) -> Result<(), ApiError> {
    violations.extend(validate_room_spec(spec).iter().map(FieldViolation::from));

    if !violations.iter().any(|v| v.field == "number") {
        let taken: Option<RoomRecord> = persistence
            .find_room_by_number(spec.number)
            .map_err(translate_persistence_error)?;
        if let Some(existing) = taken.filter(|r| Some(r.room.room_id) != owner) {
            violations.push(FieldViolation::new(
                "number",
                format!(
                    "Room number {} is already used by room {}",
                    spec.number, existing.room.room_id
                ),
            ));
        }
    }

    ApiError::check(violations)
}

/// Creates a room. New rooms are available.
///
/// # Errors
///
/// Returns an error if:
/// - The room type is unknown
/// - The number, price or description is invalid
/// - Another room already has the number
pub fn create_room(
    persistence: &mut Persistence,
    request: &CreateRoomRequest,
    now: OffsetDateTime,
) -> Result<RoomResponse, ApiError> {
    let mut violations: Vec<FieldViolation> = Vec::new();
    let room_type: Option<RoomType> = parse_choice(&request.room_type, &mut violations);

    let spec: RoomSpec = RoomSpec {
        number: request.number,
        room_type: room_type.unwrap_or(RoomType::Simple),
        nightly_price: request.nightly_price,
        description: clean_text(request.description.as_deref()),
    };
    validate_room(persistence, &spec, None, violations)?;

    let record: RoomRecord = persistence
        .create_room(&spec, now)
        .map_err(translate_persistence_error)?;
    Ok(RoomResponse::from(&record))
}

/// Retrieves one room.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the room does not exist.
pub fn get_room(persistence: &mut Persistence, room_id: i64) -> Result<RoomResponse, ApiError> {
    load_room(persistence, room_id).map(|record| RoomResponse::from(&record))
}

/// Changes the fields present in the request. State is never editable here.
///
/// # Errors
///
/// Returns an error if the room does not exist, the request names a state,
/// or the merged room is invalid.
pub fn update_room(
    persistence: &mut Persistence,
    room_id: i64,
    request: &UpdateRoomRequest,
    now: OffsetDateTime,
) -> Result<RoomResponse, ApiError> {
    let current: RoomRecord = load_room(persistence, room_id)?;
    let mut violations: Vec<FieldViolation> = Vec::new();

    if request.state.is_some() {
        violations.push(FieldViolation::new(
            "state",
            "Room state changes through assignment, release, cleaning or maintenance",
        ));
    }
    let room_type: Option<RoomType> = request
        .room_type
        .as_deref()
        .map_or(Some(current.room.room_type), |value| {
            parse_choice(value, &mut violations)
        });

    let spec: RoomSpec = RoomSpec {
        number: request
            .number
            .unwrap_or_else(|| i64::from(current.room.number)),
        room_type: room_type.unwrap_or(current.room.room_type),
        nightly_price: request.nightly_price.unwrap_or(current.room.nightly_price),
        description: match &request.description {
            Some(text) => clean_text(Some(text)),
            None => current.description.clone(),
        },
    };
    validate_room(persistence, &spec, Some(room_id), violations)?;

    let record: RoomRecord = persistence
        .update_room(room_id, &spec, now)
        .map_err(translate_persistence_error)?;
    Ok(RoomResponse::from(&record))
}

/// Deletes a room that no client holds.
///
/// # Errors
///
/// Returns an error if the room does not exist or is held by a client.
pub fn delete_room(persistence: &mut Persistence, room_id: i64) -> Result<DeleteResponse, ApiError> {
    let record: RoomRecord = load_room(persistence, room_id)?;
    persistence
        .delete_room(room_id)
        .map_err(translate_persistence_error)?;
    Ok(DeleteResponse {
        deleted: true,
        message: format!("Room {} deleted", record.room.number),
    })
}

/// Lists rooms matching the query filters.
///
/// # Errors
///
/// Returns an error if a filter value is invalid.
pub fn list_rooms(
    persistence: &mut Persistence,
    query: &RoomListQuery,
) -> Result<RoomListResponse, ApiError> {
    let mut violations: Vec<FieldViolation> = Vec::new();
    let filter: RoomFilter = RoomFilter {
        room_type: parse_optional_choice(query.room_type.as_deref(), &mut violations),
        state: parse_optional_choice(query.state.as_deref(), &mut violations),
        min_price: query.min_price,
        max_price: query.max_price,
        search: clean_text(query.search.as_deref()),
    };
    if let Some((min, max)) = filter
        .min_price
        .zip(filter.max_price)
        .filter(|(min, max)| min > max)
    {
        violations.push(FieldViolation::new(
            "min_price",
            format!("Minimum price {min} is above maximum price {max}"),
        ));
    }
    ApiError::check(violations)?;

    let rooms: Vec<RoomRecord> = persistence
        .list_rooms(&filter)
        .map_err(translate_persistence_error)?;
    debug!(count = rooms.len(), "Listed rooms");
    Ok(RoomListResponse::new(&rooms))
}

/// Lists rooms that can be assigned right now.
///
/// # Errors
///
/// Returns an error if the rooms cannot be loaded.
pub fn available_rooms(persistence: &mut Persistence) -> Result<RoomListResponse, ApiError> {
    let filter: RoomFilter = RoomFilter {
        state: Some(RoomState::Available),
        ..RoomFilter::default()
    };
    let rooms: Vec<RoomRecord> = persistence
        .list_rooms(&filter)
        .map_err(translate_persistence_error)?;
    Ok(RoomListResponse::new(&rooms))
}

/// Groups every room by type, in type order.
///
/// # Errors
///
/// Returns an error if the rooms cannot be loaded.
pub fn rooms_by_type(persistence: &mut Persistence) -> Result<RoomsByTypeResponse, ApiError> {
    let rooms: Vec<RoomRecord> = persistence
        .list_rooms(&RoomFilter::default())
        .map_err(translate_persistence_error)?;

    let groups: Vec<RoomTypeGroup> = RoomType::ALL
        .iter()
        .map(|room_type| {
            let members: Vec<&RoomRecord> = rooms
                .iter()
                .filter(|r| r.room.room_type == *room_type)
                .collect();
            RoomTypeGroup {
                room_type: *room_type,
                count: members.len(),
                available: members
                    .iter()
                    .filter(|r| r.room.state == RoomState::Available)
                    .count(),
                rooms: members.into_iter().map(RoomResponse::from).collect(),
            }
        })
        .filter(|group| group.count > 0)
        .collect();

    Ok(RoomsByTypeResponse { groups })
}

/// Registry-wide room figures.
///
/// # Errors
///
/// Returns an error if the rooms cannot be loaded.
pub fn room_statistics(persistence: &mut Persistence) -> Result<RoomStatistics, ApiError> {
    let inputs: ReportInputs = persistence
        .load_report_inputs()
        .map_err(translate_persistence_error)?;
    Ok(innkeep_reports::room_statistics(&inputs.rooms))
}

/// Answers whether a room number is free.
///
/// # Errors
///
/// Returns an error if the number is out of range.
pub fn check_room_number(
    persistence: &mut Persistence,
    request: &CheckNumberRequest,
) -> Result<CheckNumberResponse, ApiError> {
    innkeep_domain::validate_room_number(request.number)
        .map_err(crate::error::translate_domain_error)?;

    let holder: Option<i64> = persistence
        .find_room_by_number(request.number)
        .map_err(translate_persistence_error)?
        .map(|r| r.room.room_id)
        .filter(|room_id| Some(*room_id) != request.exclude_room_id);

    let message: String = match holder {
        Some(room_id) => format!("Room number {} is used by room {room_id}", request.number),
        None => format!("Room number {} is available", request.number),
    };
    Ok(CheckNumberResponse {
        number: request.number,
        available: holder.is_none(),
        room_id: holder,
        message,
    })
}

/// Marks a dirty room clean.
///
/// # Errors
///
/// Returns an error if the room does not exist or is not dirty.
pub fn clean_room(
    persistence: &mut Persistence,
    room_id: i64,
    now: OffsetDateTime,
) -> Result<RoomResponse, ApiError> {
    let record: RoomRecord = persistence
        .clean_room(room_id, now)
        .map_err(translate_persistence_error)?;
    info!(room_id, "Room cleaned");
    Ok(RoomResponse::from(&record))
}

/// Takes a room out of service.
///
/// # Errors
///
/// Returns an error if the room does not exist or is already in maintenance.
pub fn begin_maintenance(
    persistence: &mut Persistence,
    room_id: i64,
    now: OffsetDateTime,
) -> Result<RoomResponse, ApiError> {
    let record: RoomRecord = persistence
        .begin_maintenance(room_id, now)
        .map_err(translate_persistence_error)?;
    Ok(RoomResponse::from(&record))
}

/// Returns a room to service.
///
/// # Errors
///
/// Returns an error if the room does not exist or is not in maintenance.
pub fn end_maintenance(
    persistence: &mut Persistence,
    room_id: i64,
    now: OffsetDateTime,
) -> Result<RoomResponse, ApiError> {
    let record: RoomRecord = persistence
        .end_maintenance(room_id, now)
        .map_err(translate_persistence_error)?;
    Ok(RoomResponse::from(&record))
}
