// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep_domain::{Room, RoomNumber};
use tracing::debug;

use crate::columns::{parse_column, parse_timestamp};
use crate::data_models::RoomRecord;
use crate::diesel_schema::{occupancy, rooms};
use crate::error::PersistenceError;

/// Diesel Queryable struct for room rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = rooms)]
pub(crate) struct RoomRow {
    pub room_id: i64,
    pub number: i32,
    pub room_type: String,
    pub nightly_price: String,
    pub state: String,
    pub description: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl RoomRow {
    pub(crate) fn to_room(&self) -> Result<Room, PersistenceError> {
        Ok(Room {
            room_id: self.room_id,
            number: RoomNumber::new(i64::from(self.number)).map_err(|_| {
                PersistenceError::corrupt("rooms", "number", &self.number.to_string())
            })?,
            room_type: parse_column("rooms", "room_type", &self.room_type)?,
            nightly_price: parse_column("rooms", "nightly_price", &self.nightly_price)?,
            state: parse_column("rooms", "state", &self.state)?,
        })
    }

    pub(crate) fn into_record(self) -> Result<RoomRecord, PersistenceError> {
        Ok(RoomRecord {
            room: self.to_room()?,
            created_at: parse_timestamp("rooms", "created_at", &self.created_at)?,
            updated_at: parse_timestamp("rooms", "updated_at", &self.updated_at)?,
            description: self.description,
        })
    }
}

/// Retrieves a room by ID.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
/// Returns `Ok(None)` if the room does not exist.
pub fn get_room(
    conn: &mut SqliteConnection,
    room_id: i64,
) -> Result<Option<RoomRecord>, PersistenceError> {
    debug!(room_id, "Looking up room");

    let result: Result<RoomRow, diesel::result::Error> = rooms::table
        .filter(rooms::room_id.eq(room_id))
        .select(RoomRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_record()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Retrieves a room by its number.
///
/// # Errors
///
/// Returns an error if the query fails or the row cannot be decoded.
pub fn find_room_by_number(
    conn: &mut SqliteConnection,
    number: i32,
) -> Result<Option<RoomRecord>, PersistenceError> {
    debug!(number, "Looking up room by number");

    let result: Result<RoomRow, diesel::result::Error> = rooms::table
        .filter(rooms::number.eq(number))
        .select(RoomRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row.into_record()?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists every room ordered by number.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be decoded.
pub fn list_rooms(conn: &mut SqliteConnection) -> Result<Vec<RoomRecord>, PersistenceError> {
    let rows: Vec<RoomRow> = rooms::table
        .order(rooms::number.asc())
        .select(RoomRow::as_select())
        .load(conn)?;

    debug!(count = rows.len(), "Loaded rooms");
    rows.into_iter().map(RoomRow::into_record).collect()
}

/// Returns the client holding a room through an active entry, if any.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn active_holder(
    conn: &mut SqliteConnection,
    room_id: i64,
) -> Result<Option<i64>, PersistenceError> {
    let holder: Option<i64> = occupancy::table
        .filter(occupancy::room_id.eq(room_id))
        .filter(occupancy::state.eq("active"))
        .select(occupancy::client_id)
        .first(conn)
        .optional()?;
    Ok(holder)
}
