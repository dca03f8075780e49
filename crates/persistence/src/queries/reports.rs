// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use innkeep_reports::{ClientFact, OccupancyFact, ReportInputs, RoomFact};
use tracing::debug;

use crate::data_models::{ClientRecord, RoomRecord};
use crate::diesel_schema::occupancy;
use crate::error::PersistenceError;
use crate::queries::clients::list_clients;
use crate::queries::occupancy::OccupancyRow;
use crate::queries::rooms::list_rooms;

fn room_fact(record: RoomRecord) -> RoomFact {
    RoomFact {
        room_id: record.room.room_id,
        number: record.room.number,
        room_type: record.room.room_type,
        nightly_price: record.room.nightly_price,
        state: record.room.state,
    }
}

fn client_fact(record: ClientRecord) -> ClientFact {
    ClientFact {
        client_id: record.client_id,
        full_name: record.profile.full_name(),
        payment_type: record.profile.payment_type,
        amount_paid: record.profile.amount_paid,
        desired_rooms: record.profile.desired_rooms,
        registered_at: record.created_at,
        actual_checkout: record.actual_checkout,
        active_rooms: record.active_rooms,
        rooms_assigned: record.rooms_assigned,
        document: record.profile.document,
    }
}

/// Loads every room, client and ledger entry as reporting facts.
///
/// # Errors
///
/// Returns an error if a query fails or a row cannot be decoded.
pub fn load_report_inputs(conn: &mut SqliteConnection) -> Result<ReportInputs, PersistenceError> {
    let rooms: Vec<RoomFact> = list_rooms(conn)?.into_iter().map(room_fact).collect();
    let clients: Vec<ClientFact> = list_clients(conn)?.into_iter().map(client_fact).collect();

    let rows: Vec<OccupancyRow> = occupancy::table
        .order(occupancy::entry_id.asc())
        .select(OccupancyRow::as_select())
        .load(conn)?;
    let occupancy: Vec<OccupancyFact> = rows
        .iter()
        .map(|row| {
            row.to_entry().map(|entry| OccupancyFact {
                entry_id: entry.entry_id,
                client_id: entry.client_id,
                room_id: entry.room_id,
                assigned_at: entry.assigned_at,
                released_at: entry.released_at,
            })
        })
        .collect::<Result<_, _>>()?;

    debug!(
        rooms = rooms.len(),
        clients = clients.len(),
        entries = occupancy.len(),
        "Loaded report inputs"
    );
    Ok(ReportInputs {
        rooms,
        clients,
        occupancy,
    })
}
