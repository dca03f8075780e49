// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_reports::{ClientFact, ReportInputs};
use time::macros::datetime;

use super::{create_client_profile, create_test_now, create_test_persistence, seed_rooms};
use crate::Persistence;

#[test]
fn test_empty_database_has_no_inputs() {
    let mut persistence: Persistence = create_test_persistence();

    assert_eq!(persistence.load_report_inputs().unwrap(), ReportInputs::default());
}

#[test]
fn test_inputs_reflect_rooms_clients_and_ledger() {
    let mut persistence: Persistence = create_test_persistence();
    let ids: Vec<i64> = seed_rooms(&mut persistence);
    let client_id: i64 = persistence
        .register_client(&create_client_profile("45871236"), &[ids[0], ids[1]], create_test_now())
        .unwrap()
        .client
        .client_id;
    persistence
        .release_client(client_id, datetime!(2026-03-12 11:00 UTC))
        .unwrap();

    let inputs: ReportInputs = persistence.load_report_inputs().unwrap();

    assert_eq!(inputs.rooms.len(), 3);
    assert_eq!(inputs.occupancy.len(), 2);
    assert!(inputs
        .occupancy
        .iter()
        .all(|fact| fact.released_at == Some(datetime!(2026-03-12 11:00 UTC))));

    let client: &ClientFact = &inputs.clients[0];
    assert_eq!(client.full_name, "Ana Lucia Quispe Rojas");
    assert_eq!(client.registered_at, create_test_now());
    assert_eq!(client.rooms_assigned, 2);
    assert!(!client.is_active());
    assert_eq!(
        client.actual_checkout,
        Some(datetime!(2026-03-12 11:00 UTC))
    );
}
