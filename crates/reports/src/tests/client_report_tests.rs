// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::{DocumentType, PaymentType};
use rust_decimal::Decimal;
use time::macros::datetime;

use crate::tests::helpers::{
    assert_close, client, create_test_calendar, create_test_inputs, create_test_period,
};
use crate::{ClientFrequencyReport, ClientStatistics, ReportInputs, client_frequency, client_statistics};

#[test]
fn test_client_frequency_groups_by_document() {
    let inputs: ReportInputs = create_test_inputs();
    let report: ClientFrequencyReport =
        client_frequency(&inputs, &create_test_period(), &create_test_calendar(), 10);

    assert_eq!(report.total_registrations, 4);
    assert_eq!(report.distinct_clients, 3);

    let numbers: Vec<&str> = report
        .clients
        .iter()
        .map(|row| row.document_number.as_str())
        .collect();
    // Returning guest first, then ties broken by amount paid.
    assert_eq!(numbers, vec!["10000001", "10000003", "10000002"]);

    let returning = &report.clients[0];
    assert_eq!(returning.document_type, DocumentType::NationalId);
    assert_eq!(returning.registrations, 2);
    assert_eq!(returning.total_paid, Decimal::new(300, 0));
    assert_eq!(returning.full_name, "Guest 3");
    assert_eq!(returning.first_registration, datetime!(2026-03-02 15:00 UTC));
    assert_eq!(returning.registrations_by_month.get("2026-03"), Some(&2));
    assert_close(returning.average_rooms_per_registration, 1.0);
}

#[test]
fn test_client_frequency_respects_limit() {
    let report: ClientFrequencyReport = client_frequency(
        &create_test_inputs(),
        &create_test_period(),
        &create_test_calendar(),
        1,
    );
    assert_eq!(report.clients.len(), 1);
    assert_eq!(report.distinct_clients, 3);
}

#[test]
fn test_client_frequency_buckets_by_hotel_local_day() {
    let mut inputs: ReportInputs = ReportInputs::default();
    // 22:00 on 31 March in Lima.
    inputs.clients.push(client(
        9,
        "20000000",
        PaymentType::Card,
        50,
        datetime!(2026-04-01 03:00 UTC),
    ));

    let report: ClientFrequencyReport = client_frequency(
        &inputs,
        &create_test_period(),
        &create_test_calendar(),
        10,
    );
    assert_eq!(report.total_registrations, 1);
}

#[test]
fn test_client_frequency_empty_period() {
    let report: ClientFrequencyReport = client_frequency(
        &ReportInputs::default(),
        &create_test_period(),
        &create_test_calendar(),
        10,
    );
    assert_eq!(report.total_registrations, 0);
    assert!(report.clients.is_empty());
    assert_eq!(report.period.days, 31);
}

#[test]
fn test_client_statistics() {
    let inputs: ReportInputs = create_test_inputs();
    let stats: ClientStatistics = client_statistics(&inputs.clients);

    assert_eq!(stats.total_clients, 5);
    assert_eq!(stats.active_clients, 1);
    assert_eq!(stats.inactive_clients, 4);
    assert_eq!(stats.total_collected, Decimal::new(1950, 0));
    assert_close(stats.average_rooms_per_client, 1.0);

    let national = stats
        .by_document_type
        .iter()
        .find(|share| share.document_type == DocumentType::NationalId)
        .unwrap();
    assert_eq!(national.clients, 5);
    assert_close(national.percentage, 100.0);

    let cash = stats
        .by_payment_type
        .iter()
        .find(|share| share.payment_type == PaymentType::Cash)
        .unwrap();
    assert_eq!(cash.clients, 3);
    assert_eq!(cash.amount, Decimal::new(1400, 0));
    assert_close(cash.percentage, 60.0);

    let top_ids: Vec<i64> = stats
        .top_clients_by_rooms
        .iter()
        .map(|c| c.client_id)
        .collect();
    assert_eq!(top_ids, vec![1, 2, 3, 4, 5]);
}

#[test]
fn test_client_statistics_empty_registry() {
    let stats: ClientStatistics = client_statistics(&[]);
    assert_eq!(stats.total_clients, 0);
    assert_close(stats.average_rooms_per_client, 0.0);
    assert!(stats.by_payment_type.iter().all(|s| s.percentage == 0.0));
    assert!(stats.top_clients_by_rooms.is_empty());
}
