// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep_domain::{PaymentType, RoomNumber};
use rust_decimal::Decimal;
use time::macros::date;

use crate::tests::helpers::{
    assert_close, create_test_calendar, create_test_inputs, create_test_period,
};
use crate::{
    DashboardReport, GeneralStatsReport, ReportInputs, ReportPeriod, TrendDirection, dashboard,
    general_stats,
};

#[test]
fn test_dashboard_summary() {
    let report: DashboardReport =
        dashboard(&create_test_inputs(), &create_test_period(), &create_test_calendar());

    let summary = &report.summary;
    assert_eq!(summary.clients_in_period, 4);
    assert_eq!(summary.assignments_in_period, 4);
    assert_eq!(summary.revenue_in_period, Decimal::new(1050, 0));
    assert_eq!(summary.active_clients, 1);
    assert_eq!(summary.occupied_rooms, 1);
    assert_eq!(summary.total_rooms, 3);
    assert_close(summary.occupancy_rate, 33.33);
    assert_close(summary.daily_average_clients, 0.13);
    assert_eq!(summary.daily_average_revenue, Decimal::new(3387, 2));
}

#[test]
fn test_dashboard_breakdowns() {
    let report: DashboardReport =
        dashboard(&create_test_inputs(), &create_test_period(), &create_test_calendar());

    assert_eq!(report.clients_by_month.get("2026-03"), Some(&4));
    assert_eq!(report.top_rooms[0].number, RoomNumber::new(101).unwrap());
    assert_eq!(report.top_rooms[0].assignments, 3);
    assert_eq!(report.recent_clients[0].client_id, 5);
    assert_eq!(report.recent_clients.len(), 4);

    let cash = report
        .payment_distribution
        .iter()
        .find(|share| share.payment_type == PaymentType::Cash)
        .unwrap();
    assert_eq!(cash.clients, 2);
    assert_eq!(cash.amount, Decimal::new(500, 0));
    assert_close(cash.percentage, 50.0);
}

#[test]
fn test_general_stats_trends_against_previous_period() {
    let report: GeneralStatsReport =
        general_stats(&create_test_inputs(), &create_test_period(), &create_test_calendar())
            .unwrap();

    assert_eq!(report.previous_period.start, date!(2026-01-29));
    assert_eq!(report.previous_period.end, date!(2026-02-28));

    let clients = &report.trends.clients;
    assert_close(clients.current, 4.0);
    assert_close(clients.previous, 1.0);
    assert_eq!(clients.growth_percentage, Some(300.0));
    assert_eq!(clients.direction, TrendDirection::Growth);

    let revenue = &report.trends.revenue;
    assert_close(revenue.growth_percentage.unwrap(), 16.67);

    assert_eq!(report.clients.total, 5);
    assert_eq!(report.clients.in_period, 4);
    assert_eq!(report.clients.top_spender.as_ref().map(|s| s.client_id), Some(4));
    assert_eq!(report.revenue.total, Decimal::new(1950, 0));
    assert_eq!(report.revenue.average_per_client, Decimal::new(390, 0));
    assert_eq!(
        report.revenue.by_payment_type.get("cash"),
        Some(&Decimal::new(1400, 0))
    );
    assert_eq!(report.rooms.by_type.get("family"), Some(&1));
}

#[test]
fn test_general_stats_without_history_is_stable() {
    let period: ReportPeriod = ReportPeriod::new(date!(2025-01-01), date!(2025-01-10)).unwrap();
    let report: GeneralStatsReport =
        general_stats(&ReportInputs::default(), &period, &create_test_calendar()).unwrap();

    assert_eq!(report.trends.clients.direction, TrendDirection::Stable);
    assert_eq!(report.trends.clients.growth_percentage, None);
    assert!(report.clients.top_spender.is_none());
}

#[test]
fn test_general_stats_decline() {
    let period: ReportPeriod = ReportPeriod::new(date!(2026-03-01), date!(2026-03-01)).unwrap();
    let mut inputs: ReportInputs = create_test_inputs();
    // Move the February registration to the day before the period.
    inputs.clients[3].registered_at = time::macros::datetime!(2026-02-28 15:00 UTC);

    let report: GeneralStatsReport =
        general_stats(&inputs, &period, &create_test_calendar()).unwrap();
    assert_eq!(report.trends.clients.direction, TrendDirection::Decline);
    assert_eq!(report.trends.clients.growth_percentage, Some(-100.0));
}
