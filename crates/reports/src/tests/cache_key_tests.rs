// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::str::FromStr;

use crate::{ReportError, ReportKey, ReportParameters, ReportType};

#[test]
fn test_parameter_order_does_not_change_key() {
    let a: ReportParameters = ReportParameters::new()
        .with("start_date", "2026-03-01")
        .with("end_date", "2026-03-31")
        .with("limit", 10);
    let b: ReportParameters = ReportParameters::new()
        .with("limit", 10)
        .with("end_date", "2026-03-31")
        .with("start_date", "2026-03-01");

    assert_eq!(
        ReportKey::new(ReportType::ClientFrequency, &a),
        ReportKey::new(ReportType::ClientFrequency, &b)
    );
    assert_eq!(a.canonical(), "end_date=2026-03-31&limit=10&start_date=2026-03-01");
}

#[test]
fn test_different_values_produce_different_keys() {
    let a: ReportParameters = ReportParameters::new().with("limit", 5);
    let b: ReportParameters = ReportParameters::new().with("limit", 6);
    assert_ne!(
        ReportKey::new(ReportType::RoomPopularity, &a),
        ReportKey::new(ReportType::RoomPopularity, &b)
    );
}

#[test]
fn test_report_type_is_part_of_key() {
    let parameters: ReportParameters = ReportParameters::new().with("limit", 5);
    assert_ne!(
        ReportKey::new(ReportType::RoomPopularity, &parameters),
        ReportKey::new(ReportType::ClientFrequency, &parameters)
    );
}

#[test]
fn test_canonical_form_decodes() {
    let parameters: ReportParameters = ReportParameters::from_canonical("b=2&a=1").unwrap();
    assert_eq!(parameters.get("a"), Some("1"));
    assert_eq!(parameters.canonical(), "a=1&b=2");
    assert_eq!(ReportParameters::from_canonical("").unwrap().canonical(), "");
    assert!(matches!(
        ReportParameters::from_canonical("a"),
        Err(ReportError::MalformedParameters(_))
    ));
}

#[test]
fn test_report_type_names() {
    assert_eq!(
        ReportType::from_str("seasonal_sales"),
        Ok(ReportType::SeasonalSales)
    );
    assert!(ReportType::from_str("predictions").is_err());
    assert!(ReportType::Profitability.is_cached());
    assert!(!ReportType::Dashboard.is_cached());
}
