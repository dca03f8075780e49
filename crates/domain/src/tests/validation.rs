// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;
use time::macros::datetime;

use crate::{
    ClientProfile, Document, DocumentType, DomainError, PaymentType, RoomSpec, RoomType,
    validate_client_profile, validate_document, validate_nightly_price, validate_phone,
    validate_room_spec, validate_stay_dates,
};

fn create_test_profile() -> ClientProfile {
    ClientProfile {
        first_names: String::from("Ana Lucia"),
        last_names: String::from("Quispe Mamani"),
        document: Document::new(DocumentType::NationalId, "45871236"),
        desired_rooms: 1,
        payment_type: PaymentType::Cash,
        amount_paid: Decimal::new(15000, 2),
        age: Some(34),
        phone: Some(String::from("987654321")),
        address: Some(String::from("Av. Arequipa 123")),
        check_in: Some(datetime!(2026-03-01 14:00 UTC)),
        planned_checkout: Some(datetime!(2026-03-03 12:00 UTC)),
    }
}

#[test]
fn test_valid_profile_has_no_violations() {
    assert!(validate_client_profile(&create_test_profile()).is_empty());
}

#[test]
fn test_national_id_requires_eight_digits() {
    for number in ["1234567", "123456789", "1234567A"] {
        let result: Result<(), DomainError> =
            validate_document(&Document::new(DocumentType::NationalId, number));
        assert!(
            matches!(result, Err(DomainError::InvalidDocumentNumber { .. })),
            "{number}"
        );
    }
}

#[test]
fn test_passport_accepts_alphanumerics_up_to_thirty() {
    assert!(validate_document(&Document::new(DocumentType::Passport, "AB123456")).is_ok());
    assert!(validate_document(&Document::new(DocumentType::ForeignId, &"A".repeat(30))).is_ok());
    assert!(validate_document(&Document::new(DocumentType::ForeignId, &"A".repeat(31))).is_err());
    assert!(validate_document(&Document::new(DocumentType::Passport, "AB-1234")).is_err());
    assert!(validate_document(&Document::new(DocumentType::Passport, "")).is_err());
}

#[test]
fn test_document_number_is_trimmed() {
    let document: Document = Document::new(DocumentType::NationalId, " 45871236 ");
    assert_eq!(document.number, "45871236");
    assert!(validate_document(&document).is_ok());
}

#[test]
fn test_checkout_must_follow_check_in() {
    let check_in = datetime!(2026-03-01 14:00 UTC);
    assert_eq!(
        validate_stay_dates(Some(check_in), Some(check_in)),
        Err(DomainError::CheckoutNotAfterCheckIn)
    );
    assert!(validate_stay_dates(Some(check_in), None).is_ok());
    assert!(validate_stay_dates(None, Some(check_in)).is_ok());
}

#[test]
fn test_phone_shape() {
    assert!(validate_phone(Some("1234567")).is_ok());
    assert!(validate_phone(Some("123456")).is_err());
    assert!(validate_phone(Some("1234567890123456")).is_err());
    assert!(validate_phone(Some("+51987654321")).is_err());
    assert!(validate_phone(None).is_ok());
}

#[test]
fn test_nightly_price_rules() {
    assert!(validate_nightly_price(&Decimal::new(12050, 2)).is_ok());
    assert!(validate_nightly_price(&Decimal::new(120_000, 3)).is_ok());
    assert!(validate_nightly_price(&Decimal::ZERO).is_err());
    assert!(validate_nightly_price(&Decimal::new(-100, 2)).is_err());
    assert!(validate_nightly_price(&Decimal::new(12_345, 3)).is_err());
    assert!(validate_nightly_price(&Decimal::new(100_000_000, 2)).is_err());
}

#[test]
fn test_profile_collects_every_violation_in_order() {
    let mut profile: ClientProfile = create_test_profile();
    profile.document = Document::new(DocumentType::NationalId, "12");
    profile.planned_checkout = Some(datetime!(2026-02-01 12:00 UTC));
    profile.first_names = String::from("   ");
    profile.desired_rooms = 11;
    profile.age = Some(0);

    let violations: Vec<DomainError> = validate_client_profile(&profile);
    let fields: Vec<&str> = violations.iter().map(DomainError::field).collect();
    assert_eq!(
        fields,
        vec![
            "document_number",
            "planned_checkout",
            "first_names",
            "desired_rooms",
            "age"
        ]
    );
}

#[test]
fn test_room_spec_collects_violations() {
    let spec: RoomSpec = RoomSpec {
        number: 0,
        room_type: RoomType::Double,
        nightly_price: Decimal::ZERO,
        description: Some("x".repeat(501)),
    };
    assert_eq!(validate_room_spec(&spec).len(), 3);
}
