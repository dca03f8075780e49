// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Field-level validation for rooms and clients.
//!
//! Each rule is a standalone step returning `Result<(), DomainError>`.
//! The `validate_*_spec`/`validate_client_profile` entry points run every
//! step and collect all failures so callers can report them together.

use crate::error::DomainError;
use crate::types::{
    ClientProfile, Document, DocumentType, MAX_ROOMS_PER_CLIENT, RoomNumber, RoomSpec,
};
use rust_decimal::Decimal;
use time::OffsetDateTime;

const MAX_NAME_LENGTH: usize = 100;
const MAX_DESCRIPTION_LENGTH: usize = 500;
const MAX_ADDRESS_LENGTH: usize = 200;
const MAX_DOCUMENT_LENGTH: usize = 30;
const MAX_AGE: i64 = 120;

/// Largest amount representable with eight digits and two decimals.
fn max_amount() -> Decimal {
    Decimal::new(99_999_999, 2)
}

fn validate_money(value: &Decimal) -> Result<(), String> {
    if value.is_sign_negative() || value.is_zero() {
        return Err(format!("{value} must be greater than zero"));
    }
    if value.normalize().scale() > 2 {
        return Err(format!("{value} has more than two decimal places"));
    }
    if *value > max_amount() {
        return Err(format!("{value} exceeds the maximum of {}", max_amount()));
    }
    Ok(())
}

/// Validates a room number.
///
/// # Errors
///
/// Returns `DomainError::InvalidRoomNumber` if the number is out of range.
pub fn validate_room_number(number: i64) -> Result<RoomNumber, DomainError> {
    RoomNumber::new(number)
}

/// Validates a nightly price: positive, at most two decimals, at most eight digits.
///
/// # Errors
///
/// Returns `DomainError::InvalidNightlyPrice` describing the violation.
pub fn validate_nightly_price(price: &Decimal) -> Result<(), DomainError> {
    validate_money(price).map_err(DomainError::InvalidNightlyPrice)
}

/// Validates an optional room description.
///
/// # Errors
///
/// Returns `DomainError::DescriptionTooLong` above 500 characters.
pub fn validate_description(description: Option<&str>) -> Result<(), DomainError> {
    let length: usize = description.map_or(0, |d| d.chars().count());
    if length > MAX_DESCRIPTION_LENGTH {
        return Err(DomainError::DescriptionTooLong { length });
    }
    Ok(())
}

/// Runs every room rule and returns all violations.
#[must_use]
pub fn validate_room_spec(spec: &RoomSpec) -> Vec<DomainError> {
    [
        validate_room_number(spec.number).map(|_| ()),
        validate_nightly_price(&spec.nightly_price),
        validate_description(spec.description.as_deref()),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}

/// Validates a document number against the format for its type.
///
/// National IDs are exactly eight ASCII digits. Passports and foreign IDs
/// are one to thirty ASCII alphanumerics.
///
/// # Errors
///
/// Returns `DomainError::InvalidDocumentNumber` describing the violation.
pub fn validate_document(document: &Document) -> Result<(), DomainError> {
    let number: &str = &document.number;
    let reason: Option<String> = match document.document_type {
        DocumentType::NationalId => {
            if number.len() == 8 && number.bytes().all(|b| b.is_ascii_digit()) {
                None
            } else {
                Some(String::from("must be exactly 8 digits"))
            }
        }
        DocumentType::Passport | DocumentType::ForeignId => {
            if number.is_empty() || number.len() > MAX_DOCUMENT_LENGTH {
                Some(format!("must be 1 to {MAX_DOCUMENT_LENGTH} characters"))
            } else if !number.bytes().all(|b| b.is_ascii_alphanumeric()) {
                Some(String::from("must contain only letters and digits"))
            } else {
                None
            }
        }
    };

    reason.map_or(Ok(()), |reason| {
        Err(DomainError::InvalidDocumentNumber {
            document_type: document.document_type,
            reason,
        })
    })
}

/// Validates that the planned checkout, when both are known, follows check-in.
///
/// # Errors
///
/// Returns `DomainError::CheckoutNotAfterCheckIn` if checkout is not strictly later.
pub fn validate_stay_dates(
    check_in: Option<OffsetDateTime>,
    planned_checkout: Option<OffsetDateTime>,
) -> Result<(), DomainError> {
    match (check_in, planned_checkout) {
        (Some(start), Some(end)) if end <= start => Err(DomainError::CheckoutNotAfterCheckIn),
        _ => Ok(()),
    }
}

/// Validates a required name field.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the value is blank or longer than 100 characters.
pub fn validate_name(field: &'static str, value: &str) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::InvalidName {
            field,
            reason: String::from("must not be empty"),
        });
    }
    if value.chars().count() > MAX_NAME_LENGTH {
        return Err(DomainError::InvalidName {
            field,
            reason: format!("must be at most {MAX_NAME_LENGTH} characters"),
        });
    }
    Ok(())
}

/// Validates the number of rooms a client asks for.
///
/// # Errors
///
/// Returns `DomainError::InvalidDesiredRooms` outside `1..=10`.
pub fn validate_desired_rooms(count: i64) -> Result<(), DomainError> {
    let within: bool = usize::try_from(count).is_ok_and(|c| (1..=MAX_ROOMS_PER_CLIENT).contains(&c));
    if within {
        Ok(())
    } else {
        Err(DomainError::InvalidDesiredRooms(count))
    }
}

/// Validates the amount a client paid.
///
/// # Errors
///
/// Returns `DomainError::InvalidAmountPaid` describing the violation.
pub fn validate_amount_paid(amount: &Decimal) -> Result<(), DomainError> {
    validate_money(amount).map_err(DomainError::InvalidAmountPaid)
}

/// Validates an optional age.
///
/// # Errors
///
/// Returns `DomainError::InvalidAge` outside `1..=120`.
pub fn validate_age(age: Option<i64>) -> Result<(), DomainError> {
    match age {
        Some(value) if !(1..=MAX_AGE).contains(&value) => Err(DomainError::InvalidAge(value)),
        _ => Ok(()),
    }
}

/// Validates an optional phone number: 7 to 15 ASCII digits.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhone` on any other shape.
pub fn validate_phone(phone: Option<&str>) -> Result<(), DomainError> {
    let Some(phone) = phone else {
        return Ok(());
    };
    if (7..=15).contains(&phone.len()) && phone.bytes().all(|b| b.is_ascii_digit()) {
        Ok(())
    } else {
        Err(DomainError::InvalidPhone(phone.to_string()))
    }
}

/// Validates an optional address.
///
/// # Errors
///
/// Returns `DomainError::AddressTooLong` above 200 characters.
pub fn validate_address(address: Option<&str>) -> Result<(), DomainError> {
    let length: usize = address.map_or(0, |a| a.chars().count());
    if length > MAX_ADDRESS_LENGTH {
        return Err(DomainError::AddressTooLong { length });
    }
    Ok(())
}

/// Runs every client field rule and returns all violations.
///
/// Order: document format, stay dates, then the remaining fields. The
/// active-document check needs the ledger and is run by the caller.
#[must_use]
pub fn validate_client_profile(profile: &ClientProfile) -> Vec<DomainError> {
    [
        validate_document(&profile.document),
        validate_stay_dates(profile.check_in, profile.planned_checkout),
        validate_name("first_names", &profile.first_names),
        validate_name("last_names", &profile.last_names),
        validate_desired_rooms(profile.desired_rooms),
        validate_amount_paid(&profile.amount_paid),
        validate_age(profile.age),
        validate_phone(profile.phone.as_deref()),
        validate_address(profile.address.as_deref()),
    ]
    .into_iter()
    .filter_map(Result::err)
    .collect()
}
