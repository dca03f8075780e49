// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::types::{DocumentType, RoomState};

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Room number outside `1..=9999`.
    InvalidRoomNumber(i64),
    /// Room type string not recognized.
    InvalidRoomType(String),
    /// Room state string not recognized.
    InvalidRoomState(String),
    /// Nightly price is not positive or has too much precision.
    InvalidNightlyPrice(String),
    /// Room description exceeds the allowed length.
    DescriptionTooLong {
        /// Length of the rejected description, in characters.
        length: usize,
    },
    /// The requested room state change is not allowed.
    InvalidRoomTransition {
        /// The current state.
        from: RoomState,
        /// The requested state.
        to: RoomState,
    },
    /// Document type string not recognized.
    InvalidDocumentType(String),
    /// Document number does not match the format for its type.
    InvalidDocumentNumber {
        /// The declared document type.
        document_type: DocumentType,
        /// Description of the format violation.
        reason: String,
    },
    /// Payment type string not recognized.
    InvalidPaymentType(String),
    /// Ledger state string not recognized.
    InvalidLedgerState(String),
    /// A name field is empty or too long.
    InvalidName {
        /// Which name field was rejected.
        field: &'static str,
        /// Description of the validation error.
        reason: String,
    },
    /// Desired room count outside `1..=10`.
    InvalidDesiredRooms(i64),
    /// Amount paid is not positive or has too much precision.
    InvalidAmountPaid(String),
    /// Age outside `1..=120`.
    InvalidAge(i64),
    /// Phone is not 7 to 15 digits.
    InvalidPhone(String),
    /// Address exceeds the allowed length.
    AddressTooLong {
        /// Length of the rejected address, in characters.
        length: usize,
    },
    /// Planned checkout is not strictly after check-in.
    CheckoutNotAfterCheckIn,
    /// Another client holding the same document still has active rooms.
    ActiveDocumentConflict {
        /// The document type.
        document_type: DocumentType,
        /// The document number.
        document_number: String,
        /// The client record currently holding rooms.
        client_id: i64,
    },
}

impl DomainError {
    /// The request field this error refers to.
    #[must_use]
    pub const fn field(&self) -> &'static str {
        match self {
            Self::InvalidRoomNumber(_) => "number",
            Self::InvalidRoomType(_) => "room_type",
            Self::InvalidRoomState(_) | Self::InvalidRoomTransition { .. } => "state",
            Self::InvalidNightlyPrice(_) => "nightly_price",
            Self::DescriptionTooLong { .. } => "description",
            Self::InvalidDocumentType(_) => "document_type",
            Self::InvalidDocumentNumber { .. } | Self::ActiveDocumentConflict { .. } => {
                "document_number"
            }
            Self::InvalidPaymentType(_) => "payment_type",
            Self::InvalidLedgerState(_) => "ledger_state",
            Self::InvalidName { field, .. } => field,
            Self::InvalidDesiredRooms(_) => "desired_rooms",
            Self::InvalidAmountPaid(_) => "amount_paid",
            Self::InvalidAge(_) => "age",
            Self::InvalidPhone(_) => "phone",
            Self::AddressTooLong { .. } => "address",
            Self::CheckoutNotAfterCheckIn => "planned_checkout",
        }
    }
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidRoomNumber(number) => {
                write!(f, "Invalid room number {number}: must be between 1 and 9999")
            }
            Self::InvalidRoomType(value) => write!(
                f,
                "Invalid room type '{value}': expected simple, double, triple or family"
            ),
            Self::InvalidRoomState(value) => write!(
                f,
                "Invalid room state '{value}': expected available, occupied, dirty or maintenance"
            ),
            Self::InvalidNightlyPrice(msg) => write!(f, "Invalid nightly price: {msg}"),
            Self::DescriptionTooLong { length } => write!(
                f,
                "Description is {length} characters long; at most 500 are allowed"
            ),
            Self::InvalidRoomTransition { from, to } => {
                write!(f, "Room cannot move from {from} to {to}")
            }
            Self::InvalidDocumentType(value) => write!(
                f,
                "Invalid document type '{value}': expected national_id, passport or foreign_id"
            ),
            Self::InvalidDocumentNumber {
                document_type,
                reason,
            } => write!(f, "Invalid {document_type} number: {reason}"),
            Self::InvalidPaymentType(value) => write!(
                f,
                "Invalid payment type '{value}': expected cash, digital_wallet or card"
            ),
            Self::InvalidLedgerState(value) => write!(f, "Invalid ledger state '{value}'"),
            Self::InvalidName { field, reason } => write!(f, "Invalid {field}: {reason}"),
            Self::InvalidDesiredRooms(count) => write!(
                f,
                "Invalid desired room count {count}: must be between 1 and 10"
            ),
            Self::InvalidAmountPaid(msg) => write!(f, "Invalid amount paid: {msg}"),
            Self::InvalidAge(age) => write!(f, "Invalid age {age}: must be between 1 and 120"),
            Self::InvalidPhone(phone) => {
                write!(f, "Invalid phone '{phone}': must contain 7 to 15 digits")
            }
            Self::AddressTooLong { length } => write!(
                f,
                "Address is {length} characters long; at most 200 are allowed"
            ),
            Self::CheckoutNotAfterCheckIn => {
                write!(f, "Planned checkout must be after check-in")
            }
            Self::ActiveDocumentConflict {
                document_type,
                document_number,
                client_id,
            } => write!(
                f,
                "A client with {document_type} {document_number} is already checked in (client {client_id})"
            ),
        }
    }
}

impl std::error::Error for DomainError {}
