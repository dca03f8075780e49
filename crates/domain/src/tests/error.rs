// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DocumentType, DomainError, RoomState};

#[test]
fn test_errors_name_their_field() {
    assert_eq!(DomainError::InvalidRoomNumber(0).field(), "number");
    assert_eq!(DomainError::CheckoutNotAfterCheckIn.field(), "planned_checkout");
    assert_eq!(
        DomainError::InvalidName {
            field: "last_names",
            reason: String::from("must not be empty"),
        }
        .field(),
        "last_names"
    );
    assert_eq!(
        DomainError::ActiveDocumentConflict {
            document_type: DocumentType::Passport,
            document_number: String::from("X1"),
            client_id: 4,
        }
        .field(),
        "document_number"
    );
}

#[test]
fn test_transition_error_message_names_states() {
    let err: DomainError = DomainError::InvalidRoomTransition {
        from: RoomState::Dirty,
        to: RoomState::Occupied,
    };
    assert_eq!(err.to_string(), "Room cannot move from dirty to occupied");
}

#[test]
fn test_document_error_message_names_type() {
    let err: DomainError = DomainError::InvalidDocumentNumber {
        document_type: DocumentType::NationalId,
        reason: String::from("must be exactly 8 digits"),
    };
    assert_eq!(
        err.to_string(),
        "Invalid national_id number: must be exactly 8 digits"
    );
}
