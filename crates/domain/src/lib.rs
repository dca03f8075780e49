// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use types::{
    ClientProfile, Document, DocumentType, LedgerEntry, LedgerState, MAX_ROOM_NUMBER,
    MAX_ROOMS_PER_CLIENT, MIN_ROOM_NUMBER, PaymentType, Room, RoomNumber, RoomSpec, RoomState,
    RoomType,
};
pub use validation::{
    validate_address, validate_age, validate_amount_paid, validate_client_profile,
    validate_description, validate_desired_rooms, validate_document, validate_name,
    validate_nightly_price, validate_phone, validate_room_number, validate_room_spec,
    validate_stay_dates,
};
