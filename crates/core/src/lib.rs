// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Occupancy lifecycle for the Innkeep hotel back office.
//!
//! Rooms change state only through the commands in this crate. `apply`
//! validates a [`Command`] against an [`OccupancySnapshot`] and returns a
//! [`Transition`] describing every room change and ledger write; the
//! persistence layer executes it atomically.

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

mod apply;
mod command;
mod error;
mod invariants;
mod state;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use invariants::check_invariants;
pub use state::{OccupancySnapshot, OpenedEntry, ReleasedEntry, RoomChange, RoomSlot, Transition};
