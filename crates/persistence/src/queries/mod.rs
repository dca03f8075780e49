// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `rooms`: room lookups and listings
//! - `clients`: client lookups with ledger counts, document checks
//! - `occupancy`: ledger entries and lifecycle snapshots
//! - `reports`: fact loading for the reporting engine
//! - `cache`: report cache lookups

pub mod cache;
pub mod clients;
pub mod occupancy;
pub mod reports;
pub mod rooms;
