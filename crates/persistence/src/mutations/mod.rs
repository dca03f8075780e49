// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `occupancy`: writes lifecycle transitions under a guarded update
//! - `rooms`: room registry writes and room state commands
//! - `clients`: client registry writes, assignment, release and removal
//! - `cache`: report cache writes
//!
//! Every public mutation runs in its own transaction. Anything touching room
//! state uses an immediate transaction so the write lock is taken up front.

pub mod cache;
pub mod clients;
pub mod occupancy;
pub mod rooms;
