// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use innkeep::CoreError;
use innkeep_domain::DomainError;

/// Errors that can occur during persistence operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PersistenceError {
    /// A database error occurred.
    DatabaseError(String),
    /// Database connection failed.
    DatabaseConnectionFailed(String),
    /// Database migration failed.
    MigrationFailed(String),
    /// Query execution failed.
    QueryFailed(String),
    /// Serialization/deserialization error.
    SerializationError(String),
    /// Initialization error.
    InitializationError(String),
    /// Foreign key enforcement is not enabled.
    ForeignKeyEnforcementNotEnabled,
    /// A stored value could not be decoded into its domain type.
    CorruptRecord {
        /// The table holding the value.
        table: &'static str,
        /// The column holding the value.
        column: &'static str,
        /// The undecodable value.
        value: String,
    },
    /// The requested room does not exist.
    RoomNotFound(i64),
    /// The requested client does not exist.
    ClientNotFound(i64),
    /// The requested report cache entry does not exist.
    CacheEntryNotFound(i64),
    /// Another room already uses this number.
    DuplicateRoomNumber(i64),
    /// The room cannot be deleted while a client holds it.
    RoomInUse {
        /// The room.
        room_id: i64,
        /// The client holding it.
        client_id: i64,
    },
    /// A room changed state between loading and writing.
    RoomStateChanged {
        /// The room whose guarded update matched no row.
        room_id: i64,
    },
    /// A domain rule rejected the write.
    DomainViolation(DomainError),
    /// The occupancy lifecycle rejected the command.
    Rejected(CoreError),
    /// The requested resource was not found.
    NotFound(String),
    /// A general error occurred.
    Other(String),
}

impl PersistenceError {
    pub(crate) fn corrupt(table: &'static str, column: &'static str, value: &str) -> Self {
        Self::CorruptRecord {
            table,
            column,
            value: value.to_string(),
        }
    }
}

impl std::fmt::Display for PersistenceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DatabaseError(msg) => write!(f, "Database error: {msg}"),
            Self::DatabaseConnectionFailed(msg) => {
                write!(f, "Database connection failed: {msg}")
            }
            Self::MigrationFailed(msg) => write!(f, "Migration failed: {msg}"),
            Self::QueryFailed(msg) => write!(f, "Query failed: {msg}"),
            Self::SerializationError(msg) => write!(f, "Serialization error: {msg}"),
            Self::InitializationError(msg) => write!(f, "Initialization error: {msg}"),
            Self::ForeignKeyEnforcementNotEnabled => {
                write!(f, "Foreign key enforcement is not enabled")
            }
            Self::CorruptRecord {
                table,
                column,
                value,
            } => write!(f, "Stored value '{value}' in {table}.{column} is invalid"),
            Self::RoomNotFound(id) => write!(f, "Room {id} not found"),
            Self::ClientNotFound(id) => write!(f, "Client {id} not found"),
            Self::CacheEntryNotFound(id) => write!(f, "Report cache entry {id} not found"),
            Self::DuplicateRoomNumber(number) => {
                write!(f, "Room number {number} is already in use")
            }
            Self::RoomInUse { room_id, client_id } => write!(
                f,
                "Room {room_id} cannot be deleted while client {client_id} holds it"
            ),
            Self::RoomStateChanged { room_id } => write!(
                f,
                "Room {room_id} changed state while the request was being processed"
            ),
            Self::DomainViolation(err) => write!(f, "{err}"),
            Self::Rejected(err) => write!(f, "{err}"),
            Self::NotFound(msg) => write!(f, "Not found: {msg}"),
            Self::Other(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for PersistenceError {}

impl From<diesel::result::Error> for PersistenceError {
    fn from(err: diesel::result::Error) -> Self {
        match err {
            diesel::result::Error::NotFound => Self::NotFound("Record not found".to_string()),
            _ => Self::DatabaseError(err.to_string()),
        }
    }
}

impl From<diesel::ConnectionError> for PersistenceError {
    fn from(err: diesel::ConnectionError) -> Self {
        Self::DatabaseConnectionFailed(err.to_string())
    }
}

impl From<serde_json::Error> for PersistenceError {
    fn from(err: serde_json::Error) -> Self {
        Self::SerializationError(err.to_string())
    }
}

impl From<CoreError> for PersistenceError {
    fn from(err: CoreError) -> Self {
        Self::Rejected(err)
    }
}

impl From<DomainError> for PersistenceError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
