// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use innkeep::CoreError;
use innkeep_domain::DomainError;
use innkeep_persistence::PersistenceError;
use innkeep_reports::ReportError;
use serde::{Deserialize, Serialize};
use tracing::error;

/// One rejected request field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldViolation {
    /// The request field.
    pub field: String,
    /// A human-readable description of the problem.
    pub message: String,
}

impl FieldViolation {
    #[must_use]
    pub fn new(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: field.to_string(),
            message: message.into(),
        }
    }
}

impl From<&DomainError> for FieldViolation {
    fn from(err: &DomainError) -> Self {
        Self::new(err.field(), err.to_string())
    }
}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// One or more request fields were rejected.
    ValidationFailed {
        /// Every violation found, in validation order.
        violations: Vec<FieldViolation>,
    },
    /// A business rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// The request field the rule applies to.
        field: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error. Never shown to clients.
        message: String,
    },
}

impl ApiError {
    /// Field-level details for a 400 response body.
    #[must_use]
    pub fn violations(&self) -> Vec<FieldViolation> {
        match self {
            Self::ValidationFailed { violations } => violations.clone(),
            Self::DomainRuleViolation { field, message, .. }
            | Self::InvalidInput { field, message } => {
                vec![FieldViolation::new(field, message.clone())]
            }
            Self::ResourceNotFound { .. } | Self::Internal { .. } => Vec::new(),
        }
    }

    /// Wraps collected violations, or returns `Ok` when there are none.
    ///
    /// # Errors
    ///
    /// Returns `ApiError::ValidationFailed` if `violations` is not empty.
    pub fn check(violations: Vec<FieldViolation>) -> Result<(), Self> {
        if violations.is_empty() {
            Ok(())
        } else {
            Err(Self::ValidationFailed { violations })
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ValidationFailed { violations } => {
                write!(f, "Validation failed:")?;
                for violation in violations {
                    write!(f, " {}: {};", violation.field, violation.message)?;
                }
                Ok(())
            }
            Self::DomainRuleViolation { rule, message, .. } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidRoomTransition { .. } => ApiError::DomainRuleViolation {
            rule: String::from("room_state_transition"),
            field: err.field().to_string(),
            message: err.to_string(),
        },
        DomainError::ActiveDocumentConflict { .. } => ApiError::DomainRuleViolation {
            rule: String::from("active_document"),
            field: err.field().to_string(),
            message: err.to_string(),
        },
        _ => ApiError::InvalidInput {
            field: err.field().to_string(),
            message: err.to_string(),
        },
    }
}

/// Translates a lifecycle rejection into an API error.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::RoomNotFound(room_id) => ApiError::InvalidInput {
            field: String::from("rooms"),
            message: format!("Room {room_id} does not exist"),
        },
        CoreError::InvariantViolation(msg) => {
            error!(error = %msg, "Occupancy invariant violated");
            ApiError::Internal { message: msg }
        }
        CoreError::NoRoomsRequested
        | CoreError::DuplicateRoomInRequest(_)
        | CoreError::RoomNotAvailable { .. }
        | CoreError::RoomAlreadyAssigned { .. }
        | CoreError::TooManyRooms { .. } => ApiError::DomainRuleViolation {
            rule: String::from("room_assignment"),
            field: String::from("rooms"),
            message: err.to_string(),
        },
    }
}

/// Translates a report parameter error into an API error.
#[must_use]
pub fn translate_report_error(err: ReportError) -> ApiError {
    let field: &str = match &err {
        ReportError::InvalidDate { field, .. } => *field,
        ReportError::StartAfterEnd { .. } | ReportError::DateOutOfRange { .. } => "start_date",
        ReportError::InvalidLimit(_) => "limit",
        ReportError::InvalidTimezone(_) => "timezone",
        ReportError::UnknownReportType(name) => {
            return ApiError::ResourceNotFound {
                resource_type: String::from("Report"),
                message: format!("No report named '{name}'"),
            };
        }
        ReportError::MalformedParameters(_) => {
            error!(error = %err, "Stored report parameters are unreadable");
            return ApiError::Internal {
                message: err.to_string(),
            };
        }
    };
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a persistence error into an API error.
///
/// Storage failures are logged here and surface as `ApiError::Internal`.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::RoomNotFound(room_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Room"),
            message: format!("Room {room_id} does not exist"),
        },
        PersistenceError::ClientNotFound(client_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Client"),
            message: format!("Client {client_id} does not exist"),
        },
        PersistenceError::CacheEntryNotFound(cache_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Report cache entry"),
            message: format!("Cache entry {cache_id} does not exist"),
        },
        PersistenceError::NotFound(message) => ApiError::ResourceNotFound {
            resource_type: String::from("Record"),
            message,
        },
        PersistenceError::DuplicateRoomNumber(_) => ApiError::DomainRuleViolation {
            rule: String::from("unique_room_number"),
            field: String::from("number"),
            message: err.to_string(),
        },
        PersistenceError::RoomInUse { .. } => ApiError::DomainRuleViolation {
            rule: String::from("room_in_use"),
            field: String::from("room"),
            message: err.to_string(),
        },
        PersistenceError::RoomStateChanged { .. } => ApiError::DomainRuleViolation {
            rule: String::from("room_assignment"),
            field: String::from("rooms"),
            message: err.to_string(),
        },
        PersistenceError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        PersistenceError::Rejected(core_err) => translate_core_error(core_err),
        other => {
            error!(error = %other, "Persistence failure");
            ApiError::Internal {
                message: other.to_string(),
            }
        }
    }
}
