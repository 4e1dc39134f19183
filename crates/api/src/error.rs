// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use tutoria::CoreError;
use tutoria_domain::DomainError;
use tutoria_persistence::PersistenceError;

/// Authentication and authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
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
    /// The resource exists but is no longer in a state that permits the
    /// requested transition, typically because a concurrent request won.
    Conflict {
        /// The type of resource that is in a conflicting state.
        resource_type: String,
        /// A human-readable description of the conflict.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
    /// Password policy violation.
    PasswordPolicyViolation {
        /// A human-readable description of the policy violation.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::DomainRuleViolation { rule, message } => {
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
            Self::Conflict {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} conflict: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
            Self::PasswordPolicyViolation { message } => {
                write!(f, "Password policy violation: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AuthenticationFailed { reason } => Self::AuthenticationFailed { reason },
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
        }
    }
}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::PasswordPolicyViolation {
            message: err.to_string(),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::InvalidWeekday { number } => ApiError::InvalidInput {
            field: String::from("weekdays"),
            message: format!("Invalid weekday {number}: must be between 1 (Monday) and 7 (Sunday)"),
        },
        DomainError::EmptyWeekdays => ApiError::InvalidInput {
            field: String::from("weekdays"),
            message: String::from("Availability must declare at least one weekday"),
        },
        DomainError::DuplicateWeekday { number } => ApiError::InvalidInput {
            field: String::from("weekdays"),
            message: format!("Weekday {number} appears more than once"),
        },
        DomainError::EmptyTimeBlocks => ApiError::InvalidInput {
            field: String::from("time_blocks"),
            message: String::from("Availability must declare at least one time block"),
        },
        DomainError::InvalidTimeOrder { start, end } => ApiError::DomainRuleViolation {
            rule: String::from("time_block_order"),
            message: format!("Time block must start before it ends: got {start} to {end}"),
        },
        DomainError::OverlappingTimeBlocks { first, second } => ApiError::DomainRuleViolation {
            rule: String::from("non_overlapping_blocks"),
            message: format!("Time blocks {first} and {second} overlap"),
        },
        DomainError::DateParseError { date_string } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Failed to parse date '{date_string}': expected YYYY-MM-DD"),
        },
        DomainError::TimeParseError { time_string } => ApiError::InvalidInput {
            field: String::from("time"),
            message: format!("Failed to parse time '{time_string}': expected HH:mm"),
        },
        DomainError::NotAMonday { date, weekday } => ApiError::InvalidInput {
            field: String::from("monday_date"),
            message: format!("Week anchor must be a Monday, but {date} is a {weekday}"),
        },
        DomainError::InvalidSlotStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid slot status: {value}"),
        },
        DomainError::InvalidLessonStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Invalid lesson status: {value}"),
        },
        DomainError::InvalidModality(value) => ApiError::InvalidInput {
            field: String::from("modality"),
            message: format!("Invalid modality: {value}"),
        },
        DomainError::InvalidTimezone(value) => ApiError::InvalidInput {
            field: String::from("timezone"),
            message: format!("Invalid timezone: {value}"),
        },
        DomainError::InvalidEmail(msg) => ApiError::InvalidInput {
            field: String::from("email"),
            message: msg,
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::DateArithmeticOverflow { operation } => ApiError::InvalidInput {
            field: String::from("date"),
            message: format!("Date arithmetic overflow while {operation}"),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly. A party check failure maps to not-found so that lesson IDs are
/// not revealed to outsiders.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InactiveAvailability { availability_id } => ApiError::DomainRuleViolation {
            rule: String::from("active_availability"),
            message: format!(
                "Availability {availability_id} is inactive and cannot generate slots"
            ),
        },
        CoreError::SlotNotAvailable { slot_id, status } => ApiError::Conflict {
            resource_type: String::from("Slot"),
            message: format!("Slot {slot_id} is not available: status is {status}"),
        },
        CoreError::OwnSlotBooking { slot_id } => ApiError::DomainRuleViolation {
            rule: String::from("no_self_booking"),
            message: format!("Tutors cannot book their own slot {slot_id}"),
        },
        CoreError::LessonNotCancellable { lesson_id, status } => ApiError::Conflict {
            resource_type: String::from("Lesson"),
            message: format!("Lesson {lesson_id} cannot be cancelled: status is {status}"),
        },
        CoreError::NotLessonParty { lesson_id } => ApiError::ResourceNotFound {
            resource_type: String::from("Lesson"),
            message: format!("Lesson {lesson_id} not found"),
        },
    }
}

/// Translates a persistence error into an API error.
///
/// State-change races surface as conflicts; duplicate emails surface as a
/// domain rule violation so registration does not 500 on a taken address.
/// Anything infrastructural maps to an internal error.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::DuplicateEmail(email) => ApiError::DomainRuleViolation {
            rule: String::from("unique_email"),
            message: format!("An account already exists for email: {email}"),
        },
        PersistenceError::UserNotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: msg,
        },
        PersistenceError::SessionNotFound(msg) | PersistenceError::SessionExpired(msg) => {
            ApiError::AuthenticationFailed { reason: msg }
        }
        PersistenceError::SlotNotFound(slot_id) => ApiError::ResourceNotFound {
            resource_type: String::from("Slot"),
            message: format!("Slot {slot_id} not found"),
        },
        PersistenceError::SlotStateChanged(slot_id) => ApiError::Conflict {
            resource_type: String::from("Slot"),
            message: format!("Slot {slot_id} was taken by another booking"),
        },
        PersistenceError::LessonStateChanged(lesson_id) => ApiError::Conflict {
            resource_type: String::from("Lesson"),
            message: format!("Lesson {lesson_id} already left the cancellable state"),
        },
        PersistenceError::NotFound(msg) => ApiError::ResourceNotFound {
            resource_type: String::from("Resource"),
            message: msg,
        },
        other => ApiError::Internal {
            message: other.to_string(),
        },
    }
}
