// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tutoria_domain::{DomainError, LessonStatus, SlotStatus};

/// Errors that can occur during scheduling and booking decisions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// Slot generation was requested against an inactive availability.
    InactiveAvailability {
        /// The availability that is not active.
        availability_id: i64,
    },
    /// The slot is not open for booking.
    SlotNotAvailable {
        /// The slot that was requested.
        slot_id: i64,
        /// The status the slot is actually in.
        status: SlotStatus,
    },
    /// A tutor attempted to book their own slot.
    OwnSlotBooking {
        /// The slot that was requested.
        slot_id: i64,
    },
    /// The lesson cannot be cancelled from its current status.
    LessonNotCancellable {
        /// The lesson that was requested.
        lesson_id: i64,
        /// The status the lesson is actually in.
        status: LessonStatus,
    },
    /// The caller is neither the student nor the tutor of the lesson.
    NotLessonParty {
        /// The lesson that was requested.
        lesson_id: i64,
    },
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::InactiveAvailability { availability_id } => {
                write!(
                    f,
                    "Availability {availability_id} is inactive and cannot generate slots"
                )
            }
            Self::SlotNotAvailable { slot_id, status } => {
                write!(f, "Slot {slot_id} is not available: status is {status}")
            }
            Self::OwnSlotBooking { slot_id } => {
                write!(f, "Slot {slot_id} belongs to the booking user")
            }
            Self::LessonNotCancellable { lesson_id, status } => {
                write!(
                    f,
                    "Lesson {lesson_id} cannot be cancelled: status is {status}"
                )
            }
            Self::NotLessonParty { lesson_id } => {
                write!(f, "Lesson {lesson_id} does not involve the calling user")
            }
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
