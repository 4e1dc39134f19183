// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lesson cancellation rules.
//!
//! Cancellation is restricted to the two parties of a lesson and to
//! lessons that have not reached a terminal state. The slot release that
//! accompanies a cancellation happens in the same persistence transaction
//! as the status change; these checks only decide whether that transaction
//! may run.

use crate::error::CoreError;
use tutoria_domain::LessonStatus;

/// Ensures the caller is one of the lesson's two parties.
///
/// Callers outside the lesson learn nothing about it; the resulting error
/// is reported as not-found at the HTTP boundary.
///
/// # Arguments
///
/// * `lesson_id` - The lesson being cancelled
/// * `caller_id` - The authenticated user
/// * `student_id` - The lesson's student
/// * `tutor_id` - The lesson's tutor
///
/// # Errors
///
/// Returns `CoreError::NotLessonParty` if the caller is neither party.
pub const fn ensure_lesson_party(
    lesson_id: i64,
    caller_id: i64,
    student_id: i64,
    tutor_id: i64,
) -> Result<(), CoreError> {
    if caller_id == student_id || caller_id == tutor_id {
        Ok(())
    } else {
        Err(CoreError::NotLessonParty { lesson_id })
    }
}

/// Ensures a lesson can still be cancelled.
///
/// # Arguments
///
/// * `lesson_id` - The lesson being cancelled
/// * `status` - The lesson's current status
///
/// # Errors
///
/// Returns `CoreError::LessonNotCancellable` if the lesson is already
/// `Done` or `Cancelled`.
pub const fn ensure_cancellable(lesson_id: i64, status: LessonStatus) -> Result<(), CoreError> {
    if status.is_terminal() {
        Err(CoreError::LessonNotCancellable { lesson_id, status })
    } else {
        Ok(())
    }
}
