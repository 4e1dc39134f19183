// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{CoreError, ensure_cancellable, ensure_lesson_party};
use tutoria_domain::LessonStatus;

#[test]
fn test_student_may_cancel_their_lesson() {
    let result: Result<(), CoreError> = ensure_lesson_party(10, 100, 100, 200);
    assert!(result.is_ok());
}

#[test]
fn test_tutor_may_cancel_their_lesson() {
    let result: Result<(), CoreError> = ensure_lesson_party(10, 200, 100, 200);
    assert!(result.is_ok());
}

#[test]
fn test_third_party_may_not_cancel() {
    let result: Result<(), CoreError> = ensure_lesson_party(10, 300, 100, 200);
    assert!(matches!(
        result,
        Err(CoreError::NotLessonParty { lesson_id: 10 })
    ));
}

#[test]
fn test_pending_lesson_is_cancellable() {
    let result: Result<(), CoreError> = ensure_cancellable(10, LessonStatus::Pending);
    assert!(result.is_ok());
}

#[test]
fn test_cancelled_lesson_is_not_cancellable_again() {
    let result: Result<(), CoreError> = ensure_cancellable(10, LessonStatus::Cancelled);
    assert!(matches!(
        result,
        Err(CoreError::LessonNotCancellable {
            lesson_id: 10,
            status: LessonStatus::Cancelled
        })
    ));
}

#[test]
fn test_done_lesson_is_not_cancellable() {
    let result: Result<(), CoreError> = ensure_cancellable(10, LessonStatus::Done);
    assert!(matches!(
        result,
        Err(CoreError::LessonNotCancellable {
            lesson_id: 10,
            status: LessonStatus::Done
        })
    ));
}
