// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for slot booking and lesson creation.

use tutoria_persistence::Persistence;

use crate::{
    ApiError, AuthenticatedUser, BookLessonsRequest, BookLessonsResponse, LessonInfo,
    ListLessonsResponse, ListSlotsResponse, Role, book_slots, list_lessons, list_slots,
};

use super::helpers::{
    MATH_SUBJECT_ID, book_test_slot, create_test_availability, create_test_db,
    generate_test_week, register_test_student, register_test_tutor,
};

/// Registers a tutor, publishes a pattern, generates the test week, and
/// returns the tutor with the generated slot IDs.
fn setup_open_slots(persistence: &mut Persistence) -> (AuthenticatedUser, Vec<i64>) {
    let tutor: AuthenticatedUser = register_test_tutor(persistence, "tutor@example.com");
    let availability_id: i64 = create_test_availability(persistence, &tutor);
    generate_test_week(persistence, &tutor, availability_id);

    let slots: ListSlotsResponse = list_slots(persistence, Some(tutor.id), None).unwrap();
    let slot_ids: Vec<i64> = slots.slots.iter().map(|slot| slot.class_slot_id).collect();
    (tutor, slot_ids)
}

// ============================================================================
// Booking Tests
// ============================================================================

#[test]
fn test_booking_reserves_slot_and_creates_pending_lesson() {
    let mut persistence: Persistence = create_test_db();
    let (tutor, slot_ids) = setup_open_slots(&mut persistence);
    let student: AuthenticatedUser = register_test_student(&mut persistence, "stu@example.com");

    let response: BookLessonsResponse = book_test_slot(&mut persistence, &student, slot_ids[0]);

    assert_eq!(response.booked, 1);
    assert_eq!(response.outcomes.len(), 1);
    let lesson: &LessonInfo = response.outcomes[0].lesson.as_ref().unwrap();
    assert_eq!(lesson.class_slot_id, slot_ids[0]);
    assert_eq!(lesson.student_id, student.id);
    assert_eq!(lesson.tutor_id, tutor.id);
    assert_eq!(lesson.subject_id, MATH_SUBJECT_ID);
    assert_eq!(lesson.modality, "ONLINE");
    assert_eq!(lesson.status, "PENDING");

    // The slot is no longer open
    let reserved: ListSlotsResponse =
        list_slots(&mut persistence, Some(tutor.id), Some("RESERVED")).unwrap();
    assert_eq!(reserved.slots.len(), 1);
    assert_eq!(reserved.slots[0].class_slot_id, slot_ids[0]);
}

#[test]
fn test_booking_derives_schedule_from_slot() {
    let mut persistence: Persistence = create_test_db();
    let (_tutor, slot_ids) = setup_open_slots(&mut persistence);
    let student: AuthenticatedUser = register_test_student(&mut persistence, "stu@example.com");

    let response: BookLessonsResponse = book_test_slot(&mut persistence, &student, slot_ids[0]);

    // The lesson instant is the slot's own date and start time
    let lesson: &LessonInfo = response.outcomes[0].lesson.as_ref().unwrap();
    assert_eq!(lesson.scheduled_at, "2025-11-10T09:00:00");
}

#[test]
fn test_booking_reserved_slot_conflicts() {
    let mut persistence: Persistence = create_test_db();
    let (_tutor, slot_ids) = setup_open_slots(&mut persistence);
    let first: AuthenticatedUser = register_test_student(&mut persistence, "first@example.com");
    let second: AuthenticatedUser =
        register_test_student(&mut persistence, "second@example.com");

    book_test_slot(&mut persistence, &first, slot_ids[0]);

    let request: BookLessonsRequest = BookLessonsRequest {
        slot_ids: vec![slot_ids[0]],
        subject_id: MATH_SUBJECT_ID,
        modality: String::from("ONLINE"),
        tutor_id: None,
    };
    let result: Result<_, ApiError> = book_slots(&mut persistence, &request, &second);

    assert!(result.is_err());
    assert!(matches!(result.unwrap_err(), ApiError::Conflict { .. }));
}

#[test]
fn test_booking_unknown_slot_is_not_found() {
    let mut persistence: Persistence = create_test_db();
    let student: AuthenticatedUser = register_test_student(&mut persistence, "stu@example.com");

    let request: BookLessonsRequest = BookLessonsRequest {
        slot_ids: vec![9999],
        subject_id: MATH_SUBJECT_ID,
        modality: String::from("ONLINE"),
        tutor_id: None,
    };
    let result: Result<_, ApiError> = book_slots(&mut persistence, &request, &student);

    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        ApiError::ResourceNotFound { .. }
    ));
}

#[test]
fn test_booking_own_slot_is_rejected() {
    let mut persistence: Persistence = create_test_db();
    let (tutor, slot_ids) = setup_open_slots(&mut persistence);

    // A forged student identity carrying the tutor's own ID still cannot
    // book the tutor's slot
    let forged: AuthenticatedUser = AuthenticatedUser::new(tutor.id, Role::Student);
    let request: BookLessonsRequest = BookLessonsRequest {
        slot_ids: vec![slot_ids[0]],
        subject_id: MATH_SUBJECT_ID,
        modality: String::from("ONLINE"),
        tutor_id: None,
    };
    let result: Result<_, ApiError> = book_slots(&mut persistence, &request, &forged);

    assert!(result.is_err());
    let err: ApiError = result.unwrap_err();
    assert!(matches!(err, ApiError::DomainRuleViolation { .. }));
    if let ApiError::DomainRuleViolation { rule, .. } = err {
        assert_eq!(rule, "no_self_booking");
    }
}

#[test]
fn test_booking_with_mismatched_tutor_cross_check_is_rejected() {
    let mut persistence: Persistence = create_test_db();
    let (tutor, slot_ids) = setup_open_slots(&mut persistence);
    let student: AuthenticatedUser = register_test_student(&mut persistence, "stu@example.com");

    let request: BookLessonsRequest = BookLessonsRequest {
        slot_ids: vec![slot_ids[0]],
        subject_id: MATH_SUBJECT_ID,
        modality: String::from("ONLINE"),
        tutor_id: Some(tutor.id + 100),
    };
    let result: Result<_, ApiError> = book_slots(&mut persistence, &request, &student);

    assert!(result.is_err());
    assert!(matches!(result.unwrap_err(), ApiError::InvalidInput { .. }));

    // The cross-check fires before the reservation, so the slot stays open
    let open: ListSlotsResponse =
        list_slots(&mut persistence, Some(tutor.id), Some("AVAILABLE")).unwrap();
    assert!(open.slots.iter().any(|slot| slot.class_slot_id == slot_ids[0]));
}

// ============================================================================
// Request Validation Tests
// ============================================================================

#[test]
fn test_booking_requires_at_least_one_slot() {
    let mut persistence: Persistence = create_test_db();
    let student: AuthenticatedUser = register_test_student(&mut persistence, "stu@example.com");

    let request: BookLessonsRequest = BookLessonsRequest {
        slot_ids: vec![],
        subject_id: MATH_SUBJECT_ID,
        modality: String::from("ONLINE"),
        tutor_id: None,
    };
    let result: Result<_, ApiError> = book_slots(&mut persistence, &request, &student);

    assert!(result.is_err());
    let err: ApiError = result.unwrap_err();
    assert!(matches!(err, ApiError::InvalidInput { .. }));
    if let ApiError::InvalidInput { field, .. } = err {
        assert_eq!(field, "slot_ids");
    }
}

#[test]
fn test_booking_rejects_unknown_modality() {
    let mut persistence: Persistence = create_test_db();
    let (_tutor, slot_ids) = setup_open_slots(&mut persistence);
    let student: AuthenticatedUser = register_test_student(&mut persistence, "stu@example.com");

    let request: BookLessonsRequest = BookLessonsRequest {
        slot_ids: vec![slot_ids[0]],
        subject_id: MATH_SUBJECT_ID,
        modality: String::from("HYBRID"),
        tutor_id: None,
    };
    let result: Result<_, ApiError> = book_slots(&mut persistence, &request, &student);

    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        ApiError::InvalidInput { .. }
    ));
}

#[test]
fn test_booking_rejects_unknown_subject_before_touching_slots() {
    let mut persistence: Persistence = create_test_db();
    let (tutor, slot_ids) = setup_open_slots(&mut persistence);
    let student: AuthenticatedUser = register_test_student(&mut persistence, "stu@example.com");

    let request: BookLessonsRequest = BookLessonsRequest {
        slot_ids: vec![slot_ids[0]],
        subject_id: 9999,
        modality: String::from("ONLINE"),
        tutor_id: None,
    };
    let result: Result<_, ApiError> = book_slots(&mut persistence, &request, &student);

    assert!(result.is_err());
    assert!(matches!(
        result.unwrap_err(),
        ApiError::ResourceNotFound { .. }
    ));

    // No slot was reserved
    let reserved: ListSlotsResponse =
        list_slots(&mut persistence, Some(tutor.id), Some("RESERVED")).unwrap();
    assert!(reserved.slots.is_empty());
}

// ============================================================================
// Multi-slot Tests
// ============================================================================

#[test]
fn test_multi_slot_booking_books_every_open_slot() {
    let mut persistence: Persistence = create_test_db();
    let (_tutor, slot_ids) = setup_open_slots(&mut persistence);
    let student: AuthenticatedUser = register_test_student(&mut persistence, "stu@example.com");

    let request: BookLessonsRequest = BookLessonsRequest {
        slot_ids: slot_ids.clone(),
        subject_id: MATH_SUBJECT_ID,
        modality: String::from("ONSITE"),
        tutor_id: None,
    };
    let response: BookLessonsResponse =
        book_slots(&mut persistence, &request, &student).unwrap();

    assert_eq!(response.booked, 2);
    assert!(response.outcomes.iter().all(|o| o.lesson.is_some()));
    assert!(response.message.contains("2 of 2"));
}

#[test]
fn test_multi_slot_booking_reports_partial_success() {
    let mut persistence: Persistence = create_test_db();
    let (_tutor, slot_ids) = setup_open_slots(&mut persistence);
    let first: AuthenticatedUser = register_test_student(&mut persistence, "first@example.com");
    let second: AuthenticatedUser =
        register_test_student(&mut persistence, "second@example.com");

    // The first student takes one of the two slots
    book_test_slot(&mut persistence, &first, slot_ids[0]);

    let request: BookLessonsRequest = BookLessonsRequest {
        slot_ids: slot_ids.clone(),
        subject_id: MATH_SUBJECT_ID,
        modality: String::from("ONLINE"),
        tutor_id: None,
    };
    let response: BookLessonsResponse =
        book_slots(&mut persistence, &request, &second).unwrap();

    // Partial success is still a success; the lost slot is reported per-item
    assert_eq!(response.booked, 1);
    assert!(response.outcomes[0].lesson.is_none());
    assert!(response.outcomes[0].error.is_some());
    assert!(response.outcomes[1].lesson.is_some());
}

#[test]
fn test_multi_slot_booking_with_no_success_returns_first_failure() {
    let mut persistence: Persistence = create_test_db();
    let (_tutor, slot_ids) = setup_open_slots(&mut persistence);
    let first: AuthenticatedUser = register_test_student(&mut persistence, "first@example.com");
    let second: AuthenticatedUser =
        register_test_student(&mut persistence, "second@example.com");

    // The first student takes everything
    for slot_id in &slot_ids {
        book_test_slot(&mut persistence, &first, *slot_id);
    }

    let request: BookLessonsRequest = BookLessonsRequest {
        slot_ids: slot_ids.clone(),
        subject_id: MATH_SUBJECT_ID,
        modality: String::from("ONLINE"),
        tutor_id: None,
    };
    let result: Result<_, ApiError> = book_slots(&mut persistence, &request, &second);

    assert!(result.is_err());
    assert!(matches!(result.unwrap_err(), ApiError::Conflict { .. }));
}

// ============================================================================
// Lesson Listing Tests
// ============================================================================

#[test]
fn test_both_parties_see_the_booked_lesson() {
    let mut persistence: Persistence = create_test_db();
    let (tutor, slot_ids) = setup_open_slots(&mut persistence);
    let student: AuthenticatedUser = register_test_student(&mut persistence, "stu@example.com");

    book_test_slot(&mut persistence, &student, slot_ids[0]);

    let student_view: ListLessonsResponse =
        list_lessons(&mut persistence, &student).unwrap();
    let tutor_view: ListLessonsResponse = list_lessons(&mut persistence, &tutor).unwrap();

    assert_eq!(student_view.lessons.len(), 1);
    assert_eq!(tutor_view.lessons.len(), 1);
    assert_eq!(
        student_view.lessons[0].lesson_id,
        tutor_view.lessons[0].lesson_id
    );
}

#[test]
fn test_lesson_listing_is_scoped_to_the_caller() {
    let mut persistence: Persistence = create_test_db();
    let (_tutor, slot_ids) = setup_open_slots(&mut persistence);
    let booker: AuthenticatedUser = register_test_student(&mut persistence, "booker@example.com");
    let other: AuthenticatedUser = register_test_student(&mut persistence, "other@example.com");

    book_test_slot(&mut persistence, &booker, slot_ids[0]);

    let other_view: ListLessonsResponse = list_lessons(&mut persistence, &other).unwrap();
    assert!(other_view.lessons.is_empty());
}
