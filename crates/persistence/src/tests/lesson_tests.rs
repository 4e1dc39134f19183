// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for the booking and cancellation transactions.

use super::{create_test_db, create_test_plan, create_test_user};
use crate::{Persistence, PersistenceError};

/// Creates a tutor with one generated slot and returns `(tutor_id, slot_id)`.
fn create_tutor_with_slot(persistence: &mut Persistence) -> (i64, i64) {
    let tutor_id = create_test_user(persistence, "tutor@example.com", "TUTOR");
    let plan = create_test_plan(&[1], &[("09:00", "11:00")], "2025-11-10");
    persistence.generate_class_slots(tutor_id, &plan).unwrap();
    let slots = persistence.list_slots(Some(tutor_id), None).unwrap();
    (tutor_id, slots[0].class_slot_id)
}

#[test]
fn test_booking_reserves_slot_and_creates_pending_lesson() {
    let mut persistence = create_test_db();
    let (tutor_id, slot_id) = create_tutor_with_slot(&mut persistence);
    let student_id = create_test_user(&mut persistence, "student@example.com", "STUDENT");

    let lesson = persistence
        .reserve_slot_and_create_lesson(slot_id, student_id, 1, "ONLINE")
        .unwrap();

    assert_eq!(lesson.class_slot_id, slot_id);
    assert_eq!(lesson.student_id, student_id);
    assert_eq!(lesson.tutor_id, tutor_id);
    assert_eq!(lesson.subject_id, 1);
    assert_eq!(lesson.modality, "ONLINE");
    assert_eq!(lesson.status, "PENDING");
    // The lesson instant comes from the slot's own date and start time
    assert_eq!(lesson.scheduled_at, "2025-11-10T09:00:00");

    let slot = persistence.get_live_slot(slot_id).unwrap().unwrap();
    assert_eq!(slot.status, "RESERVED");
}

#[test]
fn test_booking_a_reserved_slot_fails() {
    let mut persistence = create_test_db();
    let (_tutor_id, slot_id) = create_tutor_with_slot(&mut persistence);
    let first_student = create_test_user(&mut persistence, "first@example.com", "STUDENT");
    let second_student = create_test_user(&mut persistence, "second@example.com", "STUDENT");

    persistence
        .reserve_slot_and_create_lesson(slot_id, first_student, 1, "ONLINE")
        .unwrap();

    // The status guard admits exactly one booking per slot
    let result = persistence.reserve_slot_and_create_lesson(slot_id, second_student, 1, "ONLINE");

    assert!(result.is_err());
    match result.unwrap_err() {
        PersistenceError::SlotStateChanged(id) => {
            assert_eq!(id, slot_id);
        }
        other => panic!("Expected SlotStateChanged error, got: {other:?}"),
    }

    // The losing attempt must leave no lesson behind
    let lessons = persistence.list_lessons_for_student(second_student).unwrap();
    assert!(lessons.is_empty());
}

#[test]
fn test_booking_a_missing_slot_fails() {
    let mut persistence = create_test_db();
    let student_id = create_test_user(&mut persistence, "student@example.com", "STUDENT");

    let result = persistence.reserve_slot_and_create_lesson(999, student_id, 1, "ONLINE");

    assert!(result.is_err());
    match result.unwrap_err() {
        PersistenceError::SlotNotFound(id) => {
            assert_eq!(id, 999);
        }
        other => panic!("Expected SlotNotFound error, got: {other:?}"),
    }
}

#[test]
fn test_cancellation_releases_slot_for_rebooking() {
    let mut persistence = create_test_db();
    let (_tutor_id, slot_id) = create_tutor_with_slot(&mut persistence);
    let first_student = create_test_user(&mut persistence, "first@example.com", "STUDENT");
    let second_student = create_test_user(&mut persistence, "second@example.com", "STUDENT");

    let lesson = persistence
        .reserve_slot_and_create_lesson(slot_id, first_student, 1, "ONLINE")
        .unwrap();

    let released_slot_id = persistence
        .cancel_lesson_and_release_slot(lesson.lesson_id)
        .unwrap();
    assert_eq!(released_slot_id, slot_id);

    // The lesson is terminal and the slot is bookable again
    let cancelled = persistence.get_lesson(lesson.lesson_id).unwrap().unwrap();
    assert_eq!(cancelled.status, "CANCELLED");
    let slot = persistence.get_live_slot(slot_id).unwrap().unwrap();
    assert_eq!(slot.status, "AVAILABLE");

    let rebooked = persistence
        .reserve_slot_and_create_lesson(slot_id, second_student, 1, "ONSITE")
        .unwrap();
    assert_eq!(rebooked.student_id, second_student);
    assert_eq!(rebooked.status, "PENDING");
}

#[test]
fn test_second_cancellation_fails() {
    let mut persistence = create_test_db();
    let (_tutor_id, slot_id) = create_tutor_with_slot(&mut persistence);
    let student_id = create_test_user(&mut persistence, "student@example.com", "STUDENT");

    let lesson = persistence
        .reserve_slot_and_create_lesson(slot_id, student_id, 1, "ONLINE")
        .unwrap();
    persistence
        .cancel_lesson_and_release_slot(lesson.lesson_id)
        .unwrap();

    let result = persistence.cancel_lesson_and_release_slot(lesson.lesson_id);

    assert!(result.is_err());
    match result.unwrap_err() {
        PersistenceError::LessonStateChanged(id) => {
            assert_eq!(id, lesson.lesson_id);
        }
        other => panic!("Expected LessonStateChanged error, got: {other:?}"),
    }
}

#[test]
fn test_cancelling_a_missing_lesson_fails() {
    let mut persistence = create_test_db();

    let result = persistence.cancel_lesson_and_release_slot(999);

    assert!(result.is_err());
    match result.unwrap_err() {
        PersistenceError::NotFound(msg) => {
            assert!(msg.contains("999"));
        }
        other => panic!("Expected NotFound error, got: {other:?}"),
    }
}

#[test]
fn test_lesson_listings_scope_by_party() {
    let mut persistence = create_test_db();
    let tutor_id = create_test_user(&mut persistence, "tutor@example.com", "TUTOR");
    let student_id = create_test_user(&mut persistence, "student@example.com", "STUDENT");
    let bystander_id = create_test_user(&mut persistence, "bystander@example.com", "STUDENT");

    let plan = create_test_plan(&[1, 3], &[("09:00", "11:00")], "2025-11-10");
    persistence.generate_class_slots(tutor_id, &plan).unwrap();
    let slots = persistence.list_slots(Some(tutor_id), None).unwrap();

    persistence
        .reserve_slot_and_create_lesson(slots[0].class_slot_id, student_id, 1, "ONLINE")
        .unwrap();
    persistence
        .reserve_slot_and_create_lesson(slots[1].class_slot_id, student_id, 2, "ONSITE")
        .unwrap();

    assert_eq!(
        persistence.list_lessons_for_student(student_id).unwrap().len(),
        2
    );
    assert_eq!(persistence.list_lessons_for_tutor(tutor_id).unwrap().len(), 2);
    assert!(
        persistence
            .list_lessons_for_student(bystander_id)
            .unwrap()
            .is_empty()
    );
}

#[test]
fn test_slot_listing_filters_by_status() {
    let mut persistence = create_test_db();
    let (tutor_id, slot_id) = create_tutor_with_slot(&mut persistence);
    let student_id = create_test_user(&mut persistence, "student@example.com", "STUDENT");

    let plan = create_test_plan(&[3], &[("09:00", "11:00")], "2025-11-10");
    persistence.generate_class_slots(tutor_id, &plan).unwrap();

    persistence
        .reserve_slot_and_create_lesson(slot_id, student_id, 1, "ONLINE")
        .unwrap();

    let available = persistence
        .list_slots(Some(tutor_id), Some("AVAILABLE"))
        .unwrap();
    let reserved = persistence
        .list_slots(Some(tutor_id), Some("RESERVED"))
        .unwrap();

    assert_eq!(available.len(), 1);
    assert_eq!(available[0].slot_date, "2025-11-12");
    assert_eq!(reserved.len(), 1);
    assert_eq!(reserved[0].class_slot_id, slot_id);
}
