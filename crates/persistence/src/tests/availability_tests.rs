// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tests for availability persistence, including the deletion cascade.

use super::{create_test_block, create_test_db, create_test_plan, create_test_user};
use crate::PersistenceError;

#[test]
fn test_create_availability_roundtrips_json_columns() {
    let mut persistence = create_test_db();
    let tutor_id = create_test_user(&mut persistence, "tutor@example.com", "TUTOR");

    let blocks = vec![
        create_test_block("09:00", "11:00"),
        create_test_block("14:00", "16:00"),
    ];
    let availability_id = persistence
        .create_availability(tutor_id, &[1, 3, 5], &blocks)
        .unwrap();

    let availability = persistence
        .get_availability(availability_id)
        .unwrap()
        .unwrap();
    assert_eq!(availability.tutor_id, tutor_id);
    assert_eq!(availability.weekdays, vec![1, 3, 5]);
    assert_eq!(availability.time_blocks, blocks);
    assert!(availability.is_active);
}

#[test]
fn test_list_availabilities_for_tutor_scopes_by_owner() {
    let mut persistence = create_test_db();
    let tutor_a = create_test_user(&mut persistence, "a@example.com", "TUTOR");
    let tutor_b = create_test_user(&mut persistence, "b@example.com", "TUTOR");

    persistence
        .create_availability(tutor_a, &[1], &[create_test_block("09:00", "10:00")])
        .unwrap();
    persistence
        .create_availability(tutor_a, &[2], &[create_test_block("09:00", "10:00")])
        .unwrap();
    persistence
        .create_availability(tutor_b, &[3], &[create_test_block("09:00", "10:00")])
        .unwrap();

    assert_eq!(
        persistence.list_availabilities_for_tutor(tutor_a).unwrap().len(),
        2
    );
    assert_eq!(
        persistence.list_availabilities_for_tutor(tutor_b).unwrap().len(),
        1
    );
}

#[test]
fn test_set_availability_active_toggles_flag() {
    let mut persistence = create_test_db();
    let tutor_id = create_test_user(&mut persistence, "tutor@example.com", "TUTOR");

    let availability_id = persistence
        .create_availability(tutor_id, &[1], &[create_test_block("09:00", "10:00")])
        .unwrap();

    persistence
        .set_availability_active(availability_id, false)
        .unwrap();
    assert!(
        !persistence
            .get_availability(availability_id)
            .unwrap()
            .unwrap()
            .is_active
    );

    persistence
        .set_availability_active(availability_id, true)
        .unwrap();
    assert!(
        persistence
            .get_availability(availability_id)
            .unwrap()
            .unwrap()
            .is_active
    );
}

#[test]
fn test_set_availability_active_for_missing_row_fails() {
    let mut persistence = create_test_db();

    let result = persistence.set_availability_active(999, false);

    assert!(result.is_err());
    match result.unwrap_err() {
        PersistenceError::NotFound(msg) => {
            assert!(msg.contains("999"));
        }
        other => panic!("Expected NotFound error, got: {other:?}"),
    }
}

#[test]
fn test_delete_cascade_soft_deletes_only_future_available_slots() {
    let mut persistence = create_test_db();
    let tutor_id = create_test_user(&mut persistence, "tutor@example.com", "TUTOR");
    let student_id = create_test_user(&mut persistence, "student@example.com", "STUDENT");

    let availability_id = persistence
        .create_availability(tutor_id, &[1, 3, 5], &[create_test_block("10:00", "11:00")])
        .unwrap();

    // Slots on Monday 2025-11-10, Wednesday 2025-11-12, Friday 2025-11-14
    let plan = create_test_plan(&[1, 3, 5], &[("10:00", "11:00")], "2025-11-10");
    persistence.generate_class_slots(tutor_id, &plan).unwrap();

    let slots = persistence.list_slots(Some(tutor_id), None).unwrap();
    assert_eq!(slots.len(), 3);
    let monday_slot = slots
        .iter()
        .find(|s| s.slot_date == "2025-11-10")
        .unwrap()
        .class_slot_id;
    let wednesday_slot = slots
        .iter()
        .find(|s| s.slot_date == "2025-11-12")
        .unwrap()
        .class_slot_id;
    let friday_slot = slots
        .iter()
        .find(|s| s.slot_date == "2025-11-14")
        .unwrap()
        .class_slot_id;

    // Book the Wednesday slot so it is RESERVED
    persistence
        .reserve_slot_and_create_lesson(wednesday_slot, student_id, 1, "ONLINE")
        .unwrap();

    // Cutoff on Tuesday: Monday is past, Wednesday and Friday are future
    let deleted = persistence
        .delete_availability_cascade(availability_id, tutor_id, "2025-11-11", "12:00")
        .unwrap();

    // Only the future AVAILABLE slot (Friday) goes. The past slot and the
    // reserved slot both survive, so the booked lesson keeps its slot.
    assert_eq!(deleted, 1);
    assert!(persistence.get_live_slot(monday_slot).unwrap().is_some());
    assert!(persistence.get_live_slot(wednesday_slot).unwrap().is_some());
    assert!(persistence.get_live_slot(friday_slot).unwrap().is_none());
    assert!(
        persistence
            .get_availability(availability_id)
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_delete_cascade_boundary_is_strictly_after_cutoff() {
    let mut persistence = create_test_db();
    let tutor_id = create_test_user(&mut persistence, "tutor@example.com", "TUTOR");

    let availability_id = persistence
        .create_availability(
            tutor_id,
            &[1],
            &[
                create_test_block("09:00", "10:00"),
                create_test_block("14:00", "15:00"),
            ],
        )
        .unwrap();

    let plan = create_test_plan(
        &[1, 3],
        &[("09:00", "10:00"), ("14:00", "15:00")],
        "2025-11-10",
    );
    persistence.generate_class_slots(tutor_id, &plan).unwrap();
    assert_eq!(persistence.list_slots(Some(tutor_id), None).unwrap().len(), 4);

    // Cutoff at Monday 09:00: the 09:00 slot itself is not strictly after
    // the cutoff and must survive; the 14:00 slot and both Wednesday slots go.
    let deleted = persistence
        .delete_availability_cascade(availability_id, tutor_id, "2025-11-10", "09:00")
        .unwrap();

    assert_eq!(deleted, 3);
    let remaining = persistence.list_slots(Some(tutor_id), None).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].slot_date, "2025-11-10");
    assert_eq!(remaining[0].start_time, "09:00");
}

#[test]
fn test_delete_cascade_leaves_other_tutors_untouched() {
    let mut persistence = create_test_db();
    let tutor_a = create_test_user(&mut persistence, "a@example.com", "TUTOR");
    let tutor_b = create_test_user(&mut persistence, "b@example.com", "TUTOR");

    let availability_a = persistence
        .create_availability(tutor_a, &[1], &[create_test_block("09:00", "10:00")])
        .unwrap();
    persistence
        .create_availability(tutor_b, &[1], &[create_test_block("09:00", "10:00")])
        .unwrap();

    let plan = create_test_plan(&[1], &[("09:00", "10:00")], "2025-11-10");
    persistence.generate_class_slots(tutor_a, &plan).unwrap();
    persistence.generate_class_slots(tutor_b, &plan).unwrap();

    persistence
        .delete_availability_cascade(availability_a, tutor_a, "2025-01-01", "00:00")
        .unwrap();

    assert!(persistence.list_slots(Some(tutor_a), None).unwrap().is_empty());
    assert_eq!(persistence.list_slots(Some(tutor_b), None).unwrap().len(), 1);
}

#[test]
fn test_delete_cascade_for_missing_availability_fails() {
    let mut persistence = create_test_db();
    let tutor_id = create_test_user(&mut persistence, "tutor@example.com", "TUTOR");

    let result = persistence.delete_availability_cascade(999, tutor_id, "2025-11-10", "09:00");

    assert!(result.is_err());
    match result.unwrap_err() {
        PersistenceError::NotFound(msg) => {
            assert!(msg.contains("999"));
        }
        other => panic!("Expected NotFound error, got: {other:?}"),
    }
}
