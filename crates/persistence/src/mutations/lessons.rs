// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lesson mutations.
//!
//! Booking and cancellation each run as a single transaction whose first
//! statement is a status-guarded update. The guard is what decides races:
//! of N concurrent bookings for one slot, exactly one update matches the
//! `AVAILABLE` row and every other transaction sees zero affected rows.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::info;

use tutoria_domain::{format_datetime, parse_date, parse_time, start_datetime};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::{ClassSlotData, LessonData};
use crate::diesel_schema::{class_slots, lessons};
use crate::error::PersistenceError;
use crate::queries::lessons::get_lesson;
use crate::queries::slots::get_live_slot;

/// Reserves a slot and creates its lesson in one transaction.
///
/// The slot is flipped from `AVAILABLE` to `RESERVED` with a status-guarded
/// update; if no row matches, the slot is either gone or was taken by a
/// concurrent booking, and the transaction aborts. The lesson's scheduled
/// instant is derived from the slot's own date and start time, never from
/// caller input.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `class_slot_id` - The slot to reserve
/// * `student_id` - The booking student's user ID
/// * `subject_id` - The subject of the lesson
/// * `modality` - The lesson modality (`ONLINE` or `ONSITE`)
///
/// # Returns
///
/// The created lesson.
///
/// # Errors
///
/// Returns `PersistenceError::SlotNotFound` if the slot does not exist or
/// is soft-deleted, `PersistenceError::SlotStateChanged` if the slot is no
/// longer `AVAILABLE`, or a database error if the transaction fails.
pub fn reserve_slot_and_create_lesson(
    conn: &mut SqliteConnection,
    class_slot_id: i64,
    student_id: i64,
    subject_id: i64,
    modality: &str,
) -> Result<LessonData, PersistenceError> {
    conn.transaction::<LessonData, PersistenceError, _>(|conn| {
        let rows_affected: usize = diesel::update(class_slots::table)
            .filter(class_slots::class_slot_id.eq(class_slot_id))
            .filter(class_slots::is_deleted.eq(0))
            .filter(class_slots::status.eq("AVAILABLE"))
            .set(class_slots::status.eq("RESERVED"))
            .execute(conn)?;

        if rows_affected == 0 {
            // Distinguish a missing slot from one that lost the race.
            return match get_live_slot(conn, class_slot_id)? {
                None => Err(PersistenceError::SlotNotFound(class_slot_id)),
                Some(_) => Err(PersistenceError::SlotStateChanged(class_slot_id)),
            };
        }

        let slot: ClassSlotData = get_live_slot(conn, class_slot_id)?
            .ok_or(PersistenceError::SlotNotFound(class_slot_id))?;

        let scheduled_at: String = format_datetime(start_datetime(
            parse_date(&slot.slot_date)?,
            parse_time(&slot.start_time)?,
        ));

        diesel::insert_into(lessons::table)
            .values((
                lessons::class_slot_id.eq(class_slot_id),
                lessons::student_id.eq(student_id),
                lessons::tutor_id.eq(slot.tutor_id),
                lessons::subject_id.eq(subject_id),
                lessons::modality.eq(modality),
                lessons::scheduled_at.eq(&scheduled_at),
            ))
            .execute(conn)?;

        let lesson_id: i64 = get_last_insert_rowid(conn)?;

        let lesson: LessonData = get_lesson(conn, lesson_id)?.ok_or_else(|| {
            PersistenceError::NotFound(format!("Lesson with ID {lesson_id} not found after insert"))
        })?;

        info!(
            lesson_id,
            class_slot_id, student_id, "Reserved slot and created lesson"
        );
        Ok(lesson)
    })
}

/// Cancels a pending lesson and releases its slot in one transaction.
///
/// The lesson is flipped from `PENDING` to `CANCELLED` with a status-guarded
/// update, then the slot returns to `AVAILABLE` so it can be booked again.
/// A lesson that is already cancelled or done fails the guard.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `lesson_id` - The lesson to cancel
///
/// # Returns
///
/// The ID of the released slot.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the lesson does not exist,
/// `PersistenceError::LessonStateChanged` if the lesson is no longer
/// `PENDING`, or a database error if the transaction fails.
pub fn cancel_lesson_and_release_slot(
    conn: &mut SqliteConnection,
    lesson_id: i64,
) -> Result<i64, PersistenceError> {
    conn.transaction::<i64, PersistenceError, _>(|conn| {
        let rows_affected: usize = diesel::update(lessons::table)
            .filter(lessons::lesson_id.eq(lesson_id))
            .filter(lessons::status.eq("PENDING"))
            .set(lessons::status.eq("CANCELLED"))
            .execute(conn)?;

        if rows_affected == 0 {
            return match get_lesson(conn, lesson_id)? {
                None => Err(PersistenceError::NotFound(format!(
                    "Lesson with ID {lesson_id} not found"
                ))),
                Some(_) => Err(PersistenceError::LessonStateChanged(lesson_id)),
            };
        }

        let class_slot_id: i64 = lessons::table
            .filter(lessons::lesson_id.eq(lesson_id))
            .select(lessons::class_slot_id)
            .first(conn)?;

        diesel::update(class_slots::table)
            .filter(class_slots::class_slot_id.eq(class_slot_id))
            .filter(class_slots::is_deleted.eq(0))
            .set(class_slots::status.eq("AVAILABLE"))
            .execute(conn)?;

        info!(lesson_id, class_slot_id, "Cancelled lesson and released slot");
        Ok(class_slot_id)
    })
}
