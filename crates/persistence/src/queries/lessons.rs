// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Lesson queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::LessonData;
use crate::diesel_schema::lessons;
use crate::error::PersistenceError;

/// Diesel Queryable struct for lesson rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = lessons)]
struct LessonRow {
    lesson_id: i64,
    class_slot_id: i64,
    student_id: i64,
    tutor_id: i64,
    subject_id: i64,
    modality: String,
    status: String,
    scheduled_at: String,
    created_at: String,
}

fn row_to_data(row: LessonRow) -> LessonData {
    LessonData {
        lesson_id: row.lesson_id,
        class_slot_id: row.class_slot_id,
        student_id: row.student_id,
        tutor_id: row.tutor_id,
        subject_id: row.subject_id,
        modality: row.modality,
        status: row.status,
        scheduled_at: row.scheduled_at,
        created_at: row.created_at,
    }
}

/// Retrieves a lesson by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `lesson_id` - The lesson ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the lesson is not found.
pub fn get_lesson(
    conn: &mut SqliteConnection,
    lesson_id: i64,
) -> Result<Option<LessonData>, PersistenceError> {
    debug!("Looking up lesson by ID: {}", lesson_id);

    let result: Result<LessonRow, diesel::result::Error> = lessons::table
        .filter(lessons::lesson_id.eq(lesson_id))
        .select(LessonRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row_to_data(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists lessons where the given user is the student, soonest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `student_id` - The student's user ID
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_lessons_for_student(
    conn: &mut SqliteConnection,
    student_id: i64,
) -> Result<Vec<LessonData>, PersistenceError> {
    debug!("Listing lessons for student ID: {}", student_id);

    let rows: Vec<LessonRow> = lessons::table
        .filter(lessons::student_id.eq(student_id))
        .order(lessons::scheduled_at.asc())
        .select(LessonRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(row_to_data).collect())
}

/// Lists lessons where the given user is the tutor, soonest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `tutor_id` - The tutor's user ID
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_lessons_for_tutor(
    conn: &mut SqliteConnection,
    tutor_id: i64,
) -> Result<Vec<LessonData>, PersistenceError> {
    debug!("Listing lessons for tutor ID: {}", tutor_id);

    let rows: Vec<LessonRow> = lessons::table
        .filter(lessons::tutor_id.eq(tutor_id))
        .order(lessons::scheduled_at.asc())
        .select(LessonRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(row_to_data).collect())
}
