// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Class slot queries.
//!
//! Soft-deleted slots are filtered out of every query here; a deleted slot
//! is indistinguishable from a missing one to callers.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::ClassSlotData;
use crate::diesel_schema::class_slots;
use crate::error::PersistenceError;

/// Diesel Queryable struct for class slot rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = class_slots)]
struct ClassSlotRow {
    class_slot_id: i64,
    tutor_id: i64,
    slot_date: String,
    start_time: String,
    end_time: String,
    status: String,
    is_deleted: i32,
    created_at: String,
}

fn row_to_data(row: ClassSlotRow) -> ClassSlotData {
    ClassSlotData {
        class_slot_id: row.class_slot_id,
        tutor_id: row.tutor_id,
        slot_date: row.slot_date,
        start_time: row.start_time,
        end_time: row.end_time,
        status: row.status,
        is_deleted: row.is_deleted != 0,
        created_at: row.created_at,
    }
}

/// Retrieves a live (non-deleted) slot by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `class_slot_id` - The slot ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the slot does not exist or is soft-deleted.
pub fn get_live_slot(
    conn: &mut SqliteConnection,
    class_slot_id: i64,
) -> Result<Option<ClassSlotData>, PersistenceError> {
    debug!("Looking up live slot by ID: {}", class_slot_id);

    let result: Result<ClassSlotRow, diesel::result::Error> = class_slots::table
        .filter(class_slots::class_slot_id.eq(class_slot_id))
        .filter(class_slots::is_deleted.eq(0))
        .select(ClassSlotRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row_to_data(row))),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists live slots, optionally filtered by tutor and status.
///
/// Results are ordered by date, then start time.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `tutor_id` - Restrict to one tutor's slots when set
/// * `status` - Restrict to one status when set
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_slots(
    conn: &mut SqliteConnection,
    tutor_id: Option<i64>,
    status: Option<&str>,
) -> Result<Vec<ClassSlotData>, PersistenceError> {
    debug!(
        "Listing slots (tutor filter: {:?}, status filter: {:?})",
        tutor_id, status
    );

    let mut query = class_slots::table
        .filter(class_slots::is_deleted.eq(0))
        .into_boxed();

    if let Some(tutor) = tutor_id {
        query = query.filter(class_slots::tutor_id.eq(tutor));
    }
    if let Some(status_filter) = status {
        query = query.filter(class_slots::status.eq(status_filter.to_string()));
    }

    let rows: Vec<ClassSlotRow> = query
        .order((class_slots::slot_date.asc(), class_slots::start_time.asc()))
        .select(ClassSlotRow::as_select())
        .load(conn)?;

    Ok(rows.into_iter().map(row_to_data).collect())
}
