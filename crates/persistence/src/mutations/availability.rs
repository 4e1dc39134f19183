// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability pattern mutations.
//!
//! Weekdays and time blocks are stored as JSON text columns; encoding
//! happens here so callers work with structured values only.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};

use crate::backend::sqlite::get_last_insert_rowid;
use crate::data_models::TimeBlockRecord;
use crate::diesel_schema::{availabilities, class_slots};
use crate::error::PersistenceError;

/// Creates a new availability pattern for a tutor.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `tutor_id` - The owning tutor's user ID
/// * `weekdays` - Weekday numbers (1-7, Monday = 1)
/// * `time_blocks` - The daily time blocks
///
/// # Errors
///
/// Returns an error if JSON encoding or the insert fails.
pub fn create_availability(
    conn: &mut SqliteConnection,
    tutor_id: i64,
    weekdays: &[u8],
    time_blocks: &[TimeBlockRecord],
) -> Result<i64, PersistenceError> {
    let weekdays_json: String = serde_json::to_string(weekdays)?;
    let time_blocks_json: String = serde_json::to_string(time_blocks)?;

    diesel::insert_into(availabilities::table)
        .values((
            availabilities::tutor_id.eq(tutor_id),
            availabilities::weekdays.eq(&weekdays_json),
            availabilities::time_blocks.eq(&time_blocks_json),
        ))
        .execute(conn)?;

    let availability_id: i64 = get_last_insert_rowid(conn)?;

    info!(availability_id, tutor_id, "Availability created");
    Ok(availability_id)
}

/// Sets the active flag on an availability.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `availability_id` - The availability ID
/// * `active` - The new active flag value
///
/// # Errors
///
/// Returns an error if the availability does not exist or the update fails.
pub fn set_availability_active(
    conn: &mut SqliteConnection,
    availability_id: i64,
    active: bool,
) -> Result<(), PersistenceError> {
    let rows_affected: usize = diesel::update(availabilities::table)
        .filter(availabilities::availability_id.eq(availability_id))
        .set(availabilities::is_active.eq(i32::from(active)))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!(
            "Availability with ID {availability_id} not found"
        )));
    }

    debug!(availability_id, active, "Set availability active flag");
    Ok(())
}

/// Deletes an availability and soft-deletes its future unbooked slots.
///
/// Runs as a single transaction: the availability row is removed, then every
/// live `AVAILABLE` slot of the same tutor that starts strictly after the
/// cutoff is marked deleted. Reserved slots are never touched, so existing
/// lessons survive the deletion.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `availability_id` - The availability ID to delete
/// * `tutor_id` - The owning tutor's user ID
/// * `cutoff_date` - The cutoff date (`YYYY-MM-DD`)
/// * `cutoff_time` - The cutoff time (`HH:mm`)
///
/// # Returns
///
/// The number of slots that were soft-deleted.
///
/// # Errors
///
/// Returns `PersistenceError::NotFound` if the availability does not exist,
/// or a database error if the transaction fails.
pub fn delete_availability_cascade(
    conn: &mut SqliteConnection,
    availability_id: i64,
    tutor_id: i64,
    cutoff_date: &str,
    cutoff_time: &str,
) -> Result<usize, PersistenceError> {
    conn.transaction::<usize, PersistenceError, _>(|conn| {
        let rows_affected: usize = diesel::delete(availabilities::table)
            .filter(availabilities::availability_id.eq(availability_id))
            .filter(availabilities::tutor_id.eq(tutor_id))
            .execute(conn)?;

        if rows_affected == 0 {
            return Err(PersistenceError::NotFound(format!(
                "Availability with ID {availability_id} not found"
            )));
        }

        let slots_deleted: usize = diesel::update(class_slots::table)
            .filter(class_slots::tutor_id.eq(tutor_id))
            .filter(class_slots::is_deleted.eq(0))
            .filter(class_slots::status.eq("AVAILABLE"))
            .filter(
                class_slots::slot_date.gt(cutoff_date.to_string()).or(
                    class_slots::slot_date
                        .eq(cutoff_date.to_string())
                        .and(class_slots::start_time.gt(cutoff_time.to_string())),
                ),
            )
            .set(class_slots::is_deleted.eq(1))
            .execute(conn)?;

        info!(
            availability_id,
            tutor_id, slots_deleted, "Deleted availability and future unbooked slots"
        );
        Ok(slots_deleted)
    })
}
