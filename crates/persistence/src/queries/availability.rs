// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Availability queries.
//!
//! Weekdays and time blocks are stored as JSON text columns and are
//! decoded into structured data here, so callers never see raw JSON.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::{AvailabilityData, TimeBlockRecord};
use crate::diesel_schema::availabilities;
use crate::error::PersistenceError;

/// Diesel Queryable struct for availability rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = availabilities)]
struct AvailabilityRow {
    availability_id: i64,
    tutor_id: i64,
    weekdays: String,
    time_blocks: String,
    is_active: i32,
    created_at: String,
}

fn row_to_data(row: AvailabilityRow) -> Result<AvailabilityData, PersistenceError> {
    let weekdays: Vec<u8> = serde_json::from_str(&row.weekdays)?;
    let time_blocks: Vec<TimeBlockRecord> = serde_json::from_str(&row.time_blocks)?;

    Ok(AvailabilityData {
        availability_id: row.availability_id,
        tutor_id: row.tutor_id,
        weekdays,
        time_blocks,
        is_active: row.is_active != 0,
        created_at: row.created_at,
    })
}

/// Retrieves an availability by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `availability_id` - The availability ID
///
/// # Errors
///
/// Returns an error if the database query fails or a JSON column cannot
/// be decoded.
/// Returns `Ok(None)` if the availability is not found.
pub fn get_availability(
    conn: &mut SqliteConnection,
    availability_id: i64,
) -> Result<Option<AvailabilityData>, PersistenceError> {
    debug!("Looking up availability by ID: {}", availability_id);

    let result: Result<AvailabilityRow, diesel::result::Error> = availabilities::table
        .filter(availabilities::availability_id.eq(availability_id))
        .select(AvailabilityRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(row_to_data(row)?)),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all availabilities belonging to a tutor, newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `tutor_id` - The owning tutor's user ID
///
/// # Errors
///
/// Returns an error if the database query fails or a JSON column cannot
/// be decoded.
pub fn list_availabilities_for_tutor(
    conn: &mut SqliteConnection,
    tutor_id: i64,
) -> Result<Vec<AvailabilityData>, PersistenceError> {
    debug!("Listing availabilities for tutor ID: {}", tutor_id);

    let rows: Vec<AvailabilityRow> = availabilities::table
        .filter(availabilities::tutor_id.eq(tutor_id))
        .order(availabilities::availability_id.desc())
        .select(AvailabilityRow::as_select())
        .load(conn)?;

    rows.into_iter().map(row_to_data).collect()
}

/// Lists every active availability across all tutors, newest first.
///
/// This is the marketplace browsing view used by students.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails or a JSON column cannot
/// be decoded.
pub fn list_active_availabilities(
    conn: &mut SqliteConnection,
) -> Result<Vec<AvailabilityData>, PersistenceError> {
    debug!("Listing active availabilities");

    let rows: Vec<AvailabilityRow> = availabilities::table
        .filter(availabilities::is_active.eq(1))
        .order(availabilities::availability_id.desc())
        .select(AvailabilityRow::as_select())
        .load(conn)?;

    rows.into_iter().map(row_to_data).collect()
}
