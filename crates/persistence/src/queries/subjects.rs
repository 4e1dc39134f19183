// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Subject catalogue queries.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::debug;

use crate::data_models::SubjectData;
use crate::diesel_schema::subjects;
use crate::error::PersistenceError;

/// Diesel Queryable struct for subject rows.
#[derive(Queryable, Selectable)]
#[diesel(table_name = subjects)]
struct SubjectRow {
    subject_id: i64,
    name: String,
}

/// Retrieves a subject by ID.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `subject_id` - The subject ID
///
/// # Errors
///
/// Returns an error if the database query fails.
/// Returns `Ok(None)` if the subject is not found.
pub fn get_subject(
    conn: &mut SqliteConnection,
    subject_id: i64,
) -> Result<Option<SubjectData>, PersistenceError> {
    debug!("Looking up subject by ID: {}", subject_id);

    let result: Result<SubjectRow, diesel::result::Error> = subjects::table
        .filter(subjects::subject_id.eq(subject_id))
        .select(SubjectRow::as_select())
        .first(conn);

    match result {
        Ok(row) => Ok(Some(SubjectData {
            subject_id: row.subject_id,
            name: row.name,
        })),
        Err(diesel::result::Error::NotFound) => Ok(None),
        Err(e) => Err(PersistenceError::from(e)),
    }
}

/// Lists all subjects, ordered by name.
///
/// # Arguments
///
/// * `conn` - The database connection
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_subjects(conn: &mut SqliteConnection) -> Result<Vec<SubjectData>, PersistenceError> {
    debug!("Listing subjects");

    let rows: Vec<SubjectRow> = subjects::table
        .order(subjects::name.asc())
        .select(SubjectRow::as_select())
        .load(conn)?;

    Ok(rows
        .into_iter()
        .map(|row| SubjectData {
            subject_id: row.subject_id,
            name: row.name,
        })
        .collect())
}
