// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Class slot generation mutations.
//!
//! Generation persists a planned candidate batch in one transaction.
//! Candidates whose live slot identity already exists are skipped rather
//! than rejected, which makes repeated generation of the same week a no-op.

use diesel::prelude::*;
use diesel::SqliteConnection;
use tracing::{debug, info};
use tutoria::GenerationPlan;
use tutoria_domain::{format_date, format_time};

use crate::data_models::NewClassSlot;
use crate::diesel_schema::class_slots;
use crate::error::PersistenceError;

/// The result of persisting a generation plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationOutcome {
    /// Number of slots actually inserted.
    pub created: usize,
    /// Dates (`YYYY-MM-DD`) on which at least one candidate was skipped
    /// because a live slot with the same identity already existed.
    pub skipped_days: Vec<String>,
}

/// Persists a generation plan for a tutor.
///
/// Runs as a single transaction. Each candidate is checked against the
/// live slots of the tutor: if a slot with the same date and time block
/// already exists, the candidate is skipped and its date recorded;
/// otherwise a new `AVAILABLE` slot is inserted.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `tutor_id` - The tutor the slots belong to
/// * `plan` - The candidate batch to persist
///
/// # Returns
///
/// The count of inserted slots and the distinct dates that had skips.
///
/// # Errors
///
/// Returns an error if any statement in the transaction fails.
pub fn generate_class_slots(
    conn: &mut SqliteConnection,
    tutor_id: i64,
    plan: &GenerationPlan,
) -> Result<GenerationOutcome, PersistenceError> {
    conn.transaction::<GenerationOutcome, PersistenceError, _>(|conn| {
        let mut created: usize = 0;
        let mut skipped_days: Vec<String> = Vec::new();

        for candidate in &plan.candidates {
            let slot_date: String = format_date(candidate.date);
            let start_time: String = format_time(candidate.block.start());
            let end_time: String = format_time(candidate.block.end());

            let existing: i64 = class_slots::table
                .filter(class_slots::tutor_id.eq(tutor_id))
                .filter(class_slots::slot_date.eq(&slot_date))
                .filter(class_slots::start_time.eq(&start_time))
                .filter(class_slots::end_time.eq(&end_time))
                .filter(class_slots::is_deleted.eq(0))
                .count()
                .get_result(conn)?;

            if existing > 0 {
                debug!(
                    tutor_id,
                    slot_date = %slot_date,
                    start_time = %start_time,
                    "Skipping candidate, live slot already exists"
                );
                // Candidates are sorted by date, so a same-date skip is
                // always adjacent to the previous one.
                if skipped_days.last() != Some(&slot_date) {
                    skipped_days.push(slot_date);
                }
                continue;
            }

            let new_slot: NewClassSlot = NewClassSlot {
                tutor_id,
                slot_date,
                start_time,
                end_time,
            };
            diesel::insert_into(class_slots::table)
                .values(&new_slot)
                .execute(conn)?;
            created += 1;
        }

        info!(
            tutor_id,
            created,
            skipped_day_count = skipped_days.len(),
            "Persisted slot generation plan"
        );
        Ok(GenerationOutcome {
            created,
            skipped_days,
        })
    })
}
