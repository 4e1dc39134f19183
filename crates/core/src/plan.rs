// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Expansion of availability patterns into dated slot candidates.
//!
//! A generation request names an availability and one or more week anchors
//! (Mondays). Planning is pure: it produces every `(date, block)` candidate
//! the pattern covers in those weeks, ordered by date then start time.
//! Whether a candidate already exists in storage is decided later, inside
//! the persistence transaction that inserts the batch.

use crate::error::CoreError;
use chrono::NaiveDate;
use std::collections::BTreeSet;
use tutoria_domain::{TimeBlock, WeekAnchor, WeeklyPattern};

/// A single dated slot candidate produced by planning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct SlotCandidate {
    /// The date the slot falls on.
    pub date: NaiveDate,
    /// The time block the slot occupies.
    pub block: TimeBlock,
}

/// The full set of candidates for a generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationPlan {
    /// Candidates ordered by date, then block start time.
    pub candidates: Vec<SlotCandidate>,
}

impl GenerationPlan {
    /// Returns the number of candidates in the plan.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Returns whether the plan contains no candidates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }
}

/// Ensures an availability is active before it is used for generation.
///
/// # Arguments
///
/// * `availability_id` - The availability being expanded
/// * `active` - The stored active flag
///
/// # Errors
///
/// Returns `CoreError::InactiveAvailability` if the flag is cleared.
pub const fn ensure_active_availability(
    availability_id: i64,
    active: bool,
) -> Result<(), CoreError> {
    if active {
        Ok(())
    } else {
        Err(CoreError::InactiveAvailability { availability_id })
    }
}

/// Expands a weekly pattern over a set of week anchors.
///
/// Anchors are de-duplicated, so listing the same Monday twice cannot
/// produce duplicate candidates. Every pattern weekday is placed within
/// each anchored week and paired with every time block.
///
/// # Arguments
///
/// * `pattern` - The validated weekly pattern
/// * `anchors` - The Monday anchors of the weeks to cover
///
/// # Returns
///
/// A `GenerationPlan` whose candidates are sorted by date, then start time.
///
/// # Errors
///
/// Returns an error if placing a weekday within a week overflows the
/// calendar range.
pub fn plan_weeks(
    pattern: &WeeklyPattern,
    anchors: &[WeekAnchor],
) -> Result<GenerationPlan, CoreError> {
    let distinct_anchors: BTreeSet<WeekAnchor> = anchors.iter().copied().collect();

    let mut candidates: Vec<SlotCandidate> = Vec::new();
    for anchor in &distinct_anchors {
        for weekday in pattern.weekdays() {
            let date: NaiveDate = anchor.date_for_weekday(*weekday)?;
            for block in pattern.time_blocks() {
                candidates.push(SlotCandidate {
                    date,
                    block: *block,
                });
            }
        }
    }

    candidates.sort();

    Ok(GenerationPlan { candidates })
}
