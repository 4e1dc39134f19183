// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking admission rules.
//!
//! These checks run against the slot as read under the persistence lock,
//! before the reserving transaction. The transaction itself re-guards the
//! status transition, so a slot that changes state between check and
//! reserve still cannot be double-booked.

use crate::error::CoreError;
use tutoria_domain::SlotStatus;

/// Ensures a slot is open for booking.
///
/// # Arguments
///
/// * `slot_id` - The slot being booked
/// * `status` - The slot's current status
///
/// # Errors
///
/// Returns `CoreError::SlotNotAvailable` unless the slot is `Available`.
pub const fn ensure_bookable(slot_id: i64, status: SlotStatus) -> Result<(), CoreError> {
    match status {
        SlotStatus::Available => Ok(()),
        SlotStatus::Reserved | SlotStatus::Cancelled => {
            Err(CoreError::SlotNotAvailable { slot_id, status })
        }
    }
}

/// Ensures the booking student is not the slot's own tutor.
///
/// # Arguments
///
/// * `slot_id` - The slot being booked
/// * `student_id` - The authenticated student
/// * `slot_tutor_id` - The tutor who owns the slot
///
/// # Errors
///
/// Returns `CoreError::OwnSlotBooking` if the two ids coincide.
pub const fn ensure_not_own_slot(
    slot_id: i64,
    student_id: i64,
    slot_tutor_id: i64,
) -> Result<(), CoreError> {
    if student_id == slot_tutor_id {
        Err(CoreError::OwnSlotBooking { slot_id })
    } else {
        Ok(())
    }
}
