// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use crate::diesel_schema::class_slots;

/// A user account row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserData {
    pub user_id: i64,
    pub email: String,
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
    pub xp: i64,
    pub is_disabled: bool,
    pub created_at: String,
    pub last_login_at: Option<String>,
}

/// A session row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: i64,
    pub created_at: String,
    pub last_activity_at: String,
    pub expires_at: String,
}

/// A subject row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubjectData {
    pub subject_id: i64,
    pub name: String,
}

/// The stored JSON shape of one availability time block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBlockRecord {
    /// Block start time (`HH:mm`).
    pub start: String,
    /// Block end time (`HH:mm`).
    pub end: String,
}

/// An availability row with its JSON columns decoded.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilityData {
    pub availability_id: i64,
    pub tutor_id: i64,
    /// Weekday numbers (1-7, Monday = 1).
    pub weekdays: Vec<u8>,
    pub time_blocks: Vec<TimeBlockRecord>,
    pub is_active: bool,
    pub created_at: String,
}

/// A class slot row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassSlotData {
    pub class_slot_id: i64,
    pub tutor_id: i64,
    /// Slot date (`YYYY-MM-DD`).
    pub slot_date: String,
    /// Block start time (`HH:mm`).
    pub start_time: String,
    /// Block end time (`HH:mm`).
    pub end_time: String,
    pub status: String,
    pub is_deleted: bool,
    pub created_at: String,
}

/// A lesson row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LessonData {
    pub lesson_id: i64,
    pub class_slot_id: i64,
    pub student_id: i64,
    pub tutor_id: i64,
    pub subject_id: i64,
    pub modality: String,
    pub status: String,
    /// Lesson start instant (`YYYY-MM-DDTHH:MM:SS`), derived from the slot.
    pub scheduled_at: String,
    pub created_at: String,
}

/// Insertable row for generated class slots.
///
/// Status, deletion flag, and creation timestamp take their column defaults.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = class_slots)]
pub struct NewClassSlot {
    pub tutor_id: i64,
    pub slot_date: String,
    pub start_time: String,
    pub end_time: String,
}
