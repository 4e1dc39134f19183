// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Query modules for persistence layer.
//!
//! This module contains all read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `accounts` — User account and session queries
//! - `availability` — Availability pattern queries
//! - `slots` — Class slot queries
//! - `lessons` — Lesson queries
//! - `subjects` — Subject catalogue queries

pub mod accounts;
pub mod availability;
pub mod lessons;
pub mod slots;
pub mod subjects;

// Re-export query functions used by lib.rs
pub use accounts::{get_session_by_token, get_user_by_email, get_user_by_id, verify_password};
pub use availability::{
    get_availability, list_active_availabilities, list_availabilities_for_tutor,
};
pub use lessons::{get_lesson, list_lessons_for_student, list_lessons_for_tutor};
pub use slots::{get_live_slot, list_slots};
pub use subjects::{get_subject, list_subjects};
