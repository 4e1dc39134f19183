// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Mutation modules for persistence layer.
//!
//! This module contains all state-changing operations for the persistence
//! layer. Mutations use Diesel DSL, with minimal use of backend-specific
//! helpers (e.g., `last_insert_rowid()` for `SQLite`). Multi-statement
//! operations run inside Diesel transactions.
//!
//! ## Module Organization
//!
//! - `accounts` — User account and session mutations
//! - `availability` — Availability pattern mutations
//! - `slots` — Class slot generation
//! - `lessons` — Booking and cancellation transactions

pub mod accounts;
pub mod availability;
pub mod lessons;
pub mod slots;

// Re-export mutation functions used by lib.rs
pub use accounts::{
    create_session, create_user, delete_expired_sessions, delete_session, set_user_xp,
    update_last_login, update_session_activity,
};
pub use availability::{create_availability, delete_availability_cascade, set_availability_active};
pub use lessons::{cancel_lesson_and_release_slot, reserve_slot_and_create_lesson};
pub use slots::{GenerationOutcome, generate_class_slots};
