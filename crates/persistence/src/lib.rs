// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the Tutoria marketplace.
//!
//! This crate provides database persistence for accounts, sessions,
//! availability patterns, class slots, and lessons. It is built on Diesel
//! over `SQLite`.
//!
//! ## Storage Model
//!
//! - Availability weekdays and time blocks are stored as JSON text columns
//!   and decoded into structured values at the query layer.
//! - Class slots carry a soft-delete flag; a partial unique index keeps at
//!   most one live slot per `(tutor, date, start, end)` identity.
//! - Booking and cancellation run as transactions whose first statement is
//!   a status-guarded update, so concurrent attempts resolve to exactly one
//!   winner.
//!
//! ## Testing Philosophy
//!
//! - Standard tests run against in-memory `SQLite` databases
//! - Each test receives a unique database instance via atomic counter
//! - No external infrastructure is required

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use tutoria::GenerationPlan;

/// Atomic counter for generating unique in-memory database names.
///
/// This ensures deterministic test isolation by eliminating time-based collisions.
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{
    AvailabilityData, ClassSlotData, LessonData, SessionData, SubjectData, TimeBlockRecord,
    UserData,
};
pub use error::PersistenceError;
pub use mutations::GenerationOutcome;

/// Persistence adapter for the marketplace database.
///
/// Holds a single `SQLite` connection. Callers serialize access at a higher
/// level (the server wraps the adapter in a mutex), so each method here can
/// assume exclusive use of the connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Uses a shared in-memory database via `Diesel`.
    ///
    /// Each call receives a unique database instance via atomic counter,
    /// ensuring deterministic test isolation without time-based collisions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        // Create a unique shared in-memory database name per call so tests are isolated.
        // Use atomic counter instead of timestamp to eliminate race conditions.
        let db_id = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name = format!("memdb_test_{db_id}");
        let shared_memory_url = format!("file:{db_name}?mode=memory&cache=shared");

        // Initialize database with Diesel migrations
        let mut conn: SqliteConnection = backend::sqlite::initialize_database(&shared_memory_url)?;

        // Verify foreign key enforcement is active
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        // Initialize database with Diesel migrations
        let mut conn: SqliteConnection = backend::sqlite::initialize_database(path_str)?;

        // Enable WAL mode for better read concurrency
        backend::sqlite::enable_wal_mode(&mut conn)?;

        // Verify foreign key enforcement is active
        backend::sqlite::verify_foreign_key_enforcement(&mut conn)?;

        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// This is a startup-time check required to ensure
    /// referential integrity constraints are enforced.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Accounts & Sessions
    // ========================================================================

    /// Creates a new user account.
    ///
    /// The email is normalized to lowercase and the password is hashed with
    /// bcrypt before storage.
    ///
    /// # Arguments
    ///
    /// * `email` - The email address
    /// * `password` - The plain-text password
    /// * `first_name` - The user's first name
    /// * `last_name` - The user's last name
    /// * `role` - The role (`TUTOR` or `STUDENT`)
    ///
    /// # Returns
    ///
    /// The new user's ID.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::DuplicateEmail` if an account already
    /// exists for the email.
    pub fn create_user(
        &mut self,
        email: &str,
        password: &str,
        first_name: &str,
        last_name: &str,
        role: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::create_user(&mut self.conn, email, password, first_name, last_name, role)
    }

    /// Retrieves a user by email address.
    ///
    /// # Arguments
    ///
    /// * `email` - The email address (matched case-insensitively)
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_email(
        &mut self,
        email: &str,
    ) -> Result<Option<UserData>, PersistenceError> {
        queries::get_user_by_email(&mut self.conn, email)
    }

    /// Retrieves a user by ID.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_user_by_id(&mut self, user_id: i64) -> Result<Option<UserData>, PersistenceError> {
        queries::get_user_by_id(&mut self.conn, user_id)
    }

    /// Updates the last login timestamp for a user.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_last_login(&mut self, user_id: i64) -> Result<(), PersistenceError> {
        mutations::update_last_login(&mut self.conn, user_id)
    }

    /// Sets a user's accumulated experience points.
    ///
    /// # Arguments
    ///
    /// * `user_id` - The user ID
    /// * `xp` - The new experience point total
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or the update fails.
    pub fn set_user_xp(&mut self, user_id: i64, xp: i64) -> Result<(), PersistenceError> {
        mutations::set_user_xp(&mut self.conn, user_id, xp)
    }

    /// Creates a new session for a user.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The unique session token
    /// * `user_id` - The user ID
    /// * `expires_at` - The expiration timestamp (ISO 8601 format)
    ///
    /// # Returns
    ///
    /// The new session's ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be created.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: i64,
        expires_at: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::create_session(&mut self.conn, session_token, user_id, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The session token
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::get_session_by_token(&mut self.conn, session_token)
    }

    /// Updates the last activity timestamp for a session.
    ///
    /// # Arguments
    ///
    /// * `session_id` - The session ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database update fails.
    pub fn update_session_activity(&mut self, session_id: i64) -> Result<(), PersistenceError> {
        mutations::update_session_activity(&mut self.conn, session_id)
    }

    /// Deletes a session by token.
    ///
    /// This is used for logout operations.
    ///
    /// # Arguments
    ///
    /// * `session_token` - The session token to delete
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::delete_session(&mut self.conn, session_token)
    }

    /// Deletes all expired sessions.
    ///
    /// # Returns
    ///
    /// The number of sessions deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the database delete fails.
    pub fn delete_expired_sessions(&mut self) -> Result<usize, PersistenceError> {
        mutations::delete_expired_sessions(&mut self.conn)
    }

    /// Verifies a plain-text password against a stored bcrypt hash.
    ///
    /// # Arguments
    ///
    /// * `password` - The plain-text password
    /// * `password_hash` - The stored bcrypt hash
    ///
    /// # Errors
    ///
    /// Returns an error if hash verification itself fails (e.g., the stored
    /// hash is malformed). A wrong password returns `Ok(false)`.
    pub fn verify_password(
        &mut self,
        password: &str,
        password_hash: &str,
    ) -> Result<bool, PersistenceError> {
        queries::verify_password(password, password_hash)
    }

    // ========================================================================
    // Subjects
    // ========================================================================

    /// Retrieves a subject by ID.
    ///
    /// # Arguments
    ///
    /// * `subject_id` - The subject ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_subject(
        &mut self,
        subject_id: i64,
    ) -> Result<Option<SubjectData>, PersistenceError> {
        queries::get_subject(&mut self.conn, subject_id)
    }

    /// Lists all subjects, alphabetically.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_subjects(&mut self) -> Result<Vec<SubjectData>, PersistenceError> {
        queries::list_subjects(&mut self.conn)
    }

    // ========================================================================
    // Availability
    // ========================================================================

    /// Creates a new availability pattern for a tutor.
    ///
    /// # Arguments
    ///
    /// * `tutor_id` - The owning tutor's user ID
    /// * `weekdays` - Weekday numbers (1-7, Monday = 1)
    /// * `time_blocks` - The daily time blocks
    ///
    /// # Returns
    ///
    /// The new availability's ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_availability(
        &mut self,
        tutor_id: i64,
        weekdays: &[u8],
        time_blocks: &[TimeBlockRecord],
    ) -> Result<i64, PersistenceError> {
        mutations::create_availability(&mut self.conn, tutor_id, weekdays, time_blocks)
    }

    /// Retrieves an availability by ID.
    ///
    /// # Arguments
    ///
    /// * `availability_id` - The availability ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a stored JSON column
    /// cannot be decoded.
    pub fn get_availability(
        &mut self,
        availability_id: i64,
    ) -> Result<Option<AvailabilityData>, PersistenceError> {
        queries::get_availability(&mut self.conn, availability_id)
    }

    /// Lists a tutor's availability patterns, newest first.
    ///
    /// # Arguments
    ///
    /// * `tutor_id` - The tutor's user ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_availabilities_for_tutor(
        &mut self,
        tutor_id: i64,
    ) -> Result<Vec<AvailabilityData>, PersistenceError> {
        queries::list_availabilities_for_tutor(&mut self.conn, tutor_id)
    }

    /// Lists every active availability pattern across all tutors.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_active_availabilities(
        &mut self,
    ) -> Result<Vec<AvailabilityData>, PersistenceError> {
        queries::list_active_availabilities(&mut self.conn)
    }

    /// Sets the active flag on an availability.
    ///
    /// # Arguments
    ///
    /// * `availability_id` - The availability ID
    /// * `active` - The new active flag value
    ///
    /// # Errors
    ///
    /// Returns an error if the availability does not exist or the update fails.
    pub fn set_availability_active(
        &mut self,
        availability_id: i64,
        active: bool,
    ) -> Result<(), PersistenceError> {
        mutations::set_availability_active(&mut self.conn, availability_id, active)
    }

    /// Deletes an availability and soft-deletes its future unbooked slots.
    ///
    /// # Arguments
    ///
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
    /// Returns `PersistenceError::NotFound` if the availability does not
    /// exist for the tutor.
    pub fn delete_availability_cascade(
        &mut self,
        availability_id: i64,
        tutor_id: i64,
        cutoff_date: &str,
        cutoff_time: &str,
    ) -> Result<usize, PersistenceError> {
        mutations::delete_availability_cascade(
            &mut self.conn,
            availability_id,
            tutor_id,
            cutoff_date,
            cutoff_time,
        )
    }

    // ========================================================================
    // Class Slots
    // ========================================================================

    /// Persists a generation plan for a tutor.
    ///
    /// # Arguments
    ///
    /// * `tutor_id` - The tutor the slots belong to
    /// * `plan` - The candidate batch to persist
    ///
    /// # Returns
    ///
    /// The count of inserted slots and the distinct dates that had skips.
    ///
    /// # Errors
    ///
    /// Returns an error if the generation transaction fails.
    pub fn generate_class_slots(
        &mut self,
        tutor_id: i64,
        plan: &GenerationPlan,
    ) -> Result<GenerationOutcome, PersistenceError> {
        mutations::generate_class_slots(&mut self.conn, tutor_id, plan)
    }

    /// Retrieves a live (non-deleted) slot by ID.
    ///
    /// # Arguments
    ///
    /// * `class_slot_id` - The slot ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_live_slot(
        &mut self,
        class_slot_id: i64,
    ) -> Result<Option<ClassSlotData>, PersistenceError> {
        queries::get_live_slot(&mut self.conn, class_slot_id)
    }

    /// Lists live slots, optionally filtered by tutor and status.
    ///
    /// # Arguments
    ///
    /// * `tutor_id` - Restrict to one tutor's slots when set
    /// * `status` - Restrict to one status when set
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_slots(
        &mut self,
        tutor_id: Option<i64>,
        status: Option<&str>,
    ) -> Result<Vec<ClassSlotData>, PersistenceError> {
        queries::list_slots(&mut self.conn, tutor_id, status)
    }

    // ========================================================================
    // Lessons
    // ========================================================================

    /// Reserves a slot and creates its lesson in one transaction.
    ///
    /// # Arguments
    ///
    /// * `class_slot_id` - The slot to reserve
    /// * `student_id` - The booking student's user ID
    /// * `subject_id` - The subject of the lesson
    /// * `modality` - The lesson modality (`ONLINE` or `ONSITE`)
    ///
    /// # Returns
    ///
    /// The created lesson.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SlotNotFound` if the slot does not exist,
    /// or `PersistenceError::SlotStateChanged` if it is no longer `AVAILABLE`.
    pub fn reserve_slot_and_create_lesson(
        &mut self,
        class_slot_id: i64,
        student_id: i64,
        subject_id: i64,
        modality: &str,
    ) -> Result<LessonData, PersistenceError> {
        mutations::reserve_slot_and_create_lesson(
            &mut self.conn,
            class_slot_id,
            student_id,
            subject_id,
            modality,
        )
    }

    /// Cancels a pending lesson and releases its slot in one transaction.
    ///
    /// # Arguments
    ///
    /// * `lesson_id` - The lesson to cancel
    ///
    /// # Returns
    ///
    /// The ID of the released slot.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotFound` if the lesson does not exist,
    /// or `PersistenceError::LessonStateChanged` if it is not `PENDING`.
    pub fn cancel_lesson_and_release_slot(
        &mut self,
        lesson_id: i64,
    ) -> Result<i64, PersistenceError> {
        mutations::cancel_lesson_and_release_slot(&mut self.conn, lesson_id)
    }

    /// Retrieves a lesson by ID.
    ///
    /// # Arguments
    ///
    /// * `lesson_id` - The lesson ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn get_lesson(&mut self, lesson_id: i64) -> Result<Option<LessonData>, PersistenceError> {
        queries::get_lesson(&mut self.conn, lesson_id)
    }

    /// Lists lessons where the given user is the student, soonest first.
    ///
    /// # Arguments
    ///
    /// * `student_id` - The student's user ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_lessons_for_student(
        &mut self,
        student_id: i64,
    ) -> Result<Vec<LessonData>, PersistenceError> {
        queries::list_lessons_for_student(&mut self.conn, student_id)
    }

    /// Lists lessons where the given user is the tutor, soonest first.
    ///
    /// # Arguments
    ///
    /// * `tutor_id` - The tutor's user ID
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub fn list_lessons_for_tutor(
        &mut self,
        tutor_id: i64,
    ) -> Result<Vec<LessonData>, PersistenceError> {
        queries::list_lessons_for_tutor(&mut self.conn, tutor_id)
    }
}
