// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use tutoria_domain::LevelBreakdown;

// ========================================================================
// Account Request/Response Types
// ========================================================================

/// A user profile as exposed by the API.
///
/// This DTO is distinct from persistence rows: it never carries the
/// password hash or the disabled flag.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserProfile {
    /// The user's canonical identifier.
    pub user_id: i64,
    /// The user's email address.
    pub email: String,
    /// The user's first name.
    pub first_name: String,
    /// The user's last name.
    pub last_name: String,
    /// The user's role (`TUTOR` or `STUDENT`).
    pub role: String,
    /// The user's accumulated experience points.
    pub xp: i64,
}

/// API request to register a new account.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterRequest {
    /// The account email address.
    pub email: String,
    /// The account password (plain text, hashed before storage).
    pub password: String,
    /// The user's first name.
    pub first_name: String,
    /// The user's last name.
    pub last_name: String,
    /// The account role (`TUTOR` or `STUDENT`).
    pub role: String,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct RegisterResponse {
    /// The created user profile.
    pub user: UserProfile,
    /// A success message.
    pub message: String,
}

/// API request to log in and create a session.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginRequest {
    /// The account email address.
    pub email: String,
    /// The account password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LoginResponse {
    /// The session token (opaque).
    pub session_token: String,
    /// The authenticated user's profile.
    pub user: UserProfile,
    /// Session expiration timestamp (ISO 8601).
    pub expires_at: String,
}

/// API response for the authenticated profile endpoint.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct MeResponse {
    /// The authenticated user's profile.
    pub user: UserProfile,
    /// The level derived from the user's experience points.
    pub level: LevelBreakdown,
}

// ========================================================================
// Subject Request/Response Types
// ========================================================================

/// A subject that lessons can be booked for.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SubjectInfo {
    /// The subject's canonical identifier.
    pub subject_id: i64,
    /// The subject's display name.
    pub name: String,
}

/// API response listing all subjects.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListSubjectsResponse {
    /// All subjects, ordered by name.
    pub subjects: Vec<SubjectInfo>,
}

// ========================================================================
// Availability Request/Response Types
// ========================================================================

/// One time block within a weekly availability pattern.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TimeBlockInfo {
    /// Block start time (`HH:mm`).
    pub start: String,
    /// Block end time (`HH:mm`).
    pub end: String,
}

/// A weekly availability pattern as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct AvailabilityInfo {
    /// The availability's canonical identifier.
    pub availability_id: i64,
    /// The owning tutor's user ID.
    pub tutor_id: i64,
    /// Weekday numbers (1 = Monday .. 7 = Sunday).
    pub weekdays: Vec<u8>,
    /// The pattern's time blocks.
    pub time_blocks: Vec<TimeBlockInfo>,
    /// Whether the pattern is eligible for slot generation.
    pub is_active: bool,
    /// Creation timestamp.
    pub created_at: String,
}

/// API request to create a weekly availability pattern.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateAvailabilityRequest {
    /// Weekday numbers (1 = Monday .. 7 = Sunday).
    pub weekdays: Vec<u8>,
    /// The pattern's time blocks.
    pub time_blocks: Vec<TimeBlockInfo>,
}

/// API response for a successful availability creation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CreateAvailabilityResponse {
    /// The created availability.
    pub availability: AvailabilityInfo,
    /// A success message.
    pub message: String,
}

/// API response listing availabilities.
///
/// Tutors receive their own patterns (active or not); students receive
/// every active pattern on the marketplace.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListAvailabilitiesResponse {
    /// The visible availability patterns.
    pub availabilities: Vec<AvailabilityInfo>,
}

/// API request to set an availability's active flag.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetAvailabilityActiveRequest {
    /// The new active flag value.
    pub active: bool,
}

/// API response for a successful active-flag update.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SetAvailabilityActiveResponse {
    /// The updated availability.
    pub availability: AvailabilityInfo,
    /// A success message.
    pub message: String,
}

/// API response for a successful availability deletion.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DeleteAvailabilityResponse {
    /// The deleted availability's ID.
    pub availability_id: i64,
    /// How many future, unbooked slots were soft-deleted by the cascade.
    pub deleted_slots: usize,
    /// A success message.
    pub message: String,
}

// ========================================================================
// Slot Generation Request/Response Types
// ========================================================================

/// API request to generate dated class slots from an availability.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerateWeekRequest {
    /// The availability pattern to expand.
    pub availability_id: i64,
    /// The Monday anchor dates (`YYYY-MM-DD`) of the weeks to generate.
    pub monday_dates: Vec<String>,
}

/// API response for a slot generation run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct GenerateWeekResponse {
    /// A summary message.
    pub message: String,
    /// How many slots were created.
    pub created: usize,
    /// Dates (`YYYY-MM-DD`) on which at least one slot already existed.
    pub skipped_days: Vec<String>,
}

/// A dated class slot as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ClassSlotInfo {
    /// The slot's canonical identifier.
    pub class_slot_id: i64,
    /// The owning tutor's user ID.
    pub tutor_id: i64,
    /// The slot date (`YYYY-MM-DD`).
    pub slot_date: String,
    /// The slot start time (`HH:mm`).
    pub start_time: String,
    /// The slot end time (`HH:mm`).
    pub end_time: String,
    /// The slot status (`AVAILABLE`, `RESERVED`, or `CANCELLED`).
    pub status: String,
}

/// API response listing class slots.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListSlotsResponse {
    /// The matching live slots.
    pub slots: Vec<ClassSlotInfo>,
}

// ========================================================================
// Lesson Request/Response Types
// ========================================================================

/// A lesson as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct LessonInfo {
    /// The lesson's canonical identifier.
    pub lesson_id: i64,
    /// The booked class slot's ID.
    pub class_slot_id: i64,
    /// The attending student's user ID.
    pub student_id: i64,
    /// The teaching tutor's user ID.
    pub tutor_id: i64,
    /// The subject being taught.
    pub subject_id: i64,
    /// How the lesson is delivered (`ONLINE` or `ONSITE`).
    pub modality: String,
    /// The lesson status (`PENDING`, `DONE`, or `CANCELLED`).
    pub status: String,
    /// The lesson start instant (`YYYY-MM-DDTHH:MM:SS`), derived from the
    /// slot's date and start time.
    pub scheduled_at: String,
}

/// API request to book one or more class slots.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookLessonsRequest {
    /// The class slots to book.
    pub slot_ids: Vec<i64>,
    /// The subject the lessons are for.
    pub subject_id: i64,
    /// How the lessons are delivered (`ONLINE` or `ONSITE`).
    pub modality: String,
    /// Optional cross-check: when set, every slot must belong to this
    /// tutor. Older clients send the tutor alongside the slot; the slot
    /// remains authoritative and a mismatch rejects that slot.
    #[serde(default)]
    pub tutor_id: Option<i64>,
}

/// The outcome of one slot within a booking request.
///
/// Exactly one of `lesson` and `error` is set.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SlotBookingOutcome {
    /// The slot this outcome refers to.
    pub class_slot_id: i64,
    /// The created lesson, if the slot was booked.
    pub lesson: Option<LessonInfo>,
    /// The failure reason, if the slot was not booked.
    pub error: Option<String>,
}

/// API response for a booking request.
///
/// Returned whenever at least one slot was booked; the per-slot outcomes
/// carry the failures for the rest.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct BookLessonsResponse {
    /// How many slots were booked.
    pub booked: usize,
    /// Per-slot outcomes, in request order.
    pub outcomes: Vec<SlotBookingOutcome>,
    /// A summary message.
    pub message: String,
}

/// API response listing the caller's lessons.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ListLessonsResponse {
    /// Lessons in which the caller is a party, soonest first.
    pub lessons: Vec<LessonInfo>,
}

/// API request to cancel a lesson.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CancelLessonRequest {
    /// The lesson to cancel.
    pub lesson_id: i64,
}

/// API response for a successful lesson cancellation.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CancelLessonResponse {
    /// The cancelled lesson's ID.
    pub lesson_id: i64,
    /// The class slot released back to `AVAILABLE`.
    pub class_slot_id: i64,
    /// A success message.
    pub message: String,
}
