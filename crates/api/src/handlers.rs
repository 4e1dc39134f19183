// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handler functions for state-changing and read-only operations.

use std::str::FromStr;

use chrono::{NaiveDateTime, Utc};
use chrono_tz::Tz;
use tutoria::{
    GenerationPlan, ensure_active_availability, ensure_bookable, ensure_cancellable,
    ensure_lesson_party, ensure_not_own_slot, plan_weeks,
};
use tutoria_domain::{
    LessonStatus, LevelBreakdown, Modality, SlotStatus, TimeBlock, WeekAnchor, Weekday,
    WeeklyPattern, format_date, format_time, level_breakdown, validate_email, validate_name,
};
use tutoria_persistence::{
    AvailabilityData, ClassSlotData, GenerationOutcome, LessonData, Persistence, SubjectData,
    TimeBlockRecord, UserData,
};

use crate::auth::{AuthenticatedUser, AuthenticationService, AuthorizationService, Role};
use crate::error::{
    ApiError, translate_core_error, translate_domain_error, translate_persistence_error,
};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    AvailabilityInfo, BookLessonsRequest, BookLessonsResponse, CancelLessonRequest,
    CancelLessonResponse, ClassSlotInfo, CreateAvailabilityRequest, CreateAvailabilityResponse,
    DeleteAvailabilityResponse, GenerateWeekRequest, GenerateWeekResponse, LessonInfo,
    ListAvailabilitiesResponse, ListLessonsResponse, ListSlotsResponse, ListSubjectsResponse,
    LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse,
    SetAvailabilityActiveRequest, SetAvailabilityActiveResponse, SlotBookingOutcome, SubjectInfo,
    TimeBlockInfo, UserProfile,
};

// ========================================================================
// Conversion helpers
// ========================================================================

/// Converts a persistence user row into an API profile.
fn user_to_profile(user: UserData) -> UserProfile {
    UserProfile {
        user_id: user.user_id,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        role: user.role,
        xp: user.xp,
    }
}

/// Converts a persistence availability row into an API DTO.
fn availability_to_info(availability: AvailabilityData) -> AvailabilityInfo {
    AvailabilityInfo {
        availability_id: availability.availability_id,
        tutor_id: availability.tutor_id,
        weekdays: availability.weekdays,
        time_blocks: availability
            .time_blocks
            .into_iter()
            .map(|block| TimeBlockInfo {
                start: block.start,
                end: block.end,
            })
            .collect(),
        is_active: availability.is_active,
        created_at: availability.created_at,
    }
}

/// Converts a persistence slot row into an API DTO.
fn slot_to_info(slot: ClassSlotData) -> ClassSlotInfo {
    ClassSlotInfo {
        class_slot_id: slot.class_slot_id,
        tutor_id: slot.tutor_id,
        slot_date: slot.slot_date,
        start_time: slot.start_time,
        end_time: slot.end_time,
        status: slot.status,
    }
}

/// Converts a persistence lesson row into an API DTO.
fn lesson_to_info(lesson: LessonData) -> LessonInfo {
    LessonInfo {
        lesson_id: lesson.lesson_id,
        class_slot_id: lesson.class_slot_id,
        student_id: lesson.student_id,
        tutor_id: lesson.tutor_id,
        subject_id: lesson.subject_id,
        modality: lesson.modality,
        status: lesson.status,
        scheduled_at: lesson.scheduled_at,
    }
}

/// Loads an availability and verifies the caller owns it.
///
/// A missing availability and a foreign availability produce the same
/// not-found error, so callers cannot probe which IDs exist.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `availability_id` - The availability to load
/// * `tutor_id` - The authenticated tutor's user ID
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the availability does not exist
/// or belongs to another tutor.
fn load_owned_availability(
    persistence: &mut Persistence,
    availability_id: i64,
    tutor_id: i64,
) -> Result<AvailabilityData, ApiError> {
    let availability: AvailabilityData = persistence
        .get_availability(availability_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Availability"),
            message: format!("Availability {availability_id} not found"),
        })?;

    if availability.tutor_id != tutor_id {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Availability"),
            message: format!("Availability {availability_id} not found"),
        });
    }

    Ok(availability)
}

/// Reconstructs a validated weekly pattern from a stored availability row.
fn pattern_from_stored(availability: &AvailabilityData) -> Result<WeeklyPattern, ApiError> {
    let weekdays: Vec<Weekday> = availability
        .weekdays
        .iter()
        .map(|number| Weekday::new(*number))
        .collect::<Result<Vec<Weekday>, _>>()
        .map_err(translate_domain_error)?;

    let time_blocks: Vec<TimeBlock> = availability
        .time_blocks
        .iter()
        .map(|block| TimeBlock::parse(&block.start, &block.end))
        .collect::<Result<Vec<TimeBlock>, _>>()
        .map_err(translate_domain_error)?;

    WeeklyPattern::new(weekdays, time_blocks).map_err(translate_domain_error)
}

// ========================================================================
// Account handlers
// ========================================================================

/// Registers a new account.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The registration request
///
/// # Returns
///
/// The created user profile.
///
/// # Errors
///
/// Returns an error if:
/// - The email, names, or role are invalid
/// - The password does not meet the password policy
/// - An account already exists for the email
/// - Database operations fail
pub fn register(
    persistence: &mut Persistence,
    request: RegisterRequest,
) -> Result<RegisterResponse, ApiError> {
    // Validate identity fields
    validate_email(&request.email).map_err(translate_domain_error)?;
    validate_name(&request.first_name).map_err(translate_domain_error)?;
    validate_name(&request.last_name).map_err(translate_domain_error)?;

    // Validate role
    if request.role != "TUTOR" && request.role != "STUDENT" {
        return Err(ApiError::InvalidInput {
            field: String::from("role"),
            message: format!(
                "Invalid role: {}. Must be 'TUTOR' or 'STUDENT'",
                request.role
            ),
        });
    }

    // Validate password policy
    let policy: PasswordPolicy = PasswordPolicy::default();
    policy.validate(
        &request.password,
        &request.email,
        &request.first_name,
        &request.last_name,
    )?;

    // Create the account with a hashed password
    let user_id: i64 = persistence
        .create_user(
            &request.email,
            &request.password,
            &request.first_name,
            &request.last_name,
            &request.role,
        )
        .map_err(translate_persistence_error)?;

    let user: UserData = persistence
        .get_user_by_id(user_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: String::from("User not found after creation"),
        })?;

    let role: String = user.role.clone();
    let email: String = user.email.clone();

    Ok(RegisterResponse {
        user: user_to_profile(user),
        message: format!("Registered {role} account for {email}"),
    })
}

/// Logs in and creates a session.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The login request
///
/// # Returns
///
/// The session token, the user profile, and the session expiration.
///
/// # Errors
///
/// Returns an error if:
/// - The email is unknown or the password is wrong
/// - The account is disabled
/// - Database operations fail
pub fn login(
    persistence: &mut Persistence,
    request: &LoginRequest,
) -> Result<LoginResponse, ApiError> {
    let (session_token, _authenticated_user, user): (String, AuthenticatedUser, UserData) =
        AuthenticationService::login(persistence, &request.email, &request.password)?;

    // Get session expiration from the session we just created
    let session: Option<tutoria_persistence::SessionData> = persistence
        .get_session_by_token(&session_token)
        .map_err(|e| ApiError::Internal {
            message: format!("Failed to retrieve session: {e}"),
        })?;

    let expires_at: String = session
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Session not found after creation"),
        })?
        .expires_at;

    Ok(LoginResponse {
        session_token,
        user: user_to_profile(user),
        expires_at,
    })
}

/// Logs out by deleting the session.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `session_token` - The session token to delete
///
/// # Errors
///
/// Returns an error if the logout fails.
pub fn logout(persistence: &mut Persistence, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(persistence, session_token)?;
    Ok(())
}

/// Returns the authenticated user's profile and derived level.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `authenticated_user` - The authenticated user
///
/// # Errors
///
/// Returns an error if the user row cannot be loaded.
pub fn whoami(
    persistence: &mut Persistence,
    authenticated_user: &AuthenticatedUser,
) -> Result<MeResponse, ApiError> {
    let user: UserData = persistence
        .get_user_by_id(authenticated_user.id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Authenticated user not found"),
        })?;

    let level: LevelBreakdown = level_breakdown(user.xp);

    Ok(MeResponse {
        user: user_to_profile(user),
        level,
    })
}

// ========================================================================
// Subject handlers
// ========================================================================

/// Lists all subjects.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_subjects(persistence: &mut Persistence) -> Result<ListSubjectsResponse, ApiError> {
    let subjects: Vec<SubjectData> = persistence
        .list_subjects()
        .map_err(translate_persistence_error)?;

    Ok(ListSubjectsResponse {
        subjects: subjects
            .into_iter()
            .map(|subject| SubjectInfo {
                subject_id: subject.subject_id,
                name: subject.name,
            })
            .collect(),
    })
}

// ========================================================================
// Availability handlers
// ========================================================================

/// Creates a weekly availability pattern for the authenticated tutor.
///
/// The pattern is fully validated before anything is persisted: weekday
/// numbers must be 1-7 without duplicates and time blocks must be ordered
/// and non-overlapping.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The creation request
/// * `authenticated_user` - The authenticated user
///
/// # Errors
///
/// Returns an error if:
/// - The user is not a tutor
/// - The weekly pattern is invalid
/// - Database operations fail
pub fn create_availability(
    persistence: &mut Persistence,
    request: &CreateAvailabilityRequest,
    authenticated_user: &AuthenticatedUser,
) -> Result<CreateAvailabilityResponse, ApiError> {
    // Enforce authorization before validating the pattern
    AuthorizationService::authorize_create_availability(authenticated_user)?;

    // Validate the weekly pattern
    let weekdays: Vec<Weekday> = request
        .weekdays
        .iter()
        .map(|number| Weekday::new(*number))
        .collect::<Result<Vec<Weekday>, _>>()
        .map_err(translate_domain_error)?;

    let time_blocks: Vec<TimeBlock> = request
        .time_blocks
        .iter()
        .map(|block| TimeBlock::parse(&block.start, &block.end))
        .collect::<Result<Vec<TimeBlock>, _>>()
        .map_err(translate_domain_error)?;

    let pattern: WeeklyPattern =
        WeeklyPattern::new(weekdays, time_blocks).map_err(translate_domain_error)?;

    // Persist the canonical form of the validated pattern
    let weekday_numbers: Vec<u8> = pattern.weekdays().iter().map(Weekday::number).collect();
    let block_records: Vec<TimeBlockRecord> = pattern
        .time_blocks()
        .iter()
        .map(|block| TimeBlockRecord {
            start: format_time(block.start()),
            end: format_time(block.end()),
        })
        .collect();

    let availability_id: i64 = persistence
        .create_availability(authenticated_user.id, &weekday_numbers, &block_records)
        .map_err(translate_persistence_error)?;

    let availability: AvailabilityData = persistence
        .get_availability(availability_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Availability not found after creation"),
        })?;

    Ok(CreateAvailabilityResponse {
        availability: availability_to_info(availability),
        message: format!("Created availability {availability_id}"),
    })
}

/// Lists availabilities visible to the authenticated user.
///
/// Tutors see their own patterns, active or not; students see every
/// active pattern on the marketplace.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `authenticated_user` - The authenticated user
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_availabilities(
    persistence: &mut Persistence,
    authenticated_user: &AuthenticatedUser,
) -> Result<ListAvailabilitiesResponse, ApiError> {
    let availabilities: Vec<AvailabilityData> = match authenticated_user.role {
        Role::Tutor => persistence
            .list_availabilities_for_tutor(authenticated_user.id)
            .map_err(translate_persistence_error)?,
        Role::Student => persistence
            .list_active_availabilities()
            .map_err(translate_persistence_error)?,
    };

    Ok(ListAvailabilitiesResponse {
        availabilities: availabilities.into_iter().map(availability_to_info).collect(),
    })
}

/// Sets the active flag on an availability the caller owns.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `availability_id` - The availability to update
/// * `request` - The new flag value
/// * `authenticated_user` - The authenticated user
///
/// # Errors
///
/// Returns an error if:
/// - The user is not a tutor
/// - The availability does not exist or belongs to another tutor
/// - Database operations fail
pub fn set_availability_active(
    persistence: &mut Persistence,
    availability_id: i64,
    request: &SetAvailabilityActiveRequest,
    authenticated_user: &AuthenticatedUser,
) -> Result<SetAvailabilityActiveResponse, ApiError> {
    // Enforce authorization before touching the resource
    AuthorizationService::authorize_update_availability(authenticated_user)?;

    load_owned_availability(persistence, availability_id, authenticated_user.id)?;

    persistence
        .set_availability_active(availability_id, request.active)
        .map_err(translate_persistence_error)?;

    let availability: AvailabilityData = persistence
        .get_availability(availability_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::Internal {
            message: String::from("Availability not found after update"),
        })?;

    let state: &str = if request.active { "active" } else { "inactive" };

    Ok(SetAvailabilityActiveResponse {
        availability: availability_to_info(availability),
        message: format!("Availability {availability_id} is now {state}"),
    })
}

/// Deletes an availability the caller owns and cascades to its slots.
///
/// The cascade soft-deletes the tutor's live `AVAILABLE` slots that start
/// strictly after the current wall-clock time in the marketplace timezone.
/// Reserved slots and their lessons are untouched.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `availability_id` - The availability to delete
/// * `authenticated_user` - The authenticated user
/// * `timezone` - The marketplace timezone used to pin "now"
///
/// # Errors
///
/// Returns an error if:
/// - The user is not a tutor
/// - The availability does not exist or belongs to another tutor
/// - Database operations fail
pub fn delete_availability(
    persistence: &mut Persistence,
    availability_id: i64,
    authenticated_user: &AuthenticatedUser,
    timezone: Tz,
) -> Result<DeleteAvailabilityResponse, ApiError> {
    // Enforce authorization before touching the resource
    AuthorizationService::authorize_delete_availability(authenticated_user)?;

    load_owned_availability(persistence, availability_id, authenticated_user.id)?;

    // Pin "future" to the marketplace wall clock
    let now: NaiveDateTime = tutoria_domain::wall_clock_in_zone(Utc::now(), timezone);
    let cutoff_date: String = format_date(now.date());
    let cutoff_time: String = format_time(now.time());

    let deleted_slots: usize = persistence
        .delete_availability_cascade(
            availability_id,
            authenticated_user.id,
            &cutoff_date,
            &cutoff_time,
        )
        .map_err(translate_persistence_error)?;

    Ok(DeleteAvailabilityResponse {
        availability_id,
        deleted_slots,
        message: format!("Deleted availability {availability_id} and {deleted_slots} future slots"),
    })
}

// ========================================================================
// Slot handlers
// ========================================================================

/// Generates dated class slots from an availability for one or more weeks.
///
/// Every Monday anchor is validated before anything is persisted, so a
/// single bad date fails the whole request without creating slots.
/// Candidates that already exist as live slots are skipped and their dates
/// reported back.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The generation request
/// * `authenticated_user` - The authenticated user
///
/// # Errors
///
/// Returns an error if:
/// - The user is not a tutor
/// - The availability does not exist or belongs to another tutor
/// - The availability is inactive
/// - An anchor date is malformed or not a Monday
/// - Database operations fail
pub fn generate_week(
    persistence: &mut Persistence,
    request: &GenerateWeekRequest,
    authenticated_user: &AuthenticatedUser,
) -> Result<GenerateWeekResponse, ApiError> {
    // Enforce authorization before touching the resource
    AuthorizationService::authorize_generate_slots(authenticated_user)?;

    if request.monday_dates.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("monday_dates"),
            message: String::from("At least one Monday date is required"),
        });
    }

    let availability: AvailabilityData =
        load_owned_availability(persistence, request.availability_id, authenticated_user.id)?;

    ensure_active_availability(availability.availability_id, availability.is_active)
        .map_err(translate_core_error)?;

    // Validate all anchors up front; a non-Monday fails the whole request
    let anchors: Vec<WeekAnchor> = request
        .monday_dates
        .iter()
        .map(|date| WeekAnchor::parse(date))
        .collect::<Result<Vec<WeekAnchor>, _>>()
        .map_err(translate_domain_error)?;

    let pattern: WeeklyPattern = pattern_from_stored(&availability)?;

    let plan: GenerationPlan = plan_weeks(&pattern, &anchors).map_err(translate_core_error)?;

    let outcome: GenerationOutcome = persistence
        .generate_class_slots(authenticated_user.id, &plan)
        .map_err(translate_persistence_error)?;

    Ok(GenerateWeekResponse {
        message: format!("Generated {} slots", outcome.created),
        created: outcome.created,
        skipped_days: outcome.skipped_days,
    })
}

/// Lists live class slots, optionally filtered by tutor and status.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `tutor_id` - Restrict to one tutor's slots when set
/// * `status` - Restrict to one status when set
///
/// # Errors
///
/// Returns an error if the status filter is not a valid slot status or the
/// database query fails.
pub fn list_slots(
    persistence: &mut Persistence,
    tutor_id: Option<i64>,
    status: Option<&str>,
) -> Result<ListSlotsResponse, ApiError> {
    // Reject unknown status filters instead of returning an empty list
    let status_filter: Option<&str> = match status {
        Some(value) => Some(
            SlotStatus::from_str(value)
                .map_err(translate_domain_error)?
                .as_str(),
        ),
        None => None,
    };

    let slots: Vec<ClassSlotData> = persistence
        .list_slots(tutor_id, status_filter)
        .map_err(translate_persistence_error)?;

    Ok(ListSlotsResponse {
        slots: slots.into_iter().map(slot_to_info).collect(),
    })
}

// ========================================================================
// Lesson handlers
// ========================================================================

/// Books a single slot for a student.
///
/// The pre-checks catch the common failures with precise errors; the
/// reservation itself is a status-guarded transaction, so a concurrent
/// booking that slips between check and reserve still loses cleanly with
/// a conflict.
fn book_one_slot(
    persistence: &mut Persistence,
    class_slot_id: i64,
    subject_id: i64,
    modality: Modality,
    student_id: i64,
    expected_tutor_id: Option<i64>,
) -> Result<LessonInfo, ApiError> {
    let slot: ClassSlotData = persistence
        .get_live_slot(class_slot_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Slot"),
            message: format!("Slot {class_slot_id} not found"),
        })?;

    // The slot decides its tutor; a client-supplied tutor may only confirm it
    if let Some(expected) = expected_tutor_id
        && expected != slot.tutor_id
    {
        return Err(ApiError::InvalidInput {
            field: String::from("tutor_id"),
            message: format!(
                "Slot {class_slot_id} belongs to tutor {}, not {expected}",
                slot.tutor_id
            ),
        });
    }

    ensure_not_own_slot(class_slot_id, student_id, slot.tutor_id).map_err(translate_core_error)?;

    let status: SlotStatus = SlotStatus::from_str(&slot.status).map_err(|e| {
        tracing::warn!("Stored slot {} has an invalid status: {}", class_slot_id, slot.status);
        ApiError::Internal {
            message: format!("Stored slot {class_slot_id} has an invalid status: {e}"),
        }
    })?;
    ensure_bookable(class_slot_id, status).map_err(translate_core_error)?;

    let lesson: LessonData = persistence
        .reserve_slot_and_create_lesson(class_slot_id, student_id, subject_id, modality.as_str())
        .map_err(translate_persistence_error)?;

    Ok(lesson_to_info(lesson))
}

/// Books one or more class slots for the authenticated student.
///
/// Each slot is booked in its own transaction and reported individually;
/// slots already booked are not rolled back when a later slot fails. When
/// no slot could be booked, the first failure is returned as the overall
/// error.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The booking request
/// * `authenticated_user` - The authenticated user
///
/// # Errors
///
/// Returns an error if:
/// - The user is not a student
/// - The modality is invalid or the slot list is empty
/// - The subject does not exist
/// - Every requested slot failed to book
pub fn book_slots(
    persistence: &mut Persistence,
    request: &BookLessonsRequest,
    authenticated_user: &AuthenticatedUser,
) -> Result<BookLessonsResponse, ApiError> {
    // Enforce authorization before validating the request
    AuthorizationService::authorize_book_slots(authenticated_user)?;

    if request.slot_ids.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("slot_ids"),
            message: String::from("At least one slot ID is required"),
        });
    }

    let modality: Modality =
        Modality::from_str(&request.modality).map_err(translate_domain_error)?;

    // Unknown subjects fail the whole request before any slot is touched
    persistence
        .get_subject(request.subject_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Subject"),
            message: format!("Subject {} not found", request.subject_id),
        })?;

    let mut outcomes: Vec<SlotBookingOutcome> = Vec::with_capacity(request.slot_ids.len());
    let mut first_error: Option<ApiError> = None;
    let mut booked: usize = 0;

    for class_slot_id in &request.slot_ids {
        match book_one_slot(
            persistence,
            *class_slot_id,
            request.subject_id,
            modality,
            authenticated_user.id,
            request.tutor_id,
        ) {
            Ok(lesson) => {
                booked += 1;
                outcomes.push(SlotBookingOutcome {
                    class_slot_id: *class_slot_id,
                    lesson: Some(lesson),
                    error: None,
                });
            }
            Err(error) => {
                outcomes.push(SlotBookingOutcome {
                    class_slot_id: *class_slot_id,
                    lesson: None,
                    error: Some(error.to_string()),
                });
                if first_error.is_none() {
                    first_error = Some(error);
                }
            }
        }
    }

    // With no successful booking the first failure decides the response
    if booked == 0 {
        return Err(first_error.unwrap_or(ApiError::Internal {
            message: String::from("Booking produced no outcome"),
        }));
    }

    let total: usize = outcomes.len();

    Ok(BookLessonsResponse {
        booked,
        outcomes,
        message: format!("Booked {booked} of {total} slots"),
    })
}

/// Lists the lessons the authenticated user is a party to.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `authenticated_user` - The authenticated user
///
/// # Errors
///
/// Returns an error if the database query fails.
pub fn list_lessons(
    persistence: &mut Persistence,
    authenticated_user: &AuthenticatedUser,
) -> Result<ListLessonsResponse, ApiError> {
    let lessons: Vec<LessonData> = match authenticated_user.role {
        Role::Student => persistence
            .list_lessons_for_student(authenticated_user.id)
            .map_err(translate_persistence_error)?,
        Role::Tutor => persistence
            .list_lessons_for_tutor(authenticated_user.id)
            .map_err(translate_persistence_error)?,
    };

    Ok(ListLessonsResponse {
        lessons: lessons.into_iter().map(lesson_to_info).collect(),
    })
}

/// Cancels a lesson and releases its slot.
///
/// Only the lesson's student or tutor may cancel it; outsiders receive
/// not-found. The status change and the slot release happen in one
/// transaction, so the slot becomes bookable again exactly when the
/// lesson is cancelled.
///
/// # Arguments
///
/// * `persistence` - The persistence layer
/// * `request` - The cancellation request
/// * `authenticated_user` - The authenticated user
///
/// # Errors
///
/// Returns an error if:
/// - The lesson does not exist or the caller is not a party to it
/// - The lesson is already `DONE` or `CANCELLED`
/// - Database operations fail
pub fn cancel_lesson(
    persistence: &mut Persistence,
    request: &CancelLessonRequest,
    authenticated_user: &AuthenticatedUser,
) -> Result<CancelLessonResponse, ApiError> {
    AuthorizationService::authorize_cancel_lesson(authenticated_user)?;

    let lesson: LessonData = persistence
        .get_lesson(request.lesson_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Lesson"),
            message: format!("Lesson {} not found", request.lesson_id),
        })?;

    ensure_lesson_party(
        lesson.lesson_id,
        authenticated_user.id,
        lesson.student_id,
        lesson.tutor_id,
    )
    .map_err(translate_core_error)?;

    let status: LessonStatus = LessonStatus::from_str(&lesson.status).map_err(|e| {
        tracing::warn!(
            "Stored lesson {} has an invalid status: {}",
            lesson.lesson_id,
            lesson.status
        );
        ApiError::Internal {
            message: format!("Stored lesson {} has an invalid status: {e}", lesson.lesson_id),
        }
    })?;
    ensure_cancellable(lesson.lesson_id, status).map_err(translate_core_error)?;

    let class_slot_id: i64 = persistence
        .cancel_lesson_and_release_slot(request.lesson_id)
        .map_err(translate_persistence_error)?;

    Ok(CancelLessonResponse {
        lesson_id: request.lesson_id,
        class_slot_id,
        message: format!("Cancelled lesson {}", request.lesson_id),
    })
}
