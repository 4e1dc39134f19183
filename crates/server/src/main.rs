// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post},
};
use chrono_tz::Tz;
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info};
use tutoria_api::{
    ApiError, AuthenticatedUser, AvailabilityInfo, BookLessonsRequest, CancelLessonRequest,
    ClassSlotInfo, CreateAvailabilityRequest, GenerateWeekRequest, LessonInfo, LoginRequest,
    RegisterRequest, SetAvailabilityActiveRequest, SlotBookingOutcome, TimeBlockInfo, UserProfile,
    book_slots, cancel_lesson, create_availability, delete_availability, generate_week,
    list_availabilities, list_lessons, list_slots, list_subjects, login, logout, register,
    set_availability_active, whoami,
};
use tutoria_domain::{LevelBreakdown, parse_timezone};
use tutoria_persistence::Persistence;

mod session;

use session::SessionUser;

/// Tutoria Server - HTTP server for the tutoring marketplace backend
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,

    /// IANA timezone the marketplace schedule lives in
    #[arg(short, long, default_value = "America/Argentina/Buenos_Aires")]
    timezone: String,
}

/// Application state shared across handlers.
///
/// This contains the persistence layer wrapped in a Mutex to allow
/// safe concurrent access, plus the marketplace timezone.
#[derive(Clone)]
struct AppState {
    /// The persistence layer for accounts, availabilities, slots, and lessons.
    persistence: Arc<Mutex<Persistence>>,
    /// The timezone that decides which slots count as upcoming.
    timezone: Tz,
}

// ============================================================================
// Wire request types
// ============================================================================

/// API request for registering an account.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterApiRequest {
    /// The account email address.
    email: String,
    /// The account password (plain text over the wire, hashed before storage).
    password: String,
    /// The user's first name.
    first_name: String,
    /// The user's last name.
    last_name: String,
    /// The account role (`TUTOR` or `STUDENT`).
    role: String,
}

/// API request for logging in.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginApiRequest {
    /// The account email address.
    email: String,
    /// The account password.
    password: String,
}

/// One time block inside an availability pattern, as `HH:mm` strings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct TimeBlockApi {
    /// Block start time.
    start: String,
    /// Block end time.
    end: String,
}

/// API request for creating a weekly availability pattern.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAvailabilityApiRequest {
    /// Weekday numbers (1 = Monday .. 7 = Sunday).
    weekdays: Vec<u8>,
    /// The pattern's time blocks.
    time_blocks: Vec<TimeBlockApi>,
}

/// API request for toggling an availability's active flag.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetAvailabilityActiveApiRequest {
    /// The new active flag value.
    active: bool,
}

/// API request for the body-variant availability delete.
///
/// Accepts `id` as an alias for `availabilityId`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteAvailabilityApiRequest {
    /// The availability to delete.
    #[serde(alias = "id")]
    availability_id: i64,
}

/// API request for generating dated slots from an availability.
///
/// `mondayDates` (plural) is canonical; `mondayDate` is accepted as a
/// single-week convenience and `selectedAvailabilityId` as an alias used
/// by older clients.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateWeekApiRequest {
    /// The availability pattern to expand.
    #[serde(alias = "selectedAvailabilityId")]
    availability_id: i64,
    /// A single Monday anchor date (`YYYY-MM-DD`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    monday_date: Option<String>,
    /// Monday anchor dates (`YYYY-MM-DD`) for several weeks at once.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    monday_dates: Option<Vec<String>>,
}

/// API request for booking class slots.
///
/// `slotIds` (plural) is canonical; `slotId` is accepted as a single-slot
/// convenience. A `tutorId`, when present, is cross-checked against each
/// slot; the slot stays authoritative.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookLessonsApiRequest {
    /// A single slot to book.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slot_id: Option<i64>,
    /// Several slots to book in one request.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    slot_ids: Option<Vec<i64>>,
    /// The subject the lessons are for.
    subject_id: i64,
    /// How the lessons are delivered (`ONLINE` or `ONSITE`).
    modality: String,
    /// Optional tutor cross-check.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    tutor_id: Option<i64>,
}

/// API request for cancelling a lesson.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct CancelLessonApiRequest {
    /// The lesson to cancel.
    lesson_id: i64,
}

/// Query parameters for the slot listing endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct SlotsQuery {
    /// Only return slots owned by this tutor.
    tutor_id: Option<i64>,
    /// Only return slots in this status (`AVAILABLE`, `RESERVED`, `CANCELLED`).
    status: Option<String>,
}

// ============================================================================
// Wire response types
// ============================================================================

/// Error response body.
#[derive(Debug, Clone, Deserialize, Serialize)]
struct ErrorResponse {
    /// What went wrong.
    error: String,
}

/// A user profile as it appears on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct UserApiResponse {
    /// The user's identifier.
    id: i64,
    /// The user's email address.
    email: String,
    /// The user's first name.
    first_name: String,
    /// The user's last name.
    last_name: String,
    /// The user's role (`TUTOR` or `STUDENT`).
    role: String,
    /// The user's accumulated experience points.
    xp: i64,
}

/// API response for a successful registration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct RegisterApiResponse {
    /// The created user.
    user: UserApiResponse,
    /// A success message.
    message: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct LoginApiResponse {
    /// The session token to present as `Authorization: Bearer <token>`.
    token: String,
    /// The authenticated user.
    user: UserApiResponse,
    /// When the session expires (ISO 8601).
    expires_at: String,
}

/// API response for a successful logout.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct LogoutApiResponse {
    /// A success message.
    message: String,
}

/// A user's derived XP level as it appears on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct LevelApiResponse {
    /// The derived level (1-based).
    level: u32,
    /// XP at which the current level begins.
    current_level_start: i64,
    /// XP at which the next level begins.
    next_level_start: i64,
    /// Fraction of the way through the current level, in `[0, 1)`.
    progress: f64,
}

/// API response for the authenticated profile endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct MeApiResponse {
    /// The authenticated user.
    user: UserApiResponse,
    /// The level derived from the user's experience points.
    level: LevelApiResponse,
}

/// A subject as it appears on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct SubjectApiResponse {
    /// The subject's identifier.
    id: i64,
    /// The subject's display name.
    name: String,
}

/// An availability pattern as it appears on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct AvailabilityApiResponse {
    /// The availability's identifier.
    id: i64,
    /// The owning tutor's user ID.
    tutor_id: i64,
    /// Weekday numbers (1 = Monday .. 7 = Sunday).
    weekdays: Vec<u8>,
    /// The pattern's time blocks.
    time_blocks: Vec<TimeBlockApi>,
    /// Whether the pattern is eligible for slot generation.
    active: bool,
    /// Creation timestamp.
    created_at: String,
}

/// API response for a successful availability creation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreateAvailabilityApiResponse {
    /// The created availability.
    availability: AvailabilityApiResponse,
    /// A success message.
    message: String,
}

/// API response for a successful active-flag update.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct SetAvailabilityActiveApiResponse {
    /// The updated availability.
    availability: AvailabilityApiResponse,
    /// A success message.
    message: String,
}

/// API response for a successful availability deletion.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct DeleteAvailabilityApiResponse {
    /// The deleted availability's ID.
    availability_id: i64,
    /// How many upcoming, unbooked slots the cascade removed.
    deleted_slots: usize,
    /// A success message.
    message: String,
}

/// API response for a slot generation run.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateWeekApiResponse {
    /// A summary message.
    message: String,
    /// How many slots were created.
    created: usize,
    /// Dates (`YYYY-MM-DD`) on which at least one slot already existed.
    skipped_days: Vec<String>,
}

/// A dated class slot as it appears on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct SlotApiResponse {
    /// The slot's identifier.
    id: i64,
    /// The owning tutor's user ID.
    tutor_id: i64,
    /// The slot date (`YYYY-MM-DD`).
    date: String,
    /// The slot start time (`HH:mm`).
    start_time: String,
    /// The slot end time (`HH:mm`).
    end_time: String,
    /// The slot status (`AVAILABLE`, `RESERVED`, or `CANCELLED`).
    status: String,
    /// Whether the slot is soft-deleted. Listings only surface live slots.
    deleted: bool,
}

/// A lesson as it appears on the wire.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct LessonApiResponse {
    /// The lesson's identifier.
    id: i64,
    /// The booked class slot's ID.
    slot_id: i64,
    /// The attending student's user ID.
    student_id: i64,
    /// The teaching tutor's user ID.
    tutor_id: i64,
    /// The subject being taught.
    subject_id: i64,
    /// How the lesson is delivered (`ONLINE` or `ONSITE`).
    modality: String,
    /// The lesson start instant (`YYYY-MM-DDTHH:MM:SS`).
    timestamp: String,
    /// The lesson status (`PENDING`, `DONE`, or `CANCELLED`).
    status: String,
}

/// The outcome of one slot within a booking request.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct SlotOutcomeApiResponse {
    /// The slot this outcome refers to.
    slot_id: i64,
    /// The created lesson, if the slot was booked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    lesson: Option<LessonApiResponse>,
    /// The failure reason, if the slot was not booked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

/// API response for a booking request with at least one success.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct BookLessonsApiResponse {
    /// How many slots were booked.
    booked: usize,
    /// Per-slot outcomes, in request order.
    outcomes: Vec<SlotOutcomeApiResponse>,
    /// A summary message.
    message: String,
}

/// API response for a successful lesson cancellation.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
struct CancelLessonApiResponse {
    /// The cancelled lesson's ID.
    lesson_id: i64,
    /// The class slot released back to `AVAILABLE`.
    slot_id: i64,
    /// A success message.
    message: String,
}

// ============================================================================
// Error plumbing
// ============================================================================

/// HTTP error wrapper that implements `IntoResponse`.
struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::AuthenticationFailed { .. } => Self {
                status: StatusCode::UNAUTHORIZED,
                message: err.to_string(),
            },
            ApiError::Unauthorized { .. } => Self {
                status: StatusCode::FORBIDDEN,
                message: err.to_string(),
            },
            ApiError::DomainRuleViolation { .. } | ApiError::PasswordPolicyViolation { .. } => {
                Self {
                    status: StatusCode::UNPROCESSABLE_ENTITY,
                    message: err.to_string(),
                }
            }
            ApiError::InvalidInput { .. } => Self {
                status: StatusCode::BAD_REQUEST,
                message: err.to_string(),
            },
            ApiError::ResourceNotFound { .. } => Self {
                status: StatusCode::NOT_FOUND,
                message: err.to_string(),
            },
            ApiError::Conflict { .. } => Self {
                status: StatusCode::CONFLICT,
                message: err.to_string(),
            },
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                Self {
                    status: StatusCode::INTERNAL_SERVER_ERROR,
                    message: err.to_string(),
                }
            }
        }
    }
}

// ============================================================================
// Wire conversions
// ============================================================================

/// Converts a `UserProfile` to a `UserApiResponse`.
fn user_to_response(user: UserProfile) -> UserApiResponse {
    UserApiResponse {
        id: user.user_id,
        email: user.email,
        first_name: user.first_name,
        last_name: user.last_name,
        role: user.role,
        xp: user.xp,
    }
}

/// Converts a `LevelBreakdown` to a `LevelApiResponse`.
fn level_to_response(level: LevelBreakdown) -> LevelApiResponse {
    LevelApiResponse {
        level: level.level,
        current_level_start: level.current_level_start,
        next_level_start: level.next_level_start,
        progress: level.progress,
    }
}

/// Converts an `AvailabilityInfo` to an `AvailabilityApiResponse`.
fn availability_to_response(availability: AvailabilityInfo) -> AvailabilityApiResponse {
    AvailabilityApiResponse {
        id: availability.availability_id,
        tutor_id: availability.tutor_id,
        weekdays: availability.weekdays,
        time_blocks: availability
            .time_blocks
            .into_iter()
            .map(|block| TimeBlockApi {
                start: block.start,
                end: block.end,
            })
            .collect(),
        active: availability.is_active,
        created_at: availability.created_at,
    }
}

/// Converts a `ClassSlotInfo` to a `SlotApiResponse`.
fn slot_to_response(slot: ClassSlotInfo) -> SlotApiResponse {
    SlotApiResponse {
        id: slot.class_slot_id,
        tutor_id: slot.tutor_id,
        date: slot.slot_date,
        start_time: slot.start_time,
        end_time: slot.end_time,
        status: slot.status,
        deleted: false,
    }
}

/// Converts a `LessonInfo` to a `LessonApiResponse`.
fn lesson_to_response(lesson: LessonInfo) -> LessonApiResponse {
    LessonApiResponse {
        id: lesson.lesson_id,
        slot_id: lesson.class_slot_id,
        student_id: lesson.student_id,
        tutor_id: lesson.tutor_id,
        subject_id: lesson.subject_id,
        modality: lesson.modality,
        timestamp: lesson.scheduled_at,
        status: lesson.status,
    }
}

/// Converts a `SlotBookingOutcome` to a `SlotOutcomeApiResponse`.
fn outcome_to_response(outcome: SlotBookingOutcome) -> SlotOutcomeApiResponse {
    SlotOutcomeApiResponse {
        slot_id: outcome.class_slot_id,
        lesson: outcome.lesson.map(lesson_to_response),
        error: outcome.error,
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// Handler for POST `/auth/register` endpoint.
///
/// Creates a new account.
async fn handle_register(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<RegisterApiRequest>,
) -> Result<Json<RegisterApiResponse>, HttpError> {
    info!(email = %req.email, role = %req.role, "Handling register request");

    let request: RegisterRequest = RegisterRequest {
        email: req.email,
        password: req.password,
        first_name: req.first_name,
        last_name: req.last_name,
        role: req.role,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response = register(&mut persistence, request)?;
    drop(persistence);

    Ok(Json(RegisterApiResponse {
        user: user_to_response(response.user),
        message: response.message,
    }))
}

/// Handler for POST `/auth/login` endpoint.
///
/// Verifies credentials and opens a session.
async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginApiRequest>,
) -> Result<Json<LoginApiResponse>, HttpError> {
    info!(email = %req.email, "Handling login request");

    let request: LoginRequest = LoginRequest {
        email: req.email,
        password: req.password,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response = login(&mut persistence, &request)?;
    drop(persistence);

    Ok(Json(LoginApiResponse {
        token: response.session_token,
        user: user_to_response(response.user),
        expires_at: response.expires_at,
    }))
}

/// Handler for POST `/auth/logout` endpoint.
///
/// Deletes the presented session.
async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, token): SessionUser,
) -> Result<Json<LogoutApiResponse>, HttpError> {
    info!(user_id = user.id, "Handling logout request");

    let mut persistence = app_state.persistence.lock().await;
    logout(&mut persistence, &token)?;
    drop(persistence);

    Ok(Json(LogoutApiResponse {
        message: String::from("Logged out"),
    }))
}

/// Handler for GET `/me` endpoint.
///
/// Returns the authenticated user's profile and XP level breakdown.
async fn handle_me(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<MeApiResponse>, HttpError> {
    info!(user_id = user.id, "Handling me request");

    let mut persistence = app_state.persistence.lock().await;
    let response = whoami(&mut persistence, &user)?;
    drop(persistence);

    Ok(Json(MeApiResponse {
        user: user_to_response(response.user),
        level: level_to_response(response.level),
    }))
}

/// Handler for GET `/subjects` endpoint.
///
/// Lists all teachable subjects.
async fn handle_list_subjects(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<Vec<SubjectApiResponse>>, HttpError> {
    info!(user_id = user.id, "Handling list_subjects request");

    let mut persistence = app_state.persistence.lock().await;
    let response = list_subjects(&mut persistence)?;
    drop(persistence);

    let subjects: Vec<SubjectApiResponse> = response
        .subjects
        .into_iter()
        .map(|subject| SubjectApiResponse {
            id: subject.subject_id,
            name: subject.name,
        })
        .collect();

    Ok(Json(subjects))
}

/// Handler for POST `/availability` endpoint.
///
/// Creates a weekly availability pattern for the calling tutor.
async fn handle_create_availability(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<CreateAvailabilityApiRequest>,
) -> Result<Json<CreateAvailabilityApiResponse>, HttpError> {
    info!(
        tutor_id = user.id,
        weekdays = ?req.weekdays,
        blocks = req.time_blocks.len(),
        "Handling create_availability request"
    );

    let request: CreateAvailabilityRequest = CreateAvailabilityRequest {
        weekdays: req.weekdays,
        time_blocks: req
            .time_blocks
            .into_iter()
            .map(|block| TimeBlockInfo {
                start: block.start,
                end: block.end,
            })
            .collect(),
    };

    let mut persistence = app_state.persistence.lock().await;
    let response = create_availability(&mut persistence, &request, &user)?;
    drop(persistence);

    Ok(Json(CreateAvailabilityApiResponse {
        availability: availability_to_response(response.availability),
        message: response.message,
    }))
}

/// Handler for GET `/availability` endpoint.
///
/// Tutors see their own patterns; students see every active pattern.
async fn handle_list_availability(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<Vec<AvailabilityApiResponse>>, HttpError> {
    info!(user_id = user.id, "Handling list_availability request");

    let mut persistence = app_state.persistence.lock().await;
    let response = list_availabilities(&mut persistence, &user)?;
    drop(persistence);

    let availabilities: Vec<AvailabilityApiResponse> = response
        .availabilities
        .into_iter()
        .map(availability_to_response)
        .collect();

    Ok(Json(availabilities))
}

/// Handler for PATCH `/availability/{id}` endpoint.
///
/// Toggles whether the pattern is eligible for slot generation.
async fn handle_set_availability_active(
    AxumState(app_state): AxumState<AppState>,
    Path(availability_id): Path<i64>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<SetAvailabilityActiveApiRequest>,
) -> Result<Json<SetAvailabilityActiveApiResponse>, HttpError> {
    info!(
        tutor_id = user.id,
        availability_id,
        active = req.active,
        "Handling set_availability_active request"
    );

    let request: SetAvailabilityActiveRequest = SetAvailabilityActiveRequest { active: req.active };

    let mut persistence = app_state.persistence.lock().await;
    let response = set_availability_active(&mut persistence, availability_id, &request, &user)?;
    drop(persistence);

    Ok(Json(SetAvailabilityActiveApiResponse {
        availability: availability_to_response(response.availability),
        message: response.message,
    }))
}

/// Deletes an availability and cascades to its upcoming, unbooked slots.
///
/// Shared by the path-parameter and body-variant delete endpoints.
async fn remove_availability(
    app_state: &AppState,
    availability_id: i64,
    user: &AuthenticatedUser,
) -> Result<Json<DeleteAvailabilityApiResponse>, HttpError> {
    info!(
        tutor_id = user.id,
        availability_id, "Handling delete_availability request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response =
        delete_availability(&mut persistence, availability_id, user, app_state.timezone)?;
    drop(persistence);

    Ok(Json(DeleteAvailabilityApiResponse {
        availability_id: response.availability_id,
        deleted_slots: response.deleted_slots,
        message: response.message,
    }))
}

/// Handler for DELETE `/availability/{id}` endpoint.
async fn handle_delete_availability(
    AxumState(app_state): AxumState<AppState>,
    Path(availability_id): Path<i64>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<DeleteAvailabilityApiResponse>, HttpError> {
    remove_availability(&app_state, availability_id, &user).await
}

/// Handler for POST `/availability/delete` endpoint.
///
/// Body-variant delete for clients that cannot issue DELETE requests.
async fn handle_delete_availability_body(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<DeleteAvailabilityApiRequest>,
) -> Result<Json<DeleteAvailabilityApiResponse>, HttpError> {
    remove_availability(&app_state, req.availability_id, &user).await
}

/// Handler for POST `/slots/generate-week` endpoint.
///
/// Expands an availability pattern over one or more Monday-anchored weeks.
async fn handle_generate_week(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<GenerateWeekApiRequest>,
) -> Result<Json<GenerateWeekApiResponse>, HttpError> {
    let mut monday_dates: Vec<String> = req.monday_dates.unwrap_or_default();
    if let Some(date) = req.monday_date {
        monday_dates.push(date);
    }

    info!(
        tutor_id = user.id,
        availability_id = req.availability_id,
        weeks = monday_dates.len(),
        "Handling generate_week request"
    );

    let request: GenerateWeekRequest = GenerateWeekRequest {
        availability_id: req.availability_id,
        monday_dates,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response = generate_week(&mut persistence, &request, &user)?;
    drop(persistence);

    Ok(Json(GenerateWeekApiResponse {
        message: response.message,
        created: response.created,
        skipped_days: response.skipped_days,
    }))
}

/// Handler for GET `/slots` endpoint.
///
/// Lists live class slots, optionally filtered by tutor and status.
async fn handle_list_slots(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<SlotsQuery>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<Vec<SlotApiResponse>>, HttpError> {
    info!(
        user_id = user.id,
        tutor_id = ?query.tutor_id,
        status = ?query.status,
        "Handling list_slots request"
    );

    let mut persistence = app_state.persistence.lock().await;
    let response = list_slots(&mut persistence, query.tutor_id, query.status.as_deref())?;
    drop(persistence);

    let slots: Vec<SlotApiResponse> = response.slots.into_iter().map(slot_to_response).collect();

    Ok(Json(slots))
}

/// Handler for POST `/lessons` endpoint.
///
/// Books one or more slots for the calling student.
async fn handle_book_lessons(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<BookLessonsApiRequest>,
) -> Result<Json<BookLessonsApiResponse>, HttpError> {
    let mut slot_ids: Vec<i64> = req.slot_ids.unwrap_or_default();
    if let Some(slot_id) = req.slot_id {
        slot_ids.push(slot_id);
    }

    info!(
        student_id = user.id,
        slots = slot_ids.len(),
        subject_id = req.subject_id,
        modality = %req.modality,
        "Handling book_lessons request"
    );

    let request: BookLessonsRequest = BookLessonsRequest {
        slot_ids,
        subject_id: req.subject_id,
        modality: req.modality,
        tutor_id: req.tutor_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response = book_slots(&mut persistence, &request, &user)?;
    drop(persistence);

    Ok(Json(BookLessonsApiResponse {
        booked: response.booked,
        outcomes: response
            .outcomes
            .into_iter()
            .map(outcome_to_response)
            .collect(),
        message: response.message,
    }))
}

/// Handler for GET `/lessons` endpoint.
///
/// Students see lessons they attend; tutors see lessons they teach.
async fn handle_list_lessons(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
) -> Result<Json<Vec<LessonApiResponse>>, HttpError> {
    info!(user_id = user.id, "Handling list_lessons request");

    let mut persistence = app_state.persistence.lock().await;
    let response = list_lessons(&mut persistence, &user)?;
    drop(persistence);

    let lessons: Vec<LessonApiResponse> = response
        .lessons
        .into_iter()
        .map(lesson_to_response)
        .collect();

    Ok(Json(lessons))
}

/// Handler for POST `/lessons/cancel` endpoint.
///
/// Cancels a lesson and releases its slot back to `AVAILABLE`.
async fn handle_cancel_lesson(
    AxumState(app_state): AxumState<AppState>,
    SessionUser(user, _): SessionUser,
    Json(req): Json<CancelLessonApiRequest>,
) -> Result<Json<CancelLessonApiResponse>, HttpError> {
    info!(
        user_id = user.id,
        lesson_id = req.lesson_id,
        "Handling cancel_lesson request"
    );

    let request: CancelLessonRequest = CancelLessonRequest {
        lesson_id: req.lesson_id,
    };

    let mut persistence = app_state.persistence.lock().await;
    let response = cancel_lesson(&mut persistence, &request, &user)?;
    drop(persistence);

    Ok(Json(CancelLessonApiResponse {
        lesson_id: response.lesson_id,
        slot_id: response.class_slot_id,
        message: response.message,
    }))
}

// ============================================================================
// Router and entry point
// ============================================================================

fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/auth/register", post(handle_register))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/me", get(handle_me))
        .route("/subjects", get(handle_list_subjects))
        .route("/availability", post(handle_create_availability))
        .route("/availability", get(handle_list_availability))
        .route("/availability/{id}", patch(handle_set_availability_active))
        .route("/availability/{id}", delete(handle_delete_availability))
        .route(
            "/availability/delete",
            post(handle_delete_availability_body),
        )
        .route("/slots/generate-week", post(handle_generate_week))
        .route("/slots", get(handle_list_slots))
        .route("/lessons", post(handle_book_lessons))
        .route("/lessons", get(handle_list_lessons))
        .route("/lessons/cancel", post(handle_cancel_lesson))
        .with_state(app_state)
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing Tutoria Server");

    // The marketplace wall clock; "upcoming" for the deletion cascade is
    // decided in this zone
    let timezone: Tz = parse_timezone(&args.timezone)?;
    info!("Marketplace timezone: {}", timezone);

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        timezone,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
