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

pub mod auth;
pub mod error;
pub mod handlers;
pub mod password_policy;
pub mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedUser, AuthenticationService, AuthorizationService, Role};
pub use error::{
    ApiError, AuthError, translate_core_error, translate_domain_error, translate_persistence_error,
};
pub use handlers::{
    book_slots, cancel_lesson, create_availability, delete_availability, generate_week,
    list_availabilities, list_lessons, list_slots, list_subjects, login, logout, register,
    set_availability_active, whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use request_response::{
    AvailabilityInfo, BookLessonsRequest, BookLessonsResponse, CancelLessonRequest,
    CancelLessonResponse, ClassSlotInfo, CreateAvailabilityRequest, CreateAvailabilityResponse,
    DeleteAvailabilityResponse, GenerateWeekRequest, GenerateWeekResponse, LessonInfo,
    ListAvailabilitiesResponse, ListLessonsResponse, ListSlotsResponse, ListSubjectsResponse,
    LoginRequest, LoginResponse, MeResponse, RegisterRequest, RegisterResponse,
    SetAvailabilityActiveRequest, SetAvailabilityActiveResponse, SlotBookingOutcome, SubjectInfo,
    TimeBlockInfo, UserProfile,
};
