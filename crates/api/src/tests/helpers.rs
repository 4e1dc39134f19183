// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use tutoria_persistence::Persistence;

use crate::{
    AuthenticatedUser, BookLessonsRequest, BookLessonsResponse, CreateAvailabilityRequest,
    CreateAvailabilityResponse, GenerateWeekRequest, GenerateWeekResponse, RegisterRequest,
    RegisterResponse, Role, TimeBlockInfo, book_slots, create_availability, generate_week,
    register,
};

/// A Monday used as the anchor for generation tests.
pub const TEST_MONDAY: &str = "2025-11-10";

/// The `Mathematics` subject seeded by the schema migration.
pub const MATH_SUBJECT_ID: i64 = 1;

pub fn create_test_db() -> Persistence {
    Persistence::new_in_memory().expect("In-memory database should initialize")
}

pub fn create_register_request(email: &str, role: &str) -> RegisterRequest {
    RegisterRequest {
        email: String::from(email),
        password: String::from("s3cret-Pass"),
        first_name: String::from("Ana"),
        last_name: String::from("Gomez"),
        role: String::from(role),
    }
}

/// Registers a tutor account and returns it as an authenticated user.
pub fn register_test_tutor(persistence: &mut Persistence, email: &str) -> AuthenticatedUser {
    let response: RegisterResponse = register(persistence, create_register_request(email, "TUTOR"))
        .expect("Test tutor should register");
    AuthenticatedUser::new(response.user.user_id, Role::Tutor)
}

/// Registers a student account and returns it as an authenticated user.
pub fn register_test_student(persistence: &mut Persistence, email: &str) -> AuthenticatedUser {
    let response: RegisterResponse =
        register(persistence, create_register_request(email, "STUDENT"))
            .expect("Test student should register");
    AuthenticatedUser::new(response.user.user_id, Role::Student)
}

pub fn create_block_info(start: &str, end: &str) -> TimeBlockInfo {
    TimeBlockInfo {
        start: String::from(start),
        end: String::from(end),
    }
}

/// Creates a Monday/Wednesday availability with one morning block and
/// returns its ID.
pub fn create_test_availability(persistence: &mut Persistence, tutor: &AuthenticatedUser) -> i64 {
    let request: CreateAvailabilityRequest = CreateAvailabilityRequest {
        weekdays: vec![1, 3],
        time_blocks: vec![create_block_info("09:00", "11:00")],
    };
    let response: CreateAvailabilityResponse = create_availability(persistence, &request, tutor)
        .expect("Test availability should be created");
    response.availability.availability_id
}

/// Generates the test Monday week from an availability.
pub fn generate_test_week(
    persistence: &mut Persistence,
    tutor: &AuthenticatedUser,
    availability_id: i64,
) -> GenerateWeekResponse {
    let request: GenerateWeekRequest = GenerateWeekRequest {
        availability_id,
        monday_dates: vec![String::from(TEST_MONDAY)],
    };
    generate_week(persistence, &request, tutor).expect("Test week should generate")
}

/// Books a single slot for a student in the seeded math subject.
pub fn book_test_slot(
    persistence: &mut Persistence,
    student: &AuthenticatedUser,
    class_slot_id: i64,
) -> BookLessonsResponse {
    let request: BookLessonsRequest = BookLessonsRequest {
        slot_ids: vec![class_slot_id],
        subject_id: MATH_SUBJECT_ID,
        modality: String::from("ONLINE"),
        tutor_id: None,
    };
    book_slots(persistence, &request, student).expect("Test slot should book")
}
