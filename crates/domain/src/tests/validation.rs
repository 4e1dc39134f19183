// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, TimeBlock, Weekday, validate_email, validate_name, validate_time_blocks,
    validate_weekdays,
};

fn weekdays(numbers: &[u8]) -> Vec<Weekday> {
    numbers
        .iter()
        .map(|&number| Weekday::new(number).unwrap())
        .collect()
}

fn blocks(spans: &[(&str, &str)]) -> Vec<TimeBlock> {
    spans
        .iter()
        .map(|(start, end)| TimeBlock::parse(start, end).unwrap())
        .collect()
}

#[test]
fn test_validate_weekdays_accepts_distinct_days() {
    let result: Result<(), DomainError> = validate_weekdays(&weekdays(&[1, 3, 5]));
    assert!(result.is_ok());
}

#[test]
fn test_validate_weekdays_rejects_empty_list() {
    let result: Result<(), DomainError> = validate_weekdays(&[]);
    assert!(matches!(result, Err(DomainError::EmptyWeekdays)));
}

#[test]
fn test_validate_weekdays_rejects_duplicates() {
    let result: Result<(), DomainError> = validate_weekdays(&weekdays(&[2, 4, 2]));
    assert!(matches!(
        result,
        Err(DomainError::DuplicateWeekday { number: 2 })
    ));
}

#[test]
fn test_validate_time_blocks_accepts_disjoint_blocks() {
    let result: Result<(), DomainError> =
        validate_time_blocks(&blocks(&[("09:00", "10:00"), ("10:00", "11:00")]));
    assert!(result.is_ok());
}

#[test]
fn test_validate_time_blocks_rejects_empty_list() {
    let result: Result<(), DomainError> = validate_time_blocks(&[]);
    assert!(matches!(result, Err(DomainError::EmptyTimeBlocks)));
}

#[test]
fn test_validate_time_blocks_rejects_overlap() {
    let result: Result<(), DomainError> =
        validate_time_blocks(&blocks(&[("09:00", "11:00"), ("10:00", "12:00")]));
    assert!(matches!(
        result,
        Err(DomainError::OverlappingTimeBlocks { .. })
    ));
}

#[test]
fn test_validate_time_blocks_rejects_contained_block() {
    let result: Result<(), DomainError> =
        validate_time_blocks(&blocks(&[("09:00", "12:00"), ("10:00", "11:00")]));
    assert!(matches!(
        result,
        Err(DomainError::OverlappingTimeBlocks { .. })
    ));
}

#[test]
fn test_validate_email_accepts_plain_address() {
    let result: Result<(), DomainError> = validate_email("ana@example.com");
    assert!(result.is_ok());
}

#[test]
fn test_validate_email_rejects_empty_string() {
    let result: Result<(), DomainError> = validate_email("");
    assert!(matches!(result, Err(DomainError::InvalidEmail(_))));
}

#[test]
fn test_validate_email_rejects_missing_domain() {
    let result: Result<(), DomainError> = validate_email("ana@");
    assert!(matches!(result, Err(DomainError::InvalidEmail(_))));
}

#[test]
fn test_validate_email_rejects_double_at() {
    let result: Result<(), DomainError> = validate_email("ana@@example.com");
    assert!(matches!(result, Err(DomainError::InvalidEmail(_))));
}

#[test]
fn test_validate_email_rejects_whitespace() {
    let result: Result<(), DomainError> = validate_email("ana maria@example.com");
    assert!(matches!(result, Err(DomainError::InvalidEmail(_))));
}

#[test]
fn test_validate_name_rejects_whitespace_only() {
    let result: Result<(), DomainError> = validate_name("   ");
    assert!(matches!(result, Err(DomainError::InvalidName(_))));
}

#[test]
fn test_validate_name_accepts_regular_name() {
    let result: Result<(), DomainError> = validate_name("Ana María");
    assert!(result.is_ok());
}
