// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    DomainError, LessonStatus, Modality, SlotStatus, TimeBlock, Weekday, WeeklyPattern, parse_time,
};
use std::str::FromStr;

#[test]
fn test_weekday_accepts_full_range() {
    for number in 1..=7 {
        let weekday: Result<Weekday, DomainError> = Weekday::new(number);
        assert!(weekday.is_ok(), "weekday {number} should be valid");
    }
}

#[test]
fn test_weekday_rejects_zero() {
    let result: Result<Weekday, DomainError> = Weekday::new(0);
    assert!(matches!(
        result,
        Err(DomainError::InvalidWeekday { number: 0 })
    ));
}

#[test]
fn test_weekday_rejects_eight() {
    let result: Result<Weekday, DomainError> = Weekday::new(8);
    assert!(matches!(
        result,
        Err(DomainError::InvalidWeekday { number: 8 })
    ));
}

#[test]
fn test_weekday_monday_has_zero_offset() {
    let monday: Weekday = Weekday::new(1).unwrap();
    assert_eq!(monday.offset_from_monday(), 0);

    let sunday: Weekday = Weekday::new(7).unwrap();
    assert_eq!(sunday.offset_from_monday(), 6);
}

#[test]
fn test_time_block_parses_well_formed_times() {
    let block: TimeBlock = TimeBlock::parse("09:00", "10:30").unwrap();
    assert_eq!(block.start(), parse_time("09:00").unwrap());
    assert_eq!(block.end(), parse_time("10:30").unwrap());
}

#[test]
fn test_time_block_rejects_malformed_time() {
    let result: Result<TimeBlock, DomainError> = TimeBlock::parse("9 o'clock", "10:00");
    assert!(matches!(result, Err(DomainError::TimeParseError { .. })));
}

#[test]
fn test_time_block_rejects_equal_start_and_end() {
    let result: Result<TimeBlock, DomainError> = TimeBlock::parse("10:00", "10:00");
    assert!(matches!(result, Err(DomainError::InvalidTimeOrder { .. })));
}

#[test]
fn test_time_block_rejects_inverted_order() {
    let result: Result<TimeBlock, DomainError> = TimeBlock::parse("11:00", "10:00");
    assert!(matches!(result, Err(DomainError::InvalidTimeOrder { .. })));
}

#[test]
fn test_time_blocks_overlap_detection() {
    let first: TimeBlock = TimeBlock::parse("09:00", "11:00").unwrap();
    let second: TimeBlock = TimeBlock::parse("10:00", "12:00").unwrap();
    assert!(first.overlaps(&second));
    assert!(second.overlaps(&first));
}

#[test]
fn test_touching_time_blocks_do_not_overlap() {
    let first: TimeBlock = TimeBlock::parse("09:00", "10:00").unwrap();
    let second: TimeBlock = TimeBlock::parse("10:00", "11:00").unwrap();
    assert!(!first.overlaps(&second));
    assert!(!second.overlaps(&first));
}

#[test]
fn test_weekly_pattern_accepts_valid_shape() {
    let weekdays: Vec<Weekday> = vec![Weekday::new(1).unwrap(), Weekday::new(3).unwrap()];
    let blocks: Vec<TimeBlock> = vec![TimeBlock::parse("10:00", "11:00").unwrap()];
    let pattern: WeeklyPattern = WeeklyPattern::new(weekdays, blocks).unwrap();
    assert_eq!(pattern.weekdays().len(), 2);
    assert_eq!(pattern.time_blocks().len(), 1);
}

#[test]
fn test_weekly_pattern_rejects_overlapping_blocks() {
    let weekdays: Vec<Weekday> = vec![Weekday::new(1).unwrap()];
    let blocks: Vec<TimeBlock> = vec![
        TimeBlock::parse("09:00", "11:00").unwrap(),
        TimeBlock::parse("10:00", "12:00").unwrap(),
    ];
    let result: Result<WeeklyPattern, DomainError> = WeeklyPattern::new(weekdays, blocks);
    assert!(matches!(
        result,
        Err(DomainError::OverlappingTimeBlocks { .. })
    ));
}

#[test]
fn test_slot_status_round_trips_through_storage_form() {
    let statuses: [SlotStatus; 3] = [
        SlotStatus::Available,
        SlotStatus::Reserved,
        SlotStatus::Cancelled,
    ];
    for status in statuses {
        let parsed: SlotStatus = SlotStatus::from_str(status.as_str()).unwrap();
        assert_eq!(parsed, status);
    }
}

#[test]
fn test_slot_status_rejects_unknown_value() {
    let result: Result<SlotStatus, DomainError> = SlotStatus::from_str("BOOKED");
    assert!(matches!(result, Err(DomainError::InvalidSlotStatus(_))));
}

#[test]
fn test_lesson_status_terminal_states() {
    assert!(!LessonStatus::Pending.is_terminal());
    assert!(LessonStatus::Done.is_terminal());
    assert!(LessonStatus::Cancelled.is_terminal());
}

#[test]
fn test_modality_rejects_unknown_value() {
    let result: Result<Modality, DomainError> = Modality::from_str("HYBRID");
    assert!(matches!(result, Err(DomainError::InvalidModality(_))));
}

#[test]
fn test_modality_storage_forms() {
    assert_eq!(Modality::Online.as_str(), "ONLINE");
    assert_eq!(Modality::Onsite.as_str(), "ONSITE");
}
