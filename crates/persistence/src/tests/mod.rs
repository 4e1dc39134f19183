// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod availability_tests;
mod lesson_tests;

use tutoria::{GenerationPlan, plan_weeks};
use tutoria_domain::{TimeBlock, WeekAnchor, Weekday, WeeklyPattern};

use crate::Persistence;
use crate::data_models::TimeBlockRecord;

pub fn create_test_db() -> Persistence {
    Persistence::new_in_memory().expect("In-memory database should initialize")
}

pub fn create_test_user(db: &mut Persistence, email: &str, role: &str) -> i64 {
    db.create_user(email, "s3cret-Pass", "Test", "User", role)
        .expect("Test user should be created")
}

pub fn create_test_block(start: &str, end: &str) -> TimeBlockRecord {
    TimeBlockRecord {
        start: String::from(start),
        end: String::from(end),
    }
}

/// Builds a generation plan from weekday numbers, `(start, end)` block
/// strings, and a Monday anchor date.
pub fn create_test_plan(
    weekday_numbers: &[u8],
    blocks: &[(&str, &str)],
    monday: &str,
) -> GenerationPlan {
    let weekdays: Vec<Weekday> = weekday_numbers
        .iter()
        .map(|n| Weekday::new(*n).expect("Valid test weekday"))
        .collect();
    let time_blocks: Vec<TimeBlock> = blocks
        .iter()
        .map(|(start, end)| TimeBlock::parse(start, end).expect("Valid test block"))
        .collect();
    let pattern: WeeklyPattern =
        WeeklyPattern::new(weekdays, time_blocks).expect("Valid test pattern");
    let anchor: WeekAnchor = WeekAnchor::parse(monday).expect("Valid test anchor");
    plan_weeks(&pattern, &[anchor]).expect("Plan should build")
}
