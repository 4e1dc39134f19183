// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::helpers::{create_test_anchor, create_test_pattern};
use crate::{CoreError, GenerationPlan, ensure_active_availability, plan_weeks};
use chrono::NaiveDate;
use tutoria_domain::{WeekAnchor, WeeklyPattern, format_time};

#[test]
fn test_plan_places_each_weekday_in_the_week() {
    let pattern: WeeklyPattern = create_test_pattern(&[1, 3], &[("10:00", "11:00")]);
    let anchor: WeekAnchor = create_test_anchor("2025-11-10");

    let plan: GenerationPlan = plan_weeks(&pattern, &[anchor]).unwrap();

    assert_eq!(plan.len(), 2);
    assert_eq!(
        plan.candidates[0].date,
        NaiveDate::from_ymd_opt(2025, 11, 10).unwrap() // Monday
    );
    assert_eq!(
        plan.candidates[1].date,
        NaiveDate::from_ymd_opt(2025, 11, 12).unwrap() // Wednesday
    );
    for candidate in &plan.candidates {
        assert_eq!(format_time(candidate.block.start()), "10:00");
        assert_eq!(format_time(candidate.block.end()), "11:00");
    }
}

#[test]
fn test_plan_covers_every_block_on_every_day() {
    let pattern: WeeklyPattern =
        create_test_pattern(&[2, 5], &[("09:00", "10:00"), ("14:00", "15:30")]);
    let anchor: WeekAnchor = create_test_anchor("2025-11-10");

    let plan: GenerationPlan = plan_weeks(&pattern, &[anchor]).unwrap();

    // 2 weekdays x 2 blocks
    assert_eq!(plan.len(), 4);
}

#[test]
fn test_plan_expands_multiple_weeks() {
    let pattern: WeeklyPattern = create_test_pattern(&[1], &[("10:00", "11:00")]);
    let first: WeekAnchor = create_test_anchor("2025-11-10");
    let second: WeekAnchor = create_test_anchor("2025-11-17");

    let plan: GenerationPlan = plan_weeks(&pattern, &[first, second]).unwrap();

    assert_eq!(plan.len(), 2);
    assert_eq!(
        plan.candidates[0].date,
        NaiveDate::from_ymd_opt(2025, 11, 10).unwrap()
    );
    assert_eq!(
        plan.candidates[1].date,
        NaiveDate::from_ymd_opt(2025, 11, 17).unwrap()
    );
}

#[test]
fn test_plan_deduplicates_repeated_anchors() {
    let pattern: WeeklyPattern = create_test_pattern(&[1, 3], &[("10:00", "11:00")]);
    let anchor: WeekAnchor = create_test_anchor("2025-11-10");

    let plan: GenerationPlan = plan_weeks(&pattern, &[anchor, anchor, anchor]).unwrap();

    assert_eq!(plan.len(), 2);
}

#[test]
fn test_plan_orders_candidates_by_date_then_start() {
    // Weekdays and blocks deliberately out of order.
    let pattern: WeeklyPattern =
        create_test_pattern(&[5, 1], &[("14:00", "15:00"), ("09:00", "10:00")]);
    let anchor: WeekAnchor = create_test_anchor("2025-11-10");

    let plan: GenerationPlan = plan_weeks(&pattern, &[anchor]).unwrap();

    let rendered: Vec<String> = plan
        .candidates
        .iter()
        .map(|candidate| format!("{} {}", candidate.date, format_time(candidate.block.start())))
        .collect();
    assert_eq!(
        rendered,
        vec![
            String::from("2025-11-10 09:00"),
            String::from("2025-11-10 14:00"),
            String::from("2025-11-14 09:00"),
            String::from("2025-11-14 14:00"),
        ]
    );
}

#[test]
fn test_plan_with_no_anchors_is_empty() {
    let pattern: WeeklyPattern = create_test_pattern(&[1], &[("10:00", "11:00")]);

    let plan: GenerationPlan = plan_weeks(&pattern, &[]).unwrap();

    assert!(plan.is_empty());
}

#[test]
fn test_active_availability_passes_check() {
    let result: Result<(), CoreError> = ensure_active_availability(7, true);
    assert!(result.is_ok());
}

#[test]
fn test_inactive_availability_fails_check() {
    let result: Result<(), CoreError> = ensure_active_availability(7, false);
    assert!(matches!(
        result,
        Err(CoreError::InactiveAvailability { availability_id: 7 })
    ));
}
