// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use tutoria_domain::{TimeBlock, WeekAnchor, Weekday, WeeklyPattern};

pub fn create_test_pattern(weekday_numbers: &[u8], spans: &[(&str, &str)]) -> WeeklyPattern {
    let weekdays: Vec<Weekday> = weekday_numbers
        .iter()
        .map(|&number| Weekday::new(number).unwrap())
        .collect();
    let blocks: Vec<TimeBlock> = spans
        .iter()
        .map(|(start, end)| TimeBlock::parse(start, end).unwrap())
        .collect();
    WeeklyPattern::new(weekdays, blocks).unwrap()
}

pub fn create_test_anchor(date: &str) -> WeekAnchor {
    WeekAnchor::parse(date).unwrap()
}
