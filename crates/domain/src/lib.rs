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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod error;
mod schedule;
mod types;
mod validation;
mod xp;

#[cfg(test)]
mod tests;

pub use error::DomainError;
pub use schedule::{
    WeekAnchor, format_date, format_datetime, parse_date, parse_timezone, start_datetime,
    wall_clock_in_zone,
};
pub use types::{
    LessonStatus, Modality, SlotStatus, TimeBlock, Weekday, WeeklyPattern, format_time, parse_time,
};
pub use validation::{validate_email, validate_name, validate_time_blocks, validate_weekdays};
pub use xp::{LevelBreakdown, level_breakdown};
