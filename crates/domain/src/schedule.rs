// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar arithmetic for weekly slot generation.
//!
//! This module anchors a generation request to a concrete week and maps
//! pattern weekdays onto dates within that week:
//! - The anchor date names the week and must be its Monday
//! - Weekday N lands on `anchor + (N - 1)` days
//! - A lesson's scheduled timestamp is the slot's date at its start time
//!
//! ## Invariants
//!
//! - A `WeekAnchor` always holds a Monday; non-Mondays fail construction
//! - Dates are timezone-naive (`YYYY-MM-DD`); the marketplace timezone only
//!   enters when comparing slots against "now"
//! - Weekday numbering follows the pattern convention (1 = Monday)

use crate::error::DomainError;
use crate::types::Weekday;
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;

/// A validated Monday date anchoring one week of slot generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WeekAnchor {
    monday: NaiveDate,
}

impl WeekAnchor {
    /// Creates a new `WeekAnchor`.
    ///
    /// # Arguments
    ///
    /// * `date` - The anchor date (must fall on a Monday)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::NotAMonday` if the date falls on any other weekday.
    pub fn new(date: NaiveDate) -> Result<Self, DomainError> {
        if date.weekday() == chrono::Weekday::Mon {
            Ok(Self { monday: date })
        } else {
            Err(DomainError::NotAMonday {
                date: format_date(date),
                weekday: date.weekday().to_string(),
            })
        }
    }

    /// Parses an anchor from a `YYYY-MM-DD` string.
    ///
    /// # Arguments
    ///
    /// * `value` - The anchor date string
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateParseError` if the string is malformed, or
    /// `DomainError::NotAMonday` if the parsed date is not a Monday.
    pub fn parse(value: &str) -> Result<Self, DomainError> {
        let date: NaiveDate = parse_date(value)?;
        Self::new(date)
    }

    /// Returns the Monday this anchor names.
    #[must_use]
    pub const fn monday(&self) -> NaiveDate {
        self.monday
    }

    /// Returns the date the given pattern weekday falls on within this week.
    ///
    /// Weekday 1 maps to the anchor Monday itself, weekday 7 to the
    /// following Sunday.
    ///
    /// # Arguments
    ///
    /// * `weekday` - The pattern weekday to place
    ///
    /// # Errors
    ///
    /// Returns `DomainError::DateArithmeticOverflow` if the resulting date
    /// is outside the representable range.
    pub fn date_for_weekday(&self, weekday: Weekday) -> Result<NaiveDate, DomainError> {
        let offset: Duration = Duration::days(i64::from(weekday.offset_from_monday()));
        self.monday
            .checked_add_signed(offset)
            .ok_or_else(|| DomainError::DateArithmeticOverflow {
                operation: String::from("placing a weekday within its week"),
            })
    }
}

impl std::fmt::Display for WeekAnchor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", format_date(self.monday))
    }
}

/// Parses a `YYYY-MM-DD` date string.
///
/// # Arguments
///
/// * `value` - The date string
///
/// # Errors
///
/// Returns `DomainError::DateParseError` if the string is malformed.
pub fn parse_date(value: &str) -> Result<NaiveDate, DomainError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| DomainError::DateParseError {
        date_string: value.to_string(),
    })
}

/// Formats a date as `YYYY-MM-DD`.
#[must_use]
pub fn format_date(value: NaiveDate) -> String {
    value.format("%Y-%m-%d").to_string()
}

/// Combines a slot date and start time into the lesson's scheduled instant.
#[must_use]
pub const fn start_datetime(date: NaiveDate, start_time: NaiveTime) -> NaiveDateTime {
    NaiveDateTime::new(date, start_time)
}

/// Formats a scheduled instant as `YYYY-MM-DDTHH:MM:SS`.
#[must_use]
pub fn format_datetime(value: NaiveDateTime) -> String {
    value.format("%Y-%m-%dT%H:%M:%S").to_string()
}

/// Parses an IANA timezone identifier.
///
/// # Arguments
///
/// * `name` - The zone identifier (e.g. `America/Argentina/Buenos_Aires`)
///
/// # Errors
///
/// Returns `DomainError::InvalidTimezone` if the identifier is unknown.
pub fn parse_timezone(name: &str) -> Result<Tz, DomainError> {
    name.parse()
        .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
}

/// Converts a UTC instant to wall-clock time in the given zone.
///
/// Slot dates and times are stored timezone-naive; comparisons against
/// "now" happen in marketplace wall-clock time, so the current instant is
/// projected into the zone first.
#[must_use]
pub fn wall_clock_in_zone(instant: DateTime<Utc>, zone: Tz) -> NaiveDateTime {
    instant.with_timezone(&zone).naive_local()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::types::Weekday;

    #[test]
    fn test_week_anchor_accepts_monday() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(); // Monday
        let anchor = WeekAnchor::new(date).unwrap();
        assert_eq!(anchor.monday(), date);
    }

    #[test]
    fn test_week_anchor_rejects_tuesday() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 11).unwrap(); // Tuesday
        let result = WeekAnchor::new(date);
        assert!(matches!(result, Err(DomainError::NotAMonday { .. })));
    }

    #[test]
    fn test_week_anchor_parse_rejects_malformed_date() {
        let result = WeekAnchor::parse("2025-13-40");
        assert!(matches!(result, Err(DomainError::DateParseError { .. })));
    }

    #[test]
    fn test_date_for_weekday_monday_is_anchor() {
        let anchor = WeekAnchor::parse("2025-11-10").unwrap();
        let monday = Weekday::new(1).unwrap();
        let result = anchor.date_for_weekday(monday).unwrap();
        assert_eq!(result, anchor.monday());
    }

    #[test]
    fn test_date_for_weekday_wednesday_offset() {
        let anchor = WeekAnchor::parse("2025-11-10").unwrap();
        let wednesday = Weekday::new(3).unwrap();
        let result = anchor.date_for_weekday(wednesday).unwrap();
        assert_eq!(result, NaiveDate::from_ymd_opt(2025, 11, 12).unwrap());
    }

    #[test]
    fn test_date_for_weekday_sunday_ends_week() {
        let anchor = WeekAnchor::parse("2025-11-10").unwrap();
        let sunday = Weekday::new(7).unwrap();
        let result = anchor.date_for_weekday(sunday).unwrap();
        assert_eq!(result, NaiveDate::from_ymd_opt(2025, 11, 16).unwrap());
    }

    #[test]
    fn test_start_datetime_formats_with_seconds() {
        let date = NaiveDate::from_ymd_opt(2025, 11, 10).unwrap();
        let time = NaiveTime::from_hms_opt(10, 0, 0).unwrap();
        let formatted = format_datetime(start_datetime(date, time));
        assert_eq!(formatted, "2025-11-10T10:00:00");
    }

    #[test]
    fn test_parse_timezone_accepts_iana_id() {
        let zone = parse_timezone("America/Argentina/Buenos_Aires");
        assert!(zone.is_ok());
    }

    #[test]
    fn test_parse_timezone_rejects_unknown_id() {
        let result = parse_timezone("Mars/Olympus_Mons");
        assert!(matches!(result, Err(DomainError::InvalidTimezone(_))));
    }
}
