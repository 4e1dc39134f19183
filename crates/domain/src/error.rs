// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Weekday number is outside the 1-7 range.
    InvalidWeekday {
        /// The rejected weekday number.
        number: u8,
    },
    /// Availability pattern declares no weekdays.
    EmptyWeekdays,
    /// The same weekday appears more than once in a pattern.
    DuplicateWeekday {
        /// The duplicated weekday number.
        number: u8,
    },
    /// Availability pattern declares no time blocks.
    EmptyTimeBlocks,
    /// A time block does not start strictly before it ends.
    InvalidTimeOrder {
        /// The block start time (`HH:mm`).
        start: String,
        /// The block end time (`HH:mm`).
        end: String,
    },
    /// Two time blocks in the same pattern overlap.
    OverlappingTimeBlocks {
        /// The first block, rendered as `HH:mm-HH:mm`.
        first: String,
        /// The second block, rendered as `HH:mm-HH:mm`.
        second: String,
    },
    /// Failed to parse a date from a string.
    DateParseError {
        /// The invalid date string.
        date_string: String,
    },
    /// Failed to parse a time from a string.
    TimeParseError {
        /// The invalid time string.
        time_string: String,
    },
    /// A week anchor date is not a Monday.
    NotAMonday {
        /// The rejected anchor date (`YYYY-MM-DD`).
        date: String,
        /// The weekday the date actually falls on.
        weekday: String,
    },
    /// Slot status string is not a recognized status.
    InvalidSlotStatus(String),
    /// Lesson status string is not a recognized status.
    InvalidLessonStatus(String),
    /// Modality string is not a recognized modality.
    InvalidModality(String),
    /// Timezone identifier is not a valid IANA zone.
    InvalidTimezone(String),
    /// Email address is empty or malformed.
    InvalidEmail(String),
    /// Person name is empty or invalid.
    InvalidName(String),
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidWeekday { number } => {
                write!(
                    f,
                    "Invalid weekday {number}: must be between 1 (Monday) and 7 (Sunday)"
                )
            }
            Self::EmptyWeekdays => {
                write!(f, "Availability must declare at least one weekday")
            }
            Self::DuplicateWeekday { number } => {
                write!(f, "Weekday {number} appears more than once")
            }
            Self::EmptyTimeBlocks => {
                write!(f, "Availability must declare at least one time block")
            }
            Self::InvalidTimeOrder { start, end } => {
                write!(
                    f,
                    "Time block must start before it ends: got {start} to {end}"
                )
            }
            Self::OverlappingTimeBlocks { first, second } => {
                write!(f, "Time blocks {first} and {second} overlap")
            }
            Self::DateParseError { date_string } => {
                write!(f, "Failed to parse date '{date_string}': expected YYYY-MM-DD")
            }
            Self::TimeParseError { time_string } => {
                write!(f, "Failed to parse time '{time_string}': expected HH:mm")
            }
            Self::NotAMonday { date, weekday } => {
                write!(f, "Week anchor must be a Monday, but {date} is a {weekday}")
            }
            Self::InvalidSlotStatus(value) => {
                write!(f, "Invalid slot status: {value}")
            }
            Self::InvalidLessonStatus(value) => {
                write!(f, "Invalid lesson status: {value}")
            }
            Self::InvalidModality(value) => {
                write!(f, "Invalid modality: {value}")
            }
            Self::InvalidTimezone(value) => {
                write!(f, "Invalid timezone: {value}")
            }
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow while {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
