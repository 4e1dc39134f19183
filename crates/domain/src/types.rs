// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use chrono::NaiveTime;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents a weekday in a recurring availability pattern.
///
/// Numbering is fixed: 1 = Monday through 7 = Sunday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Weekday {
    /// The weekday number (1-7, Monday = 1).
    number: u8,
}

impl Weekday {
    /// Creates a new `Weekday`.
    ///
    /// # Arguments
    ///
    /// * `number` - The weekday number (must be between 1 and 7 inclusive, Monday = 1)
    ///
    /// # Returns
    ///
    /// * `Ok(Weekday)` if the number is valid
    /// * `Err(DomainError::InvalidWeekday)` if the number is not between 1 and 7
    ///
    /// # Errors
    ///
    /// Returns an error if the weekday number is not in the range 1-7.
    pub const fn new(number: u8) -> Result<Self, DomainError> {
        if number >= 1 && number <= 7 {
            Ok(Self { number })
        } else {
            Err(DomainError::InvalidWeekday { number })
        }
    }

    /// Returns the weekday number (1-7, Monday = 1).
    #[must_use]
    pub const fn number(&self) -> u8 {
        self.number
    }

    /// Returns the day offset from Monday (0 for Monday, 6 for Sunday).
    #[must_use]
    pub const fn offset_from_monday(&self) -> u8 {
        self.number - 1
    }
}

/// A contiguous span of time within a single day, `start` exclusive of `end`.
///
/// Blocks are value objects; equality is field-wise. A block is valid only
/// when `start < end` strictly, so zero-length blocks cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeBlock {
    start: NaiveTime,
    end: NaiveTime,
}

impl TimeBlock {
    /// Creates a new `TimeBlock`.
    ///
    /// # Arguments
    ///
    /// * `start` - The block start time
    /// * `end` - The block end time (must be strictly after `start`)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidTimeOrder` if `start >= end`.
    pub fn new(start: NaiveTime, end: NaiveTime) -> Result<Self, DomainError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(DomainError::InvalidTimeOrder {
                start: format_time(start),
                end: format_time(end),
            })
        }
    }

    /// Parses a block from `HH:mm` strings.
    ///
    /// # Arguments
    ///
    /// * `start` - The start time string (`HH:mm`, 24-hour)
    /// * `end` - The end time string (`HH:mm`, 24-hour)
    ///
    /// # Errors
    ///
    /// Returns `DomainError::TimeParseError` if either string is malformed,
    /// or `DomainError::InvalidTimeOrder` if `start >= end`.
    pub fn parse(start: &str, end: &str) -> Result<Self, DomainError> {
        let start_time: NaiveTime = parse_time(start)?;
        let end_time: NaiveTime = parse_time(end)?;
        Self::new(start_time, end_time)
    }

    /// Returns the block start time.
    #[must_use]
    pub const fn start(&self) -> NaiveTime {
        self.start
    }

    /// Returns the block end time.
    #[must_use]
    pub const fn end(&self) -> NaiveTime {
        self.end
    }

    /// Returns whether this block overlaps another.
    ///
    /// Blocks that merely touch (one ends exactly when the other starts)
    /// do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Self) -> bool {
        self.start < other.end && other.start < self.end
    }
}

impl std::fmt::Display for TimeBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", format_time(self.start), format_time(self.end))
    }
}

/// A tutor's recurring weekly availability pattern.
///
/// Construction validates the whole pattern: weekdays are non-empty and
/// unique, time blocks are non-empty, and no two blocks overlap. A
/// `WeeklyPattern` that exists is therefore always internally consistent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeeklyPattern {
    weekdays: Vec<Weekday>,
    time_blocks: Vec<TimeBlock>,
}

impl WeeklyPattern {
    /// Creates a new `WeeklyPattern`.
    ///
    /// # Arguments
    ///
    /// * `weekdays` - The weekdays the pattern covers (unique, non-empty)
    /// * `time_blocks` - The time blocks on each covered day (non-overlapping, non-empty)
    ///
    /// # Errors
    ///
    /// Returns an error if the weekday list is empty or contains duplicates,
    /// if the block list is empty, or if any two blocks overlap.
    pub fn new(weekdays: Vec<Weekday>, time_blocks: Vec<TimeBlock>) -> Result<Self, DomainError> {
        crate::validation::validate_weekdays(&weekdays)?;
        crate::validation::validate_time_blocks(&time_blocks)?;
        Ok(Self {
            weekdays,
            time_blocks,
        })
    }

    /// Returns the weekdays the pattern covers.
    #[must_use]
    pub fn weekdays(&self) -> &[Weekday] {
        &self.weekdays
    }

    /// Returns the time blocks on each covered day.
    #[must_use]
    pub fn time_blocks(&self) -> &[TimeBlock] {
        &self.time_blocks
    }
}

/// Lifecycle status of a dated class slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SlotStatus {
    /// Open for booking.
    #[default]
    Available,
    /// Held by a live lesson.
    Reserved,
    /// Withdrawn by the tutor; never bookable again.
    Cancelled,
}

impl SlotStatus {
    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "AVAILABLE",
            Self::Reserved => "RESERVED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl FromStr for SlotStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "AVAILABLE" => Ok(Self::Available),
            "RESERVED" => Ok(Self::Reserved),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidSlotStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for SlotStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Lifecycle status of a lesson.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LessonStatus {
    /// Booked and not yet held.
    #[default]
    Pending,
    /// Completed.
    Done,
    /// Cancelled by one of the parties.
    Cancelled,
}

impl LessonStatus {
    /// Converts this status to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Done => "DONE",
            Self::Cancelled => "CANCELLED",
        }
    }

    /// Returns whether the lesson has reached a terminal state.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Cancelled)
    }
}

impl FromStr for LessonStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(Self::Pending),
            "DONE" => Ok(Self::Done),
            "CANCELLED" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidLessonStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for LessonStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// How a lesson is delivered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Modality {
    /// Remote lesson.
    Online,
    /// In-person lesson.
    Onsite,
}

impl Modality {
    /// Converts this modality to its storage representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Online => "ONLINE",
            Self::Onsite => "ONSITE",
        }
    }
}

impl FromStr for Modality {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ONLINE" => Ok(Self::Online),
            "ONSITE" => Ok(Self::Onsite),
            _ => Err(DomainError::InvalidModality(s.to_string())),
        }
    }
}

impl std::fmt::Display for Modality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Parses an `HH:mm` time string.
///
/// # Arguments
///
/// * `value` - The time string (24-hour, zero-padded)
///
/// # Errors
///
/// Returns `DomainError::TimeParseError` if the string is malformed.
pub fn parse_time(value: &str) -> Result<NaiveTime, DomainError> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|_| DomainError::TimeParseError {
        time_string: value.to_string(),
    })
}

/// Formats a time as `HH:mm`.
#[must_use]
pub fn format_time(value: NaiveTime) -> String {
    value.format("%H:%M").to_string()
}
