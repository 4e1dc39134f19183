// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{TimeBlock, Weekday};
use std::collections::HashSet;

/// Validates the weekday list of an availability pattern.
///
/// # Arguments
///
/// * `weekdays` - The weekdays to validate
///
/// # Returns
///
/// * `Ok(())` if the list is non-empty and free of duplicates
/// * `Err(DomainError)` otherwise
///
/// # Errors
///
/// Returns an error if:
/// - The list is empty
/// - Any weekday appears more than once
pub fn validate_weekdays(weekdays: &[Weekday]) -> Result<(), DomainError> {
    // Rule: at least one weekday
    if weekdays.is_empty() {
        return Err(DomainError::EmptyWeekdays);
    }

    // Rule: each weekday appears at most once
    let mut seen: HashSet<u8> = HashSet::new();
    for weekday in weekdays {
        if !seen.insert(weekday.number()) {
            return Err(DomainError::DuplicateWeekday {
                number: weekday.number(),
            });
        }
    }

    Ok(())
}

/// Validates the time-block list of an availability pattern.
///
/// Per-block ordering (`start < end`) is enforced at construction time via
/// `TimeBlock::new()`; this checks the cross-block rules.
///
/// # Arguments
///
/// * `time_blocks` - The blocks to validate
///
/// # Returns
///
/// * `Ok(())` if the list is non-empty and no two blocks overlap
/// * `Err(DomainError)` otherwise
///
/// # Errors
///
/// Returns an error if:
/// - The list is empty
/// - Any two blocks overlap (blocks that merely touch are allowed)
pub fn validate_time_blocks(time_blocks: &[TimeBlock]) -> Result<(), DomainError> {
    // Rule: at least one time block
    if time_blocks.is_empty() {
        return Err(DomainError::EmptyTimeBlocks);
    }

    // Rule: no pairwise overlap
    for (index, block) in time_blocks.iter().enumerate() {
        for other in &time_blocks[index + 1..] {
            if block.overlaps(other) {
                return Err(DomainError::OverlappingTimeBlocks {
                    first: block.to_string(),
                    second: other.to_string(),
                });
            }
        }
    }

    Ok(())
}

/// Validates an account email address.
///
/// This is a shape check, not deliverability: the address must be non-empty,
/// contain exactly one `@` with text on both sides, and contain no whitespace.
///
/// # Arguments
///
/// * `email` - The email address to validate
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address fails any check.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    if email.is_empty() {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot be empty",
        )));
    }

    if email.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidEmail(String::from(
            "Email cannot contain whitespace",
        )));
    }

    let mut parts = email.split('@');
    let local: &str = parts.next().unwrap_or("");
    let domain: &str = parts.next().unwrap_or("");
    if local.is_empty() || domain.is_empty() || parts.next().is_some() {
        return Err(DomainError::InvalidEmail(String::from(
            "Email must have the form local@domain",
        )));
    }

    Ok(())
}

/// Validates a person name field.
///
/// # Arguments
///
/// * `name` - The name to validate
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is empty or whitespace-only.
pub fn validate_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    Ok(())
}
