// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Experience-point level math.
//!
//! Levels are derived from accumulated XP, never stored. A level costs
//! quadratically more XP than the last: level N spans
//! `(N-1)^2 * 100` to `N^2 * 100` XP.

use serde::{Deserialize, Serialize};

/// A user's derived level and their position within it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LevelBreakdown {
    /// The derived level (1-based).
    pub level: u32,
    /// XP at which the current level begins.
    pub current_level_start: i64,
    /// XP at which the next level begins.
    pub next_level_start: i64,
    /// Fraction of the way through the current level, in `[0, 1)`.
    pub progress: f64,
}

/// Computes the level breakdown for an XP total.
///
/// The level is `floor(sqrt(xp / 100)) + 1`; negative totals are treated
/// as zero.
///
/// # Arguments
///
/// * `xp` - The accumulated experience points
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn level_breakdown(xp: i64) -> LevelBreakdown {
    let clamped: i64 = xp.max(0);
    let level_index: i64 = (clamped / 100).isqrt();
    let current_level_start: i64 = level_index * level_index * 100;
    let next_level_start: i64 = (level_index + 1) * (level_index + 1) * 100;
    let span: i64 = next_level_start - current_level_start;
    let progress: f64 = (clamped - current_level_start) as f64 / span as f64;

    LevelBreakdown {
        level: u32::try_from(level_index + 1).unwrap_or(u32::MAX),
        current_level_start,
        next_level_start,
        progress,
    }
}
