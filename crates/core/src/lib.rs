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

mod booking;
mod error;
mod lifecycle;
mod plan;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use booking::{ensure_bookable, ensure_not_own_slot};
pub use error::CoreError;
pub use lifecycle::{ensure_cancellable, ensure_lesson_party};
pub use plan::{GenerationPlan, SlotCandidate, ensure_active_availability, plan_weeks};
