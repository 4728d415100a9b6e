//! # Progress Estimator
//!
//! Derives a 0–100% completion value from a registration's workflow
//! markers.
//!
//! This is a coarse, monotonic approximation of a four-stage linear
//! workflow: each stage contributes a flat 25%, and a completed status
//! short-circuits to 100 regardless of the advisory step marker. It
//! reflects stage count, not real effort distribution.

use crate::types::{Registration, RegistrationStatus, WorkflowStep};

/// Percent contributed by each completed workflow stage.
pub const STEP_PERCENT: u8 = 25;

/// Progress percentage for a status/step pair, in {0, 25, 50, 75, 100}.
#[must_use]
pub fn progress_percent(status: &RegistrationStatus, step: WorkflowStep) -> u8 {
    if *status == RegistrationStatus::Completed {
        return 100;
    }
    step.index().saturating_mul(STEP_PERCENT)
}

impl Registration {
    /// Progress percentage for this registration.
    #[must_use]
    pub fn progress(&self) -> u8 {
        progress_percent(&self.status, self.current_step)
    }
}

// =============================================================================
// TESTS
// =============================================================================
