//! # Status Classifier
//!
//! Maps a registration record to the fixed set of admin-facing filter
//! categories shown as tabs on the dashboard.
//!
//! Each rule is evaluated independently — only one filter key is ever
//! active at a time, so there is no precedence order, and a record may
//! legitimately satisfy several step filters at once (e.g. an approved
//! documents gate on a registration still in documentation keeps it
//! visible under both `step3` and `step4`). That overlap is deliberate
//! and must not be disambiguated.

use crate::types::{Registration, RegistrationStatus};
use serde::{Deserialize, Serialize};

// =============================================================================
// STATUS FILTER
// =============================================================================

/// Admin-facing filter categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StatusFilter {
    /// Every registration.
    All,
    /// Admin-pinned registrations.
    Pinned,
    /// Company details reserved ("booked").
    Booked,
    /// Payment stage: processing or rejected.
    Step1,
    /// Documentation stage, details not yet approved.
    Step2,
    /// Incorporation stage, or documentation with details approved.
    Step3,
    /// Final stage: documents submitted/completed, or documents approved.
    Step4,
    /// Documentation stage with neither approval nor a name reservation.
    PendingReservation,
    /// Secretary resolution documents awaiting admin acknowledgment.
    Secretary,
}

impl StatusFilter {
    /// All filters, in dashboard tab order.
    pub const ALL_FILTERS: [Self; 9] = [
        Self::All,
        Self::Pinned,
        Self::Booked,
        Self::Step1,
        Self::Step2,
        Self::Step3,
        Self::Step4,
        Self::PendingReservation,
        Self::Secretary,
    ];

    /// Parse a wire filter key.
    ///
    /// Unrecognized keys resolve to [`StatusFilter::All`]. This mirrors
    /// the documented behavior of the dashboard this engine replaces: a
    /// typo'd key shows everything rather than nothing or an error.
    #[must_use]
    pub fn parse(key: &str) -> Self {
        match key {
            "pinned" => Self::Pinned,
            "booked" => Self::Booked,
            "step1" => Self::Step1,
            "step2" => Self::Step2,
            "step3" => Self::Step3,
            "step4" => Self::Step4,
            "pending-reservation" => Self::PendingReservation,
            "secretary" => Self::Secretary,
            // "all" and any unrecognized key
            _ => Self::All,
        }
    }

    /// The wire key for this filter.
    #[must_use]
    pub const fn as_key(self) -> &'static str {
        match self {
            Self::All => "all",
            Self::Pinned => "pinned",
            Self::Booked => "booked",
            Self::Step1 => "step1",
            Self::Step2 => "step2",
            Self::Step3 => "step3",
            Self::Step4 => "step4",
            Self::PendingReservation => "pending-reservation",
            Self::Secretary => "secretary",
        }
    }

    /// Whether a registration belongs to this filter category.
    #[must_use]
    pub fn matches(self, reg: &Registration) -> bool {
        use RegistrationStatus as S;
        match self {
            Self::All => true,
            Self::Pinned => reg.pinned.is_set(),
            Self::Booked => reg.company_details_locked.is_set(),
            Self::Step1 => matches!(reg.status, S::PaymentProcessing | S::PaymentRejected),
            Self::Step2 => reg.status == S::DocumentationProcessing && !reg.details_approved,
            Self::Step3 => {
                matches!(
                    reg.status,
                    S::IncorporationProcessing | S::DocumentsPublished
                ) || (reg.status == S::DocumentationProcessing && reg.details_approved)
            }
            Self::Step4 => {
                matches!(reg.status, S::DocumentsSubmitted | S::Completed)
                    || reg.documents_approved
            }
            Self::PendingReservation => {
                reg.status == S::DocumentationProcessing
                    && !reg.details_approved
                    && !reg.company_details_locked.is_set()
            }
            Self::Secretary => has_unacknowledged_secretary_records(reg),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Secretary rule: at least one resolution document exists, and either
/// no admin acknowledgment is recorded or some document was uploaded
/// strictly after the last acknowledgment.
fn has_unacknowledged_secretary_records(reg: &Registration) -> bool {
    if reg.resolutions_docs.is_empty() {
        return false;
    }
    match reg.secretary_records_noted_at {
        None => true,
        Some(noted_at) => reg
            .resolutions_docs
            .iter()
            .any(|doc| doc.uploaded_at > noted_at),
    }
}

// =============================================================================
// FILTER COUNTS
// =============================================================================

/// Per-filter record counts, for dashboard tab badges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct FilterCounts {
    pub all: usize,
    pub pinned: usize,
    pub booked: usize,
    pub step1: usize,
    pub step2: usize,
    pub step3: usize,
    pub step4: usize,
    pub pending_reservation: usize,
    pub secretary: usize,
}

impl FilterCounts {
    /// Count how many records match each filter.
    ///
    /// Counts overlap by design: one record can contribute to several
    /// step filters.
    #[must_use]
    pub fn tally(records: &[Registration]) -> Self {
        let count = |filter: StatusFilter| records.iter().filter(|r| filter.matches(r)).count();
        Self {
            all: records.len(),
            pinned: count(StatusFilter::Pinned),
            booked: count(StatusFilter::Booked),
            step1: count(StatusFilter::Step1),
            step2: count(StatusFilter::Step2),
            step3: count(StatusFilter::Step3),
            step4: count(StatusFilter::Step4),
            pending_reservation: count(StatusFilter::PendingReservation),
            secretary: count(StatusFilter::Secretary),
        }
    }

    /// Count for a single filter.
    #[must_use]
    pub fn get(&self, filter: StatusFilter) -> usize {
        match filter {
            StatusFilter::All => self.all,
            StatusFilter::Pinned => self.pinned,
            StatusFilter::Booked => self.booked,
            StatusFilter::Step1 => self.step1,
            StatusFilter::Step2 => self.step2,
            StatusFilter::Step3 => self.step3,
            StatusFilter::Step4 => self.step4,
            StatusFilter::PendingReservation => self.pending_reservation,
            StatusFilter::Secretary => self.secretary,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
