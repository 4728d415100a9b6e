//! # API Request/Response Types
//!
//! JSON structures for the HTTP API. Registration payloads reuse the
//! core record shape verbatim — field names must match the external
//! store exactly for classification to function — with derived values
//! (progress, filter matches) layered alongside.

use regdesk_core::{FilterCounts, Registration, StatusFilter, Timestamp};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// =============================================================================
// HEALTH RESPONSE
// =============================================================================

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

impl Default for HealthResponse {
    fn default() -> Self {
        Self {
            status: "ok".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

// =============================================================================
// REGISTRATION VIEWS
// =============================================================================

/// A registration as rendered by the dashboard: the raw record plus its
/// derived progress percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegistrationView {
    #[serde(flatten)]
    pub registration: Registration,
    /// Derived completion percentage, in {0, 25, 50, 75, 100}.
    pub progress: u8,
}

impl From<&Registration> for RegistrationView {
    fn from(registration: &Registration) -> Self {
        Self {
            progress: registration.progress(),
            registration: registration.clone(),
        }
    }
}

/// Response for `GET /registrations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListResponse {
    /// The filter key actually applied (unknown keys resolve to "all").
    pub filter: String,
    /// The normalized search query, empty if none.
    pub query: String,
    pub count: usize,
    pub registrations: Vec<RegistrationView>,
}

/// Response for `GET /registrations/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailResponse {
    #[serde(flatten)]
    pub view: RegistrationView,
    /// Per-filter match map; overlapping matches are expected.
    pub matches: BTreeMap<String, bool>,
}

impl DetailResponse {
    /// Build the detail view, including the full filter match map.
    #[must_use]
    pub fn for_registration(registration: &Registration) -> Self {
        let matches = StatusFilter::ALL_FILTERS
            .into_iter()
            .map(|f| (f.as_key().to_string(), f.matches(registration)))
            .collect();
        Self {
            view: RegistrationView::from(registration),
            matches,
        }
    }
}

// =============================================================================
// DATASET REPLACEMENT
// =============================================================================

/// Response for `PUT /registrations`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplaceResponse {
    pub success: bool,
    /// Records in the newly installed dataset.
    pub count: usize,
}

// =============================================================================
// SECRETARY ACKNOWLEDGMENT
// =============================================================================

/// Request body for `POST /registrations/{id}/note`.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct NoteRequest {
    /// Acknowledgment timestamp; the server stamps the current time
    /// when omitted.
    #[serde(default)]
    pub noted_at: Option<Timestamp>,
}

/// Response for a successful `POST /registrations/{id}/note`.
///
/// Failures (unknown id) use the shared [`ErrorResponse`] body instead,
/// so clients see one error contract across endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteResponse {
    pub success: bool,
    pub id: String,
    /// The acknowledgment timestamp that was recorded.
    pub noted_at: Timestamp,
}

impl NoteResponse {
    /// Acknowledgment recorded for the given registration.
    pub fn success(id: impl Into<String>, noted_at: Timestamp) -> Self {
        Self {
            success: true,
            id: id.into(),
            noted_at,
        }
    }
}

// =============================================================================
// SUMMARY RESPONSE
// =============================================================================

/// Response for `GET /summary`: per-filter tab counts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub total: usize,
    pub counts: FilterCounts,
}

// =============================================================================
// GENERIC ERROR RESPONSE
// =============================================================================

/// Plain error body for 4xx responses.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

impl ErrorResponse {
    pub fn new(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            error: msg.into(),
        }
    }
}
