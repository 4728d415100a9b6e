//! # Core Type Definitions
//!
//! Types for registration records as delivered by the external
//! registration store:
//! - Identifiers and workflow markers (`RegistrationStatus`, `WorkflowStep`)
//! - Loose-field boundary types (`Flag`, `Timestamp`)
//! - The `Registration` record and its `ResolutionDoc` attachments
//! - Error types (`RegdeskError`)
//!
//! ## Normalization Guarantees
//!
//! The upstream store serializes the same record through several layers,
//! so field encodings are inconsistent: boolean flags arrive as `true`,
//! `1`, or `"1"`; timestamps arrive as RFC 3339 strings, bare dates, or
//! epoch numbers. All of that is normalized HERE, once, at the serde
//! boundary. Downstream code never compares raw values, and a malformed
//! field can never reject a record — it defaults (false / first step /
//! epoch 0) instead.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

// =============================================================================
// TRUTHY FLAG
// =============================================================================

/// A boolean transmitted through a loosely-typed channel.
///
/// The storage layers upstream serialize admin flags as boolean `true`,
/// numeric `1`, or string `"1"` depending on which layer last touched the
/// record. `Flag` collapses the three representations at deserialization;
/// everything else (`false`, `0`, `"0"`, `null`, absent, `"yes"`) is false.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Flag(bool);

impl Flag {
    /// Flag normalized from a raw JSON value.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        let truthy = match value {
            Value::Bool(b) => *b,
            Value::Number(n) => n.as_i64() == Some(1) || n.as_u64() == Some(1),
            Value::String(s) => s == "1",
            _ => false,
        };
        Self(truthy)
    }

    /// Whether the flag is set.
    #[must_use]
    pub const fn is_set(self) -> bool {
        self.0
    }
}

impl From<bool> for Flag {
    fn from(b: bool) -> Self {
        Self(b)
    }
}

impl<'de> Deserialize<'de> for Flag {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

impl Serialize for Flag {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_bool(self.0)
    }
}

// =============================================================================
// TIMESTAMP
// =============================================================================

/// Threshold separating epoch-seconds from epoch-milliseconds encodings.
/// 10^12 seconds is the year 33658; 10^12 milliseconds is 2001.
const MILLIS_THRESHOLD: i64 = 1_000_000_000_000;

/// A point in time, normalized to epoch milliseconds.
///
/// Accepts RFC 3339 strings, `YYYY-MM-DD HH:MM:SS`, bare `YYYY-MM-DD`
/// dates, and integer epoch seconds or milliseconds. Anything
/// unparseable becomes [`Timestamp::EPOCH`] (oldest) — never an error,
/// so a record with a broken date still sorts and still renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    /// The zero timestamp; the fallback for missing or malformed dates.
    pub const EPOCH: Self = Self(0);

    /// Timestamp from raw epoch milliseconds.
    #[must_use]
    pub const fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Epoch milliseconds.
    #[must_use]
    pub const fn millis(self) -> i64 {
        self.0
    }

    /// Timestamp normalized from a raw JSON value.
    #[must_use]
    pub fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => Self(parse_datetime(s).unwrap_or(0)),
            Value::Number(n) => {
                let raw = n.as_i64().or_else(|| n.as_u64().map(|u| u as i64));
                match raw {
                    Some(v) if v.abs() >= MILLIS_THRESHOLD => Self(v),
                    Some(v) => Self(v.saturating_mul(1000)),
                    None => Self::EPOCH,
                }
            }
            _ => Self::EPOCH,
        }
    }
}

/// Parse a datetime string in the encodings the store is known to emit.
fn parse_datetime(s: &str) -> Option<i64> {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(s) {
        return Some(dt.timestamp_millis());
    }
    if let Ok(dt) = chrono::NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S") {
        return Some(dt.and_utc().timestamp_millis());
    }
    if let Ok(date) = chrono::NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return date
            .and_hms_opt(0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis());
    }
    None
}

impl<'de> Deserialize<'de> for Timestamp {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from_json(&value))
    }
}

impl Serialize for Timestamp {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match chrono::DateTime::from_timestamp_millis(self.0) {
            Some(dt) => {
                serializer.serialize_str(&dt.to_rfc3339_opts(chrono::SecondsFormat::Secs, true))
            }
            // Out of chrono's range; keep the raw value rather than lose it.
            None => serializer.serialize_i64(self.0),
        }
    }
}

// =============================================================================
// REGISTRATION STATUS
// =============================================================================

/// Workflow status of a registration, as reported by the store.
///
/// The store owns this field and occasionally grows new values, so
/// unrecognized statuses are carried through as [`Other`] instead of
/// being rejected — free-text search still matches on the raw string.
///
/// [`Other`]: RegistrationStatus::Other
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum RegistrationStatus {
    PaymentProcessing,
    PaymentRejected,
    DocumentationProcessing,
    IncorporationProcessing,
    DocumentsPublished,
    DocumentsSubmitted,
    Completed,
    /// Any status value this crate does not recognize, kept verbatim.
    Other(String),
}

impl RegistrationStatus {
    /// The raw wire string for this status.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::PaymentProcessing => "payment-processing",
            Self::PaymentRejected => "payment-rejected",
            Self::DocumentationProcessing => "documentation-processing",
            Self::IncorporationProcessing => "incorporation-processing",
            Self::DocumentsPublished => "documents-published",
            Self::DocumentsSubmitted => "documents-submitted",
            Self::Completed => "completed",
            Self::Other(raw) => raw,
        }
    }
}

impl Default for RegistrationStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<&str> for RegistrationStatus {
    fn from(raw: &str) -> Self {
        match raw {
            "payment-processing" => Self::PaymentProcessing,
            "payment-rejected" => Self::PaymentRejected,
            "documentation-processing" => Self::DocumentationProcessing,
            "incorporation-processing" => Self::IncorporationProcessing,
            "documents-published" => Self::DocumentsPublished,
            "documents-submitted" => Self::DocumentsSubmitted,
            "completed" => Self::Completed,
            other => Self::Other(other.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for RegistrationStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from(value.as_str().unwrap_or_default()))
    }
}

impl Serialize for RegistrationStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// =============================================================================
// WORKFLOW STEP
// =============================================================================

/// Coarse workflow stage marker.
///
/// Advisory only: independently settable from `status`, and may lag or
/// lead it. Unknown or missing values map to the first step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum WorkflowStep {
    #[default]
    ContactDetails,
    CompanyDetails,
    Documentation,
    Incorporate,
}

impl WorkflowStep {
    /// All steps in workflow order.
    pub const ORDER: [Self; 4] = [
        Self::ContactDetails,
        Self::CompanyDetails,
        Self::Documentation,
        Self::Incorporate,
    ];

    /// Zero-based position in the four-stage workflow.
    #[must_use]
    pub const fn index(self) -> u8 {
        match self {
            Self::ContactDetails => 0,
            Self::CompanyDetails => 1,
            Self::Documentation => 2,
            Self::Incorporate => 3,
        }
    }

    /// The raw wire string for this step.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ContactDetails => "contact-details",
            Self::CompanyDetails => "company-details",
            Self::Documentation => "documentation",
            Self::Incorporate => "incorporate",
        }
    }
}

impl From<&str> for WorkflowStep {
    fn from(raw: &str) -> Self {
        match raw {
            "company-details" => Self::CompanyDetails,
            "documentation" => Self::Documentation,
            "incorporate" => Self::Incorporate,
            // "contact-details" and anything unrecognized
            _ => Self::ContactDetails,
        }
    }
}

impl<'de> Deserialize<'de> for WorkflowStep {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Ok(Self::from(value.as_str().unwrap_or_default()))
    }
}

impl Serialize for WorkflowStep {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

// =============================================================================
// LENIENT FIELD HELPERS
// =============================================================================

/// Strict boolean with malformed-field recovery: boolean `true` is true,
/// any other encoding (including `1` and `"1"`) defaults to false.
///
/// Used for the admin approval gates, which — unlike [`Flag`] fields —
/// are only ever written as real booleans.
fn bool_or_false<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(matches!(value, Value::Bool(true)))
}

/// Optional text field; non-string values degrade to `None`.
fn opt_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(value.as_str().map(str::to_string))
}

/// Record identifier; numeric ids are stringified, anything else is empty.
fn id_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        _ => String::new(),
    })
}

// =============================================================================
// RESOLUTION DOCUMENT
// =============================================================================

/// A secretary resolution document uploaded against a registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct ResolutionDoc {
    /// When the document was uploaded.
    #[serde(default)]
    pub uploaded_at: Timestamp,
    /// Display name, if the upload service recorded one.
    #[serde(default, deserialize_with = "opt_string")]
    pub name: Option<String>,
}

impl ResolutionDoc {
    /// Document uploaded at the given time.
    #[must_use]
    pub fn uploaded(at: Timestamp) -> Self {
        Self {
            uploaded_at: at,
            name: None,
        }
    }
}

// =============================================================================
// REGISTRATION
// =============================================================================

/// A customer's in-progress or completed company-incorporation case.
///
/// Owned by the external registration store; this crate reads it.
/// Field names match the store's JSON exactly (camelCase, with the
/// legacy snake_case `resolutions_docs` outlier).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Registration {
    /// Opaque unique identifier.
    #[serde(default, deserialize_with = "id_string")]
    pub id: String,

    /// Workflow status, store-owned.
    #[serde(default)]
    pub status: RegistrationStatus,

    /// Advisory workflow stage marker.
    #[serde(default)]
    pub current_step: WorkflowStep,

    /// Admin approval gate for company details.
    #[serde(default, deserialize_with = "bool_or_false")]
    pub details_approved: bool,

    /// Admin approval gate for published documents.
    #[serde(default, deserialize_with = "bool_or_false")]
    pub documents_approved: bool,

    /// Company name/details reserved ("booked"). Tri-represented upstream.
    #[serde(default)]
    pub company_details_locked: Flag,

    /// Admin-marked priority flag for list ordering. Tri-represented upstream.
    #[serde(default)]
    pub pinned: Flag,

    /// Uploaded secretary resolution documents, in upload order.
    #[serde(default, rename = "resolutions_docs")]
    pub resolutions_docs: Vec<ResolutionDoc>,

    /// Last time an admin acknowledged new secretary documents.
    #[serde(default)]
    pub secretary_records_noted_at: Option<Timestamp>,

    /// Last store-side mutation.
    #[serde(default)]
    pub updated_at: Timestamp,

    /// Record creation.
    #[serde(default)]
    pub created_at: Timestamp,

    // Free-text fields covered by dashboard search.
    #[serde(default, deserialize_with = "opt_string")]
    pub company_name_english: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub company_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub customer_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub contact_person_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub contact_person_email: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub user_name: Option<String>,
    #[serde(default, deserialize_with = "opt_string")]
    pub user_email: Option<String>,
}

impl Registration {
    /// Most recent of `updatedAt`/`createdAt`; the recency key for list
    /// ordering. Malformed dates already collapsed to epoch 0.
    #[must_use]
    pub fn recency(&self) -> Timestamp {
        self.updated_at.max(self.created_at)
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors surfaced by the Regdesk app seams.
///
/// The classification/progress/pipeline path itself has no fatal error
/// class: malformed fields are normalized at the serde boundary and
/// unknown filter keys fall back to match-all. These variants cover the
/// session lookup seam and the file/network edges in the binary.
#[derive(Debug, Error)]
pub enum RegdeskError {
    /// The referenced registration is not in the loaded dataset.
    #[error("Registration not found: {0}")]
    RecordNotFound(String),

    /// A serialization or deserialization error occurred.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(String),

    /// A request was structurally invalid.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn flag(value: Value) -> bool {
        Flag::from_json(&value).is_set()
    }

    #[test]
    fn flag_truthy_representations_agree() {
        assert!(flag(json!(true)));
        assert!(flag(json!(1)));
        assert!(flag(json!("1")));
    }

    #[test]
    fn flag_falsy_representations_agree() {
        assert!(!flag(json!(false)));
        assert!(!flag(json!(0)));
        assert!(!flag(json!("0")));
        assert!(!flag(json!(null)));
        assert!(!flag(json!("yes")));
        assert!(!flag(json!(2)));
        assert!(!flag(json!([1])));
    }

    #[test]
    fn flag_deserializes_inside_records() {
        let reg: Registration =
            serde_json::from_value(json!({"id": "r1", "pinned": "1", "companyDetailsLocked": 1}))
                .expect("deserialize");
        assert!(reg.pinned.is_set());
        assert!(reg.company_details_locked.is_set());
    }

    #[test]
    fn timestamp_parses_known_encodings() {
        let day_millis = 1_704_067_200_000; // 2024-01-01T00:00:00Z
        assert_eq!(
            Timestamp::from_json(&json!("2024-01-01")).millis(),
            day_millis
        );
        assert_eq!(
            Timestamp::from_json(&json!("2024-01-01T00:00:00Z")).millis(),
            day_millis
        );
        assert_eq!(
            Timestamp::from_json(&json!("2024-01-01 00:00:00")).millis(),
            day_millis
        );
        assert_eq!(
            Timestamp::from_json(&json!(1_704_067_200)).millis(),
            day_millis
        );
        assert_eq!(Timestamp::from_json(&json!(day_millis)).millis(), day_millis);
    }

    #[test]
    fn timestamp_malformed_is_epoch() {
        assert_eq!(Timestamp::from_json(&json!("not a date")), Timestamp::EPOCH);
        assert_eq!(Timestamp::from_json(&json!(null)), Timestamp::EPOCH);
        assert_eq!(Timestamp::from_json(&json!({})), Timestamp::EPOCH);
    }

    #[test]
    fn timestamp_serializes_as_rfc3339() {
        let ts = Timestamp::from_json(&json!("2024-01-01"));
        let out = serde_json::to_value(ts).expect("serialize");
        assert_eq!(out, json!("2024-01-01T00:00:00Z"));
    }

    #[test]
    fn status_round_trips_unknown_values() {
        let status = RegistrationStatus::from("Colombo-pending");
        assert_eq!(status, RegistrationStatus::Other("Colombo-pending".into()));
        assert_eq!(status.as_str(), "Colombo-pending");
    }

    #[test]
    fn status_known_values_parse() {
        assert_eq!(
            RegistrationStatus::from("payment-processing"),
            RegistrationStatus::PaymentProcessing
        );
        assert_eq!(
            RegistrationStatus::from("completed"),
            RegistrationStatus::Completed
        );
    }

    #[test]
    fn workflow_step_unknown_maps_to_first() {
        assert_eq!(WorkflowStep::from("???"), WorkflowStep::ContactDetails);
        assert_eq!(WorkflowStep::from("incorporate").index(), 3);
    }

    #[test]
    fn approval_gates_reject_tristate_encodings() {
        // detailsApproved is a real boolean upstream; "1" is a wrong type
        // and defaults to false rather than being coerced.
        let reg: Registration =
            serde_json::from_value(json!({"id": "r1", "detailsApproved": "1"}))
                .expect("deserialize");
        assert!(!reg.details_approved);

        let reg: Registration =
            serde_json::from_value(json!({"id": "r1", "detailsApproved": true}))
                .expect("deserialize");
        assert!(reg.details_approved);
    }

    #[test]
    fn registration_survives_sparse_json() {
        let reg: Registration = serde_json::from_value(json!({"id": 42})).expect("deserialize");
        assert_eq!(reg.id, "42");
        assert_eq!(reg.status, RegistrationStatus::default());
        assert_eq!(reg.current_step, WorkflowStep::ContactDetails);
        assert_eq!(reg.recency(), Timestamp::EPOCH);
        assert!(reg.resolutions_docs.is_empty());
    }

    #[test]
    fn recency_is_max_of_updated_and_created() {
        let reg: Registration = serde_json::from_value(json!({
            "id": "r1",
            "createdAt": "2024-06-01",
            "updatedAt": "2024-01-01"
        }))
        .expect("deserialize");
        assert_eq!(reg.recency(), Timestamp::from_json(&json!("2024-06-01")));
    }
}
