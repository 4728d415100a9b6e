//! # Free-Text Search
//!
//! Case-insensitive substring search across the registration fields the
//! dashboard exposes. A record matches if ANY covered field contains the
//! query; the raw status string is a covered field, so searching
//! "colombo" finds a record whose status is `Colombo-pending`.

use crate::types::Registration;

/// A normalized search query.
///
/// Trimmed and lowercased once at construction; matching is a plain
/// substring test per field after lowercasing the field value.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    /// Build a query from raw user input.
    #[must_use]
    pub fn new(raw: &str) -> Self {
        Self {
            needle: raw.trim().to_lowercase(),
        }
    }

    /// An empty query matches every record.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    /// The normalized needle.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.needle
    }

    /// Whether any covered field of the registration contains the query.
    #[must_use]
    pub fn matches(&self, reg: &Registration) -> bool {
        if self.is_empty() {
            return true;
        }

        let text_fields = [
            reg.company_name_english.as_deref(),
            reg.company_name.as_deref(),
            reg.customer_name.as_deref(),
            reg.contact_person_name.as_deref(),
            reg.contact_person_email.as_deref(),
            reg.user_name.as_deref(),
            reg.user_email.as_deref(),
            Some(reg.status.as_str()),
        ];

        text_fields
            .into_iter()
            .flatten()
            .any(|field| field.to_lowercase().contains(&self.needle))
    }
}

// =============================================================================
// TESTS
// =============================================================================
