//! # Sort/Filter Pipeline
//!
//! Composes the status classifier, free-text search, and pin-priority
//! ordering into the list the admin UI renders.
//!
//! Ordering and filtering are deliberately decoupled: ordering runs once
//! when a dataset is loaded ([`order_registrations`]), while
//! [`apply`] runs on every filter click or search keystroke over the
//! already-ordered list. Both are pure; applying the pipeline twice with
//! identical arguments yields identical output.

use crate::classifier::StatusFilter;
use crate::search::SearchQuery;
use crate::types::Registration;
use std::cmp::Reverse;

// =============================================================================
// LOAD-TIME ORDERING
// =============================================================================

/// Stable-sort a full dataset: pinned records first, then descending by
/// recency (`max(updatedAt, createdAt)`).
///
/// Malformed dates were normalized to epoch 0 at deserialization, so
/// they sort oldest without excluding the record. The sort is stable:
/// records tied on both keys keep their store order.
pub fn order_registrations(records: &mut [Registration]) {
    records.sort_by_key(|r| (Reverse(r.pinned.is_set()), Reverse(r.recency())));
}

// =============================================================================
// PER-QUERY FILTERING
// =============================================================================

/// Filter an ordered dataset by status category, then by free-text
/// search. `StatusFilter::All` passes every record through to the
/// search step.
#[must_use]
pub fn apply<'a>(
    records: &'a [Registration],
    filter: StatusFilter,
    query: &SearchQuery,
) -> Vec<&'a Registration> {
    records
        .iter()
        .filter(|r| filter.matches(r))
        .filter(|r| query.matches(r))
        .collect()
}

// =============================================================================
// TESTS
// =============================================================================
