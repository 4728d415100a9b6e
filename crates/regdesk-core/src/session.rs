//! # Dashboard Session
//!
//! The in-memory dataset facade the app layer operates on.
//!
//! The registration list is fetched in bulk by the (out-of-scope)
//! data-loading layer and installed here as a one-shot "replace entire
//! dataset" event; if two reloads race, last-write-wins on this
//! externally-owned state is acceptable and expected. There is no
//! partial update. All queries are pure reads over the ordered list.
//!
//! The only local mutation is [`Dashboard::note_secretary_records`],
//! which updates the in-memory acknowledgment timestamp; the durable
//! write is a side-channel call owned by the app layer.

use crate::classifier::{FilterCounts, StatusFilter};
use crate::events::{DashboardEvent, DashboardObserver};
use crate::pipeline;
use crate::search::SearchQuery;
use crate::types::{RegdeskError, Registration, Timestamp};

/// Dashboard session owning the loaded registration dataset.
#[derive(Default)]
pub struct Dashboard {
    /// The ordered dataset (pinned first, then recency descending).
    records: Vec<Registration>,
    /// Shell-owned observers, invoked synchronously on mutation.
    observers: Vec<DashboardObserver>,
}

impl Dashboard {
    /// Empty dashboard with no dataset loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Dashboard pre-loaded with a dataset (ordering applied).
    #[must_use]
    pub fn with_dataset(records: Vec<Registration>) -> Self {
        let mut dashboard = Self::new();
        dashboard.replace_dataset(records);
        dashboard
    }

    /// Subscribe an observer to dashboard events.
    pub fn subscribe(&mut self, observer: DashboardObserver) {
        self.observers.push(observer);
    }

    fn emit(&self, event: &DashboardEvent) {
        for observer in &self.observers {
            observer(event);
        }
    }

    // =========================================================================
    // DATASET LIFECYCLE
    // =========================================================================

    /// Replace the entire dataset with a fresh bulk fetch.
    ///
    /// Applies the load-time ordering (pinned first, then recency
    /// descending) exactly once, then notifies observers.
    pub fn replace_dataset(&mut self, mut records: Vec<Registration>) {
        pipeline::order_registrations(&mut records);
        self.records = records;
        self.emit(&DashboardEvent::DatasetReplaced {
            count: self.records.len(),
        });
    }

    /// The full ordered dataset.
    #[must_use]
    pub fn registrations(&self) -> &[Registration] {
        &self.records
    }

    /// Number of loaded records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no dataset is loaded (or the dataset is empty).
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    // =========================================================================
    // QUERIES
    // =========================================================================

    /// Lookup one registration by id.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Registration> {
        self.records.iter().find(|r| r.id == id)
    }

    /// The filtered+searched list the admin UI renders.
    #[must_use]
    pub fn filtered(&self, filter: StatusFilter, query: &SearchQuery) -> Vec<&Registration> {
        pipeline::apply(&self.records, filter, query)
    }

    /// Per-filter record counts for the dashboard tabs.
    #[must_use]
    pub fn filter_counts(&self) -> FilterCounts {
        FilterCounts::tally(&self.records)
    }

    // =========================================================================
    // SECRETARY ACKNOWLEDGMENT
    // =========================================================================

    /// Record an admin acknowledgment of a registration's secretary
    /// documents on the in-memory copy.
    ///
    /// Returns `RecordNotFound` if the id is not in the loaded dataset.
    pub fn note_secretary_records(
        &mut self,
        id: &str,
        noted_at: Timestamp,
    ) -> Result<(), RegdeskError> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| RegdeskError::RecordNotFound(id.to_string()))?;

        record.secretary_records_noted_at = Some(noted_at);
        let id = record.id.clone();
        self.emit(&DashboardEvent::SecretaryRecordsNoted { id });
        Ok(())
    }
}

impl std::fmt::Debug for Dashboard {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dashboard")
            .field("records", &self.records.len())
            .field("observers", &self.observers.len())
            .finish()
    }
}

// =============================================================================
// TESTS
// =============================================================================
