//! # Dashboard Events
//!
//! Explicit observer interface for cross-component refresh signaling.
//!
//! The dashboard this engine replaces broadcast refresh signals through
//! a global event bus; here the enclosing application shell subscribes
//! callbacks on the [`Dashboard`](crate::session::Dashboard) instead.
//! No global state is involved.

/// A change notification emitted by the dashboard session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardEvent {
    /// The full dataset was replaced by a reload.
    DatasetReplaced {
        /// Number of records in the new dataset.
        count: usize,
    },
    /// An admin acknowledged the secretary records of one registration.
    SecretaryRecordsNoted {
        /// The acknowledged registration.
        id: String,
    },
}

/// A subscribed observer callback.
///
/// Owned by the enclosing shell and handed to
/// [`Dashboard::subscribe`](crate::session::Dashboard::subscribe);
/// invoked synchronously after the corresponding mutation.
pub type DashboardObserver = Box<dyn Fn(&DashboardEvent) + Send + Sync>;
