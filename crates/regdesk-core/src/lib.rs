//! # regdesk-core
//!
//! The registration classification & progress engine for Regdesk - THE LOGIC.
//!
//! This crate implements the derived-state core of the company-incorporation
//! admin dashboard: it classifies registration records into the fixed set
//! of admin filter categories, derives a coarse progress percentage from
//! workflow markers, and composes classifier + free-text search +
//! pin-priority ordering into the list the UI renders.
//!
//! ## Architectural Constraints
//!
//! - Pure and synchronous: no async, no network, no storage engine
//! - Deterministic: every query is a pure function over the in-memory
//!   dataset; applying the pipeline twice yields identical output
//! - Lenient at the boundary: the upstream store serializes flags and
//!   timestamps inconsistently, so all normalization happens once in the
//!   `types` module and malformed fields default instead of erroring

// =============================================================================
// MODULES
// =============================================================================

pub mod classifier;
pub mod events;
pub mod pipeline;
pub mod progress;
pub mod search;
pub mod session;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{
    Flag, RegdeskError, Registration, RegistrationStatus, ResolutionDoc, Timestamp, WorkflowStep,
};

// =============================================================================
// RE-EXPORTS: Engine
// =============================================================================

pub use classifier::{FilterCounts, StatusFilter};
pub use events::{DashboardEvent, DashboardObserver};
pub use pipeline::{apply, order_registrations};
pub use progress::progress_percent;
pub use search::SearchQuery;
pub use session::Dashboard;
