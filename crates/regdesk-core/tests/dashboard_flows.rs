//! # Dashboard Flow Tests
//!
//! End-to-end checks over the session facade: bulk load, filter tabs,
//! free-text search, progress rendering, and the secretary
//! acknowledgment cycle — the flows the admin UI actually drives.

use regdesk_core::{
    Dashboard, Registration, ResolutionDoc, SearchQuery, StatusFilter, Timestamp,
};
use serde_json::json;

fn reg(value: serde_json::Value) -> Registration {
    serde_json::from_value(value).expect("test registration")
}

fn ids(records: &[&Registration]) -> Vec<String> {
    records.iter().map(|r| r.id.clone()).collect()
}

#[test]
fn completed_registration_reports_full_progress() {
    // A completed case whose advisory step marker lags at the start.
    let r = reg(json!({"id": "a", "status": "completed", "currentStep": "contact-details"}));
    assert_eq!(r.progress(), 100);
}

#[test]
fn documentation_stage_matches_step2_and_pending_reservation() {
    let r = reg(json!({
        "id": "a",
        "status": "documentation-processing",
        "currentStep": "company-details",
        "detailsApproved": false,
        "companyDetailsLocked": false
    }));
    assert!(StatusFilter::Step2.matches(&r));
    assert!(StatusFilter::PendingReservation.matches(&r));
    assert_eq!(r.progress(), 25);
}

#[test]
fn pinned_record_ranks_first_despite_older_timestamp() {
    let dashboard = Dashboard::with_dataset(vec![
        reg(json!({"id": "unpinned", "pinned": false, "updatedAt": "2024-06-01"})),
        reg(json!({"id": "pinned", "pinned": "1", "updatedAt": "2024-01-01"})),
    ]);
    let order: Vec<_> = dashboard
        .registrations()
        .iter()
        .map(|r| r.id.as_str())
        .collect();
    assert_eq!(order, ["pinned", "unpinned"]);
}

#[test]
fn secretary_acknowledgment_cycle() {
    let record = reg(json!({
        "id": "a",
        "resolutions_docs": [{"uploadedAt": "2024-05-01"}],
        "secretaryRecordsNotedAt": "2024-04-01"
    }));
    assert!(StatusFilter::Secretary.matches(&record));

    let mut dashboard = Dashboard::with_dataset(vec![record]);
    dashboard
        .note_secretary_records(
            "a",
            Timestamp::from_json(&json!("2024-06-01")),
        )
        .expect("note");

    let remaining = dashboard.filtered(StatusFilter::Secretary, &SearchQuery::default());
    assert!(remaining.is_empty());
}

#[test]
fn search_matches_across_the_status_field() {
    let dashboard = Dashboard::with_dataset(vec![
        reg(json!({"id": "a", "status": "Colombo-pending"})),
        reg(json!({"id": "b", "status": "completed", "companyName": "Acme"})),
    ]);
    let out = dashboard.filtered(StatusFilter::All, &SearchQuery::new("colombo"));
    assert_eq!(ids(&out), ["a"]);
}

#[test]
fn unknown_filter_key_shows_everything() {
    let dashboard = Dashboard::with_dataset(vec![
        reg(json!({"id": "a", "status": "payment-processing"})),
        reg(json!({"id": "b", "status": "completed"})),
    ]);
    // A typo'd key falls back to the `all` tab rather than an empty list.
    let filter = StatusFilter::parse("setp1");
    let out = dashboard.filtered(filter, &SearchQuery::default());
    assert_eq!(out.len(), 2);
}

#[test]
fn filter_counts_drive_tab_badges() {
    let mut newly_uploaded = reg(json!({"id": "c", "status": "completed"}));
    newly_uploaded
        .resolutions_docs
        .push(ResolutionDoc::uploaded(Timestamp::from_millis(5000)));

    let dashboard = Dashboard::with_dataset(vec![
        reg(json!({"id": "a", "status": "payment-processing", "pinned": 1})),
        reg(json!({"id": "b", "status": "documentation-processing", "companyDetailsLocked": "1"})),
        newly_uploaded,
    ]);

    let counts = dashboard.filter_counts();
    assert_eq!(counts.all, 3);
    assert_eq!(counts.pinned, 1);
    assert_eq!(counts.booked, 1);
    assert_eq!(counts.step1, 1);
    assert_eq!(counts.step2, 1);
    // Booked documentation record is not pending a reservation.
    assert_eq!(counts.pending_reservation, 0);
    assert_eq!(counts.step4, 1);
    assert_eq!(counts.secretary, 1);
}

#[test]
fn reload_replaces_dataset_wholesale() {
    let mut dashboard = Dashboard::with_dataset(vec![
        reg(json!({"id": "a"})),
        reg(json!({"id": "b"})),
    ]);
    dashboard.replace_dataset(vec![reg(json!({"id": "c", "updatedAt": "2024-01-01"}))]);

    assert_eq!(dashboard.len(), 1);
    assert!(dashboard.get("a").is_none());
    assert!(dashboard.get("c").is_some());
}
