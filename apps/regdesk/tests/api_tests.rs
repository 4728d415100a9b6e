//! Integration tests for the Regdesk HTTP API.
//!
//! Uses axum-test to test the API handlers without starting a real
//! server. Runtime options are built directly instead of read from the
//! environment, so tests never race on env vars.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use axum::http::{HeaderValue, header};
use axum_test::TestServer;
use regdesk::api::{
    ApiOptions, AppState, DetailResponse, ErrorResponse, HealthResponse, ListResponse,
    NoteResponse, ReplaceResponse, SummaryResponse, create_router,
};
use regdesk_core::{Dashboard, Registration};
use serde_json::json;

// =============================================================================
// HELPER FUNCTIONS
// =============================================================================

/// Create a test server over a dataset, with all middleware disabled.
fn create_test_server(records: serde_json::Value) -> TestServer {
    create_test_server_with_options(records, ApiOptions::default())
}

/// Create a test server with explicit runtime options.
fn create_test_server_with_options(
    records: serde_json::Value,
    options: ApiOptions,
) -> TestServer {
    let records: Vec<Registration> = serde_json::from_value(records).unwrap();
    let state = AppState::new(Dashboard::with_dataset(records));
    TestServer::new(create_router(state, &options)).unwrap()
}

/// A small mixed dataset covering the filter categories.
fn sample_dataset() -> serde_json::Value {
    json!([
        {
            "id": "pay-1",
            "status": "payment-processing",
            "currentStep": "contact-details",
            "companyName": "Acme Ltd",
            "updatedAt": "2024-03-01"
        },
        {
            "id": "doc-1",
            "status": "documentation-processing",
            "currentStep": "company-details",
            "customerName": "Jane Doe",
            "updatedAt": "2024-05-01"
        },
        {
            "id": "done-1",
            "status": "completed",
            "currentStep": "incorporate",
            "pinned": "1",
            "resolutions_docs": [{"uploadedAt": "2024-05-01"}],
            "secretaryRecordsNotedAt": "2024-04-01",
            "updatedAt": "2024-01-01"
        }
    ])
}

// =============================================================================
// HEALTH ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_health_endpoint() {
    let server = create_test_server(json!([]));

    let response = server.get("/health").await;

    response.assert_status_ok();
    let health: HealthResponse = response.json();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
}

// =============================================================================
// LIST ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_list_defaults_to_all() {
    let server = create_test_server(sample_dataset());

    let response = server.get("/registrations").await;

    response.assert_status_ok();
    let list: ListResponse = response.json();
    assert_eq!(list.filter, "all");
    assert_eq!(list.count, 3);
}

#[tokio::test]
async fn test_list_orders_pinned_first() {
    let server = create_test_server(sample_dataset());

    let list: ListResponse = server.get("/registrations").await.json();

    // done-1 is pinned with the oldest timestamp; pin priority wins.
    assert_eq!(list.registrations[0].registration.id, "done-1");
    assert_eq!(list.registrations[1].registration.id, "doc-1");
    assert_eq!(list.registrations[2].registration.id, "pay-1");
}

#[tokio::test]
async fn test_list_filters_by_step() {
    let server = create_test_server(sample_dataset());

    let list: ListResponse = server
        .get("/registrations")
        .add_query_param("filter", "step1")
        .await
        .json();

    assert_eq!(list.filter, "step1");
    assert_eq!(list.count, 1);
    assert_eq!(list.registrations[0].registration.id, "pay-1");
}

#[tokio::test]
async fn test_list_unknown_filter_key_shows_everything() {
    let server = create_test_server(sample_dataset());

    let list: ListResponse = server
        .get("/registrations")
        .add_query_param("filter", "setp1")
        .await
        .json();

    // Unrecognized keys fall back to the "all" tab.
    assert_eq!(list.filter, "all");
    assert_eq!(list.count, 3);
}

#[tokio::test]
async fn test_list_search_spans_status_field() {
    let server = create_test_server(json!([
        {"id": "a", "status": "Colombo-pending"},
        {"id": "b", "status": "completed", "companyName": "Acme"}
    ]));

    let list: ListResponse = server
        .get("/registrations")
        .add_query_param("q", "COLOMBO")
        .await
        .json();

    assert_eq!(list.count, 1);
    assert_eq!(list.registrations[0].registration.id, "a");
}

#[tokio::test]
async fn test_list_composes_filter_and_search() {
    let server = create_test_server(sample_dataset());

    let list: ListResponse = server
        .get("/registrations")
        .add_query_param("filter", "step2")
        .add_query_param("q", "jane")
        .await
        .json();

    assert_eq!(list.count, 1);
    assert_eq!(list.registrations[0].registration.id, "doc-1");
}

#[tokio::test]
async fn test_list_carries_progress() {
    let server = create_test_server(sample_dataset());

    let list: ListResponse = server.get("/registrations").await.json();

    for view in &list.registrations {
        match view.registration.id.as_str() {
            "pay-1" => assert_eq!(view.progress, 0),
            "doc-1" => assert_eq!(view.progress, 25),
            "done-1" => assert_eq!(view.progress, 100),
            other => panic!("unexpected record {other}"),
        }
    }
}

// =============================================================================
// REPLACE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_replace_swaps_the_entire_dataset() {
    let server = create_test_server(sample_dataset());

    let response = server
        .put("/registrations")
        .json(&json!([{"id": "fresh", "status": "payment-processing"}]))
        .await;

    response.assert_status_ok();
    let replace: ReplaceResponse = response.json();
    assert!(replace.success);
    assert_eq!(replace.count, 1);

    let list: ListResponse = server.get("/registrations").await.json();
    assert_eq!(list.count, 1);
    assert_eq!(list.registrations[0].registration.id, "fresh");
}

#[tokio::test]
async fn test_replace_rejects_malformed_body() {
    let server = create_test_server(json!([]));

    let response = server
        .put("/registrations")
        .bytes(bytes::Bytes::from("{not json"))
        .content_type("application/json")
        .await;

    // Should return 4xx error for invalid JSON
    assert!(response.status_code().is_client_error());
}

#[tokio::test]
async fn test_replace_normalizes_loose_fields() {
    let server = create_test_server(json!([]));

    server
        .put("/registrations")
        .json(&json!([{
            "id": 42,
            "pinned": 1,
            "updatedAt": "not a date"
        }]))
        .await
        .assert_status_ok();

    let list: ListResponse = server.get("/registrations").await.json();
    assert_eq!(list.registrations[0].registration.id, "42");
    assert!(list.registrations[0].registration.pinned.is_set());
}

// =============================================================================
// DETAIL ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_detail_returns_match_map() {
    let server = create_test_server(sample_dataset());

    let response = server.get("/registrations/doc-1").await;

    response.assert_status_ok();
    let detail: DetailResponse = response.json();
    assert_eq!(detail.view.registration.id, "doc-1");
    assert_eq!(detail.view.progress, 25);
    assert_eq!(detail.matches["step2"], true);
    assert_eq!(detail.matches["pending-reservation"], true);
    assert_eq!(detail.matches["step1"], false);
}

#[tokio::test]
async fn test_detail_unknown_id_is_not_found() {
    let server = create_test_server(sample_dataset());

    let response = server.get("/registrations/ghost").await;

    response.assert_status_not_found();
}

// =============================================================================
// NOTE ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_note_clears_secretary_filter() {
    let server = create_test_server(sample_dataset());

    // done-1 has a document uploaded after the last acknowledgment.
    let before: SummaryResponse = server.get("/summary").await.json();
    assert_eq!(before.counts.secretary, 1);

    let response = server
        .post("/registrations/done-1/note")
        .json(&json!({"notedAt": "2024-06-01"}))
        .await;

    response.assert_status_ok();
    let note: NoteResponse = response.json();
    assert!(note.success);
    assert_eq!(note.id, "done-1");

    let after: SummaryResponse = server.get("/summary").await.json();
    assert_eq!(after.counts.secretary, 0);
}

#[tokio::test]
async fn test_note_without_timestamp_uses_server_clock() {
    let server = create_test_server(sample_dataset());

    let note: NoteResponse = server
        .post("/registrations/done-1/note")
        .json(&json!({}))
        .await
        .json();

    assert!(note.success);
    // The server stamped "now", which is well past the 2024 uploads.
    let detail: DetailResponse = server.get("/registrations/done-1").await.json();
    assert_eq!(detail.matches["secretary"], false);
}

#[tokio::test]
async fn test_note_unknown_id_is_not_found() {
    let server = create_test_server(sample_dataset());

    let response = server
        .post("/registrations/ghost/note")
        .json(&json!({}))
        .await;

    // Same error body shape as the detail endpoint's 404.
    response.assert_status_not_found();
    let error: ErrorResponse = response.json();
    assert!(!error.success);
    assert!(error.error.contains("ghost"));
}

// =============================================================================
// SUMMARY ENDPOINT TESTS
// =============================================================================

#[tokio::test]
async fn test_summary_counts_tabs() {
    let server = create_test_server(sample_dataset());

    let summary: SummaryResponse = server.get("/summary").await.json();

    assert_eq!(summary.total, 3);
    assert_eq!(summary.counts.all, 3);
    assert_eq!(summary.counts.pinned, 1);
    assert_eq!(summary.counts.step1, 1);
    assert_eq!(summary.counts.step2, 1);
    assert_eq!(summary.counts.pending_reservation, 1);
    assert_eq!(summary.counts.step4, 1);
}

// =============================================================================
// AUTHENTICATION TESTS
// =============================================================================

fn auth_options(key: &str) -> ApiOptions {
    ApiOptions {
        api_key: Some(key.to_string()),
        ..ApiOptions::default()
    }
}

#[tokio::test]
async fn test_auth_rejects_missing_header() {
    let server = create_test_server_with_options(json!([]), auth_options("secret"));

    let response = server.get("/summary").await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_auth_rejects_wrong_key() {
    let server = create_test_server_with_options(json!([]), auth_options("secret"));

    let response = server
        .get("/summary")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer wrong"),
        )
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_auth_accepts_bearer_key() {
    let server = create_test_server_with_options(json!([]), auth_options("secret"));

    let response = server
        .get("/summary")
        .add_header(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer secret"),
        )
        .await;

    response.assert_status_ok();
}

#[tokio::test]
async fn test_auth_exempts_health() {
    let server = create_test_server_with_options(json!([]), auth_options("secret"));

    let response = server.get("/health").await;

    response.assert_status_ok();
}
