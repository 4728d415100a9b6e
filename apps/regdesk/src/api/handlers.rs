//! # API Endpoint Handlers
//!
//! This module implements the actual HTTP endpoint handlers.

use super::{
    AppState,
    types::{
        DetailResponse, ErrorResponse, HealthResponse, ListResponse, NoteRequest, NoteResponse,
        RegistrationView, ReplaceResponse, SummaryResponse,
    },
};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use regdesk_core::{Registration, SearchQuery, StatusFilter, Timestamp};
use serde::Deserialize;

// =============================================================================
// HEALTH HANDLER
// =============================================================================

/// Health check endpoint.
pub async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse::default())
}

// =============================================================================
// LIST HANDLER
// =============================================================================

/// Query parameters for `GET /registrations`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListParams {
    /// Filter tab key; unknown keys resolve to "all".
    pub filter: Option<String>,
    /// Free-text search query.
    pub q: Option<String>,
}

/// The filtered+searched registration list, in dashboard order.
pub async fn list_handler(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> impl IntoResponse {
    let filter = StatusFilter::parse(params.filter.as_deref().unwrap_or("all"));
    let query = SearchQuery::new(params.q.as_deref().unwrap_or(""));

    let dashboard = state.dashboard.read().await;
    let registrations: Vec<RegistrationView> = dashboard
        .filtered(filter, &query)
        .into_iter()
        .map(RegistrationView::from)
        .collect();

    let response = ListResponse {
        filter: filter.as_key().to_string(),
        query: query.as_str().to_string(),
        count: registrations.len(),
        registrations,
    };
    (StatusCode::OK, Json(response))
}

// =============================================================================
// REPLACE HANDLER
// =============================================================================

/// Replace the entire dataset with a fresh bulk fetch.
///
/// There is no partial update: concurrent reloads are last-write-wins
/// on this externally-owned state.
pub async fn replace_handler(
    State(state): State<AppState>,
    Json(records): Json<Vec<Registration>>,
) -> impl IntoResponse {
    let mut dashboard = state.dashboard.write().await;
    dashboard.replace_dataset(records);

    let response = ReplaceResponse {
        success: true,
        count: dashboard.len(),
    };
    (StatusCode::OK, Json(response))
}

// =============================================================================
// DETAIL HANDLER
// =============================================================================

/// One registration with its progress and full per-filter match map.
pub async fn detail_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Response {
    let dashboard = state.dashboard.read().await;
    match dashboard.get(&id) {
        Some(registration) => {
            (StatusCode::OK, Json(DetailResponse::for_registration(registration))).into_response()
        }
        None => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::new(format!("Registration not found: {}", id))),
        )
            .into_response(),
    }
}

// =============================================================================
// NOTE HANDLER
// =============================================================================

/// Acknowledge a registration's secretary documents.
///
/// Updates the in-memory copy; the durable write against the store of
/// record is the caller's side-channel concern.
pub async fn note_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<NoteRequest>,
) -> Response {
    let noted_at = request
        .noted_at
        .unwrap_or_else(|| Timestamp::from_millis(chrono::Utc::now().timestamp_millis()));

    let mut dashboard = state.dashboard.write().await;
    match dashboard.note_secretary_records(&id, noted_at) {
        Ok(()) => {
            (StatusCode::OK, Json(NoteResponse::success(id, noted_at))).into_response()
        }
        Err(e) => {
            (StatusCode::NOT_FOUND, Json(ErrorResponse::new(e.to_string()))).into_response()
        }
    }
}

// =============================================================================
// SUMMARY HANDLER
// =============================================================================

/// Per-filter tab counts for the dashboard header.
pub async fn summary_handler(State(state): State<AppState>) -> impl IntoResponse {
    let dashboard = state.dashboard.read().await;
    let response = SummaryResponse {
        total: dashboard.len(),
        counts: dashboard.filter_counts(),
    };
    (StatusCode::OK, Json(response))
}
