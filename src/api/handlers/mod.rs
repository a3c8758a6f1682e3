use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use chrono::NaiveDate;
use serde::Deserialize;

use super::extract::{Json, Query};
use crate::models::*;
use crate::service::{RetrospectiveService, ServiceError};

fn default_page_size() -> u32 {
    10
}

/// Query parameters for listing retrospectives.
#[derive(Debug, Deserialize)]
pub struct ListRetrospectivesQuery {
    /// Zero-based page number. Defaults to 0.
    #[serde(default)]
    pub page: u32,
    /// Maximum number of results per page. Defaults to 10.
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

/// Query parameters for searching retrospectives by date.
#[derive(Debug, Deserialize)]
pub struct SearchRetrospectivesQuery {
    /// ISO date (`YYYY-MM-DD`) to match exactly.
    pub date: NaiveDate,
    #[serde(default)]
    pub page: u32,
    #[serde(default = "default_page_size")]
    pub page_size: u32,
}

// ============================================================
// Health
// ============================================================

pub async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

// ============================================================
// Retrospectives
// ============================================================

pub async fn create_retrospective(
    State(service): State<RetrospectiveService>,
    Json(input): Json<CreateRetrospectiveInput>,
) -> Result<(StatusCode, Json<RetrospectiveResponse>), ServiceError> {
    service
        .create_retrospective(input)
        .map(|r| (StatusCode::CREATED, Json(r)))
}

pub async fn list_retrospectives(
    State(service): State<RetrospectiveService>,
    Query(query): Query<ListRetrospectivesQuery>,
) -> Result<Json<Page<RetrospectiveResponse>>, ServiceError> {
    service
        .get_all_retrospectives(query.page, query.page_size)
        .map(Json)
}

pub async fn search_retrospectives(
    State(service): State<RetrospectiveService>,
    Query(query): Query<SearchRetrospectivesQuery>,
) -> Result<Json<Page<RetrospectiveResponse>>, ServiceError> {
    service
        .search_retrospectives_by_date(query.date, query.page, query.page_size)
        .map(Json)
}

// ============================================================
// Feedback items
// ============================================================

pub async fn add_feedback_item(
    State(service): State<RetrospectiveService>,
    Path(name): Path<String>,
    Json(input): Json<CreateFeedbackItemInput>,
) -> Result<(StatusCode, Json<RetrospectiveResponse>), ServiceError> {
    service
        .add_feedback_item(&name, input)
        .map(|r| (StatusCode::CREATED, Json(r)))
}

/// The item id stays a raw string: ids that are not valid UUIDs are simply
/// reported as not found.
pub async fn update_feedback_item(
    State(service): State<RetrospectiveService>,
    Path((name, feedback_item_id)): Path<(String, String)>,
    Json(input): Json<UpdateFeedbackItemInput>,
) -> Result<Json<RetrospectiveResponse>, ServiceError> {
    service
        .update_feedback_item(&name, &feedback_item_id, input)
        .map(Json)
}
